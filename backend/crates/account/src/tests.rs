//! Unit and HTTP-level tests for the Account crate
//!
//! The router is exercised end to end with `tower::ServiceExt::oneshot`
//! against an in-memory repository that reports duplicate phone numbers the
//! same way PostgreSQL does (SQLSTATE 23505 + constraint name).

#[cfg(test)]
mod support {
    use std::borrow::Cow;
    use std::error::Error;
    use std::fmt;
    use std::sync::{Arc, Mutex};

    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode, header};
    use chrono::Utc;
    use http_body_util::BodyExt;
    use kernel::error::integrity::StorageFault;
    use kernel::id::UserId;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::config::AccountConfig;
    use crate::domain::entity::user::{LoginRecord, NewUser, User};
    use crate::domain::repository::UserRepository;
    use crate::error::{AccountError, AccountResult};
    use crate::infra::postgres::{PHONE_NUMBER_UNIQUE_CONSTRAINT, USER_CONSTRAINTS};
    use crate::presentation::router::account_router_generic;

    pub const PRIVATE_KEY: &str = include_str!("../../platform/testdata/rsa_private.pem");
    pub const PUBLIC_KEY: &str = include_str!("../../platform/testdata/rsa_public.pem");

    pub const FULL_NAME: &str = "SawitPro Mania";
    pub const PASSWORD: &str = "IloveVirginCo2Nut123$";
    pub const PHONE_NUMBER: &str = "+62345678901";

    pub fn config() -> AccountConfig {
        AccountConfig::new(PRIVATE_KEY, PUBLIC_KEY).with_token_lifetime_hours(8)
    }

    // ------------------------------------------------------------------------
    // Storage doubles
    // ------------------------------------------------------------------------

    #[derive(Debug)]
    pub struct FakeDbError {
        code: &'static str,
        constraint: Option<&'static str>,
        text: &'static str,
    }

    impl fmt::Display for FakeDbError {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.text)
        }
    }

    impl Error for FakeDbError {}

    impl StorageFault for FakeDbError {
        fn sqlstate(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn constraint(&self) -> Option<&str> {
            self.constraint
        }
    }

    fn duplicate_phone_number() -> AccountError {
        AccountError::Storage(USER_CONSTRAINTS.translate_err(FakeDbError {
            code: "23505",
            constraint: Some(PHONE_NUMBER_UNIQUE_CONSTRAINT),
            text: "duplicate key value violates unique constraint \"users_unique_phone_number_key\"",
        }))
    }

    /// In-memory repository; clones share the same rows
    #[derive(Clone, Default)]
    pub struct InMemoryUserRepository {
        users: Arc<Mutex<Vec<User>>>,
    }

    impl InMemoryUserRepository {
        pub fn get(&self, user_id: &UserId) -> Option<User> {
            let users = self.users.lock().unwrap();
            users.iter().find(|u| u.user_id == *user_id).cloned()
        }

        pub fn remove(&self, user_id: &UserId) {
            self.users.lock().unwrap().retain(|u| u.user_id != *user_id);
        }

        pub fn len(&self) -> usize {
            self.users.lock().unwrap().len()
        }
    }

    impl UserRepository for InMemoryUserRepository {
        async fn create(&self, user: &NewUser) -> AccountResult<User> {
            let mut users = self.users.lock().unwrap();
            if users.iter().any(|u| u.phone_number == user.phone_number) {
                return Err(duplicate_phone_number());
            }

            let now = Utc::now();
            let stored = User {
                user_id: user.user_id,
                full_name: user.full_name.clone(),
                phone_number: user.phone_number.clone(),
                password_hash: user.password_hash.clone(),
                created_at: now,
                updated_at: now,
            };
            users.push(stored.clone());
            Ok(stored)
        }

        async fn find_login_by_phone_number(
            &self,
            phone_number: &str,
        ) -> AccountResult<Option<LoginRecord>> {
            let users = self.users.lock().unwrap();
            Ok(users
                .iter()
                .find(|u| u.phone_number == phone_number)
                .map(|u| LoginRecord {
                    user_id: u.user_id,
                    full_name: u.full_name.clone(),
                    password_hash: u.password_hash.clone(),
                }))
        }

        async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
            Ok(self.get(user_id))
        }

        async fn update(&self, user: &User) -> AccountResult<User> {
            let mut users = self.users.lock().unwrap();
            if users
                .iter()
                .any(|u| u.user_id != user.user_id && u.phone_number == user.phone_number)
            {
                return Err(duplicate_phone_number());
            }

            let slot = users
                .iter_mut()
                .find(|u| u.user_id == user.user_id)
                .ok_or(AccountError::UserNotFound)?;
            *slot = user.clone();
            Ok(slot.clone())
        }
    }

    /// Repository whose every call fails like a dropped connection
    #[derive(Clone, Default)]
    pub struct BrokenUserRepository;

    fn connection_lost() -> AccountError {
        AccountError::Storage(USER_CONSTRAINTS.translate_err(FakeDbError {
            code: "57P01",
            constraint: None,
            text: "terminating connection due to administrator command",
        }))
    }

    impl UserRepository for BrokenUserRepository {
        async fn create(&self, _user: &NewUser) -> AccountResult<User> {
            Err(connection_lost())
        }

        async fn find_login_by_phone_number(
            &self,
            _phone_number: &str,
        ) -> AccountResult<Option<LoginRecord>> {
            Err(connection_lost())
        }

        async fn find_by_id(&self, _user_id: &UserId) -> AccountResult<Option<User>> {
            Err(connection_lost())
        }

        async fn update(&self, _user: &User) -> AccountResult<User> {
            Err(connection_lost())
        }
    }

    // ------------------------------------------------------------------------
    // HTTP helpers
    // ------------------------------------------------------------------------

    pub fn app<R>(repo: R) -> Router
    where
        R: UserRepository + Sync + 'static,
    {
        account_router_generic(repo, config())
    }

    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        authorization: Option<&str>,
        body: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if body.is_some() {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
        }
        if let Some(value) = authorization {
            builder = builder.header(header::AUTHORIZATION, value);
        }

        let request = builder
            .body(Body::from(body.unwrap_or_default().to_owned()))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn register(app: &Router, full_name: &str, phone_number: &str) -> (StatusCode, Value) {
        let body = serde_json::json!({
            "full_name": full_name,
            "password": PASSWORD,
            "phone_number": phone_number,
        })
        .to_string();
        send(app, Method::POST, "/register", None, Some(&body)).await
    }

    pub async fn login(app: &Router, phone_number: &str, password: &str) -> (StatusCode, Value) {
        let body = serde_json::json!({
            "password": password,
            "phone_number": phone_number,
        })
        .to_string();
        send(app, Method::POST, "/login", None, Some(&body)).await
    }

    /// Register + login, returning (guid, bearer header value)
    pub async fn signed_in(app: &Router, phone_number: &str) -> (String, String) {
        let (status, body) = register(app, FULL_NAME, phone_number).await;
        assert_eq!(status, StatusCode::CREATED, "{body}");
        let guid = body["guid"].as_str().unwrap().to_owned();

        let (status, body) = login(app, phone_number, PASSWORD).await;
        assert_eq!(status, StatusCode::OK, "{body}");
        let bearer = format!("Bearer {}", body["token"].as_str().unwrap());

        (guid, bearer)
    }

    pub fn violations(body: &Value) -> Vec<(String, String)> {
        body["extra"]
            .as_array()
            .map(|extra| {
                extra
                    .iter()
                    .map(|v| {
                        (
                            v["field"].as_str().unwrap_or_default().to_owned(),
                            v["message"].as_str().unwrap_or_default().to_owned(),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod register_tests {
    use super::support::*;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_register_success() {
        let repo = InMemoryUserRepository::default();
        let app = app(repo.clone());

        let (status, body) = register(&app, FULL_NAME, PHONE_NUMBER).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "User registered successfully");
        assert!(uuid::Uuid::parse_str(body["guid"].as_str().unwrap()).is_ok());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_register_stores_hash_not_secret() {
        let repo = InMemoryUserRepository::default();
        let app = app(repo.clone());

        let (_, body) = register(&app, FULL_NAME, PHONE_NUMBER).await;
        let user_id = body["guid"].as_str().unwrap().parse().unwrap();
        let stored = repo.get(&user_id).unwrap();

        assert_ne!(stored.password_hash.as_phc_string(), PASSWORD);
        assert!(platform::password::verify_password(&stored.password_hash, PASSWORD));
    }

    #[tokio::test]
    async fn test_register_reports_every_violation() {
        let app = app(InMemoryUserRepository::default());
        let body = r#"{"full_name": "A", "password": "weak", "phone_number": "+44123"}"#;

        let (status, body) = send(&app, Method::POST, "/register", None, Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid request payload values");
        assert_eq!(
            violations(&body),
            [
                ("full_name".to_owned(), "min".to_owned()),
                ("phone_number".to_owned(), "phone_number".to_owned()),
                ("password".to_owned(), "min".to_owned()),
                ("password".to_owned(), "pwd".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_register_rejects_short_full_name() {
        let app = app(InMemoryUserRepository::default());

        let (status, body) = register(&app, "Sa", PHONE_NUMBER).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(violations(&body), [("full_name".to_owned(), "min".to_owned())]);
    }

    #[tokio::test]
    async fn test_register_duplicate_phone_number_is_conflict() {
        let repo = InMemoryUserRepository::default();
        let app = app(repo.clone());

        let (status, _) = register(&app, FULL_NAME, PHONE_NUMBER).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = register(&app, "Another Name", PHONE_NUMBER).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "phone number is already registered");
        assert!(body.get("extra").is_none());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_register_malformed_json() {
        let app = app(InMemoryUserRepository::default());

        let (status, body) =
            send(&app, Method::POST, "/register", None, Some("invalid json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.get("extra").is_none());
    }

    #[tokio::test]
    async fn test_register_storage_failure_hides_detail() {
        let app = app(BrokenUserRepository);

        let (status, body) = register(&app, FULL_NAME, PHONE_NUMBER).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Internal Server Error");
        assert!(!body.to_string().contains("administrator"));
    }
}

#[cfg(test)]
mod login_tests {
    use super::support::*;
    use axum::http::{Method, StatusCode};
    use platform::token;

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let app = app(InMemoryUserRepository::default());
        let (_, registered) = register(&app, FULL_NAME, PHONE_NUMBER).await;

        let (status, body) = login(&app, PHONE_NUMBER, PASSWORD).await;

        assert_eq!(status, StatusCode::OK);
        assert!(body["expired_at"].is_string());

        let claims = token::verify(body["token"].as_str().unwrap(), PUBLIC_KEY).unwrap();
        assert_eq!(claims.subject_id, registered["guid"].as_str().unwrap());
        assert_eq!(claims.display_name, FULL_NAME);
        assert_eq!(claims.exp - claims.iat, 8 * 3600);
    }

    #[tokio::test]
    async fn test_login_unknown_phone_number() {
        let app = app(InMemoryUserRepository::default());

        let (status, body) = login(&app, PHONE_NUMBER, PASSWORD).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "user is not found");
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let app = app(InMemoryUserRepository::default());
        register(&app, FULL_NAME, PHONE_NUMBER).await;

        let (status, body) = login(&app, PHONE_NUMBER, "IloveVirginCo2Nut123#").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "invalid password");
        assert!(body.get("token").is_none());
    }

    #[tokio::test]
    async fn test_login_validation() {
        let app = app(InMemoryUserRepository::default());
        let body = r#"{"password": "", "phone_number": "+44345678901"}"#;

        let (status, body) = send(&app, Method::POST, "/login", None, Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            violations(&body),
            [
                ("phone_number".to_owned(), "phone_number".to_owned()),
                ("password".to_owned(), "required".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_login_malformed_json() {
        let app = app(InMemoryUserRepository::default());

        let (status, _) = send(&app, Method::POST, "/login", None, Some("invalid json")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod bearer_tests {
    use super::support::*;
    use axum::http::{Method, StatusCode};
    use kernel::id::UserId;
    use platform::token;

    #[tokio::test]
    async fn test_missing_token_is_unauthorized() {
        let app = app(InMemoryUserRepository::default());

        let (status, _) = send(&app, Method::GET, "/users", None, None).await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_bad_tokens_are_forbidden() {
        let app = app(InMemoryUserRepository::default());

        let expired = token::issue(&UserId::new().to_string(), FULL_NAME, -1, PRIVATE_KEY).unwrap();
        let not_a_uuid = token::issue("not-a-uuid", FULL_NAME, 1, PRIVATE_KEY).unwrap();

        let cases = [
            "Bearer garbage".to_owned(),
            "Basic dXNlcjpwYXNz".to_owned(),
            format!("Bearer {}", expired.token),
            format!("Bearer {}", not_a_uuid.token),
        ];

        for authorization in &cases {
            let (status, body) =
                send(&app, Method::GET, "/users", Some(authorization), None).await;
            assert_eq!(status, StatusCode::FORBIDDEN, "{authorization}");
            assert_eq!(body["message"], "invalid token");
        }
    }

    #[tokio::test]
    async fn test_public_routes_ignore_authorization() {
        let app = app(InMemoryUserRepository::default());
        let body = format!(
            r#"{{"full_name": "{FULL_NAME}", "password": "{PASSWORD}", "phone_number": "{PHONE_NUMBER}"}}"#
        );

        let (status, _) = send(
            &app,
            Method::POST,
            "/register",
            Some("Bearer garbage"),
            Some(&body),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
    }
}

#[cfg(test)]
mod profile_tests {
    use super::support::*;
    use axum::http::{Method, StatusCode};
    use kernel::id::UserId;
    use platform::token;

    #[tokio::test]
    async fn test_get_profile() {
        let app = app(InMemoryUserRepository::default());
        let (guid, bearer) = signed_in(&app, PHONE_NUMBER).await;

        let (status, body) = send(&app, Method::GET, "/users", Some(&bearer), None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["guid"], guid.as_str());
        assert_eq!(body["full_name"], FULL_NAME);
        assert_eq!(body["phone_number"], PHONE_NUMBER);
        assert!(body["created_at"].is_string());
        assert!(body.get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_get_profile_of_removed_user() {
        let repo = InMemoryUserRepository::default();
        let app = app(repo.clone());
        let (guid, bearer) = signed_in(&app, PHONE_NUMBER).await;

        repo.remove(&guid.parse().unwrap());

        let (status, body) = send(&app, Method::GET, "/users", Some(&bearer), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "user is not found");
    }

    #[tokio::test]
    async fn test_get_profile_with_valid_token_for_unknown_user() {
        let app = app(InMemoryUserRepository::default());
        let issued = token::issue(&UserId::new().to_string(), FULL_NAME, 1, PRIVATE_KEY).unwrap();
        let bearer = format!("Bearer {}", issued.token);

        let (status, _) = send(&app, Method::GET, "/users", Some(&bearer), None).await;

        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_update_profile_is_partial() {
        let app = app(InMemoryUserRepository::default());
        let (_, bearer) = signed_in(&app, PHONE_NUMBER).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/users",
            Some(&bearer),
            Some(r#"{"full_name": "Joz Gandoz"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "user updated successfully");

        let (_, body) = send(&app, Method::GET, "/users", Some(&bearer), None).await;
        assert_eq!(body["full_name"], "Joz Gandoz");
        assert_eq!(body["phone_number"], PHONE_NUMBER);
    }

    #[tokio::test]
    async fn test_update_phone_number_then_login_with_it() {
        let app = app(InMemoryUserRepository::default());
        let (_, bearer) = signed_in(&app, PHONE_NUMBER).await;

        let (status, _) = send(
            &app,
            Method::PUT,
            "/users",
            Some(&bearer),
            Some(r#"{"phone_number": "+628123456789"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = login(&app, PHONE_NUMBER, PASSWORD).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let (status, _) = login(&app, "+628123456789", PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_to_taken_phone_number_is_conflict() {
        let app = app(InMemoryUserRepository::default());
        signed_in(&app, "+628123456789").await;
        let (_, bearer) = signed_in(&app, PHONE_NUMBER).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/users",
            Some(&bearer),
            Some(r#"{"phone_number": "+628123456789"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["message"], "phone number is already registered");
    }

    #[tokio::test]
    async fn test_update_validation() {
        let app = app(InMemoryUserRepository::default());
        let (_, bearer) = signed_in(&app, PHONE_NUMBER).await;

        let (status, body) = send(
            &app,
            Method::PUT,
            "/users",
            Some(&bearer),
            Some(r#"{"full_name": "Sa", "phone_number": "+44345678901"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            violations(&body),
            [
                ("full_name".to_owned(), "min".to_owned()),
                ("phone_number".to_owned(), "phone_number".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn test_update_with_empty_values_keeps_login_phone_number() {
        let app = app(InMemoryUserRepository::default());
        let (_, bearer) = signed_in(&app, PHONE_NUMBER).await;

        let (status, _) = send(
            &app,
            Method::PUT,
            "/users",
            Some(&bearer),
            Some(r#"{"full_name": "", "phone_number": ""}"#),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, body) = send(&app, Method::GET, "/users", Some(&bearer), None).await;
        assert_eq!(body["full_name"], FULL_NAME);
        assert_eq!(body["phone_number"], PHONE_NUMBER);

        let (status, _) = login(&app, PHONE_NUMBER, PASSWORD).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_update_requires_token() {
        let app = app(InMemoryUserRepository::default());

        let (status, _) = send(
            &app,
            Method::PUT,
            "/users",
            None,
            Some(r#"{"full_name": "Joz Gandoz"}"#),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}

#[cfg(test)]
mod error_tests {
    use crate::error::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_error_into_response_status_codes() {
        let test_cases: Vec<(AccountError, StatusCode)> = vec![
            (AccountError::UserNotFound, StatusCode::NOT_FOUND),
            (AccountError::InvalidPassword, StatusCode::BAD_REQUEST),
            (AccountError::MissingToken, StatusCode::UNAUTHORIZED),
            (AccountError::InvalidToken, StatusCode::FORBIDDEN),
            (
                AccountError::MalformedPayload("expected value".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                AccountError::Internal("test".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected_status) in test_cases {
            let response = error.into_response();
            assert_eq!(
                response.status(),
                expected_status,
                "Error should return correct status code"
            );
        }
    }
}
