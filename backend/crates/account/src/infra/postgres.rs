//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::error::integrity::IntegrityTranslator;
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::user::{LoginRecord, NewUser, User};
use crate::domain::repository::UserRepository;
use crate::error::{AccountError, AccountResult};

/// Table-wide unique constraint on phone number; soft-deleted rows still hold
/// their number
pub const PHONE_NUMBER_UNIQUE_CONSTRAINT: &str = "users_unique_phone_number_key";

/// Constraint name -> user-facing message for the `users` table
pub const USER_CONSTRAINTS: IntegrityTranslator = IntegrityTranslator::new(&[(
    PHONE_NUMBER_UNIQUE_CONSTRAINT,
    "phone number is already registered",
)]);

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn storage_error(err: sqlx::Error) -> AccountError {
    AccountError::Storage(USER_CONSTRAINTS.translate_err(err))
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AccountResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (
                user_id,
                full_name,
                phone_number,
                password_hash
            ) VALUES ($1, $2, $3, $4)
            RETURNING
                user_id,
                full_name,
                phone_number,
                password_hash,
                created_at,
                updated_at
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.full_name)
        .bind(&user.phone_number)
        .bind(user.password_hash.as_phc_string())
        .fetch_one(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.into_user())
    }

    async fn find_login_by_phone_number(
        &self,
        phone_number: &str,
    ) -> AccountResult<Option<LoginRecord>> {
        let row = sqlx::query_as::<_, LoginRow>(
            r#"
            SELECT
                user_id,
                full_name,
                password_hash
            FROM users
            WHERE phone_number = $1
              AND deleted_at IS NULL
            "#,
        )
        .bind(phone_number)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(LoginRow::into_record))
    }

    async fn find_by_id(&self, user_id: &UserId) -> AccountResult<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT
                user_id,
                full_name,
                phone_number,
                password_hash,
                created_at,
                updated_at
            FROM users
            WHERE user_id = $1
              AND deleted_at IS NULL
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        Ok(row.map(UserRow::into_user))
    }

    async fn update(&self, user: &User) -> AccountResult<User> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            UPDATE users SET
                full_name = $2,
                phone_number = $3,
                updated_at = $4
            WHERE user_id = $1
              AND deleted_at IS NULL
            RETURNING
                user_id,
                full_name,
                phone_number,
                password_hash,
                created_at,
                updated_at
            "#,
        )
        .bind(user.user_id.as_uuid())
        .bind(&user.full_name)
        .bind(&user.phone_number)
        .bind(user.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(storage_error)?;

        // Deleted between load and update
        row.map(UserRow::into_user).ok_or(AccountError::UserNotFound)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    full_name: String,
    phone_number: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> User {
        User {
            user_id: UserId::from_uuid(self.user_id),
            full_name: self.full_name,
            phone_number: self.phone_number,
            password_hash: HashedPassword::from_db(self.password_hash),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LoginRow {
    user_id: Uuid,
    full_name: String,
    password_hash: String,
}

impl LoginRow {
    fn into_record(self) -> LoginRecord {
        LoginRecord {
            user_id: UserId::from_uuid(self.user_id),
            full_name: self.full_name,
            password_hash: HashedPassword::from_db(self.password_hash),
        }
    }
}
