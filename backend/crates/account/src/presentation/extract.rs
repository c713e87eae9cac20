//! Request Extractors

use std::sync::Arc;

use axum::Json;
use axum::extract::{FromRef, FromRequest, Request};
use kernel::validation::{Validate, Validator};
use serde::de::DeserializeOwned;

use crate::error::AccountError;

/// JSON body that has passed its rule set
///
/// - body that does not decode -> `AccountError::MalformedPayload` (400)
/// - rule failures -> `AccountError::Validation` (400 with `extra`)
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + 'static,
    S: Send + Sync,
    Arc<Validator>: FromRef<S>,
{
    type Rejection = AccountError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AccountError::MalformedPayload(rejection.body_text()))?;

        Arc::<Validator>::from_ref(state).validate(&payload)?;

        Ok(Self(payload))
    }
}
