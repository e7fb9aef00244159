use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::io::rest::errors::MissingUserId;

/// Header carrying the authenticated caller, set by the gateway in front of the service
pub const USER_ID_HEADER: &str = "x-user-id";

/// The caller on whose behalf a request runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserId(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = MissingUserId;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| UserId(value.to_string()))
            .ok_or(MissingUserId)
    }
}
