//! Request extractors that validate input before any store access.

use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::{header, request::Parts, HeaderMap},
};
use serde_json::Value;
use std::num::IntErrorKind;

use crate::error::ApiError;
use crate::users::NewUser;

/// A `{id}` path segment holding a non-negative integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i64);

/// Parse a raw path segment as a user id.
///
/// A digit string beyond `i64::MAX` is a well-formed id that no row can
/// carry, so it resolves to not found rather than a bad request.
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    match raw.parse::<i64>() {
        Ok(id) if id >= 0 => Ok(id),
        Err(e)
            if *e.kind() == IntErrorKind::PosOverflow
                && raw.bytes().all(|b| b.is_ascii_digit()) =>
        {
            Err(ApiError::IdOutOfRange(raw.to_string()))
        }
        _ => Err(ApiError::InvalidId(raw.to_string())),
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::InvalidId(e.body_text()))?;

        parse_id(&raw).map(UserId)
    }
}

/// JSON body carrying `firstName` and `lastName` strings.
///
/// Anything else (no JSON content type, malformed JSON, a non-object, a
/// missing or non-string field) is rejected with [`ApiError::InvalidBody`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPayload(pub NewUser);

/// Validate a decoded JSON body.
pub fn parse_user_body(value: &Value) -> Result<NewUser, ApiError> {
    let first_name = value.get("firstName").and_then(Value::as_str);
    let last_name = value.get("lastName").and_then(Value::as_str);

    match (first_name, last_name) {
        (Some(first), Some(last)) => Ok(NewUser {
            first_name: first.to_string(),
            last_name: last.to_string(),
        }),
        _ => Err(ApiError::InvalidBody),
    }
}

fn has_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(|mime| {
            let mime = mime.trim().to_ascii_lowercase();
            mime == "application/json" || mime.ends_with("+json")
        })
        .unwrap_or(false)
}

#[async_trait]
impl<S> FromRequest<S> for UserPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if !has_json_content_type(req.headers()) {
            return Err(ApiError::InvalidBody);
        }

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|_| ApiError::InvalidBody)?;
        let value: Value = serde_json::from_slice(&bytes).map_err(|_| ApiError::InvalidBody)?;

        parse_user_body(&value).map(UserPayload)
    }
}
