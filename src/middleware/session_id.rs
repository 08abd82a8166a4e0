use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderMap, HeaderName},
};
use uuid::Uuid;

use crate::error::ApiError;

/// Header carrying the conversation a request belongs to
pub static SESSION_ID_HEADER: HeaderName = HeaderName::from_static("sessionid");

/// Session id taken from the `SessionId` request header; 400 when absent or malformed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionIdHeader(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for SessionIdHeader
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        session_id_from_headers(&parts.headers)?
            .map(SessionIdHeader)
            .ok_or_else(|| ApiError::bad_request("Missing SessionId header"))
    }
}

/// `Ok(None)` when the header is absent, `Err` when it is present but not a UUID
pub fn session_id_from_headers(headers: &HeaderMap) -> Result<Option<Uuid>, ApiError> {
    let Some(value) = headers.get(&SESSION_ID_HEADER) else {
        return Ok(None);
    };

    value
        .to_str()
        .ok()
        .and_then(|raw| Uuid::parse_str(raw.trim()).ok())
        .map(Some)
        .ok_or_else(|| ApiError::bad_request("SessionId header must be a UUID"))
}
