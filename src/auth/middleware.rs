//! Bearer-token gate for protected routes.
//!
//! A request either carries a verifiable token and is forwarded with its
//! [`Claims`] in the extensions, or it is answered with 401 right here.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use super::token::{Claims, TokenIssuer};
use crate::error::{Error, Result};

/// Extracts the token from the `Authorization` header.
///
/// Both `Bearer <token>` and a bare `<token>` are accepted: the token is the
/// last whitespace-separated segment of the value.
pub fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or_else(|| Error::rejected("Missing token"))?;

    let value = value
        .to_str()
        .map_err(|_| Error::rejected("Invalid token"))?;

    value
        .split_whitespace()
        .last()
        .ok_or_else(|| Error::rejected("Missing token"))
}

/// Authentication middleware
pub async fn require_token(
    State(issuer): State<TokenIssuer>,
    mut request: Request,
    next: Next,
) -> Result<Response> {
    let claims: Claims = {
        let token = bearer_token(request.headers())?;
        issuer.verify(token).map_err(|e| {
            tracing::debug!("token rejected: {}", e);
            Error::rejected("Invalid token")
        })?
    };

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
