//! Bearer token authentication middleware.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::BEARER_TOKEN_PREFIX;
use crate::errors::AppError;

/// Bearer token authentication middleware.
///
/// Verifies the token from the Authorization header, then injects the
/// resulting [`Principal`](crate::domain::Principal) into the request
/// extensions for handlers to extract.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or(AppError::Unauthorized)?;

    let token = auth_header
        .strip_prefix(BEARER_TOKEN_PREFIX)
        .ok_or(AppError::Unauthorized)?;

    let principal = state.auth_service.verify_token(token)?;
    tracing::debug!(principal = %principal.id, role = %principal.role(), "Authenticated");

    request.extensions_mut().insert(principal);

    Ok(next.run(request).await)
}
