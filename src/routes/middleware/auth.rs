use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
    Extension,
};
use lib_core::{ApiError, AppResult, ErrType, ReqId};
use lib_domain::extension::{Claims, UserId};

use crate::app::AppState;

fn extract_bearer(headers: &HeaderMap) -> AppResult<&str> {
    let bearer_value = headers
        .get(super::AUTHORIZATION_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .ok_or(ErrType::Unauthorized.msg("Missing authorization token"))?;

    bearer_value.split(' ').next_back().ok_or(ErrType::Unauthorized.msg("Missing bearer"))
}

/// Validates the bearer token and stamps the request with the verified
/// claims plus the caller's identity subject. Profile existence is not
/// checked here; handlers that need a provisioned profile enforce it.
pub async fn authenticate(
    headers: HeaderMap,
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_bearer(&headers).map_err(|err| ApiError(err, req_id.clone()))?;

    let claims = app.auth().validate_token_for_claims(token).map_err(|err| ApiError(err, req_id))?;

    req.extensions_mut().insert(UserId(Arc::from(claims.sub.as_str())));
    req.extensions_mut().insert(Claims(claims));

    Ok(next.run(req).await)
}
