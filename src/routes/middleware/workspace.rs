use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
    Extension,
};
use lib_core::{ApiError, ErrType, ReqId};
use lib_domain::extension::UserId;

use crate::app::AppState;

/// Resolves the workspace named in the request header into the caller's
/// membership context. Runs after [`super::auth::authenticate`].
pub async fn resolve_workspace(
    headers: HeaderMap,
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(user_id): Extension<UserId>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let workspace_id = headers
        .get(super::X_WORKSPACE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .ok_or(ApiError(ErrType::BadRequest.msg("Missing workspace ID"), req_id.clone()))?;

    let ctx =
        app.service().workspace_ctx(&user_id.0, workspace_id).await.map_err(|err| ApiError(err, req_id))?;

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
