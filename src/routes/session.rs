use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put, Router},
    Extension,
};
use lib_core::{ApiError, ApiResult, EmptyResponse, Json, ReqId};
use lib_domain::{
    dto::session::{req::SetActiveRequest, res::SessionResponse},
    extension::Claims,
};

use crate::app::AppState;

use super::middleware;

pub fn bind_routes(app: AppState, router: Router<AppState>) -> Router<AppState> {
    let routes = Router::new()
        .route("/", get(get_session).delete(sign_out))
        .route("/active", put(set_active_workspace))
        .layer(axum::middleware::from_fn_with_state(app, middleware::auth::authenticate));

    router.nest("/session", routes)
}

#[utoipa::path(
    get,
    path = "/v1/session",
    responses((status=200, body=SessionResponse)),
    tag = "Session",
    security(("api_key" = []))
)]
pub async fn get_session(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(claims): Extension<Claims>,
) -> ApiResult<SessionResponse> {
    app.service().get_session(&claims.0).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    put,
    path = "/v1/session/active",
    responses((status=200, body=SessionResponse)),
    tag = "Session",
    security(("api_key" = []))
)]
pub async fn set_active_workspace(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(claims): Extension<Claims>,
    Json(dto): Json<SetActiveRequest>,
) -> ApiResult<SessionResponse> {
    app.service().set_active_workspace(&claims.0, dto).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    delete,
    path = "/v1/session",
    responses((status=200, body=EmptyResponse)),
    tag = "Session",
    security(("api_key" = []))
)]
pub async fn sign_out(State(app): State<AppState>, Extension(claims): Extension<Claims>) -> ApiResult<EmptyResponse> {
    app.service().sign_out(&claims.0);
    Ok(Json(EmptyResponse::new(StatusCode::OK, "Signed out")))
}
