use axum::{
    extract::State,
    routing::{get, post, Router},
    Extension,
};
use lib_core::{ApiError, ApiResult, Json, ReqId};
use lib_domain::{
    dto::learning_record::{
        req::{ClickRequest, StatusUpdateRequest},
        res::LearningRecordResponse,
    },
    extension::{UserId, WorkspaceCtx},
};

use crate::app::AppState;

use super::middleware;

pub fn bind_routes(app: AppState, router: Router<AppState>) -> Router<AppState> {
    let scoped = Router::new()
        .route("/click", post(record_click))
        .route("/workspace", get(get_workspace_records))
        .layer(axum::middleware::from_fn_with_state(app.clone(), middleware::workspace::resolve_workspace));

    let routes = Router::new()
        .route("/", get(get_own_records).patch(set_record_status))
        .merge(scoped)
        .layer(axum::middleware::from_fn_with_state(app, middleware::auth::authenticate));

    router.nest("/learning-record", routes)
}

#[utoipa::path(
    post,
    path = "/v1/learning-record/click",
    responses((status=200, body=LearningRecordResponse)),
    tag = "LearningRecord",
    security(("api_key" = []))
)]
pub async fn record_click(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(user_id): Extension<UserId>,
    Extension(ctx): Extension<WorkspaceCtx>,
    Json(dto): Json<ClickRequest>,
) -> ApiResult<LearningRecordResponse> {
    app.service().record_click(&ctx, &user_id.0, dto).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    get,
    path = "/v1/learning-record",
    responses((status=200, body=Vec<LearningRecordResponse>)),
    tag = "LearningRecord",
    security(("api_key" = []))
)]
pub async fn get_own_records(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(user_id): Extension<UserId>,
) -> ApiResult<Vec<LearningRecordResponse>> {
    app.service().get_own_records(&user_id.0).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    patch,
    path = "/v1/learning-record",
    responses((status=200, body=LearningRecordResponse)),
    tag = "LearningRecord",
    security(("api_key" = []))
)]
pub async fn set_record_status(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(user_id): Extension<UserId>,
    Json(dto): Json<StatusUpdateRequest>,
) -> ApiResult<LearningRecordResponse> {
    app.service().set_record_status(&user_id.0, dto).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    get,
    path = "/v1/learning-record/workspace",
    responses((status=200, body=Vec<LearningRecordResponse>)),
    tag = "LearningRecord",
    security(("api_key" = []))
)]
pub async fn get_workspace_records(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(ctx): Extension<WorkspaceCtx>,
) -> ApiResult<Vec<LearningRecordResponse>> {
    app.service().get_workspace_records(&ctx).await.map(Json).map_err(|err| ApiError(err, req_id))
}
