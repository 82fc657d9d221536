use axum::{
    extract::{Path, State},
    routing::{get, post, Router},
    Extension,
};
use lib_core::{ApiError, ApiResult, Json, ReqId};
use lib_domain::{
    dto::workspace::{
        req::{WorkspaceCreateRequest, WorkspaceRenameRequest},
        res::{InviteResponse, WorkspaceResponse},
    },
    extension::{UserId, WorkspaceCtx},
};

use crate::app::AppState;

use super::middleware;

pub fn bind_routes(app: AppState, router: Router<AppState>) -> Router<AppState> {
    let scoped = Router::new()
        .route("/", post(create_workspace).patch(rename_workspace))
        .route("/invite", post(mint_invite))
        .layer(axum::middleware::from_fn_with_state(app.clone(), middleware::workspace::resolve_workspace));

    let routes = Router::new()
        .route("/", get(get_workspaces))
        .route("/join/{token}", post(join_workspace))
        .merge(scoped)
        .layer(axum::middleware::from_fn_with_state(app, middleware::auth::authenticate));

    router.nest("/workspace", routes)
}

#[utoipa::path(
    post,
    path = "/v1/workspace",
    responses((status=200, body=WorkspaceResponse)),
    tag = "Workspace",
    security(("api_key" = []))
)]
pub async fn create_workspace(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(user_id): Extension<UserId>,
    Extension(ctx): Extension<WorkspaceCtx>,
    Json(dto): Json<WorkspaceCreateRequest>,
) -> ApiResult<WorkspaceResponse> {
    app.service().create_workspace(&ctx, &user_id.0, dto).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    get,
    path = "/v1/workspace",
    responses((status=200, body=Vec<WorkspaceResponse>)),
    tag = "Workspace",
    security(("api_key" = []))
)]
pub async fn get_workspaces(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(user_id): Extension<UserId>,
) -> ApiResult<Vec<WorkspaceResponse>> {
    app.service().get_workspaces(&user_id.0).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    patch,
    path = "/v1/workspace",
    responses((status=200, body=WorkspaceResponse)),
    tag = "Workspace",
    security(("api_key" = []))
)]
pub async fn rename_workspace(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(ctx): Extension<WorkspaceCtx>,
    Json(dto): Json<WorkspaceRenameRequest>,
) -> ApiResult<WorkspaceResponse> {
    app.service().rename_workspace(&ctx, dto).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    post,
    path = "/v1/workspace/invite",
    responses((status=200, body=InviteResponse)),
    tag = "Workspace",
    security(("api_key" = []))
)]
pub async fn mint_invite(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(ctx): Extension<WorkspaceCtx>,
) -> ApiResult<InviteResponse> {
    app.service().mint_invite(&ctx).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    post,
    path = "/v1/workspace/join/{token}",
    responses((status=200, body=WorkspaceResponse)),
    tag = "Workspace",
    security(("api_key" = []))
)]
pub async fn join_workspace(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(user_id): Extension<UserId>,
    Path(token): Path<String>,
) -> ApiResult<WorkspaceResponse> {
    app.service().join_workspace(&user_id.0, &token).await.map(Json).map_err(|err| ApiError(err, req_id))
}
