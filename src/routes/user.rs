use axum::{
    extract::{Path, State},
    routing::{get, post, put, Router},
    Extension,
};
use lib_core::{ApiError, ApiResult, Json, ReqId};
use lib_domain::{
    dto::user::{
        req::{MembershipRemoveRequest, MembershipUpdateRequest, ProvisionUserRequest, UpdateProfileRequest},
        res::UserResponse,
    },
    extension::{Claims, UserId, WorkspaceCtx},
};

use crate::app::AppState;

use super::middleware;

pub fn bind_routes(app: AppState, router: Router<AppState>) -> Router<AppState> {
    let scoped = Router::new()
        .route("/all", get(get_platform_users))
        .route("/{id}/membership", put(upsert_membership).delete(remove_membership))
        .layer(axum::middleware::from_fn_with_state(app.clone(), middleware::workspace::resolve_workspace));

    let routes = Router::new()
        .route("/", post(provision_user).get(get_own_user).patch(update_own_profile))
        .merge(scoped)
        .layer(axum::middleware::from_fn_with_state(app, middleware::auth::authenticate));

    router.nest("/user", routes)
}

#[utoipa::path(
    post,
    path = "/v1/user",
    responses((status=200, body=UserResponse)),
    tag = "User",
    security(("api_key" = []))
)]
pub async fn provision_user(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(claims): Extension<Claims>,
    Json(dto): Json<ProvisionUserRequest>,
) -> ApiResult<UserResponse> {
    app.service().provision_user(&claims.0, dto).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    get,
    path = "/v1/user",
    responses((status=200, body=UserResponse)),
    tag = "User",
    security(("api_key" = []))
)]
pub async fn get_own_user(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(user_id): Extension<UserId>,
) -> ApiResult<UserResponse> {
    app.service().get_own_user(&user_id.0).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    patch,
    path = "/v1/user",
    responses((status=200, body=UserResponse)),
    tag = "User",
    security(("api_key" = []))
)]
pub async fn update_own_profile(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(user_id): Extension<UserId>,
    Json(dto): Json<UpdateProfileRequest>,
) -> ApiResult<UserResponse> {
    app.service().update_own_profile(&user_id.0, dto).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    get,
    path = "/v1/user/all",
    responses((status=200, body=Vec<UserResponse>)),
    tag = "User",
    security(("api_key" = []))
)]
pub async fn get_platform_users(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(ctx): Extension<WorkspaceCtx>,
) -> ApiResult<Vec<UserResponse>> {
    app.service().get_platform_users(&ctx).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    put,
    path = "/v1/user/{id}/membership",
    responses((status=200, body=UserResponse)),
    tag = "User",
    security(("api_key" = []))
)]
pub async fn upsert_membership(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(ctx): Extension<WorkspaceCtx>,
    Path(id): Path<String>,
    Json(dto): Json<MembershipUpdateRequest>,
) -> ApiResult<UserResponse> {
    app.service().upsert_membership(&ctx, &id, dto).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    delete,
    path = "/v1/user/{id}/membership",
    responses((status=200, body=UserResponse)),
    tag = "User",
    security(("api_key" = []))
)]
pub async fn remove_membership(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(ctx): Extension<WorkspaceCtx>,
    Path(id): Path<String>,
    Json(dto): Json<MembershipRemoveRequest>,
) -> ApiResult<UserResponse> {
    app.service().remove_membership(&ctx, &id, dto).await.map(Json).map_err(|err| ApiError(err, req_id))
}
