use axum::{
    extract::{Multipart, Path, State},
    routing::{get, post, put, Router},
    Extension,
};
use lib_core::{ApiError, ApiResult, ErrType, Json, ReqId};
use lib_domain::{
    dto::learning_url::{
        req::LearningUrlUpsertRequest,
        res::{ImportSummaryResponse, LearningUrlResponse},
    },
    extension::{UserId, WorkspaceCtx},
};

use crate::app::AppState;

use super::middleware;

pub fn bind_routes(app: AppState, router: Router<AppState>) -> Router<AppState> {
    let routes = Router::new()
        .route("/", get(get_learning_urls).post(create_learning_url))
        .route("/{id}", put(update_learning_url).delete(delete_learning_url))
        .route("/import", post(import_learning_urls))
        .layer(axum::middleware::from_fn_with_state(app.clone(), middleware::workspace::resolve_workspace))
        .layer(axum::middleware::from_fn_with_state(app, middleware::auth::authenticate));

    router.nest("/learning-url", routes)
}

#[utoipa::path(
    get,
    path = "/v1/learning-url",
    responses((status=200, body=Vec<LearningUrlResponse>)),
    tag = "LearningUrl",
    security(("api_key" = []))
)]
pub async fn get_learning_urls(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(ctx): Extension<WorkspaceCtx>,
) -> ApiResult<Vec<LearningUrlResponse>> {
    app.service().get_learning_urls(&ctx).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    post,
    path = "/v1/learning-url",
    responses((status=200, body=LearningUrlResponse)),
    tag = "LearningUrl",
    security(("api_key" = []))
)]
pub async fn create_learning_url(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(user_id): Extension<UserId>,
    Extension(ctx): Extension<WorkspaceCtx>,
    Json(dto): Json<LearningUrlUpsertRequest>,
) -> ApiResult<LearningUrlResponse> {
    app.service().create_learning_url(&ctx, &user_id.0, dto).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    put,
    path = "/v1/learning-url/{id}",
    responses((status=200, body=LearningUrlResponse)),
    tag = "LearningUrl",
    security(("api_key" = []))
)]
pub async fn update_learning_url(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(ctx): Extension<WorkspaceCtx>,
    Path(id): Path<String>,
    Json(dto): Json<LearningUrlUpsertRequest>,
) -> ApiResult<LearningUrlResponse> {
    app.service().update_learning_url(&ctx, &id, dto).await.map(Json).map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    delete,
    path = "/v1/learning-url/{id}",
    responses((status=200, body=lib_core::EmptyResponse)),
    tag = "LearningUrl",
    security(("api_key" = []))
)]
pub async fn delete_learning_url(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(ctx): Extension<WorkspaceCtx>,
    Path(id): Path<String>,
) -> ApiResult<lib_core::EmptyResponse> {
    app.service()
        .delete_learning_url(&ctx, &id)
        .await
        .map(|()| Json(lib_core::EmptyResponse::new(axum::http::StatusCode::OK, "Deleted")))
        .map_err(|err| ApiError(err, req_id))
}

#[utoipa::path(
    post,
    path = "/v1/learning-url/import",
    request_body(content = String, content_type = "multipart/form-data"),
    responses((status=200, body=ImportSummaryResponse)),
    tag = "LearningUrl",
    security(("api_key" = []))
)]
pub async fn import_learning_urls(
    State(app): State<AppState>,
    Extension(req_id): Extension<ReqId>,
    Extension(user_id): Extension<UserId>,
    Extension(ctx): Extension<WorkspaceCtx>,
    mut multipart: Multipart,
) -> ApiResult<ImportSummaryResponse> {
    let mut csv_bytes = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError(ErrType::InvalidBody.err(err, "Malformed multipart body"), req_id.clone()))?
    {
        if field.name() == Some("file") {
            let bytes = field
                .bytes()
                .await
                .map_err(|err| ApiError(ErrType::InvalidBody.err(err, "Failed to read uploaded file"), req_id.clone()))?;
            csv_bytes = Some(bytes);
        }
    }

    let csv_bytes = csv_bytes.ok_or(ApiError(ErrType::BadRequest.msg("Missing file field"), req_id.clone()))?;

    app.service()
        .import_learning_urls(&ctx, &user_id.0, &csv_bytes)
        .await
        .map(Json)
        .map_err(|err| ApiError(err, req_id))
}
