use axum::routing::Router;
use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};

use crate::app::AppState;

mod health;
mod learning_record;
mod learning_url;
mod middleware;
mod session;
mod user;
mod workspace;

/// Function to bind routes from:
/// - [`health`]
/// - [`session`], [`user`], [`workspace`]
/// - [`learning_url`], [`learning_record`]
pub fn bind_routes(app: AppState, router: Router<AppState>) -> Router<AppState> {
    // root level routes
    let health = health::bind_routes();

    // api level routes
    let r = session::bind_routes(app.clone(), Router::new());
    let r = user::bind_routes(app.clone(), r);
    let r = workspace::bind_routes(app.clone(), r);
    let r = learning_url::bind_routes(app.clone(), r);
    let r = learning_record::bind_routes(app, r);

    router.merge(health).nest("/v1", r)
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&ApiSecurity),
    info(
        title = "Incline API Documentation",
        description = r#"API documentation for the Incline learning platform backend"#,
        contact(name = "API Support"),
    ),
    paths(
        health::health,

        session::get_session,
        session::set_active_workspace,
        session::sign_out,

        user::provision_user,
        user::get_own_user,
        user::update_own_profile,
        user::get_platform_users,
        user::upsert_membership,
        user::remove_membership,

        workspace::create_workspace,
        workspace::get_workspaces,
        workspace::rename_workspace,
        workspace::mint_invite,
        workspace::join_workspace,

        learning_url::get_learning_urls,
        learning_url::create_learning_url,
        learning_url::update_learning_url,
        learning_url::delete_learning_url,
        learning_url::import_learning_urls,

        learning_record::record_click,
        learning_record::get_own_records,
        learning_record::set_record_status,
        learning_record::get_workspace_records,
    ),
    components(schemas(
        lib_core::EmptyResponse,

        lib_domain::datastore::user::Role,
        lib_domain::datastore::user::Membership,
        lib_domain::datastore::learning_url::Content,
        lib_domain::datastore::learning_record::RecordStatus,

        lib_domain::dto::session::req::SetActiveRequest,
        lib_domain::dto::session::res::SessionStateResponse,
        lib_domain::dto::session::res::MembershipResponse,
        lib_domain::dto::session::res::SessionResponse,

        lib_domain::dto::user::req::ProvisionUserRequest,
        lib_domain::dto::user::req::UpdateProfileRequest,
        lib_domain::dto::user::req::MembershipUpdateRequest,
        lib_domain::dto::user::req::MembershipRemoveRequest,
        lib_domain::dto::user::res::UserResponse,

        lib_domain::dto::workspace::req::WorkspaceCreateRequest,
        lib_domain::dto::workspace::req::WorkspaceRenameRequest,
        lib_domain::dto::workspace::res::WorkspaceResponse,
        lib_domain::dto::workspace::res::InviteResponse,

        lib_domain::dto::learning_url::req::LearningUrlUpsertRequest,
        lib_domain::dto::learning_url::res::LearningUrlResponse,
        lib_domain::dto::learning_url::res::ImportSummaryResponse,

        lib_domain::dto::learning_record::req::ClickRequest,
        lib_domain::dto::learning_record::req::StatusUpdateRequest,
        lib_domain::dto::learning_record::res::LearningRecordResponse,
    )),
    servers()
)]
pub struct ApiDoc;

struct ApiSecurity;

impl Modify for ApiSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new(middleware::AUTHORIZATION_HEADER))),
            )
        }
    }
}
