pub mod auth;
pub mod workspace;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const X_WORKSPACE_HEADER: &str = "X-Workspace-ID";
