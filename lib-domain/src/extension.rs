use std::sync::Arc;

use lib_core::identity::TokenClaims;

use crate::datastore::user::Role;

#[repr(transparent)]
#[derive(Clone)]
pub struct Claims(pub TokenClaims);

/// Identity-provider subject of the authenticated caller.
#[repr(transparent)]
pub struct UserId(pub Arc<str>);
impl Clone for UserId {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

/// Workspace the request acts under, with the caller's role in it. For
/// platform admins acting under the sentinel this carries the sentinel
/// id and the admin role.
pub struct WorkspaceCtx {
    pub workspace_id: Arc<str>,
    pub role: Role,
}
impl Clone for WorkspaceCtx {
    fn clone(&self) -> Self {
        Self {
            workspace_id: Arc::clone(&self.workspace_id),
            role: self.role,
        }
    }
}
