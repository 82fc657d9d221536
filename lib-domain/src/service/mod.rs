use lib_core::{AppResult, ErrType};

use crate::datastore::user::{Role, User, UserDs};
use crate::datastore::Datastore;
use crate::extension::WorkspaceCtx;
use crate::session::resolver::ADMIN_WORKSPACE_ID;
use crate::session::Sessions;

mod learning_record;
mod learning_url;
mod session;
mod user;
mod workspace;

pub struct Service<D = Datastore> {
    ds: D,
    sessions: Sessions,
}

impl Service {
    pub async fn new() -> Self {
        Self {
            ds: Datastore::connect().await,
            sessions: Sessions::new(),
        }
    }
}

impl<D> Service<D> {
    pub fn with_datastore(ds: D) -> Self {
        Self {
            ds,
            sessions: Sessions::new(),
        }
    }
}

impl<D: UserDs> Service<D> {
    /// Profile lookup that distinguishes a missing document from a
    /// failed one: absent profiles surface as NotProvisioned, store
    /// failures propagate as-is.
    async fn require_user(&self, identity: &str) -> AppResult<User> {
        self.ds.get_user(identity).await?.ok_or(ErrType::NotProvisioned.msg("Profile not provisioned"))
    }
}

fn require_role(ctx: &WorkspaceCtx, allowed: &[Role]) -> AppResult<()> {
    if allowed.contains(&ctx.role) {
        Ok(())
    } else {
        Err(ErrType::Forbidden.msg(format!("Operation not allowed for role {}", ctx.role)))
    }
}

/// The admin sentinel is not a real workspace; it must never reach a
/// store query for workspace-scoped documents.
fn require_real_workspace(ctx: &WorkspaceCtx) -> AppResult<()> {
    if &*ctx.workspace_id == ADMIN_WORKSPACE_ID {
        Err(ErrType::BadRequest.msg("A real workspace must be selected"))
    } else {
        Ok(())
    }
}
