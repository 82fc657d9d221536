use lib_core::{AppResult, ErrType, ErrorContext};

use crate::datastore::user::{Membership, Role, UserDs};
use crate::datastore::workspace::WorkspaceDs;
use crate::dto::workspace::req::{WorkspaceCreateRequest, WorkspaceRenameRequest};
use crate::dto::workspace::res::{InviteResponse, WorkspaceResponse};
use crate::extension::WorkspaceCtx;
use crate::session::resolver::ADMIN_WORKSPACE_ID;

use super::{require_real_workspace, require_role, Service};

impl<D: UserDs + WorkspaceDs> Service<D> {
    /// Workspaces are minted from the admin sentinel context only.
    pub async fn create_workspace(
        &self,
        ctx: &WorkspaceCtx,
        identity: &str,
        dto: WorkspaceCreateRequest,
    ) -> AppResult<WorkspaceResponse> {
        if &*ctx.workspace_id != ADMIN_WORKSPACE_ID {
            return Err(ErrType::Forbidden.msg("Only a platform admin can create workspaces"));
        }

        let workspace = self.ds.insert_workspace(&dto.name, identity).await.context("s:create_workspace")?;
        tracing::info!(workspace_id = workspace.key(), "Created workspace");
        Ok(workspace.into())
    }

    /// Platform admins see every workspace; everyone else the ones their
    /// memberships point at. Dangling memberships are skipped, duplicate
    /// ones collapse to the first occurrence.
    pub async fn get_workspaces(&self, identity: &str) -> AppResult<Vec<WorkspaceResponse>> {
        let user = self.require_user(identity).await?;

        if user.is_admin {
            let all = self.ds.get_all_workspaces().await?;
            return Ok(all.into_iter().map(WorkspaceResponse::from).collect());
        }

        let mut seen = std::collections::HashSet::new();
        let mut workspaces = Vec::new();
        for membership in &user.workspaces {
            if !seen.insert(membership.workspace_id.clone()) {
                continue;
            }
            match self.ds.get_workspace(&membership.workspace_id).await {
                Ok(Some(workspace)) => workspaces.push(workspace.into()),
                Ok(None) => {
                    tracing::debug!(workspace_id = membership.workspace_id, "Skipping dangling membership");
                }
                Err(err) => {
                    tracing::warn!(workspace_id = membership.workspace_id, ?err, "Workspace lookup failed, skipping");
                }
            }
        }
        Ok(workspaces)
    }

    pub async fn rename_workspace(&self, ctx: &WorkspaceCtx, dto: WorkspaceRenameRequest) -> AppResult<WorkspaceResponse> {
        require_role(ctx, &[Role::Admin, Role::Instructor])?;
        require_real_workspace(ctx)?;

        Ok(self.ds.update_workspace_name(&ctx.workspace_id, &dto.name).await?.into())
    }

    /// Issue a fresh invite for the context workspace. The token is also
    /// denormalized onto the workspace document so its settings screen
    /// can show the current link.
    pub async fn mint_invite(&self, ctx: &WorkspaceCtx) -> AppResult<InviteResponse> {
        require_role(ctx, &[Role::Admin, Role::Instructor])?;
        require_real_workspace(ctx)?;

        if self.ds.get_workspace(&ctx.workspace_id).await?.is_none() {
            return Err(ErrType::NotFound.msg("Workspace not found"));
        }

        let invite = self.ds.insert_invite(&ctx.workspace_id).await.context("s:mint_invite")?;
        self.ds.set_invite_token(&ctx.workspace_id, Some(invite.token())).await.context("s:mint_invite")?;
        Ok(invite.into())
    }

    /// Redeem an invite token, appending a User membership. Redeeming
    /// when already a member of that workspace changes nothing.
    pub async fn join_workspace(&self, identity: &str, token: &str) -> AppResult<WorkspaceResponse> {
        let invite = self.ds.get_invite(token).await?.ok_or(ErrType::NotFound.msg("Invite not found"))?;
        let workspace = self
            .ds
            .get_workspace(&invite.workspace_id)
            .await?
            .ok_or(ErrType::NotFound.msg("Workspace for invite no longer exists"))?;

        let user = self.require_user(identity).await?;
        if user.workspaces.iter().any(|m| m.workspace_id == invite.workspace_id) {
            return Ok(workspace.into());
        }

        let mut memberships = user.workspaces;
        memberships.push(Membership {
            workspace_id: invite.workspace_id,
            role: Role::User,
        });
        self.ds.set_memberships(identity, memberships).await?;

        tracing::info!(identity, workspace_id = workspace.key(), "User joined workspace by invite");
        Ok(workspace.into())
    }
}
