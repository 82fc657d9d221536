use lib_core::{identity::TokenClaims, AppResult, ErrType, ErrorContext};

use crate::datastore::user::{Membership, Role, User, UserDs};
use crate::dto::user::req::{MembershipRemoveRequest, MembershipUpdateRequest, ProvisionUserRequest, UpdateProfileRequest};
use crate::dto::user::res::UserResponse;
use crate::extension::WorkspaceCtx;
use crate::session::resolver::ADMIN_WORKSPACE_ID;

use super::{require_role, Service};

impl<D: UserDs> Service<D> {
    /// First-login provisioning. Identity and email come from the
    /// verified token, never the request body. Calling it again for an
    /// existing profile returns that profile untouched.
    pub async fn provision_user(&self, claims: &TokenClaims, dto: ProvisionUserRequest) -> AppResult<UserResponse> {
        if let Some(existing) = self.ds.get_user(&claims.sub).await? {
            return Ok(existing.into());
        }

        let user = self.ds.insert_user(&claims.sub, &dto.name, &claims.email).await.context("s:provision_user")?;
        tracing::info!(identity = claims.sub, "Provisioned user profile");
        Ok(user.into())
    }

    pub async fn get_own_user(&self, identity: &str) -> AppResult<UserResponse> {
        Ok(self.require_user(identity).await?.into())
    }

    pub async fn update_own_profile(&self, identity: &str, dto: UpdateProfileRequest) -> AppResult<UserResponse> {
        Ok(self.ds.update_profile(identity, &dto.name).await?.into())
    }

    pub async fn get_platform_users(&self, ctx: &WorkspaceCtx) -> AppResult<Vec<UserResponse>> {
        require_role(ctx, &[Role::Admin])?;

        let users = self.ds.get_platform_users().await?;
        Ok(users.into_iter().map(UserResponse::from).collect())
    }

    /// Grant or change a user's role in a workspace. The target ends up
    /// with exactly one membership for that workspace; earlier
    /// duplicates are folded away by the rewrite.
    pub async fn upsert_membership(
        &self,
        ctx: &WorkspaceCtx,
        identity: &str,
        dto: MembershipUpdateRequest,
    ) -> AppResult<UserResponse> {
        require_role(ctx, &[Role::Admin, Role::Instructor])?;
        Self::require_ctx_covers(ctx, &dto.workspace_id)?;

        let target = self.target_user(identity).await?;
        let mut memberships: Vec<Membership> =
            target.workspaces.into_iter().filter(|m| m.workspace_id != dto.workspace_id).collect();
        memberships.push(Membership {
            workspace_id: dto.workspace_id,
            role: dto.role,
        });

        Ok(self.ds.set_memberships(identity, memberships).await?.into())
    }

    pub async fn remove_membership(
        &self,
        ctx: &WorkspaceCtx,
        identity: &str,
        dto: MembershipRemoveRequest,
    ) -> AppResult<UserResponse> {
        require_role(ctx, &[Role::Admin, Role::Instructor])?;
        Self::require_ctx_covers(ctx, &dto.workspace_id)?;

        let target = self.target_user(identity).await?;
        let memberships: Vec<Membership> =
            target.workspaces.into_iter().filter(|m| m.workspace_id != dto.workspace_id).collect();

        Ok(self.ds.set_memberships(identity, memberships).await?.into())
    }

    async fn target_user(&self, identity: &str) -> AppResult<User> {
        self.ds.get_user(identity).await?.ok_or(ErrType::NotFound.msg("User not found"))
    }

    /// A caller acting under the admin sentinel may touch any workspace;
    /// anyone else only the workspace their context was resolved for.
    /// The sentinel itself is never a valid membership target.
    fn require_ctx_covers(ctx: &WorkspaceCtx, workspace_id: &str) -> AppResult<()> {
        if workspace_id == ADMIN_WORKSPACE_ID {
            return Err(ErrType::BadRequest.msg("Memberships cannot target the admin workspace"));
        }
        if &*ctx.workspace_id != ADMIN_WORKSPACE_ID && &*ctx.workspace_id != workspace_id {
            return Err(ErrType::Forbidden.msg("Workspace context does not cover the target workspace"));
        }
        Ok(())
    }
}
