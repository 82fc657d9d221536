use std::sync::Arc;

use lib_core::{identity::TokenClaims, AppResult, ErrType};

use crate::datastore::user::{Role, UserDs};
use crate::datastore::workspace::WorkspaceDs;
use crate::dto::session::req::SetActiveRequest;
use crate::dto::session::res::{MembershipResponse, SessionResponse, SessionStateResponse};
use crate::extension::WorkspaceCtx;
use crate::session::resolver::{self, ADMIN_WORKSPACE_ID};
use crate::session::{gate, SessionState};

use super::Service;

impl<D: UserDs + WorkspaceDs> Service<D> {
    /// Run the resolution chain for the authenticated identity and
    /// return the session view: memberships, active selection (picking
    /// the default when none exists yet) and the landing path.
    pub async fn get_session(&self, claims: &TokenClaims) -> AppResult<SessionResponse> {
        let ticket = self.sessions.begin(&claims.sub);

        let state = match resolver::resolve_profile(&self.ds, &claims.sub).await? {
            Some(user) => SessionState::Ready(resolver::resolve_memberships(&self.ds, &user).await),
            None => SessionState::NotProvisioned,
        };

        if self.sessions.apply(&ticket, state) {
            if let Some(SessionState::Ready(resolved)) = self.sessions.state(&claims.sub) {
                self.sessions.select_default(&claims.sub, &resolved.memberships);
            }
        } else {
            tracing::debug!(identity = claims.sub, "Discarding superseded session resolution");
        }

        // answer from the tracker's current view; a newer concurrent
        // resolution may own it by now
        let current = self.sessions.state(&claims.sub).ok_or(ErrType::Unauthorized.msg("Session signed out"))?;
        Ok(self.build_session_response(&claims.sub, current))
    }

    /// Explicit workspace switch. The requested pair must be one of the
    /// caller's currently resolvable memberships (sentinel included).
    pub async fn set_active_workspace(&self, claims: &TokenClaims, dto: SetActiveRequest) -> AppResult<SessionResponse> {
        let user = self.require_user(&claims.sub).await?;
        let resolved = resolver::resolve_memberships(&self.ds, &user).await;

        let membership = resolved
            .memberships
            .iter()
            .find(|m| m.workspace_id == dto.workspace_id && m.role == dto.role)
            .ok_or(ErrType::Forbidden.msg("Not a member of the requested workspace"))?
            .clone();

        let ticket = self.sessions.begin(&claims.sub);
        self.sessions.apply(&ticket, SessionState::Ready(resolved));
        self.sessions.set_active(&claims.sub, membership);

        let current = self.sessions.state(&claims.sub).ok_or(ErrType::Unauthorized.msg("Session signed out"))?;
        Ok(self.build_session_response(&claims.sub, current))
    }

    fn build_session_response(&self, identity: &str, state: SessionState) -> SessionResponse {
        match state {
            SessionState::Loading => SessionResponse {
                state: SessionStateResponse::Loading,
                memberships: Vec::new(),
                is_platform_admin: false,
                active: None,
                landing: None,
            },
            SessionState::NotProvisioned => SessionResponse {
                state: SessionStateResponse::NotProvisioned,
                memberships: Vec::new(),
                is_platform_admin: false,
                active: None,
                landing: None,
            },
            SessionState::Ready(resolved) => {
                let active = self.sessions.active(identity);
                let landing = gate::dashboard_path(active.as_ref().map(|m| m.role)).to_string();
                SessionResponse {
                    state: SessionStateResponse::Ready,
                    memberships: resolved.memberships.into_iter().map(MembershipResponse::from).collect(),
                    is_platform_admin: resolved.is_platform_admin,
                    active: active.map(MembershipResponse::from),
                    landing: Some(landing),
                }
            }
        }
    }
}

impl<D: UserDs> Service<D> {
    pub fn sign_out(&self, claims: &TokenClaims) {
        self.sessions.sign_out(&claims.sub);
    }

    /// Resolve the workspace a request acts under. The sentinel id maps
    /// to platform-admin capability and is never looked up in the store;
    /// duplicate memberships resolve first-occurrence-wins.
    pub async fn workspace_ctx(&self, identity: &str, workspace_id: &str) -> AppResult<WorkspaceCtx> {
        let user = self.require_user(identity).await?;

        if workspace_id == ADMIN_WORKSPACE_ID {
            if !user.is_admin {
                return Err(ErrType::Forbidden.msg("Not a platform admin"));
            }
            return Ok(WorkspaceCtx {
                workspace_id: Arc::from(workspace_id),
                role: Role::Admin,
            });
        }

        let membership = user
            .workspaces
            .iter()
            .find(|m| m.workspace_id == workspace_id)
            .ok_or(ErrType::Forbidden.msg("Not a member of workspace"))?;

        Ok(WorkspaceCtx {
            workspace_id: Arc::from(workspace_id),
            role: membership.role,
        })
    }
}
