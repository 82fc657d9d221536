use chrono::{DateTime, Utc};
use lib_core::{AppResult, ErrType};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

use super::{Datastore, DbSchema};

#[derive(Debug, Clone, Deserialize)]
pub struct Workspace {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,

    pub name: String,
    pub created_by: String,
    #[serde(default)]
    pub invite_token: Option<String>,
}
impl DbSchema for Workspace {
    fn table_name() -> &'static str {
        "workspaces"
    }
}
impl Workspace {
    pub fn key(&self) -> String {
        self.id.key().to_string()
    }
}

/// Shareable invite issued for a workspace. The record key doubles as
/// the invite token in the join link.
#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceInvite {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,

    pub workspace_id: String,
}
impl DbSchema for WorkspaceInvite {
    fn table_name() -> &'static str {
        "workspace_invites"
    }
}
impl WorkspaceInvite {
    pub fn token(&self) -> String {
        self.id.key().to_string()
    }
}

#[derive(Serialize)]
struct WorkspaceContent {
    name: String,
    created_by: String,
    invite_token: Option<String>,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct NamePatch {
    name: String,
}

#[derive(Serialize)]
struct InviteTokenPatch {
    invite_token: Option<String>,
}

#[derive(Serialize)]
struct InviteContent {
    workspace_id: String,
    created_at: DateTime<Utc>,
}

pub trait WorkspaceDs {
    fn get_workspace(&self, id: &str) -> impl Future<Output = AppResult<Option<Workspace>>>;
    fn insert_workspace(&self, name: &str, created_by: &str) -> impl Future<Output = AppResult<Workspace>>;
    fn update_workspace_name(&self, id: &str, name: &str) -> impl Future<Output = AppResult<Workspace>>;
    fn set_invite_token(&self, id: &str, token: Option<String>) -> impl Future<Output = AppResult<Workspace>>;
    fn get_all_workspaces(&self) -> impl Future<Output = AppResult<Vec<Workspace>>>;
    fn insert_invite(&self, workspace_id: &str) -> impl Future<Output = AppResult<WorkspaceInvite>>;
    fn get_invite(&self, token: &str) -> impl Future<Output = AppResult<Option<WorkspaceInvite>>>;
}

impl WorkspaceDs for Datastore {
    async fn get_workspace(&self, id: &str) -> AppResult<Option<Workspace>> {
        self.db
            .select(Workspace::get_id(id))
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to get workspace by id"))
    }

    async fn insert_workspace(&self, name: &str, created_by: &str) -> AppResult<Workspace> {
        let workspace: Option<Workspace> = self
            .db
            .create(Workspace::get_id(&nanoid::nanoid!(12, &super::KEY_ALPHABET)))
            .content(WorkspaceContent {
                name: name.into(),
                created_by: created_by.into(),
                invite_token: None,
                created_at: Utc::now(),
            })
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to insert workspace"))?;

        workspace.ok_or(ErrType::DbError.msg("Inserted workspace not returned"))
    }

    async fn update_workspace_name(&self, id: &str, name: &str) -> AppResult<Workspace> {
        let workspace: Option<Workspace> = self
            .db
            .update(Workspace::get_id(id))
            .merge(NamePatch {
                name: name.into(),
            })
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to rename workspace"))?;

        workspace.ok_or(ErrType::NotFound.msg("Workspace not found"))
    }

    async fn set_invite_token(&self, id: &str, token: Option<String>) -> AppResult<Workspace> {
        let workspace: Option<Workspace> = self
            .db
            .update(Workspace::get_id(id))
            .merge(InviteTokenPatch {
                invite_token: token,
            })
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to set workspace invite token"))?;

        workspace.ok_or(ErrType::NotFound.msg("Workspace not found"))
    }

    async fn get_all_workspaces(&self) -> AppResult<Vec<Workspace>> {
        self.db
            .select(Workspace::table_name())
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to list workspaces"))
    }

    async fn insert_invite(&self, workspace_id: &str) -> AppResult<WorkspaceInvite> {
        let invite: Option<WorkspaceInvite> = self
            .db
            .create(WorkspaceInvite::get_id(&nanoid::nanoid!(16, &super::KEY_ALPHABET)))
            .content(InviteContent {
                workspace_id: workspace_id.into(),
                created_at: Utc::now(),
            })
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to insert workspace invite"))?;

        invite.ok_or(ErrType::DbError.msg("Inserted invite not returned"))
    }

    async fn get_invite(&self, token: &str) -> AppResult<Option<WorkspaceInvite>> {
        self.db
            .select(WorkspaceInvite::get_id(token))
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to get workspace invite"))
    }
}
