pub mod res {
    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use utoipa::ToSchema;

    use crate::datastore::workspace::{Workspace, WorkspaceInvite};

    #[derive(Serialize, ToSchema)]
    pub struct WorkspaceResponse {
        pub id: String,
        pub created_at: DateTime<Utc>,

        pub name: String,
        pub created_by: String,
        pub invite_token: Option<String>,
    }

    impl From<Workspace> for WorkspaceResponse {
        fn from(workspace: Workspace) -> Self {
            Self {
                id: workspace.key(),
                created_at: workspace.created_at,
                name: workspace.name,
                created_by: workspace.created_by,
                invite_token: workspace.invite_token,
            }
        }
    }

    #[derive(Serialize, ToSchema)]
    pub struct InviteResponse {
        pub token: String,
        pub workspace_id: String,
    }

    impl From<WorkspaceInvite> for InviteResponse {
        fn from(invite: WorkspaceInvite) -> Self {
            Self {
                token: invite.token(),
                workspace_id: invite.workspace_id,
            }
        }
    }
}

pub mod req {
    use serde::Deserialize;
    use utoipa::ToSchema;
    use validator::Validate;

    #[derive(Deserialize, ToSchema, Validate)]
    pub struct WorkspaceCreateRequest {
        #[validate(length(min = 3, max = 255))]
        pub name: String,
    }

    #[derive(Deserialize, ToSchema, Validate)]
    pub struct WorkspaceRenameRequest {
        #[validate(length(min = 3, max = 255))]
        pub name: String,
    }
}
