pub mod res {
    use serde::Serialize;
    use utoipa::ToSchema;

    use crate::session::resolver::ResolvedMembership;
    use crate::datastore::user::Role;

    #[derive(Debug, Serialize, ToSchema, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum SessionStateResponse {
        Loading,
        NotProvisioned,
        Ready,
    }

    #[derive(Serialize, ToSchema, Clone)]
    pub struct MembershipResponse {
        pub workspace_id: String,
        pub workspace_name: String,
        pub role: Role,
    }

    impl From<ResolvedMembership> for MembershipResponse {
        fn from(membership: ResolvedMembership) -> Self {
            Self {
                workspace_id: membership.workspace_id,
                workspace_name: membership.workspace_name,
                role: membership.role,
            }
        }
    }

    #[derive(Serialize, ToSchema)]
    pub struct SessionResponse {
        pub state: SessionStateResponse,
        pub memberships: Vec<MembershipResponse>,
        pub is_platform_admin: bool,
        pub active: Option<MembershipResponse>,
        /// Dashboard path implied by the active role, for the post-login
        /// redirect.
        pub landing: Option<String>,
    }
}

pub mod req {
    use serde::Deserialize;
    use utoipa::ToSchema;
    use validator::Validate;

    use crate::datastore::user::Role;

    #[derive(Deserialize, ToSchema, Validate)]
    pub struct SetActiveRequest {
        #[validate(length(min = 1))]
        pub workspace_id: String,

        pub role: Role,
    }
}
