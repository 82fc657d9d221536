pub mod res {
    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use utoipa::ToSchema;

    use crate::datastore::user::{Membership, User};

    #[derive(Debug, Serialize, ToSchema)]
    pub struct UserResponse {
        pub id: String,
        pub created_at: DateTime<Utc>,

        pub name: String,
        pub email: String,
        pub is_admin: bool,
        pub workspaces: Vec<Membership>,
    }

    impl From<User> for UserResponse {
        fn from(user: User) -> Self {
            Self {
                id: user.key(),
                created_at: user.created_at,
                name: user.name,
                email: user.email,
                is_admin: user.is_admin,
                workspaces: user.workspaces,
            }
        }
    }
}

pub mod req {
    use serde::Deserialize;
    use utoipa::ToSchema;
    use validator::Validate;

    use crate::datastore::user::Role;

    #[derive(Deserialize, ToSchema, Validate)]
    pub struct ProvisionUserRequest {
        #[validate(length(min = 1, max = 255))]
        pub name: String,
    }

    #[derive(Deserialize, ToSchema, Validate)]
    pub struct UpdateProfileRequest {
        #[validate(length(min = 1, max = 255))]
        pub name: String,
    }

    #[derive(Deserialize, ToSchema, Validate)]
    pub struct MembershipUpdateRequest {
        #[validate(length(min = 1))]
        pub workspace_id: String,

        pub role: Role,
    }

    #[derive(Deserialize, ToSchema, Validate)]
    pub struct MembershipRemoveRequest {
        #[validate(length(min = 1))]
        pub workspace_id: String,
    }
}
