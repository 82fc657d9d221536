pub mod res {
    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use utoipa::ToSchema;

    use crate::datastore::learning_url::{Content, LearningUrl};

    #[derive(Serialize, ToSchema)]
    pub struct LearningUrlResponse {
        pub id: String,
        pub created_at: DateTime<Utc>,

        pub category: String,
        pub main_title: String,
        pub main_description: String,
        pub contents: Vec<Content>,
        pub workspace_id: String,
        pub created_by: String,
    }

    impl From<LearningUrl> for LearningUrlResponse {
        fn from(url: LearningUrl) -> Self {
            Self {
                id: url.key(),
                created_at: url.created_at,
                category: url.category,
                main_title: url.main_title,
                main_description: url.main_description,
                contents: url.contents,
                workspace_id: url.workspace_id,
                created_by: url.created_by,
            }
        }
    }

    #[derive(Serialize, ToSchema)]
    pub struct ImportSummaryResponse {
        pub resources: usize,
        pub contents: usize,
    }
}

pub mod req {
    use serde::Deserialize;
    use utoipa::ToSchema;
    use validator::Validate;

    use crate::datastore::learning_url::Content;

    #[derive(Deserialize, ToSchema, Validate)]
    pub struct LearningUrlUpsertRequest {
        #[validate(length(min = 1, max = 255))]
        pub category: String,

        #[validate(length(min = 1, max = 255))]
        pub main_title: String,

        #[serde(default)]
        pub main_description: String,

        pub contents: Vec<Content>,
    }
}
