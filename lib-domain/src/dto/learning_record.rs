pub mod res {
    use chrono::{DateTime, Utc};
    use serde::Serialize;
    use utoipa::ToSchema;

    use crate::datastore::learning_record::{record_key, LearningRecord, RecordStatus};

    #[derive(Serialize, ToSchema)]
    pub struct LearningRecordResponse {
        /// Composite record key; clients hand it back for status updates.
        pub id: String,

        pub user_id: String,
        pub user_name: String,
        pub workspace_id: String,
        pub workspace_name: String,
        pub url_id: String,
        pub url_title: String,
        pub url: String,
        pub category: String,
        pub status: RecordStatus,
        pub click_count: u32,
        pub timestamp: DateTime<Utc>,
    }

    impl From<LearningRecord> for LearningRecordResponse {
        fn from(record: LearningRecord) -> Self {
            Self {
                id: record_key(&record.user_id, &record.url_id, &record.url),
                user_id: record.user_id,
                user_name: record.user_name,
                workspace_id: record.workspace_id,
                workspace_name: record.workspace_name,
                url_id: record.url_id,
                url_title: record.url_title,
                url: record.url,
                category: record.category,
                status: record.status,
                click_count: record.click_count,
                timestamp: record.timestamp,
            }
        }
    }
}

pub mod req {
    use serde::Deserialize;
    use utoipa::ToSchema;
    use validator::Validate;

    use crate::datastore::learning_record::RecordStatus;

    #[derive(Deserialize, ToSchema, Validate)]
    pub struct ClickRequest {
        #[validate(length(min = 1))]
        pub url_id: String,

        #[validate(url)]
        pub url: String,
    }

    /// Composite record keys contain URL characters, so status updates
    /// carry the id in the body instead of the path.
    #[derive(Deserialize, ToSchema, Validate)]
    pub struct StatusUpdateRequest {
        #[validate(length(min = 1))]
        pub id: String,

        pub status: RecordStatus,
    }
}
