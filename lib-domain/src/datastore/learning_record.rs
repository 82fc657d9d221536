use chrono::{DateTime, Utc};
use lib_core::{AppResult, ErrType};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use utoipa::ToSchema;

use super::{Datastore, DbSchema};

#[derive(Debug, ToSchema, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "not completed")]
    NotCompleted,
}

/// Per-user, per-content interaction tracking entry.
///
/// Keyed by [`record_key`] so there is exactly one record per
/// (user, resource, content url) and concurrent writes resolve
/// last-write-wins at the store.
#[derive(Debug, Clone, Deserialize)]
pub struct LearningRecord {
    pub id: RecordId,

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
impl DbSchema for LearningRecord {
    fn table_name() -> &'static str {
        "learning_records"
    }
}
/// Composite record key for one (user, resource, content url) triple.
pub fn record_key(user_id: &str, url_id: &str, url: &str) -> String {
    format!("{user_id}|{url_id}|{url}")
}

#[derive(Debug, Clone, Serialize)]
pub struct LearningRecordContent {
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

#[derive(Serialize)]
struct StatusPatch {
    status: RecordStatus,
}

pub trait LearningRecordDs {
    fn get_record(&self, key: &str) -> impl Future<Output = AppResult<Option<LearningRecord>>>;
    fn upsert_record(&self, key: &str, content: LearningRecordContent)
        -> impl Future<Output = AppResult<LearningRecord>>;
    fn set_record_status(&self, key: &str, status: RecordStatus)
        -> impl Future<Output = AppResult<LearningRecord>>;
    fn get_records_for_user(&self, user_id: &str) -> impl Future<Output = AppResult<Vec<LearningRecord>>>;
    fn get_records_for_workspace(&self, workspace_id: &str)
        -> impl Future<Output = AppResult<Vec<LearningRecord>>>;
}

impl LearningRecordDs for Datastore {
    async fn get_record(&self, key: &str) -> AppResult<Option<LearningRecord>> {
        self.db
            .select(LearningRecord::get_id(key))
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to get learning record"))
    }

    async fn upsert_record(&self, key: &str, content: LearningRecordContent) -> AppResult<LearningRecord> {
        let record: Option<LearningRecord> = self
            .db
            .upsert(LearningRecord::get_id(key))
            .content(content)
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to upsert learning record"))?;

        record.ok_or(ErrType::DbError.msg("Upserted learning record not returned"))
    }

    async fn set_record_status(&self, key: &str, status: RecordStatus) -> AppResult<LearningRecord> {
        let record: Option<LearningRecord> = self
            .db
            .update(LearningRecord::get_id(key))
            .merge(StatusPatch {
                status,
            })
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to set learning record status"))?;

        record.ok_or(ErrType::NotFound.msg("Learning record not found"))
    }

    async fn get_records_for_user(&self, user_id: &str) -> AppResult<Vec<LearningRecord>> {
        let mut res = self
            .db
            .query("SELECT * FROM learning_records WHERE user_id = $user ORDER BY timestamp DESC")
            .bind(("user", user_id.to_string()))
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to query user learning records"))?;

        res.take(0).map_err(|err| ErrType::DbError.err(err, "Failed to read user learning records"))
    }

    async fn get_records_for_workspace(&self, workspace_id: &str) -> AppResult<Vec<LearningRecord>> {
        let mut res = self
            .db
            .query("SELECT * FROM learning_records WHERE workspace_id = $ws ORDER BY timestamp DESC")
            .bind(("ws", workspace_id.to_string()))
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to query workspace learning records"))?;

        res.take(0).map_err(|err| ErrType::DbError.err(err, "Failed to read workspace learning records"))
    }
}
