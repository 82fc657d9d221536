use chrono::{DateTime, Utc};
use lib_core::{AppResult, ErrType};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use utoipa::ToSchema;

use super::{Datastore, DbSchema};

/// One external link inside a learning resource bundle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Content {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LearningUrl {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,

    pub category: String,
    pub main_title: String,
    #[serde(default)]
    pub main_description: String,
    #[serde(default)]
    pub contents: Vec<Content>,
    pub workspace_id: String,
    pub created_by: String,
}
impl DbSchema for LearningUrl {
    fn table_name() -> &'static str {
        "learning_urls"
    }
}
impl LearningUrl {
    pub fn key(&self) -> String {
        self.id.key().to_string()
    }
}

/// Write payload for a resource; the record key is minted on insert.
#[derive(Debug, Clone, Serialize)]
pub struct LearningUrlContent {
    pub category: String,
    pub main_title: String,
    pub main_description: String,
    pub contents: Vec<Content>,
    pub workspace_id: String,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

pub trait LearningUrlDs {
    fn get_learning_url(&self, id: &str) -> impl Future<Output = AppResult<Option<LearningUrl>>>;
    fn get_learning_urls_for_workspace(&self, workspace_id: &str)
        -> impl Future<Output = AppResult<Vec<LearningUrl>>>;
    fn insert_learning_url(&self, content: LearningUrlContent) -> impl Future<Output = AppResult<LearningUrl>>;
    fn update_learning_url(&self, id: &str, content: LearningUrlContent)
        -> impl Future<Output = AppResult<LearningUrl>>;
    fn delete_learning_url(&self, id: &str) -> impl Future<Output = AppResult<()>>;
}

impl LearningUrlDs for Datastore {
    async fn get_learning_url(&self, id: &str) -> AppResult<Option<LearningUrl>> {
        self.db
            .select(LearningUrl::get_id(id))
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to get learning url"))
    }

    async fn get_learning_urls_for_workspace(&self, workspace_id: &str) -> AppResult<Vec<LearningUrl>> {
        let mut res = self
            .db
            .query("SELECT * FROM learning_urls WHERE workspace_id = $ws ORDER BY created_at")
            .bind(("ws", workspace_id.to_string()))
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to query learning urls"))?;

        res.take(0).map_err(|err| ErrType::DbError.err(err, "Failed to read learning urls"))
    }

    async fn insert_learning_url(&self, content: LearningUrlContent) -> AppResult<LearningUrl> {
        let url: Option<LearningUrl> = self
            .db
            .create(LearningUrl::get_id(&nanoid::nanoid!(12, &super::KEY_ALPHABET)))
            .content(content)
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to insert learning url"))?;

        url.ok_or(ErrType::DbError.msg("Inserted learning url not returned"))
    }

    async fn update_learning_url(&self, id: &str, content: LearningUrlContent) -> AppResult<LearningUrl> {
        let url: Option<LearningUrl> = self
            .db
            .update(LearningUrl::get_id(id))
            .merge(content)
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to update learning url"))?;

        url.ok_or(ErrType::NotFound.msg("Learning url not found"))
    }

    async fn delete_learning_url(&self, id: &str) -> AppResult<()> {
        let _: Option<LearningUrl> = self
            .db
            .delete(LearningUrl::get_id(id))
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to delete learning url"))?;
        Ok(())
    }
}
