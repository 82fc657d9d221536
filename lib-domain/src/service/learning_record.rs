use chrono::Utc;
use lib_core::{AppResult, ErrType};

use crate::datastore::learning_record::{record_key, LearningRecordContent, LearningRecordDs, RecordStatus};
use crate::datastore::learning_url::LearningUrlDs;
use crate::datastore::user::{Role, UserDs};
use crate::datastore::workspace::WorkspaceDs;
use crate::dto::learning_record::req::{ClickRequest, StatusUpdateRequest};
use crate::dto::learning_record::res::LearningRecordResponse;
use crate::extension::WorkspaceCtx;

use super::{require_real_workspace, require_role, Service};

impl<D: UserDs + WorkspaceDs + LearningUrlDs + LearningRecordDs> Service<D> {
    /// Track one click on a content link. The (user, resource, url)
    /// triple owns exactly one record; repeat clicks bump its counter
    /// and refresh the timestamp, and a click always marks completion.
    pub async fn record_click(
        &self,
        ctx: &WorkspaceCtx,
        identity: &str,
        dto: ClickRequest,
    ) -> AppResult<LearningRecordResponse> {
        require_real_workspace(ctx)?;

        let user = self.require_user(identity).await?;
        let url = self
            .ds
            .get_learning_url(&dto.url_id)
            .await?
            .ok_or(ErrType::NotFound.msg("Learning url not found"))?;
        if url.workspace_id != *ctx.workspace_id {
            return Err(ErrType::NotFound.msg("Learning url not found"));
        }

        let workspace = self
            .ds
            .get_workspace(&ctx.workspace_id)
            .await?
            .ok_or(ErrType::NotFound.msg("Workspace not found"))?;

        let key = record_key(identity, &dto.url_id, &dto.url);
        let click_count = match self.ds.get_record(&key).await? {
            Some(existing) => existing.click_count + 1,
            None => 1,
        };

        let record = self
            .ds
            .upsert_record(&key, LearningRecordContent {
                user_id: identity.into(),
                user_name: user.name,
                workspace_id: ctx.workspace_id.to_string(),
                workspace_name: workspace.name,
                url_id: dto.url_id,
                url_title: url.main_title,
                url: dto.url,
                category: url.category,
                status: RecordStatus::Completed,
                click_count,
                timestamp: Utc::now(),
            })
            .await?;
        Ok(record.into())
    }

    /// Manual completion toggle, restricted to the caller's own record.
    pub async fn set_record_status(&self, identity: &str, dto: StatusUpdateRequest) -> AppResult<LearningRecordResponse> {
        let existing =
            self.ds.get_record(&dto.id).await?.ok_or(ErrType::NotFound.msg("Learning record not found"))?;
        if existing.user_id != identity {
            return Err(ErrType::Forbidden.msg("Cannot modify another user's learning record"));
        }

        Ok(self.ds.set_record_status(&dto.id, dto.status).await?.into())
    }

    pub async fn get_own_records(&self, identity: &str) -> AppResult<Vec<LearningRecordResponse>> {
        let records = self.ds.get_records_for_user(identity).await?;
        Ok(records.into_iter().map(LearningRecordResponse::from).collect())
    }

    /// Workspace-wide progress view for instructors and admins.
    pub async fn get_workspace_records(&self, ctx: &WorkspaceCtx) -> AppResult<Vec<LearningRecordResponse>> {
        require_role(ctx, &[Role::Admin, Role::Instructor])?;
        require_real_workspace(ctx)?;

        let records = self.ds.get_records_for_workspace(&ctx.workspace_id).await?;
        Ok(records.into_iter().map(LearningRecordResponse::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::datastore::learning_url::Content;
    use crate::datastore::mock::MockDs;
    use crate::dto::learning_url::req::LearningUrlUpsertRequest;

    fn ctx(ws: &str, role: Role) -> WorkspaceCtx {
        WorkspaceCtx {
            workspace_id: Arc::from(ws),
            role,
        }
    }

    fn service() -> Service<MockDs> {
        Service::with_datastore(MockDs::new())
    }

    async fn seed_resource(service: &Service<MockDs>, ws: &str, title: &str) -> String {
        let created = service
            .create_learning_url(&ctx(ws, Role::Instructor), "author", LearningUrlUpsertRequest {
                category: "Cat".into(),
                main_title: title.into(),
                main_description: String::new(),
                contents: vec![Content {
                    title: "c1".into(),
                    description: String::new(),
                    url: "https://example.com/1".into(),
                }],
            })
            .await
            .unwrap();
        created.id
    }

    fn click(url_id: &str, url: &str) -> ClickRequest {
        ClickRequest {
            url_id: url_id.into(),
            url: url.into(),
        }
    }

    #[tokio::test]
    async fn repeat_clicks_fold_into_one_record() {
        let service = service();
        service.ds.seed_workspace("wsA", "Alpha");
        service.ds.seed_user("u1", "U One", false, vec![]);
        let url_id = seed_resource(&service, "wsA", "Basics").await;

        let first = service
            .record_click(&ctx("wsA", Role::User), "u1", click(&url_id, "https://example.com/1"))
            .await
            .unwrap();
        assert_eq!(first.click_count, 1);
        assert_eq!(first.status, RecordStatus::Completed);
        // ids round-trip verbatim so status updates can hand them back
        assert_eq!(first.id, format!("u1|{url_id}|https://example.com/1"));
        assert_eq!(first.workspace_name, "Alpha");
        assert_eq!(first.url_title, "Basics");

        let second = service
            .record_click(&ctx("wsA", Role::User), "u1", click(&url_id, "https://example.com/1"))
            .await
            .unwrap();
        assert_eq!(second.click_count, 2);
        assert_eq!(second.id, first.id);

        assert_eq!(service.get_own_records("u1").await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn distinct_content_urls_get_distinct_records() {
        let service = service();
        service.ds.seed_workspace("wsA", "Alpha");
        service.ds.seed_user("u1", "U One", false, vec![]);
        let url_id = seed_resource(&service, "wsA", "Basics").await;

        service
            .record_click(&ctx("wsA", Role::User), "u1", click(&url_id, "https://example.com/1"))
            .await
            .unwrap();
        service
            .record_click(&ctx("wsA", Role::User), "u1", click(&url_id, "https://example.com/2"))
            .await
            .unwrap();

        assert_eq!(service.get_own_records("u1").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn clicks_on_foreign_workspace_resources_are_refused() {
        let service = service();
        service.ds.seed_workspace("wsA", "Alpha");
        service.ds.seed_workspace("wsB", "Beta");
        service.ds.seed_user("u1", "U One", false, vec![]);
        let url_id = seed_resource(&service, "wsA", "Basics").await;

        let refused = service
            .record_click(&ctx("wsB", Role::User), "u1", click(&url_id, "https://example.com/1"))
            .await;
        assert!(refused.is_err());
    }

    #[tokio::test]
    async fn status_updates_are_own_record_only() {
        let service = service();
        service.ds.seed_workspace("wsA", "Alpha");
        service.ds.seed_user("u1", "U One", false, vec![]);
        let url_id = seed_resource(&service, "wsA", "Basics").await;

        let record = service
            .record_click(&ctx("wsA", Role::User), "u1", click(&url_id, "https://example.com/1"))
            .await
            .unwrap();

        let reset = service
            .set_record_status("u1", StatusUpdateRequest {
                id: record.id.clone(),
                status: RecordStatus::NotCompleted,
            })
            .await
            .unwrap();
        assert_eq!(reset.status, RecordStatus::NotCompleted);

        let refused = service
            .set_record_status("intruder", StatusUpdateRequest {
                id: record.id,
                status: RecordStatus::Completed,
            })
            .await;
        assert!(refused.is_err());
    }

    #[tokio::test]
    async fn workspace_progress_is_gated_to_instructors_and_admins() {
        let service = service();
        service.ds.seed_workspace("wsA", "Alpha");
        service.ds.seed_user("u1", "U One", false, vec![]);
        let url_id = seed_resource(&service, "wsA", "Basics").await;

        service
            .record_click(&ctx("wsA", Role::User), "u1", click(&url_id, "https://example.com/1"))
            .await
            .unwrap();

        assert!(service.get_workspace_records(&ctx("wsA", Role::User)).await.is_err());

        let records = service.get_workspace_records(&ctx("wsA", Role::Instructor)).await.unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user_name, "U One");
    }
}
