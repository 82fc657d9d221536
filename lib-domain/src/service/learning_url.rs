use chrono::Utc;
use lib_core::{AppResult, ErrType, ErrorContext};

use crate::datastore::learning_url::{LearningUrl, LearningUrlContent, LearningUrlDs};
use crate::datastore::user::Role;
use crate::dto::learning_url::req::LearningUrlUpsertRequest;
use crate::dto::learning_url::res::{ImportSummaryResponse, LearningUrlResponse};
use crate::extension::WorkspaceCtx;
use crate::import;

use super::{require_real_workspace, require_role, Service};

const EDITOR_ROLES: &[Role] = &[Role::Admin, Role::Instructor];

impl<D: LearningUrlDs> Service<D> {
    pub async fn get_learning_urls(&self, ctx: &WorkspaceCtx) -> AppResult<Vec<LearningUrlResponse>> {
        require_real_workspace(ctx)?;

        let urls = self.ds.get_learning_urls_for_workspace(&ctx.workspace_id).await?;
        Ok(urls.into_iter().map(LearningUrlResponse::from).collect())
    }

    pub async fn create_learning_url(
        &self,
        ctx: &WorkspaceCtx,
        identity: &str,
        dto: LearningUrlUpsertRequest,
    ) -> AppResult<LearningUrlResponse> {
        require_role(ctx, EDITOR_ROLES)?;
        require_real_workspace(ctx)?;

        let url = self
            .ds
            .insert_learning_url(LearningUrlContent {
                category: dto.category,
                main_title: dto.main_title,
                main_description: dto.main_description,
                contents: dto.contents,
                workspace_id: ctx.workspace_id.to_string(),
                created_by: identity.into(),
                created_at: Utc::now(),
            })
            .await?;
        Ok(url.into())
    }

    pub async fn update_learning_url(
        &self,
        ctx: &WorkspaceCtx,
        id: &str,
        dto: LearningUrlUpsertRequest,
    ) -> AppResult<LearningUrlResponse> {
        require_role(ctx, EDITOR_ROLES)?;
        require_real_workspace(ctx)?;

        let existing = self.owned_learning_url(ctx, id).await?;
        let url = self
            .ds
            .update_learning_url(id, LearningUrlContent {
                category: dto.category,
                main_title: dto.main_title,
                main_description: dto.main_description,
                contents: dto.contents,
                workspace_id: existing.workspace_id,
                created_by: existing.created_by,
                created_at: existing.created_at,
            })
            .await?;
        Ok(url.into())
    }

    pub async fn delete_learning_url(&self, ctx: &WorkspaceCtx, id: &str) -> AppResult<()> {
        require_role(ctx, EDITOR_ROLES)?;
        require_real_workspace(ctx)?;

        self.owned_learning_url(ctx, id).await?;
        self.ds.delete_learning_url(id).await
    }

    /// Bulk CSV import. Rows fold into resources by (category, mainTitle)
    /// and every resulting resource lands in the context workspace.
    pub async fn import_learning_urls(
        &self,
        ctx: &WorkspaceCtx,
        identity: &str,
        bytes: &[u8],
    ) -> AppResult<ImportSummaryResponse> {
        require_role(ctx, EDITOR_ROLES)?;
        require_real_workspace(ctx)?;

        let rows = import::parse_rows(bytes)?;
        let drafts = import::group_rows(&rows);

        let mut contents = 0;
        for draft in &drafts {
            contents += draft.contents.len();
            self.ds
                .insert_learning_url(LearningUrlContent {
                    category: draft.category.clone(),
                    main_title: draft.main_title.clone(),
                    main_description: draft.main_description.clone(),
                    contents: draft.contents.clone(),
                    workspace_id: ctx.workspace_id.to_string(),
                    created_by: identity.into(),
                    created_at: Utc::now(),
                })
                .await
                .context("s:import_learning_urls")?;
        }

        tracing::info!(
            workspace_id = &*ctx.workspace_id,
            resources = drafts.len(),
            contents,
            "Imported learning resources from CSV"
        );
        Ok(ImportSummaryResponse {
            resources: drafts.len(),
            contents,
        })
    }

    /// Cross-workspace ids are indistinguishable from unknown ones.
    async fn owned_learning_url(&self, ctx: &WorkspaceCtx, id: &str) -> AppResult<LearningUrl> {
        let url = self
            .ds
            .get_learning_url(id)
            .await?
            .ok_or(ErrType::NotFound.msg("Learning url not found"))?;

        if url.workspace_id != *ctx.workspace_id {
            return Err(ErrType::NotFound.msg("Learning url not found"));
        }
        Ok(url)
    }
}
