//! In-memory datastore double for unit tests, with per-key failure
//! injection to exercise the best-effort resolution paths.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use chrono::Utc;
use lib_core::{AppResult, ErrType};
use surrealdb::RecordId;

use super::learning_record::{record_key, LearningRecord, LearningRecordContent, LearningRecordDs, RecordStatus};
use super::learning_url::{LearningUrl, LearningUrlContent, LearningUrlDs};
use super::user::{Membership, User, UserDs};
use super::workspace::{Workspace, WorkspaceDs, WorkspaceInvite};

pub(crate) struct MockDs {
    users: Mutex<HashMap<String, User>>,
    workspaces: Mutex<HashMap<String, Workspace>>,
    invites: Mutex<HashMap<String, WorkspaceInvite>>,
    learning_urls: Mutex<HashMap<String, LearningUrl>>,
    learning_records: Mutex<HashMap<String, LearningRecord>>,

    failing_users: Mutex<HashSet<String>>,
    failing_workspaces: Mutex<HashSet<String>>,

    counter: Mutex<u64>,
}

impl MockDs {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
            workspaces: Mutex::new(HashMap::new()),
            invites: Mutex::new(HashMap::new()),
            learning_urls: Mutex::new(HashMap::new()),
            learning_records: Mutex::new(HashMap::new()),
            failing_users: Mutex::new(HashSet::new()),
            failing_workspaces: Mutex::new(HashSet::new()),
            counter: Mutex::new(0),
        }
    }

    fn next_key(&self, prefix: &str) -> String {
        let mut counter = self.counter.lock().unwrap();
        *counter += 1;
        format!("{prefix}{counter}")
    }

    pub fn seed_user(&self, key: &str, name: &str, is_admin: bool, workspaces: Vec<Membership>) -> User {
        let user = User {
            id: RecordId::from_table_key("users", key),
            created_at: Utc::now(),
            name: name.into(),
            email: format!("{key}@example.com"),
            is_admin,
            workspaces,
        };
        self.users.lock().unwrap().insert(key.into(), user.clone());
        user
    }

    pub fn seed_workspace(&self, key: &str, name: &str) -> Workspace {
        let workspace = Workspace {
            id: RecordId::from_table_key("workspaces", key),
            created_at: Utc::now(),
            name: name.into(),
            created_by: "seed".into(),
            invite_token: None,
        };
        self.workspaces.lock().unwrap().insert(key.into(), workspace.clone());
        workspace
    }

    pub fn fail_user_lookup(&self, key: &str) {
        self.failing_users.lock().unwrap().insert(key.into());
    }

    pub fn fail_workspace_lookup(&self, key: &str) {
        self.failing_workspaces.lock().unwrap().insert(key.into());
    }
}

impl UserDs for MockDs {
    async fn get_user(&self, identity: &str) -> AppResult<Option<User>> {
        if self.failing_users.lock().unwrap().contains(identity) {
            return Err(ErrType::DbError.msg("injected user lookup failure"));
        }
        Ok(self.users.lock().unwrap().get(identity).cloned())
    }

    async fn insert_user(&self, identity: &str, name: &str, email: &str) -> AppResult<User> {
        let user = User {
            id: RecordId::from_table_key("users", identity),
            created_at: Utc::now(),
            name: name.into(),
            email: email.into(),
            is_admin: false,
            workspaces: Vec::new(),
        };
        self.users.lock().unwrap().insert(identity.into(), user.clone());
        Ok(user)
    }

    async fn update_profile(&self, identity: &str, name: &str) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(identity).ok_or(ErrType::NotFound.msg("User not found"))?;
        user.name = name.into();
        Ok(user.clone())
    }

    async fn set_memberships(&self, identity: &str, memberships: Vec<Membership>) -> AppResult<User> {
        let mut users = self.users.lock().unwrap();
        let user = users.get_mut(identity).ok_or(ErrType::NotFound.msg("User not found"))?;
        user.workspaces = memberships;
        Ok(user.clone())
    }

    async fn get_platform_users(&self) -> AppResult<Vec<User>> {
        let users = self.users.lock().unwrap();
        let mut all: Vec<User> = users.values().cloned().collect();
        all.sort_by(|a, b| a.key().cmp(&b.key()));
        Ok(all)
    }
}

impl WorkspaceDs for MockDs {
    async fn get_workspace(&self, id: &str) -> AppResult<Option<Workspace>> {
        if self.failing_workspaces.lock().unwrap().contains(id) {
            return Err(ErrType::DbError.msg("injected workspace lookup failure"));
        }
        Ok(self.workspaces.lock().unwrap().get(id).cloned())
    }

    async fn insert_workspace(&self, name: &str, created_by: &str) -> AppResult<Workspace> {
        let key = self.next_key("ws");
        let workspace = Workspace {
            id: RecordId::from_table_key("workspaces", &key),
            created_at: Utc::now(),
            name: name.into(),
            created_by: created_by.into(),
            invite_token: None,
        };
        self.workspaces.lock().unwrap().insert(key, workspace.clone());
        Ok(workspace)
    }

    async fn update_workspace_name(&self, id: &str, name: &str) -> AppResult<Workspace> {
        let mut workspaces = self.workspaces.lock().unwrap();
        let workspace = workspaces.get_mut(id).ok_or(ErrType::NotFound.msg("Workspace not found"))?;
        workspace.name = name.into();
        Ok(workspace.clone())
    }

    async fn set_invite_token(&self, id: &str, token: Option<String>) -> AppResult<Workspace> {
        let mut workspaces = self.workspaces.lock().unwrap();
        let workspace = workspaces.get_mut(id).ok_or(ErrType::NotFound.msg("Workspace not found"))?;
        workspace.invite_token = token;
        Ok(workspace.clone())
    }

    async fn get_all_workspaces(&self) -> AppResult<Vec<Workspace>> {
        let workspaces = self.workspaces.lock().unwrap();
        let mut all: Vec<Workspace> = workspaces.values().cloned().collect();
        all.sort_by(|a, b| a.key().cmp(&b.key()));
        Ok(all)
    }

    async fn insert_invite(&self, workspace_id: &str) -> AppResult<WorkspaceInvite> {
        let key = self.next_key("inv");
        let invite = WorkspaceInvite {
            id: RecordId::from_table_key("workspace_invites", &key),
            created_at: Utc::now(),
            workspace_id: workspace_id.into(),
        };
        self.invites.lock().unwrap().insert(key, invite.clone());
        Ok(invite)
    }

    async fn get_invite(&self, token: &str) -> AppResult<Option<WorkspaceInvite>> {
        Ok(self.invites.lock().unwrap().get(token).cloned())
    }
}

impl LearningUrlDs for MockDs {
    async fn get_learning_url(&self, id: &str) -> AppResult<Option<LearningUrl>> {
        Ok(self.learning_urls.lock().unwrap().get(id).cloned())
    }

    async fn get_learning_urls_for_workspace(&self, workspace_id: &str) -> AppResult<Vec<LearningUrl>> {
        let urls = self.learning_urls.lock().unwrap();
        let mut matched: Vec<LearningUrl> =
            urls.values().filter(|url| url.workspace_id == workspace_id).cloned().collect();
        matched.sort_by(|a, b| a.key().cmp(&b.key()));
        Ok(matched)
    }

    async fn insert_learning_url(&self, content: LearningUrlContent) -> AppResult<LearningUrl> {
        let key = self.next_key("lu");
        let url = LearningUrl {
            id: RecordId::from_table_key("learning_urls", &key),
            created_at: content.created_at,
            category: content.category,
            main_title: content.main_title,
            main_description: content.main_description,
            contents: content.contents,
            workspace_id: content.workspace_id,
            created_by: content.created_by,
        };
        self.learning_urls.lock().unwrap().insert(key, url.clone());
        Ok(url)
    }

    async fn update_learning_url(&self, id: &str, content: LearningUrlContent) -> AppResult<LearningUrl> {
        let mut urls = self.learning_urls.lock().unwrap();
        let url = urls.get_mut(id).ok_or(ErrType::NotFound.msg("Learning url not found"))?;
        url.category = content.category;
        url.main_title = content.main_title;
        url.main_description = content.main_description;
        url.contents = content.contents;
        Ok(url.clone())
    }

    async fn delete_learning_url(&self, id: &str) -> AppResult<()> {
        self.learning_urls.lock().unwrap().remove(id);
        Ok(())
    }
}

impl LearningRecordDs for MockDs {
    async fn get_record(&self, key: &str) -> AppResult<Option<LearningRecord>> {
        Ok(self.learning_records.lock().unwrap().get(key).cloned())
    }

    async fn upsert_record(&self, key: &str, content: LearningRecordContent) -> AppResult<LearningRecord> {
        let record = LearningRecord {
            id: RecordId::from_table_key("learning_records", key),
            user_id: content.user_id,
            user_name: content.user_name,
            workspace_id: content.workspace_id,
            workspace_name: content.workspace_name,
            url_id: content.url_id,
            url_title: content.url_title,
            url: content.url,
            category: content.category,
            status: content.status,
            click_count: content.click_count,
            timestamp: content.timestamp,
        };
        self.learning_records.lock().unwrap().insert(key.into(), record.clone());
        Ok(record)
    }

    async fn set_record_status(&self, key: &str, status: RecordStatus) -> AppResult<LearningRecord> {
        let mut records = self.learning_records.lock().unwrap();
        let record = records.get_mut(key).ok_or(ErrType::NotFound.msg("Learning record not found"))?;
        record.status = status;
        Ok(record.clone())
    }

    async fn get_records_for_user(&self, user_id: &str) -> AppResult<Vec<LearningRecord>> {
        let records = self.learning_records.lock().unwrap();
        let mut matched: Vec<LearningRecord> =
            records.values().filter(|record| record.user_id == user_id).cloned().collect();
        matched.sort_by_key(|record| record_key(&record.user_id, &record.url_id, &record.url));
        Ok(matched)
    }

    async fn get_records_for_workspace(&self, workspace_id: &str) -> AppResult<Vec<LearningRecord>> {
        let records = self.learning_records.lock().unwrap();
        let mut matched: Vec<LearningRecord> =
            records.values().filter(|record| record.workspace_id == workspace_id).cloned().collect();
        matched.sort_by_key(|record| record_key(&record.user_id, &record.url_id, &record.url));
        Ok(matched)
    }
}
