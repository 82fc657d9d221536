use chrono::{DateTime, Utc};
use lib_core::{AppResult, ErrType};
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;
use utoipa::ToSchema;

use super::{Datastore, DbSchema};

#[derive(Debug, ToSchema, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Instructor,
    User,
}
impl Role {
    /// Role literals arrive from headers and legacy documents in mixed
    /// case; comparison is case-insensitive once parsed.
    pub fn parse(value: &str) -> Option<Role> {
        match value.to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "instructor" => Some(Role::Instructor),
            "user" => Some(Role::User),
            _ => None,
        }
    }
}
impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Role::Admin => "admin",
                Role::Instructor => "instructor",
                Role::User => "user",
            }
        )
    }
}

/// A (workspace, role) pair held by a user. The profile document keeps
/// these ordered; duplicates per workspace are normalized away on write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Membership {
    pub workspace_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub created_at: DateTime<Utc>,

    pub name: String,
    pub email: String,
    /// Platform-admin flag; legacy documents may omit it.
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub workspaces: Vec<Membership>,
}
impl DbSchema for User {
    fn table_name() -> &'static str {
        "users"
    }
}
impl User {
    /// Identity-provider subject the profile is keyed under.
    pub fn key(&self) -> String {
        self.id.key().to_string()
    }
}

#[derive(Serialize)]
struct UserContent {
    name: String,
    email: String,
    is_admin: bool,
    workspaces: Vec<Membership>,
    created_at: DateTime<Utc>,
}

#[derive(Serialize)]
struct ProfilePatch {
    name: String,
}

#[derive(Serialize)]
struct MembershipsPatch {
    workspaces: Vec<Membership>,
}

pub trait UserDs {
    /// Single point lookup keyed by the identity subject.
    fn get_user(&self, identity: &str) -> impl Future<Output = AppResult<Option<User>>>;
    fn insert_user(&self, identity: &str, name: &str, email: &str) -> impl Future<Output = AppResult<User>>;
    fn update_profile(&self, identity: &str, name: &str) -> impl Future<Output = AppResult<User>>;
    fn set_memberships(&self, identity: &str, memberships: Vec<Membership>) -> impl Future<Output = AppResult<User>>;
    fn get_platform_users(&self) -> impl Future<Output = AppResult<Vec<User>>>;
}

impl UserDs for Datastore {
    async fn get_user(&self, identity: &str) -> AppResult<Option<User>> {
        self.db
            .select(User::get_id(identity))
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to get user by identity"))
    }

    async fn insert_user(&self, identity: &str, name: &str, email: &str) -> AppResult<User> {
        let user: Option<User> = self
            .db
            .create(User::get_id(identity))
            .content(UserContent {
                name: name.into(),
                email: email.into(),
                is_admin: false,
                workspaces: Vec::new(),
                created_at: Utc::now(),
            })
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to insert user"))?;

        user.ok_or(ErrType::DbError.msg("Inserted user not returned"))
    }

    async fn update_profile(&self, identity: &str, name: &str) -> AppResult<User> {
        let user: Option<User> = self
            .db
            .update(User::get_id(identity))
            .merge(ProfilePatch {
                name: name.into(),
            })
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to update user profile"))?;

        user.ok_or(ErrType::NotFound.msg("User not found"))
    }

    async fn set_memberships(&self, identity: &str, memberships: Vec<Membership>) -> AppResult<User> {
        let user: Option<User> = self
            .db
            .update(User::get_id(identity))
            .merge(MembershipsPatch {
                workspaces: memberships,
            })
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to update user memberships"))?;

        user.ok_or(ErrType::NotFound.msg("User not found"))
    }

    async fn get_platform_users(&self) -> AppResult<Vec<User>> {
        self.db
            .select(User::table_name())
            .await
            .map_err(|err| ErrType::DbError.err(err, "Failed to list platform users"))
    }
}
