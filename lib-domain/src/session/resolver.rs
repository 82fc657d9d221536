use lib_core::AppResult;

use crate::datastore::user::{Role, User, UserDs};
use crate::datastore::workspace::WorkspaceDs;

/// Synthetic workspace id representing platform-wide admin capability.
/// Never a real document key; must not be used to query the store.
pub const ADMIN_WORKSPACE_ID: &str = "admin";
pub const ADMIN_WORKSPACE_NAME: &str = "Login as Admin";

/// A membership expanded with the workspace's display data.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedMembership {
    pub workspace_id: String,
    pub workspace_name: String,
    pub role: Role,
}

impl ResolvedMembership {
    pub fn is_admin_sentinel(&self) -> bool {
        self.workspace_id == ADMIN_WORKSPACE_ID
    }

    fn admin_sentinel() -> Self {
        Self {
            workspace_id: ADMIN_WORKSPACE_ID.into(),
            workspace_name: ADMIN_WORKSPACE_NAME.into(),
            role: Role::Admin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResolvedMemberships {
    pub memberships: Vec<ResolvedMembership>,
    pub is_platform_admin: bool,
}

/// Point lookup of the profile document for an authenticated identity.
///
/// `Ok(None)` means no profile has been provisioned yet, which is a
/// normal state for a fresh sign-up. A store failure is fatal to the
/// resolution pass and propagates; it is never folded into an empty
/// profile.
pub async fn resolve_profile<D: UserDs>(ds: &D, identity: &str) -> AppResult<Option<User>> {
    ds.get_user(identity).await
}

/// Expand the profile's membership list into (workspace, role) pairs the
/// user may act under.
///
/// Lookups are independent and best-effort: a dangling workspace
/// reference or a failed lookup drops that one membership and the rest
/// still resolve. Profile order is preserved; duplicates for the same
/// workspace resolve first-occurrence-wins; the admin sentinel, when
/// present, is always last.
pub async fn resolve_memberships<D: WorkspaceDs>(ds: &D, user: &User) -> ResolvedMemberships {
    let mut resolved: Vec<ResolvedMembership> = Vec::with_capacity(user.workspaces.len() + 1);

    for membership in &user.workspaces {
        if resolved.iter().any(|m| m.workspace_id == membership.workspace_id) {
            continue;
        }

        match ds.get_workspace(&membership.workspace_id).await {
            Ok(Some(workspace)) => resolved.push(ResolvedMembership {
                workspace_id: membership.workspace_id.clone(),
                workspace_name: workspace.name,
                role: membership.role,
            }),
            Ok(None) => {
                tracing::debug!(workspace_id = membership.workspace_id, "Dropping dangling membership")
            }
            Err(err) => {
                tracing::warn!(workspace_id = membership.workspace_id, err = %err, "Dropping unresolvable membership")
            }
        }
    }

    if user.is_admin {
        resolved.push(ResolvedMembership::admin_sentinel());
    }

    ResolvedMemberships {
        memberships: resolved,
        is_platform_admin: user.is_admin,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datastore::mock::MockDs;
    use crate::datastore::user::Membership;

    fn membership(ws: &str, role: Role) -> Membership {
        Membership {
            workspace_id: ws.into(),
            role,
        }
    }

    #[tokio::test]
    async fn preserves_profile_order() {
        let ds = MockDs::new();
        ds.seed_workspace("wsA", "Alpha");
        ds.seed_workspace("wsB", "Beta");
        let user = ds.seed_user("u1", "U One", false, vec![
            membership("wsA", Role::Instructor),
            membership("wsB", Role::User),
        ]);

        let resolved = resolve_memberships(&ds, &user).await;
        assert!(!resolved.is_platform_admin);
        assert_eq!(resolved.memberships.len(), 2);
        assert_eq!(resolved.memberships[0].workspace_id, "wsA");
        assert_eq!(resolved.memberships[0].workspace_name, "Alpha");
        assert_eq!(resolved.memberships[0].role, Role::Instructor);
        assert_eq!(resolved.memberships[1].workspace_id, "wsB");
    }

    #[tokio::test]
    async fn admin_sentinel_is_always_last() {
        let ds = MockDs::new();
        ds.seed_workspace("wsA", "Alpha");
        let user = ds.seed_user("u1", "U One", true, vec![membership("wsA", Role::User)]);

        let resolved = resolve_memberships(&ds, &user).await;
        assert!(resolved.is_platform_admin);
        let last = resolved.memberships.last().unwrap();
        assert!(last.is_admin_sentinel());
        assert_eq!(last.workspace_id, ADMIN_WORKSPACE_ID);
        assert_eq!(last.workspace_name, ADMIN_WORKSPACE_NAME);
        assert_eq!(last.role, Role::Admin);
    }

    #[tokio::test]
    async fn admin_with_no_real_memberships_still_gets_sentinel() {
        let ds = MockDs::new();
        let user = ds.seed_user("u1", "U One", true, vec![]);

        let resolved = resolve_memberships(&ds, &user).await;
        assert_eq!(resolved.memberships.len(), 1);
        assert!(resolved.memberships[0].is_admin_sentinel());
    }

    #[tokio::test]
    async fn dangling_workspace_reference_is_dropped() {
        let ds = MockDs::new();
        ds.seed_workspace("wsB", "Beta");
        let user = ds.seed_user("u1", "U One", false, vec![
            membership("wsGone", Role::Instructor),
            membership("wsB", Role::User),
        ]);

        let resolved = resolve_memberships(&ds, &user).await;
        assert_eq!(resolved.memberships.len(), 1);
        assert_eq!(resolved.memberships[0].workspace_id, "wsB");
    }

    #[tokio::test]
    async fn single_lookup_failure_does_not_abort_the_rest() {
        let ds = MockDs::new();
        ds.seed_workspace("wsA", "Alpha");
        ds.seed_workspace("wsB", "Beta");
        ds.fail_workspace_lookup("wsA");
        let user = ds.seed_user("u1", "U One", false, vec![
            membership("wsA", Role::Instructor),
            membership("wsB", Role::User),
        ]);

        let resolved = resolve_memberships(&ds, &user).await;
        assert_eq!(resolved.memberships.len(), 1);
        assert_eq!(resolved.memberships[0].workspace_id, "wsB");
    }

    #[tokio::test]
    async fn duplicate_memberships_resolve_first_occurrence_wins() {
        let ds = MockDs::new();
        ds.seed_workspace("wsA", "Alpha");
        let user = ds.seed_user("u1", "U One", false, vec![
            membership("wsA", Role::User),
            membership("wsA", Role::Instructor),
        ]);

        let resolved = resolve_memberships(&ds, &user).await;
        assert_eq!(resolved.memberships.len(), 1);
        assert_eq!(resolved.memberships[0].role, Role::User);
    }

    #[tokio::test]
    async fn profile_lookup_failure_propagates() {
        let ds = MockDs::new();
        ds.fail_user_lookup("u1");

        assert!(resolve_profile(&ds, "u1").await.is_err());
    }

    #[tokio::test]
    async fn missing_profile_is_not_an_error() {
        let ds = MockDs::new();

        let profile = resolve_profile(&ds, "nobody").await.unwrap();
        assert!(profile.is_none());
    }
}
