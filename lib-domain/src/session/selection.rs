use crate::datastore::user::Role;

use super::resolver::ResolvedMembership;

/// Default-selection policy, evaluated once after membership resolution
/// and only when no selection exists yet: the admin sentinel wins, then
/// the first instructor membership, then the first user membership, then
/// whatever comes first. A real-workspace `admin` role is deliberately
/// not prioritized over instructor/user here; that asymmetry is carried
/// over from the source behavior.
pub fn select_default(memberships: &[ResolvedMembership]) -> Option<&ResolvedMembership> {
    memberships
        .iter()
        .find(|m| m.is_admin_sentinel())
        .or_else(|| memberships.iter().find(|m| m.role == Role::Instructor))
        .or_else(|| memberships.iter().find(|m| m.role == Role::User))
        .or_else(|| memberships.first())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::resolver::{ADMIN_WORKSPACE_ID, ADMIN_WORKSPACE_NAME};

    fn resolved(ws: &str, role: Role) -> ResolvedMembership {
        ResolvedMembership {
            workspace_id: ws.into(),
            workspace_name: format!("{ws} name"),
            role,
        }
    }

    fn sentinel() -> ResolvedMembership {
        ResolvedMembership {
            workspace_id: ADMIN_WORKSPACE_ID.into(),
            workspace_name: ADMIN_WORKSPACE_NAME.into(),
            role: Role::Admin,
        }
    }

    #[test]
    fn sentinel_beats_everything() {
        let memberships = vec![resolved("wsA", Role::Instructor), sentinel()];
        assert!(select_default(&memberships).unwrap().is_admin_sentinel());
    }

    #[test]
    fn instructor_beats_user() {
        let memberships = vec![resolved("wsB", Role::User), resolved("wsA", Role::Instructor)];
        assert_eq!(select_default(&memberships).unwrap().workspace_id, "wsA");
    }

    #[test]
    fn first_user_membership_when_no_instructor() {
        let memberships = vec![resolved("wsB", Role::User), resolved("wsC", Role::User)];
        assert_eq!(select_default(&memberships).unwrap().workspace_id, "wsB");
    }

    #[test]
    fn real_admin_role_is_not_prioritized() {
        // admin on a real workspace loses to a later instructor membership
        let memberships = vec![resolved("wsA", Role::Admin), resolved("wsB", Role::Instructor)];
        assert_eq!(select_default(&memberships).unwrap().workspace_id, "wsB");
    }

    #[test]
    fn falls_back_to_first_membership() {
        let memberships = vec![resolved("wsA", Role::Admin)];
        assert_eq!(select_default(&memberships).unwrap().workspace_id, "wsA");
    }

    #[test]
    fn empty_list_selects_nothing() {
        assert!(select_default(&[]).is_none());
    }

    #[test]
    fn deterministic_for_fixed_input() {
        let memberships = vec![resolved("wsB", Role::User), resolved("wsA", Role::Instructor)];
        assert_eq!(select_default(&memberships), select_default(&memberships));
    }
}
