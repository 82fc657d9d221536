use crate::datastore::user::Role;

pub const SIGN_IN_PATH: &str = "/login";
pub const ADMIN_DASHBOARD_PATH: &str = "/admin/dashboard";
pub const INSTRUCTOR_DASHBOARD_PATH: &str = "/instructor/dashboard";
pub const USER_DASHBOARD_PATH: &str = "/user/dashboard";

/// Outcome of gating entry to a protected view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Resolution still in flight; render a neutral waiting state, never
    /// a premature redirect.
    Wait,
    Allow,
    RedirectTo(&'static str),
}

/// Dashboard implied by the caller's own role. Unrecognized/absent roles
/// land on the general user dashboard.
pub fn dashboard_path(role: Option<Role>) -> &'static str {
    match role {
        Some(Role::Admin) => ADMIN_DASHBOARD_PATH,
        Some(Role::Instructor) => INSTRUCTOR_DASHBOARD_PATH,
        Some(Role::User) | None => USER_DASHBOARD_PATH,
    }
}

/// Pure function of already-resolved session state, re-evaluated on every
/// entry to a protected view. Role mismatch is routine traffic, not an
/// error: it redirects to the caller's own dashboard.
pub fn authorize(
    required: Option<Role>,
    authenticated: bool,
    current_role: Option<Role>,
    loading: bool,
) -> GateDecision {
    if loading {
        return GateDecision::Wait;
    }

    if !authenticated {
        return GateDecision::RedirectTo(SIGN_IN_PATH);
    }

    match required {
        None => GateDecision::Allow,
        Some(role) if current_role == Some(role) => GateDecision::Allow,
        Some(_) => GateDecision::RedirectTo(dashboard_path(current_role)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loading_waits_even_without_a_user() {
        assert_eq!(authorize(Some(Role::Admin), false, None, true), GateDecision::Wait);
    }

    #[test]
    fn unauthenticated_redirects_to_sign_in() {
        assert_eq!(authorize(None, false, None, false), GateDecision::RedirectTo(SIGN_IN_PATH));
    }

    #[test]
    fn no_required_role_allows_any_authenticated_user() {
        assert_eq!(authorize(None, true, Some(Role::User), false), GateDecision::Allow);
        assert_eq!(authorize(None, true, None, false), GateDecision::Allow);
    }

    #[test]
    fn matching_role_allows() {
        assert_eq!(authorize(Some(Role::Instructor), true, Some(Role::Instructor), false), GateDecision::Allow);
    }

    #[test]
    fn role_literals_compare_case_insensitively() {
        // mixed-case wire literals normalize at parse time
        assert_eq!(Role::parse("Instructor"), Some(Role::Instructor));
        assert_eq!(Role::parse("ADMIN"), Some(Role::Admin));
        assert_eq!(authorize(Role::parse("Instructor"), true, Role::parse("instructor"), false), GateDecision::Allow);
    }

    #[test]
    fn mismatch_redirects_to_own_dashboard() {
        assert_eq!(
            authorize(Some(Role::Admin), true, Some(Role::Instructor), false),
            GateDecision::RedirectTo(INSTRUCTOR_DASHBOARD_PATH)
        );
        assert_eq!(
            authorize(Some(Role::Admin), true, Some(Role::User), false),
            GateDecision::RedirectTo(USER_DASHBOARD_PATH)
        );
    }

    #[test]
    fn unrecognized_role_falls_back_to_user_dashboard() {
        assert_eq!(
            authorize(Some(Role::Admin), true, Role::parse("moderator"), false),
            GateDecision::RedirectTo(USER_DASHBOARD_PATH)
        );
    }
}
