//! View gating: what a frontend is allowed to render before fetching.

/// Outcome of the gate check that runs before a view mounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Render the view and let it fetch.
    Allow,
    /// No valid session; show the login screen instead. No data fetch may
    /// happen before this check passes.
    RedirectLogin,
    /// Signed in but not privileged for an admin-only view.
    RedirectAdmin,
}

/// Pure gate decision. `is_admin` is whatever the admin probe reported; a
/// probe that errored reports `false`, so the gate fails closed.
pub fn decide(authenticated: bool, requires_admin: bool, is_admin: bool) -> GateDecision {
    if !authenticated {
        return GateDecision::RedirectLogin;
    }
    if requires_admin && !is_admin {
        return GateDecision::RedirectAdmin;
    }
    GateDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthenticated_always_redirects_to_login() {
        assert_eq!(decide(false, false, false), GateDecision::RedirectLogin);
        // Even a claimed admin flag cannot bypass authentication.
        assert_eq!(decide(false, true, true), GateDecision::RedirectLogin);
    }

    #[test]
    fn admin_views_require_the_probe_to_say_yes() {
        assert_eq!(decide(true, true, false), GateDecision::RedirectAdmin);
        assert_eq!(decide(true, true, true), GateDecision::Allow);
    }

    #[test]
    fn ordinary_views_only_need_a_session() {
        assert_eq!(decide(true, false, false), GateDecision::Allow);
    }
}
