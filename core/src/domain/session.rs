//! Client session state and the navigation guard derived from it.
//!
//! The identity collaborator owns whatever token proves a verification; the
//! application only tracks which of three states a session is in and decides
//! navigation from that alone.

use serde::{Deserialize, Serialize};

/// Routes that belong to the verification flow
pub const AUTH_ROUTES: [&str; 3] = ["/verify/phone", "/verify/otp", "/auth/signin"];

/// Where unverified sessions are sent
pub const VERIFY_ENTRY_ROUTE: &str = "/verify/phone";

/// Where verified sessions land when they open a verification page
pub const HOME_ROUTE: &str = "/";

/// Verification state of a client session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
    /// Persisted state not loaded yet
    Unknown,
    /// No successful phone verification
    Unverified,
    /// Phone number verified
    Verified,
}

impl SessionState {
    /// State after a verification attempt completes
    pub fn after_verification(self, success: bool) -> Self {
        if success {
            SessionState::Verified
        } else {
            match self {
                SessionState::Verified => SessionState::Verified,
                _ => SessionState::Unverified,
            }
        }
    }

    /// State after the user logs out
    pub fn logout(self) -> Self {
        SessionState::Unverified
    }
}

impl std::str::FromStr for SessionState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "unknown" | "loading" => Ok(SessionState::Unknown),
            "unverified" => Ok(SessionState::Unverified),
            "verified" => Ok(SessionState::Verified),
            _ => Err(format!("Invalid session state: {}", s)),
        }
    }
}

/// Outcome of the navigation guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", content = "location", rename_all = "lowercase")]
pub enum RouteDecision {
    /// Render the requested route
    Allow,
    /// Navigate to the given route instead
    Redirect(&'static str),
    /// Hold navigation until the session state is known
    Pending,
}

/// Whether `path` is part of the verification flow
pub fn is_auth_route(path: &str) -> bool {
    let path = normalize_path(path);
    AUTH_ROUTES.contains(&path)
}

/// Decide navigation for a session in `state` requesting `path`
pub fn route_decision(state: SessionState, path: &str) -> RouteDecision {
    match (state, is_auth_route(path)) {
        (SessionState::Unknown, _) => RouteDecision::Pending,
        (SessionState::Unverified, true) => RouteDecision::Allow,
        (SessionState::Unverified, false) => RouteDecision::Redirect(VERIFY_ENTRY_ROUTE),
        (SessionState::Verified, true) => RouteDecision::Redirect(HOME_ROUTE),
        (SessionState::Verified, false) => RouteDecision::Allow,
    }
}

// Query strings and a trailing slash do not change the route
fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or(path);
    if path.len() > 1 {
        path.trim_end_matches('/')
    } else {
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_state_holds_every_route() {
        assert_eq!(route_decision(SessionState::Unknown, "/"), RouteDecision::Pending);
        assert_eq!(route_decision(SessionState::Unknown, "/verify/otp"), RouteDecision::Pending);
    }

    #[test]
    fn test_unverified_sessions_are_sent_to_phone_entry() {
        assert_eq!(
            route_decision(SessionState::Unverified, "/report-issue"),
            RouteDecision::Redirect("/verify/phone")
        );
        assert_eq!(
            route_decision(SessionState::Unverified, "/"),
            RouteDecision::Redirect("/verify/phone")
        );
        for route in AUTH_ROUTES {
            assert_eq!(route_decision(SessionState::Unverified, route), RouteDecision::Allow);
        }
    }

    #[test]
    fn test_verified_sessions_leave_auth_routes() {
        for route in AUTH_ROUTES {
            assert_eq!(route_decision(SessionState::Verified, route), RouteDecision::Redirect("/"));
        }
        assert_eq!(route_decision(SessionState::Verified, "/issues/42"), RouteDecision::Allow);
    }

    #[test]
    fn test_path_normalization() {
        assert!(is_auth_route("/verify/otp/"));
        assert!(is_auth_route("/auth/signin?next=/profile"));
        assert!(!is_auth_route("/verify"));
        assert!(!is_auth_route("/"));
    }

    #[test]
    fn test_state_transitions() {
        assert_eq!(SessionState::Unknown.after_verification(true), SessionState::Verified);
        assert_eq!(SessionState::Unverified.after_verification(false), SessionState::Unverified);
        assert_eq!(SessionState::Verified.after_verification(false), SessionState::Verified);
        assert_eq!(SessionState::Verified.logout(), SessionState::Unverified);
    }

    #[test]
    fn test_route_decision_serialization() {
        let json = serde_json::to_value(RouteDecision::Redirect("/")).unwrap();
        assert_eq!(json, serde_json::json!({ "decision": "redirect", "location": "/" }));
        let json = serde_json::to_value(RouteDecision::Allow).unwrap();
        assert_eq!(json, serde_json::json!({ "decision": "allow" }));
    }
}
