//! Domain layer containing business entities and session state.

pub mod entities;
pub mod session;

// Re-export commonly used domain types
pub use entities::*;
pub use session::{route_decision, RouteDecision, SessionState, AUTH_ROUTES};
