use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query for the navigation guard endpoint
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SessionRouteQuery {
    /// Session state as reported by the client ("unknown", "unverified", "verified")
    #[validate(length(min = 1, max = 32))]
    pub state: String,

    /// Route the client wants to open
    #[validate(length(min = 1, max = 2048))]
    pub path: String,
}
