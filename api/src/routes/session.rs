//! Navigation guard endpoint for UI shells

use actix_web::{web, HttpResponse};
use validator::Validate;

use cc_core::domain::{route_decision, SessionState};
use cc_shared::MessageResponse;

use crate::dto::SessionRouteQuery;
use crate::handlers::error::INVALID_SESSION_QUERY_MESSAGE;

/// Handler for GET /api/v1/session/route?state=..&path=..
///
/// Responds with `{"decision": "allow"}`, `{"decision": "pending"}` or
/// `{"decision": "redirect", "location": "/verify/phone"}`.
pub async fn session_route(query: web::Query<SessionRouteQuery>) -> HttpResponse {
    let query = query.into_inner();

    if let Err(errors) = query.validate() {
        log::warn!("Invalid session route query: {}", errors);
        return HttpResponse::BadRequest()
            .json(MessageResponse::failure(INVALID_SESSION_QUERY_MESSAGE));
    }

    match query.state.parse::<SessionState>() {
        Ok(state) => HttpResponse::Ok().json(route_decision(state, &query.path)),
        Err(e) => {
            log::warn!("{}", e);
            HttpResponse::BadRequest().json(MessageResponse::failure(INVALID_SESSION_QUERY_MESSAGE))
        }
    }
}
