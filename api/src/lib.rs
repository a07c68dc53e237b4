//! HTTP API for Civic Connect phone verification

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
