//! HTTP inbound adapter exposing the members REST endpoints.

pub mod error;
pub mod health;
pub mod members;
pub mod schemas;
pub mod state;

use actix_web::web;

pub use error::ApiResult;

/// Register the JSON and query extractor configuration plus every handler.
///
/// Callers attach [`health::HealthState`] and [`state::HttpState`] as app
/// data.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(health::root)
        .service(health::healthz)
        .service(members::email_availability)
        .service(members::register_member);
}
