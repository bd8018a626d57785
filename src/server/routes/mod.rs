//! HTTP route modules

pub mod batch;

use actix_web::web;

/// Configure all uploader routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    batch::configure_routes(cfg);
}
