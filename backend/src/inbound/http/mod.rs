//! HTTP inbound adapter exposing the rental REST endpoints.

pub mod error;
pub mod rentals;
pub mod schemas;
pub mod state;

pub use error::ApiResult;

use actix_web::web;

/// Register the rental API under `/api/rentals`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/rentals")
            .service(rentals::export_rentals)
            .service(rentals::create_rental)
            .service(rentals::list_rentals)
            .service(rentals::update_rental)
            .service(rentals::delete_rental),
    );
}
