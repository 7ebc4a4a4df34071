//! Shared HTTP adapter state.
//!
//! Handlers accept this state via `actix_web::web::Data` so they depend
//! only on domain ports and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{RentalsCommand, RentalsQuery};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub rentals: Arc<dyn RentalsCommand>,
    pub rentals_query: Arc<dyn RentalsQuery>,
}

impl HttpState {
    /// Construct state from the rental ports.
    pub fn new(rentals: Arc<dyn RentalsCommand>, rentals_query: Arc<dyn RentalsQuery>) -> Self {
        Self {
            rentals,
            rentals_query,
        }
    }
}
