//! Domain entities, ports, and services for plate rental tracking.
//!
//! The domain layer is transport and storage agnostic. Inbound adapters
//! translate HTTP payloads into the request types defined in [`ports`];
//! outbound adapters implement the repository ports against PostgreSQL.

pub mod billing;
pub mod customer;
pub mod error;
pub mod ports;
pub mod rental;
pub mod rental_service;

pub use self::customer::{Customer, NewCustomer};
pub use self::error::{Error, ErrorCode};
pub use self::rental::{NewRental, Rental, RentalStatus, RentalStatusParseError};
pub use self::rental_service::RentalService;
