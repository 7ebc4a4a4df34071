//! PostgreSQL persistence adapters built on Diesel.
//!
//! The repositories here implement the domain's driven ports against the
//! `customers` and `rentals` tables. Connection pooling is handled by
//! `diesel-async` with `bb8`; the pool is constructed at startup and
//! passed into each adapter (no ambient global connection).

mod diesel_customer_repository;
mod diesel_error_mapping;
mod diesel_rental_repository;
mod models;
mod pool;
pub mod schema;

pub use diesel_customer_repository::DieselCustomerRepository;
pub use diesel_rental_repository::DieselRentalRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
