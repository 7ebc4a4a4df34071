//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain reaches the record stores;
//! driving ports describe the operations inbound adapters invoke. Each
//! trait exposes strongly typed errors so adapters map their failures
//! into predictable variants.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error as ThisError;
use uuid::Uuid;

use super::customer::{Customer, NewCustomer};
use super::error::Error;
use super::rental::{NewRental, Rental, RentalStatus};

/// Errors surfaced by the persistence adapters.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum PersistenceError {
    /// Store connection could not be established or checked out.
    #[error("store connection failed: {message}")]
    Connection { message: String },
    /// Query or mutation failed during execution.
    #[error("store query failed: {message}")]
    Query { message: String },
}

impl PersistenceError {
    /// Helper for connection oriented failures.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Helper for query failures.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }
}

/// A rental joined with its referenced customer for output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RentalWithCustomer {
    pub rental: Rental,
    pub customer: Customer,
}

/// Partial changeset applied to a rental record.
///
/// Every field is an explicit "not provided" marker: `None` keeps the
/// stored value, `Some` replaces it. A supplied zero is a value, not an
/// omission; the service validates it rather than silently ignoring it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RentalChanges {
    pub number_of_plates: Option<i32>,
    pub rate_per_plate: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub total_rent: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
    pub status: Option<RentalStatus>,
    pub notes: Option<String>,
}

/// Persistence port for customer records.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Exact-match lookup on the (name, phone) pair.
    async fn find_by_name_and_phone(
        &self,
        name: &str,
        phone: Option<&str>,
    ) -> Result<Option<Customer>, PersistenceError>;

    /// Fetch a customer by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, PersistenceError>;

    /// Insert a new customer and return the stored record.
    async fn insert(&self, customer: NewCustomer) -> Result<Customer, PersistenceError>;

    /// Persist the full state of an existing customer record.
    async fn save(&self, customer: &Customer) -> Result<(), PersistenceError>;
}

/// Persistence port for rental records.
#[async_trait]
pub trait RentalRepository: Send + Sync {
    /// Insert a new rental and return the stored record.
    async fn insert(&self, rental: NewRental) -> Result<Rental, PersistenceError>;

    /// Fetch a rental by identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, PersistenceError>;

    /// Fetch a rental joined with its customer.
    async fn find_with_customer(
        &self,
        id: Uuid,
    ) -> Result<Option<RentalWithCustomer>, PersistenceError>;

    /// Apply a partial changeset; `None` when the id does not resolve.
    async fn update(
        &self,
        id: Uuid,
        changes: RentalChanges,
    ) -> Result<Option<Rental>, PersistenceError>;

    /// Delete a rental by identifier; deleting a missing id is a no-op.
    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError>;

    /// All rentals joined with their customers, newest first.
    async fn list_with_customers(&self) -> Result<Vec<RentalWithCustomer>, PersistenceError>;
}

/// Inputs for creating a rental together with its customer resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateRentalRequest {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub number_of_plates: i32,
    pub rate_per_plate: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

/// Partial update to a rental and, through it, its customer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRentalRequest {
    pub number_of_plates: Option<i32>,
    pub rate_per_plate: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<RentalStatus>,
    pub paid_amount: Option<Decimal>,
    pub notes: Option<String>,
}

impl UpdateRentalRequest {
    /// True when any billing input is supplied, forcing recomputation of
    /// the derived fields.
    pub fn touches_billing(&self) -> bool {
        self.number_of_plates.is_some()
            || self.rate_per_plate.is_some()
            || self.start_date.is_some()
            || self.end_date.is_some()
    }

    /// True when any customer-facing field is supplied.
    pub fn touches_customer(&self) -> bool {
        self.name.is_some() || self.phone.is_some() || self.address.is_some()
    }
}

/// Driving port for rental mutations.
#[async_trait]
pub trait RentalsCommand: Send + Sync {
    /// Create a rental, resolving or creating its customer.
    async fn create(&self, request: CreateRentalRequest) -> Result<RentalWithCustomer, Error>;

    /// Apply a partial update, reconciling customer-facing fields.
    async fn update(
        &self,
        id: Uuid,
        request: UpdateRentalRequest,
    ) -> Result<RentalWithCustomer, Error>;

    /// Delete a rental; succeeds even when the id does not resolve.
    async fn delete(&self, id: Uuid) -> Result<(), Error>;
}

/// Driving port for rental reads.
#[async_trait]
pub trait RentalsQuery: Send + Sync {
    /// All rentals joined with their customers, newest first.
    async fn list(&self) -> Result<Vec<RentalWithCustomer>, Error>;
}
