//! In-memory repository implementations for tests.
//!
//! These satisfy the domain's driven ports without a database. Creation
//! order is encoded in strictly increasing `created_at` values so the
//! newest-first ordering contract is observable.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::ports::{
    CustomerRepository, PersistenceError, RentalChanges, RentalRepository, RentalWithCustomer,
};
use crate::domain::{Customer, NewCustomer, NewRental, Rental, RentalService, RentalStatus};

/// Shared backing store for the in-memory repositories.
#[derive(Default)]
pub struct InMemoryStore {
    customers: Mutex<Vec<Customer>>,
    rentals: Mutex<Vec<Rental>>,
    seq: AtomicI64,
}

impl InMemoryStore {
    fn next_timestamp(&self) -> DateTime<Utc> {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst);
        DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
            .expect("valid base timestamp")
            .with_timezone(&Utc)
            + Duration::seconds(seq)
    }

    /// Number of stored customer records.
    pub fn customer_count(&self) -> usize {
        self.customers.lock().expect("store poisoned").len()
    }
}

/// In-memory implementation of the customer repository port.
pub struct InMemoryCustomers(Arc<InMemoryStore>);

#[async_trait]
impl CustomerRepository for InMemoryCustomers {
    async fn find_by_name_and_phone(
        &self,
        name: &str,
        phone: Option<&str>,
    ) -> Result<Option<Customer>, PersistenceError> {
        let customers = self.0.customers.lock().expect("store poisoned");
        Ok(customers
            .iter()
            .find(|c| c.name == name && c.phone.as_deref() == phone)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Customer>, PersistenceError> {
        let customers = self.0.customers.lock().expect("store poisoned");
        Ok(customers.iter().find(|c| c.id == id).cloned())
    }

    async fn insert(&self, customer: NewCustomer) -> Result<Customer, PersistenceError> {
        let now = self.0.next_timestamp();
        let stored = Customer {
            id: Uuid::new_v4(),
            name: customer.name,
            phone: customer.phone,
            address: customer.address,
            created_at: now,
            updated_at: now,
        };
        let mut customers = self.0.customers.lock().expect("store poisoned");
        customers.push(stored.clone());
        Ok(stored)
    }

    async fn save(&self, customer: &Customer) -> Result<(), PersistenceError> {
        let updated_at = self.0.next_timestamp();
        let mut customers = self.0.customers.lock().expect("store poisoned");
        let slot = customers
            .iter_mut()
            .find(|c| c.id == customer.id)
            .ok_or_else(|| PersistenceError::query("customer missing"))?;
        *slot = customer.clone();
        slot.updated_at = updated_at;
        Ok(())
    }
}

/// In-memory implementation of the rental repository port.
pub struct InMemoryRentals(Arc<InMemoryStore>);

impl InMemoryRentals {
    fn join(&self, rental: Rental) -> Result<RentalWithCustomer, PersistenceError> {
        let customers = self.0.customers.lock().expect("store poisoned");
        let customer = customers
            .iter()
            .find(|c| c.id == rental.customer_id)
            .cloned()
            .ok_or_else(|| PersistenceError::query("dangling customer reference"))?;
        Ok(RentalWithCustomer { rental, customer })
    }
}

#[async_trait]
impl RentalRepository for InMemoryRentals {
    async fn insert(&self, rental: NewRental) -> Result<Rental, PersistenceError> {
        let now = self.0.next_timestamp();
        let stored = Rental {
            id: Uuid::new_v4(),
            customer_id: rental.customer_id,
            number_of_plates: rental.number_of_plates,
            rate_per_plate: rental.rate_per_plate,
            start_date: rental.start_date,
            end_date: rental.end_date,
            duration_days: rental.duration_days,
            total_rent: rental.total_rent,
            paid_amount: Decimal::ZERO,
            status: RentalStatus::Active,
            notes: rental.notes,
            created_at: now,
            updated_at: now,
        };
        let mut rentals = self.0.rentals.lock().expect("store poisoned");
        rentals.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, PersistenceError> {
        let rentals = self.0.rentals.lock().expect("store poisoned");
        Ok(rentals.iter().find(|r| r.id == id).cloned())
    }

    async fn find_with_customer(
        &self,
        id: Uuid,
    ) -> Result<Option<RentalWithCustomer>, PersistenceError> {
        let rental = {
            let rentals = self.0.rentals.lock().expect("store poisoned");
            rentals.iter().find(|r| r.id == id).cloned()
        };
        rental.map(|r| self.join(r)).transpose()
    }

    async fn update(
        &self,
        id: Uuid,
        changes: RentalChanges,
    ) -> Result<Option<Rental>, PersistenceError> {
        let updated_at = self.0.next_timestamp();
        let mut rentals = self.0.rentals.lock().expect("store poisoned");
        let Some(rental) = rentals.iter_mut().find(|r| r.id == id) else {
            return Ok(None);
        };

        if let Some(value) = changes.number_of_plates {
            rental.number_of_plates = value;
        }
        if let Some(value) = changes.rate_per_plate {
            rental.rate_per_plate = value;
        }
        if let Some(value) = changes.start_date {
            rental.start_date = value;
        }
        if let Some(value) = changes.end_date {
            rental.end_date = value;
        }
        if let Some(value) = changes.duration_days {
            rental.duration_days = value;
        }
        if let Some(value) = changes.total_rent {
            rental.total_rent = value;
        }
        if let Some(value) = changes.paid_amount {
            rental.paid_amount = value;
        }
        if let Some(value) = changes.status {
            rental.status = value;
        }
        if let Some(value) = changes.notes {
            rental.notes = Some(value);
        }
        rental.updated_at = updated_at;
        Ok(Some(rental.clone()))
    }

    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError> {
        let mut rentals = self.0.rentals.lock().expect("store poisoned");
        rentals.retain(|r| r.id != id);
        Ok(())
    }

    async fn list_with_customers(&self) -> Result<Vec<RentalWithCustomer>, PersistenceError> {
        let mut rentals = {
            let guard = self.0.rentals.lock().expect("store poisoned");
            guard.clone()
        };
        rentals.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        rentals.into_iter().map(|r| self.join(r)).collect()
    }
}

/// Build a rental service over fresh in-memory stores.
pub fn in_memory_service() -> (
    RentalService<InMemoryCustomers, InMemoryRentals>,
    Arc<InMemoryStore>,
) {
    let store = Arc::new(InMemoryStore::default());
    let customers = Arc::new(InMemoryCustomers(Arc::clone(&store)));
    let rentals = Arc::new(InMemoryRentals(Arc::clone(&store)));
    (RentalService::new(customers, rentals), store)
}
