//! Rental domain service.
//!
//! Implements the rental driving ports: find-or-create of the customer
//! on rental creation, recomputation of the derived billing fields, and
//! reconciliation of customer-facing fields on partial updates. Customer
//! and rental writes are separate store operations with no atomicity
//! guarantee across them; a failed rental write does not undo a
//! preceding customer write.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use super::billing;
use super::customer::NewCustomer;
use super::error::Error;
use super::ports::{
    CreateRentalRequest, CustomerRepository, PersistenceError, RentalChanges, RentalRepository,
    RentalWithCustomer, RentalsCommand, RentalsQuery, UpdateRentalRequest,
};
use super::rental::NewRental;

fn map_persistence_error(error: PersistenceError) -> Error {
    match error {
        PersistenceError::Connection { message } => {
            Error::service_unavailable(format!("record store unavailable: {message}"))
        }
        PersistenceError::Query { message } => {
            Error::internal(format!("record store error: {message}"))
        }
    }
}

/// Reject billing inputs that cannot produce a meaningful charge.
fn validate_billing_inputs(
    number_of_plates: i32,
    rate_per_plate: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(), Error> {
    if number_of_plates < 1 {
        return Err(Error::invalid_request(
            "numberOfPlates must be a positive integer",
        ));
    }
    if rate_per_plate <= Decimal::ZERO {
        return Err(Error::invalid_request("ratePerPlate must be positive"));
    }
    if end_date < start_date {
        return Err(Error::invalid_request("endDate must not precede startDate"));
    }
    Ok(())
}

/// Compute both derived fields from validated billing inputs.
fn derived_fields(
    number_of_plates: i32,
    rate_per_plate: Decimal,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> Result<(i32, Decimal), Error> {
    let days = billing::duration_days(start_date, end_date);
    let duration_days =
        i32::try_from(days).map_err(|_| Error::invalid_request("rental period is too long"))?;
    let total_rent = billing::total_rent(rate_per_plate, number_of_plates, days);
    Ok((duration_days, total_rent))
}

/// Rental service implementing the command and query driving ports.
#[derive(Clone)]
pub struct RentalService<C, R> {
    customers: Arc<C>,
    rentals: Arc<R>,
}

impl<C, R> RentalService<C, R> {
    /// Create a new service over the two record stores.
    pub fn new(customers: Arc<C>, rentals: Arc<R>) -> Self {
        Self { customers, rentals }
    }
}

impl<C, R> RentalService<C, R>
where
    C: CustomerRepository,
    R: RentalRepository,
{
    /// Find a customer by exact (name, phone) match or create one.
    ///
    /// When an existing customer matches, a supplied non-empty address
    /// overwrites the stored one; the record is persisted either way.
    /// Concurrent creation of the same pair can produce duplicates; the
    /// store does not enforce uniqueness and this service accepts that.
    async fn resolve_customer(
        &self,
        request: &CreateRentalRequest,
    ) -> Result<super::Customer, Error> {
        let existing = self
            .customers
            .find_by_name_and_phone(&request.name, request.phone.as_deref())
            .await
            .map_err(map_persistence_error)?;

        match existing {
            Some(mut customer) => {
                if let Some(address) = &request.address
                    && !address.trim().is_empty()
                {
                    customer.address = Some(address.clone());
                }
                self.customers
                    .save(&customer)
                    .await
                    .map_err(map_persistence_error)?;
                Ok(customer)
            }
            None => self
                .customers
                .insert(NewCustomer {
                    name: request.name.clone(),
                    phone: request.phone.clone(),
                    address: request.address.clone(),
                })
                .await
                .map_err(map_persistence_error),
        }
    }

    /// Apply supplied customer-facing fields to the rental's customer
    /// and return the saved record.
    async fn reconcile_customer(
        &self,
        customer_id: Uuid,
        request: &UpdateRentalRequest,
    ) -> Result<super::Customer, Error> {
        let mut customer = self
            .customers
            .find_by_id(customer_id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::internal(format!("customer {customer_id} missing")))?;

        if let Some(name) = &request.name {
            customer.name = name.clone();
        }
        if let Some(phone) = &request.phone {
            customer.phone = Some(phone.clone());
        }
        if let Some(address) = &request.address {
            customer.address = Some(address.clone());
        }

        self.customers
            .save(&customer)
            .await
            .map_err(map_persistence_error)?;
        Ok(customer)
    }
}

#[async_trait]
impl<C, R> RentalsCommand for RentalService<C, R>
where
    C: CustomerRepository,
    R: RentalRepository,
{
    async fn create(&self, request: CreateRentalRequest) -> Result<RentalWithCustomer, Error> {
        if request.name.trim().is_empty() {
            return Err(Error::invalid_request("name must not be blank"));
        }
        validate_billing_inputs(
            request.number_of_plates,
            request.rate_per_plate,
            request.start_date,
            request.end_date,
        )?;

        let customer = self.resolve_customer(&request).await?;

        let (duration_days, total_rent) = derived_fields(
            request.number_of_plates,
            request.rate_per_plate,
            request.start_date,
            request.end_date,
        )?;

        let rental = self
            .rentals
            .insert(NewRental {
                customer_id: customer.id,
                number_of_plates: request.number_of_plates,
                rate_per_plate: request.rate_per_plate,
                start_date: request.start_date,
                end_date: request.end_date,
                duration_days,
                total_rent,
                notes: request.notes,
            })
            .await
            .map_err(map_persistence_error)?;

        info!(rental_id = %rental.id, customer_id = %customer.id, "rental created");
        Ok(RentalWithCustomer { rental, customer })
    }

    async fn update(
        &self,
        id: Uuid,
        request: UpdateRentalRequest,
    ) -> Result<RentalWithCustomer, Error> {
        let current = self
            .rentals
            .find_by_id(id)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("rental {id} not found")))?;

        let mut changes = RentalChanges {
            number_of_plates: request.number_of_plates,
            rate_per_plate: request.rate_per_plate,
            start_date: request.start_date,
            end_date: request.end_date,
            paid_amount: request.paid_amount,
            status: request.status,
            notes: request.notes.clone(),
            ..RentalChanges::default()
        };

        if request.touches_billing() {
            // Merge supplied values over the stored record, then recompute
            // both derived fields together so they cannot go stale.
            let number_of_plates = request
                .number_of_plates
                .unwrap_or(current.number_of_plates);
            let rate_per_plate = request.rate_per_plate.unwrap_or(current.rate_per_plate);
            let start_date = request.start_date.unwrap_or(current.start_date);
            let end_date = request.end_date.unwrap_or(current.end_date);

            validate_billing_inputs(number_of_plates, rate_per_plate, start_date, end_date)?;
            let (duration_days, total_rent) =
                derived_fields(number_of_plates, rate_per_plate, start_date, end_date)?;
            changes.duration_days = Some(duration_days);
            changes.total_rent = Some(total_rent);
        }

        let reconciled = if request.touches_customer() {
            // Persisted separately from the rental changeset; the two
            // writes are not atomic.
            Some(self.reconcile_customer(current.customer_id, &request).await?)
        } else {
            None
        };

        let updated = self
            .rentals
            .update(id, changes)
            .await
            .map_err(map_persistence_error)?
            .ok_or_else(|| Error::not_found(format!("rental {id} not found")))?;

        let customer = match reconciled {
            Some(customer) => customer,
            None => {
                self.rentals
                    .find_with_customer(id)
                    .await
                    .map_err(map_persistence_error)?
                    .ok_or_else(|| Error::internal(format!("rental {id} missing after update")))?
                    .customer
            }
        };

        info!(rental_id = %id, "rental updated");
        Ok(RentalWithCustomer {
            rental: updated,
            customer,
        })
    }

    async fn delete(&self, id: Uuid) -> Result<(), Error> {
        self.rentals
            .delete(id)
            .await
            .map_err(map_persistence_error)?;
        info!(rental_id = %id, "rental deleted");
        Ok(())
    }
}

#[async_trait]
impl<C, R> RentalsQuery for RentalService<C, R>
where
    C: CustomerRepository,
    R: RentalRepository,
{
    async fn list(&self) -> Result<Vec<RentalWithCustomer>, Error> {
        self.rentals
            .list_with_customers()
            .await
            .map_err(map_persistence_error)
    }
}

#[cfg(test)]
#[path = "rental_service_tests.rs"]
mod tests;
