//! PostgreSQL-backed `RentalRepository` implementation using Diesel.
//!
//! Rows are converted through the domain status parser so an unknown
//! status value stored out-of-band surfaces as a query error rather than
//! a panic.

use std::str::FromStr;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{
    PersistenceError, RentalChanges, RentalRepository, RentalWithCustomer,
};
use crate::domain::{Customer, NewRental, Rental, RentalStatus};

use super::diesel_error_mapping::{map_diesel_error, map_pool_error};
use super::models::{CustomerRow, NewRentalRow, RentalChangeset, RentalRow};
use super::pool::DbPool;
use super::schema::{customers, rentals};

/// Diesel-backed implementation of the rental repository port.
#[derive(Clone)]
pub struct DieselRentalRepository {
    pool: DbPool,
}

impl DieselRentalRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Convert a database row into a domain rental.
fn row_to_rental(row: RentalRow) -> Result<Rental, PersistenceError> {
    let status = RentalStatus::from_str(&row.status)
        .map_err(|err| PersistenceError::query(err.to_string()))?;

    Ok(Rental {
        id: row.id,
        customer_id: row.customer_id,
        number_of_plates: row.number_of_plates,
        rate_per_plate: row.rate_per_plate,
        start_date: row.start_date,
        end_date: row.end_date,
        duration_days: row.duration_days,
        total_rent: row.total_rent,
        paid_amount: row.paid_amount,
        status,
        notes: row.notes,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

fn join_rows(
    (rental, customer): (RentalRow, CustomerRow),
) -> Result<RentalWithCustomer, PersistenceError> {
    Ok(RentalWithCustomer {
        rental: row_to_rental(rental)?,
        customer: Customer::from(customer),
    })
}

fn changeset_from(changes: RentalChanges) -> RentalChangeset {
    RentalChangeset {
        number_of_plates: changes.number_of_plates,
        rate_per_plate: changes.rate_per_plate,
        start_date: changes.start_date,
        end_date: changes.end_date,
        duration_days: changes.duration_days,
        total_rent: changes.total_rent,
        paid_amount: changes.paid_amount,
        status: changes.status.map(|status| status.as_str().to_owned()),
        notes: changes.notes,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl RentalRepository for DieselRentalRepository {
    async fn insert(&self, rental: NewRental) -> Result<Rental, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let new_row = NewRentalRow {
            id: Uuid::new_v4(),
            customer_id: rental.customer_id,
            number_of_plates: rental.number_of_plates,
            rate_per_plate: rental.rate_per_plate,
            start_date: rental.start_date,
            end_date: rental.end_date,
            duration_days: rental.duration_days,
            total_rent: rental.total_rent,
            notes: rental.notes.as_deref(),
        };

        let row = diesel::insert_into(rentals::table)
            .values(&new_row)
            .returning(RentalRow::as_returning())
            .get_result::<RentalRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        row_to_rental(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Rental>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = rentals::table
            .find(id)
            .select(RentalRow::as_select())
            .first::<RentalRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_rental).transpose()
    }

    async fn find_with_customer(
        &self,
        id: Uuid,
    ) -> Result<Option<RentalWithCustomer>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = rentals::table
            .inner_join(customers::table)
            .filter(rentals::id.eq(id))
            .select((RentalRow::as_select(), CustomerRow::as_select()))
            .first::<(RentalRow, CustomerRow)>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(join_rows).transpose()
    }

    async fn update(
        &self,
        id: Uuid,
        changes: RentalChanges,
    ) -> Result<Option<Rental>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = diesel::update(rentals::table.find(id))
            .set(&changeset_from(changes))
            .returning(RentalRow::as_returning())
            .get_result::<RentalRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        row.map(row_to_rental).transpose()
    }

    async fn delete(&self, id: Uuid) -> Result<(), PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        // Affected-row count is deliberately ignored: deleting a missing
        // id is a success (idempotent delete).
        diesel::delete(rentals::table.find(id))
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(map_diesel_error)
    }

    async fn list_with_customers(&self) -> Result<Vec<RentalWithCustomer>, PersistenceError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = rentals::table
            .inner_join(customers::table)
            .order((rentals::created_at.desc(), rentals::id.desc()))
            .select((RentalRow::as_select(), CustomerRow::as_select()))
            .load::<(RentalRow, CustomerRow)>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        rows.into_iter().map(join_rows).collect()
    }
}
