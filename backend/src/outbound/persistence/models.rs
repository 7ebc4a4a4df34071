//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and
//! are never exposed to the domain; conversion into domain entities
//! happens in the repository adapters.

use chrono::{DateTime, NaiveDate, Utc};
use diesel::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::schema::{customers, rentals};

/// Row struct for reading from the customers table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = customers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct CustomerRow {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new customer records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = customers)]
pub(crate) struct NewCustomerRow<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
}

/// Full-row changeset for persisting an edited customer.
///
/// `treat_none_as_null` makes a cleared optional field write NULL instead
/// of being skipped; the domain saves the complete record state.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = customers)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct CustomerUpdate<'a> {
    pub name: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub updated_at: DateTime<Utc>,
}

/// Row struct for reading from the rentals table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = rentals)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct RentalRow {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub number_of_plates: i32,
    pub rate_per_plate: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub total_rent: Decimal,
    pub paid_amount: Decimal,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insertable struct for creating new rental records.
///
/// `status` and `paid_amount` are omitted so their column defaults
/// (`'active'`, `0`) apply.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = rentals)]
pub(crate) struct NewRentalRow<'a> {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub number_of_plates: i32,
    pub rate_per_plate: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub total_rent: Decimal,
    pub notes: Option<&'a str>,
}

/// Partial changeset for rental updates.
///
/// `None` fields are skipped, so only supplied values reach the row;
/// `updated_at` is always set.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = rentals)]
pub(crate) struct RentalChangeset {
    pub number_of_plates: Option<i32>,
    pub rate_per_plate: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub duration_days: Option<i32>,
    pub total_rent: Option<Decimal>,
    pub paid_amount: Option<Decimal>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}
