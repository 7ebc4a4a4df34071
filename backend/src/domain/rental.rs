//! Rental records and their lifecycle status.
//!
//! A rental references exactly one customer and carries two derived
//! fields, `duration_days` and `total_rent`. Those two are always
//! recomputed together from {start_date, end_date, number_of_plates,
//! rate_per_plate}; they are never patched independently (see
//! [`crate::domain::billing`]).

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Lifecycle status of a rental.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RentalStatus {
    Active,
    Pending,
    Completed,
}

impl RentalStatus {
    /// Stable lowercase identifier used on the wire and in storage.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Pending => "pending",
            Self::Completed => "completed",
        }
    }
}

impl Default for RentalStatus {
    fn default() -> Self {
        Self::Active
    }
}

impl std::fmt::Display for RentalStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown status identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown rental status: {value}")]
pub struct RentalStatusParseError {
    pub value: String,
}

impl FromStr for RentalStatus {
    type Err = RentalStatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            other => Err(RentalStatusParseError {
                value: other.to_owned(),
            }),
        }
    }
}

/// A stored rental record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rental {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub number_of_plates: i32,
    pub rate_per_plate: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub total_rent: Decimal,
    pub paid_amount: Decimal,
    pub status: RentalStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields required to create a rental. Derived fields are supplied by
/// the service after recomputation; status defaults to active and the
/// paid amount to zero at the storage layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRental {
    pub customer_id: Uuid,
    pub number_of_plates: i32,
    pub rate_per_plate: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub total_rent: Decimal,
    pub notes: Option<String>,
}
