//! Duration and rent arithmetic.
//!
//! The billed amount treats 30 days as one full billing unit: the
//! per-plate rate is a monthly-equivalent rate prorated linearly by the
//! inclusive day count. There is no minimum-charge floor and no
//! proration cap.

use chrono::NaiveDate;
use rust_decimal::{Decimal, RoundingStrategy};

/// Days per billing unit; the rate is a monthly-equivalent rate.
const DAYS_PER_BILLING_UNIT: i64 = 30;

/// Inclusive day count between two calendar dates.
///
/// Both the start day and the end day count, so a rental spanning a
/// single day has duration 1. An end date before the start date yields
/// zero or a negative count; callers decide whether to reject that.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use rentals_backend::domain::billing::duration_days;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
/// let end = NaiveDate::from_ymd_opt(2024, 1, 10).expect("valid date");
/// assert_eq!(duration_days(start, end), 10);
/// ```
pub fn duration_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

/// Total rent for a rental: `rate × plates × days / 30`, rounded to two
/// decimal places with half-away-from-zero rounding.
///
/// # Examples
/// ```
/// use rust_decimal::Decimal;
/// use rentals_backend::domain::billing::total_rent;
///
/// let total = total_rent(Decimal::from(100), 10, 30);
/// assert_eq!(total, Decimal::new(100_000, 2)); // 1000.00
/// ```
pub fn total_rent(rate_per_plate: Decimal, number_of_plates: i32, duration_days: i64) -> Decimal {
    let gross = rate_per_plate * Decimal::from(number_of_plates) * Decimal::from(duration_days)
        / Decimal::from(DAYS_PER_BILLING_UNIT);
    let mut total = gross.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    // Pin the scale so exact amounts still render as e.g. "500.00".
    total.rescale(2);
    total
}
