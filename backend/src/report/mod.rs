//! Plain-text rental report rendering.
//!
//! The renderer is a thin collaborator: it consumes the ordered, joined
//! record set produced by the query port and lays it out as a numbered
//! textual summary. Dates are rendered as plain calendar dates.

use std::fmt::Write as _;

use crate::domain::ports::RentalWithCustomer;

/// Report title line.
pub const REPORT_TITLE: &str = "Rental Log \u{2014} Construction Plates";

fn optional(value: Option<&str>) -> &str {
    match value {
        Some(text) if !text.is_empty() => text,
        _ => "-",
    }
}

/// Render the rental summary document.
///
/// One numbered entry per rental, in the order supplied (newest first
/// per the list contract).
pub fn render(rentals: &[RentalWithCustomer]) -> String {
    let mut out = String::new();
    out.push_str(REPORT_TITLE);
    out.push_str("\n\n");

    for (index, entry) in rentals.iter().enumerate() {
        let rental = &entry.rental;
        let customer = &entry.customer;

        let _ = writeln!(
            out,
            "{}. {} ({}) - {}",
            index + 1,
            customer.name,
            customer.phone.as_deref().unwrap_or(""),
            rental.status,
        );
        let _ = writeln!(out, "   Address: {}", optional(customer.address.as_deref()));
        let _ = writeln!(
            out,
            "   Plates: {} x \u{20b9}{} | Days: {} | Total: \u{20b9}{}",
            rental.number_of_plates, rental.rate_per_plate, rental.duration_days, rental.total_rent,
        );
        let _ = writeln!(
            out,
            "   Paid: \u{20b9}{} | Notes: {}",
            rental.paid_amount,
            optional(rental.notes.as_deref()),
        );
        let _ = writeln!(
            out,
            "   Period: {} to {}",
            rental.start_date.format("%Y-%m-%d"),
            rental.end_date.format("%Y-%m-%d"),
        );
        out.push('\n');
    }

    out
}
