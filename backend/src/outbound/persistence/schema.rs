//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the migrations under `migrations/`
//! exactly; `diesel print-schema` can regenerate them from a live
//! database when the schema changes.

diesel::table! {
    /// Customer records referenced by rentals.
    ///
    /// Lookup uses the (name, phone) pair; no uniqueness constraint is
    /// declared for it, matching the documented duplicate-creation race.
    customers (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Customer name; part of the lookup pair.
        name -> Varchar,
        /// Contact phone; part of the lookup pair.
        phone -> Nullable<Varchar>,
        /// Postal address, if known.
        address -> Nullable<Varchar>,
        /// Record creation timestamp.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Rental transactions, each referencing one customer.
    rentals (id) {
        /// Primary key: UUID v4 identifier.
        id -> Uuid,
        /// Owning customer (foreign key to `customers`).
        customer_id -> Uuid,
        /// Number of plates rented; positive.
        number_of_plates -> Int4,
        /// Monthly-equivalent rate per plate.
        rate_per_plate -> Numeric,
        /// First billed calendar day.
        start_date -> Date,
        /// Last billed calendar day (inclusive).
        end_date -> Date,
        /// Derived inclusive day count.
        duration_days -> Int4,
        /// Derived billed amount, 2-decimal scale.
        total_rent -> Numeric,
        /// Amount received so far.
        paid_amount -> Numeric,
        /// Lifecycle status: active, pending, or completed.
        status -> Varchar,
        /// Free-form notes.
        notes -> Nullable<Text>,
        /// Record creation timestamp; list order key.
        created_at -> Timestamptz,
        /// Last modification timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::joinable!(rentals -> customers (customer_id));
diesel::allow_tables_to_appear_in_same_query!(customers, rentals);
