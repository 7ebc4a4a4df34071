//! Tests for the rental service.
//!
//! The service runs against the in-memory repositories from
//! `crate::test_support` so the find-or-create, recomputation, and
//! reconciliation logic is exercised without a database.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::*;
use crate::domain::{ErrorCode, RentalStatus};
use crate::test_support::in_memory_service;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn dec(value: &str) -> Decimal {
    value.parse().expect("valid decimal")
}

fn sample_create_request() -> CreateRentalRequest {
    CreateRentalRequest {
        name: "Ada Lovelace".into(),
        phone: Some("9876543210".into()),
        address: Some("12 Canal Road".into()),
        number_of_plates: 5,
        rate_per_plate: dec("300"),
        start_date: date(2024, 1, 1),
        end_date: date(2024, 1, 10),
        notes: None,
    }
}

#[tokio::test]
async fn create_computes_derived_fields_and_creates_one_customer() {
    let (service, store) = in_memory_service();

    let created = service
        .create(sample_create_request())
        .await
        .expect("create succeeds");

    assert_eq!(created.rental.duration_days, 10);
    assert_eq!(created.rental.total_rent, dec("500.00"));
    assert_eq!(created.rental.paid_amount, Decimal::ZERO);
    assert_eq!(created.rental.status, RentalStatus::Active);
    assert_eq!(created.customer.name, "Ada Lovelace");
    assert_eq!(created.rental.customer_id, created.customer.id);
    assert_eq!(store.customer_count(), 1);
}

#[tokio::test]
async fn create_reuses_customer_matched_on_name_and_phone() {
    let (service, store) = in_memory_service();

    let first = service
        .create(sample_create_request())
        .await
        .expect("first create succeeds");
    let second = service
        .create(sample_create_request())
        .await
        .expect("second create succeeds");

    assert_eq!(first.customer.id, second.customer.id);
    assert_eq!(store.customer_count(), 1);
}

#[tokio::test]
async fn create_keeps_address_when_none_supplied() {
    let (service, _store) = in_memory_service();

    service
        .create(sample_create_request())
        .await
        .expect("first create succeeds");

    let mut request = sample_create_request();
    request.address = None;
    let second = service.create(request).await.expect("second create succeeds");

    assert_eq!(second.customer.address.as_deref(), Some("12 Canal Road"));
}

#[tokio::test]
async fn create_keeps_address_when_blank_supplied() {
    let (service, _store) = in_memory_service();

    service
        .create(sample_create_request())
        .await
        .expect("first create succeeds");

    let mut request = sample_create_request();
    request.address = Some("   ".into());
    let second = service.create(request).await.expect("second create succeeds");

    assert_eq!(second.customer.address.as_deref(), Some("12 Canal Road"));
}

#[tokio::test]
async fn create_overwrites_address_when_new_one_supplied() {
    let (service, _store) = in_memory_service();

    service
        .create(sample_create_request())
        .await
        .expect("first create succeeds");

    let mut request = sample_create_request();
    request.address = Some("99 Harbour Lane".into());
    let second = service.create(request).await.expect("second create succeeds");

    assert_eq!(second.customer.address.as_deref(), Some("99 Harbour Lane"));
}

#[tokio::test]
async fn create_treats_distinct_phone_as_new_customer() {
    let (service, store) = in_memory_service();

    service
        .create(sample_create_request())
        .await
        .expect("first create succeeds");

    let mut request = sample_create_request();
    request.phone = Some("1112223334".into());
    service.create(request).await.expect("second create succeeds");

    assert_eq!(store.customer_count(), 2);
}

#[tokio::test]
async fn create_rejects_invalid_billing_inputs() {
    let (service, store) = in_memory_service();

    let mut zero_plates = sample_create_request();
    zero_plates.number_of_plates = 0;
    let mut zero_rate = sample_create_request();
    zero_rate.rate_per_plate = Decimal::ZERO;
    let mut inverted_dates = sample_create_request();
    inverted_dates.start_date = date(2024, 1, 10);
    inverted_dates.end_date = date(2024, 1, 1);
    let mut blank_name = sample_create_request();
    blank_name.name = "  ".into();

    for request in [zero_plates, zero_rate, inverted_dates, blank_name] {
        let err = service.create(request).await.expect_err("rejected");
        assert_eq!(err.code(), ErrorCode::InvalidRequest);
    }
    // Validation failed before any write.
    assert_eq!(store.customer_count(), 0);
}

#[tokio::test]
async fn update_plates_recomputes_total_and_keeps_duration() {
    let (service, _store) = in_memory_service();
    let created = service
        .create(sample_create_request())
        .await
        .expect("create succeeds");

    let updated = service
        .update(
            created.rental.id,
            UpdateRentalRequest {
                number_of_plates: Some(10),
                ..UpdateRentalRequest::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.rental.duration_days, 10);
    assert_eq!(updated.rental.total_rent, dec("1000.00"));
    assert_eq!(updated.rental.rate_per_plate, dec("300"));
}

#[tokio::test]
async fn update_dates_recomputes_both_derived_fields() {
    let (service, _store) = in_memory_service();
    let created = service
        .create(sample_create_request())
        .await
        .expect("create succeeds");

    let updated = service
        .update(
            created.rental.id,
            UpdateRentalRequest {
                end_date: Some(date(2024, 1, 30)),
                ..UpdateRentalRequest::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.rental.duration_days, 30);
    assert_eq!(updated.rental.total_rent, dec("1500.00"));
}

#[tokio::test]
async fn update_rejects_supplied_zero_values() {
    let (service, _store) = in_memory_service();
    let created = service
        .create(sample_create_request())
        .await
        .expect("create succeeds");

    let err = service
        .update(
            created.rental.id,
            UpdateRentalRequest {
                number_of_plates: Some(0),
                ..UpdateRentalRequest::default()
            },
        )
        .await
        .expect_err("zero plate count rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);

    let err = service
        .update(
            created.rental.id,
            UpdateRentalRequest {
                rate_per_plate: Some(Decimal::ZERO),
                ..UpdateRentalRequest::default()
            },
        )
        .await
        .expect_err("zero rate rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[tokio::test]
async fn update_missing_rental_is_not_found() {
    let (service, _store) = in_memory_service();

    let err = service
        .update(Uuid::new_v4(), UpdateRentalRequest::default())
        .await
        .expect_err("missing rental rejected");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[tokio::test]
async fn update_customer_fields_persists_to_customer_record() {
    let (service, _store) = in_memory_service();
    let created = service
        .create(sample_create_request())
        .await
        .expect("create succeeds");

    let updated = service
        .update(
            created.rental.id,
            UpdateRentalRequest {
                name: Some("Ada King".into()),
                address: Some("1 Ockham Park".into()),
                ..UpdateRentalRequest::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.customer.id, created.customer.id);
    assert_eq!(updated.customer.name, "Ada King");
    assert_eq!(updated.customer.address.as_deref(), Some("1 Ockham Park"));
    // Phone was not supplied, so it is untouched.
    assert_eq!(updated.customer.phone.as_deref(), Some("9876543210"));
}

#[tokio::test]
async fn update_without_customer_fields_returns_joined_customer() {
    let (service, _store) = in_memory_service();
    let created = service
        .create(sample_create_request())
        .await
        .expect("create succeeds");

    let updated = service
        .update(
            created.rental.id,
            UpdateRentalRequest {
                paid_amount: Some(dec("100.00")),
                ..UpdateRentalRequest::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.customer.id, created.customer.id);
    assert_eq!(updated.customer.name, "Ada Lovelace");
    assert_eq!(updated.customer.phone.as_deref(), Some("9876543210"));
}

#[tokio::test]
async fn update_status_and_paid_amount() {
    let (service, _store) = in_memory_service();
    let created = service
        .create(sample_create_request())
        .await
        .expect("create succeeds");

    let updated = service
        .update(
            created.rental.id,
            UpdateRentalRequest {
                status: Some(RentalStatus::Completed),
                paid_amount: Some(dec("250.00")),
                notes: Some("half settled".into()),
                ..UpdateRentalRequest::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.rental.status, RentalStatus::Completed);
    assert_eq!(updated.rental.paid_amount, dec("250.00"));
    assert_eq!(updated.rental.notes.as_deref(), Some("half settled"));
    // Derived fields are untouched by a non-billing update.
    assert_eq!(updated.rental.total_rent, dec("500.00"));
    assert_eq!(updated.rental.duration_days, 10);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let (service, _store) = in_memory_service();
    let created = service
        .create(sample_create_request())
        .await
        .expect("create succeeds");

    service
        .delete(created.rental.id)
        .await
        .expect("first delete succeeds");
    service
        .delete(created.rental.id)
        .await
        .expect("second delete succeeds");
}

#[tokio::test]
async fn list_orders_rentals_newest_first() {
    let (service, _store) = in_memory_service();

    let mut ids = Vec::new();
    for phone in ["1", "2", "3"] {
        let mut request = sample_create_request();
        request.phone = Some(phone.to_owned());
        let created = service.create(request).await.expect("create succeeds");
        ids.push(created.rental.id);
    }

    let listed = service.list().await.expect("list succeeds");
    let listed_ids: Vec<Uuid> = listed.iter().map(|r| r.rental.id).collect();

    ids.reverse();
    assert_eq!(listed_ids, ids);
}

#[tokio::test]
async fn end_to_end_create_then_update_plate_count() {
    let (service, _store) = in_memory_service();

    let created = service
        .create(sample_create_request())
        .await
        .expect("create succeeds");
    assert_eq!(created.rental.duration_days, 10);
    assert_eq!(created.rental.total_rent, dec("500.00"));

    let updated = service
        .update(
            created.rental.id,
            UpdateRentalRequest {
                number_of_plates: Some(10),
                ..UpdateRentalRequest::default()
            },
        )
        .await
        .expect("update succeeds");

    assert_eq!(updated.rental.duration_days, 10);
    assert_eq!(updated.rental.total_rent, dec("1000.00"));
}
