//! Rental HTTP handlers.
//!
//! ```text
//! POST   /api/rentals
//! GET    /api/rentals
//! PUT    /api/rentals/{id}
//! DELETE /api/rentals/{id}
//! GET    /api/rentals/export
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::ports::{CreateRentalRequest, RentalWithCustomer, UpdateRentalRequest};
use crate::domain::{Error, RentalStatus};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::report;

/// Request payload for creating a rental.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRentalBody {
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub number_of_plates: i32,
    pub rate_per_plate: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

/// Request payload for a partial rental update.
///
/// Absent fields keep their stored values. A supplied value, including
/// zero, is applied and validated; there is no falsy filtering.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRentalBody {
    pub number_of_plates: Option<i32>,
    pub rate_per_plate: Option<Decimal>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[schema(example = "completed")]
    pub status: Option<String>,
    pub paid_amount: Option<Decimal>,
    pub notes: Option<String>,
}

/// Customer embedded in rental responses.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerBody {
    pub id: Uuid,
    pub name: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Rental response payload with its customer joined in.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RentalBody {
    pub id: Uuid,
    pub customer: CustomerBody,
    pub number_of_plates: i32,
    pub rate_per_plate: Decimal,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration_days: i32,
    pub total_rent: Decimal,
    pub paid_amount: Decimal,
    #[schema(example = "active")]
    pub status: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Acknowledgement returned by the delete endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct DeletedBody {
    pub message: &'static str,
}

impl From<RentalWithCustomer> for RentalBody {
    fn from(value: RentalWithCustomer) -> Self {
        let RentalWithCustomer { rental, customer } = value;
        Self {
            id: rental.id,
            customer: CustomerBody {
                id: customer.id,
                name: customer.name,
                phone: customer.phone,
                address: customer.address,
                created_at: customer.created_at,
                updated_at: customer.updated_at,
            },
            number_of_plates: rental.number_of_plates,
            rate_per_plate: rental.rate_per_plate,
            start_date: rental.start_date,
            end_date: rental.end_date,
            duration_days: rental.duration_days,
            total_rent: scaled(rental.total_rent),
            paid_amount: scaled(rental.paid_amount),
            status: rental.status.to_string(),
            notes: rental.notes,
            created_at: rental.created_at,
            updated_at: rental.updated_at,
        }
    }
}

/// Monetary amounts travel with a fixed two-decimal scale.
fn scaled(mut value: Decimal) -> Decimal {
    value.rescale(2);
    value
}

fn parse_status(value: &str) -> Result<RentalStatus, Error> {
    value
        .parse::<RentalStatus>()
        .map_err(|_| Error::invalid_request("status must be active, pending or completed"))
}

/// Create a rental, resolving or creating its customer.
#[utoipa::path(
    post,
    path = "/api/rentals",
    request_body = CreateRentalBody,
    responses(
        (status = 201, description = "Rental created", body = RentalBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["rentals"],
    operation_id = "createRental"
)]
#[post("")]
pub async fn create_rental(
    state: web::Data<HttpState>,
    payload: web::Json<CreateRentalBody>,
) -> ApiResult<HttpResponse> {
    let body = payload.into_inner();
    let created = state
        .rentals
        .create(CreateRentalRequest {
            name: body.name,
            phone: body.phone,
            address: body.address,
            number_of_plates: body.number_of_plates,
            rate_per_plate: body.rate_per_plate,
            start_date: body.start_date,
            end_date: body.end_date,
            notes: body.notes,
        })
        .await?;

    Ok(HttpResponse::Created().json(RentalBody::from(created)))
}

/// List all rentals, newest first.
#[utoipa::path(
    get,
    path = "/api/rentals",
    responses(
        (status = 200, description = "All rentals, newest first", body = Vec<RentalBody>),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["rentals"],
    operation_id = "listRentals"
)]
#[get("")]
pub async fn list_rentals(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<RentalBody>>> {
    let rentals = state.rentals_query.list().await?;
    Ok(web::Json(rentals.into_iter().map(RentalBody::from).collect()))
}

/// Apply a partial update to a rental.
#[utoipa::path(
    put,
    path = "/api/rentals/{id}",
    request_body = UpdateRentalBody,
    params(("id" = Uuid, Path, description = "Rental identifier")),
    responses(
        (status = 200, description = "Rental updated", body = RentalBody),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Rental not found", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["rentals"],
    operation_id = "updateRental"
)]
#[put("/{id}")]
pub async fn update_rental(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<UpdateRentalBody>,
) -> ApiResult<web::Json<RentalBody>> {
    let body = payload.into_inner();
    let status = match body.status.as_deref() {
        Some(value) => Some(parse_status(value)?),
        None => None,
    };

    let updated = state
        .rentals
        .update(
            id.into_inner(),
            UpdateRentalRequest {
                number_of_plates: body.number_of_plates,
                rate_per_plate: body.rate_per_plate,
                start_date: body.start_date,
                end_date: body.end_date,
                name: body.name,
                phone: body.phone,
                address: body.address,
                status,
                paid_amount: body.paid_amount,
                notes: body.notes,
            },
        )
        .await?;

    Ok(web::Json(RentalBody::from(updated)))
}

/// Delete a rental. Deleting an unknown id still succeeds.
#[utoipa::path(
    delete,
    path = "/api/rentals/{id}",
    params(("id" = Uuid, Path, description = "Rental identifier")),
    responses(
        (status = 200, description = "Rental deleted", body = DeletedBody),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["rentals"],
    operation_id = "deleteRental"
)]
#[delete("/{id}")]
pub async fn delete_rental(
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<DeletedBody>> {
    state.rentals.delete(id.into_inner()).await?;
    Ok(web::Json(DeletedBody { message: "Deleted" }))
}

/// Export the rental log as a plain-text attachment.
#[utoipa::path(
    get,
    path = "/api/rentals/export",
    responses(
        (
            status = 200,
            description = "Plain-text rental log",
            body = String,
            content_type = "text/plain"
        ),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["rentals"],
    operation_id = "exportRentals"
)]
#[get("/export")]
pub async fn export_rentals(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let rentals = state.rentals_query.list().await?;
    let document = report::render(&rentals);

    Ok(HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .insert_header((
            "Content-Disposition",
            "attachment; filename=\"rentals.txt\"",
        ))
        .body(document))
}

#[cfg(test)]
#[path = "rentals_tests.rs"]
mod tests;
