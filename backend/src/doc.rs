//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: The rental endpoints from the inbound layer
//! - **Schemas**: Request and response payloads plus the domain error
//!   wrappers ([`ErrorSchema`], [`ErrorCodeSchema`]) that provide OpenAPI
//!   definitions without coupling domain types to the utoipa framework
//!
//! The generated specification backs Swagger UI in debug builds.

use crate::inbound::http::rentals::{
    CreateRentalBody, CustomerBody, DeletedBody, RentalBody, UpdateRentalBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Plate rentals backend API",
        description = "HTTP interface for tracking construction plate rentals."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::rentals::create_rental,
        crate::inbound::http::rentals::list_rentals,
        crate::inbound::http::rentals::update_rental,
        crate::inbound::http::rentals::delete_rental,
        crate::inbound::http::rentals::export_rentals,
    ),
    components(schemas(
        CreateRentalBody,
        UpdateRentalBody,
        RentalBody,
        CustomerBody,
        DeletedBody,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "rentals", description = "Operations on plate rentals")
    )
)]
pub struct ApiDoc;
