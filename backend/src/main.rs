//! Backend entry-point: wires the rental REST API and OpenAPI docs.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use rentals_backend::doc::ApiDoc;
use rentals_backend::domain::RentalService;
use rentals_backend::inbound;
use rentals_backend::inbound::http::state::HttpState;
use rentals_backend::outbound::persistence::{
    DbPool, DieselCustomerRepository, DieselRentalRepository, PoolConfig,
};
use rentals_backend::server::ServerConfig;

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let config = ServerConfig::try_parse().map_err(std::io::Error::other)?;
    let database_url = config.resolve_database_url()?;

    let pool = DbPool::new(PoolConfig::new(&database_url).with_max_size(config.pool_size))
        .await
        .map_err(|error| std::io::Error::other(format!("create database pool: {error}")))?;

    let customers = Arc::new(DieselCustomerRepository::new(pool.clone()));
    let rentals = Arc::new(DieselRentalRepository::new(pool));
    let service = Arc::new(RentalService::new(customers, rentals));
    let state = HttpState::new(service.clone(), service);

    info!(addr = %config.bind_addr, "starting rentals backend");
    HttpServer::new(move || {
        let app = App::new()
            .app_data(web::Data::new(state.clone()))
            .configure(inbound::http::configure);

        #[cfg(debug_assertions)]
        let app =
            app.service(SwaggerUi::new("/docs/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()));

        app
    })
    .bind(config.bind_addr)?
    .run()
    .await
}
