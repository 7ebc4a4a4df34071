//! Backend library modules.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod outbound;
pub mod report;
pub mod server;

#[cfg(test)]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
