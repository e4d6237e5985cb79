//! Data API library: a CRUD REST surface over a single record resource.
//!
//! Layout follows a hexagonal split: [`domain`] holds the record model and
//! the data access port, [`outbound`] implements that port, and [`inbound`]
//! exposes it over HTTP. [`doc`] generates the OpenAPI document.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
