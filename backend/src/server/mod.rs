//! Server construction and dependency wiring.

use std::sync::Arc;

use actix_web::dev::Server;
use actix_web::{HttpServer, web};
use mockable::DefaultClock;
use tracing::info;

use data_api::config::ServerSettings;
use data_api::doc::{ApiDoc, render};
use data_api::inbound::http::router::{AppDependencies, build_app};
use data_api::inbound::http::state::HttpState;
use data_api::outbound::memory::InMemoryDataStore;

/// Construct the HTTP server from loaded settings.
///
/// The OpenAPI document is generated and rendered here, once, and cloned into
/// each worker.
///
/// # Errors
/// Propagates [`std::io::Error`] when rendering the document or binding the
/// socket fails.
pub fn create_server(settings: &ServerSettings) -> std::io::Result<Server> {
    let resource_path = settings.resource_path();
    let openapi = if settings.docs_enabled {
        let doc = ApiDoc::build(&resource_path, settings.public_url());
        Some(render(&doc).map_err(std::io::Error::other)?)
    } else {
        None
    };
    let store = Arc::new(InMemoryDataStore::new(Arc::new(DefaultClock)));
    let deps = AppDependencies {
        http_state: web::Data::new(HttpState::new(store)),
        resource_path,
        openapi,
    };
    let bind_addr = settings.bind_addr();

    info!(
        %bind_addr,
        resource_path = %deps.resource_path,
        docs_enabled = settings.docs_enabled,
        "starting HTTP server"
    );
    let server = HttpServer::new(move || build_app(deps.clone()))
        .bind(bind_addr)?
        .run();
    Ok(server)
}
