//! Router aggregator.
//!
//! Composes the record scope, the documentation UI and the unmatched-route
//! fallback into one Actix application. The fallback is the app's default
//! service, so it only sees requests no route or method guard accepted.

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::{App, HttpResponse, ResponseError, web};
use serde_json::Value;
use utoipa_swagger_ui::SwaggerUi;

use crate::inbound::http::data;
use crate::inbound::http::error::{ApiError, json_config};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;

/// Path of the interactive documentation UI.
pub const DOCS_PATH: &str = "/api-docs";

/// Path serving the generated OpenAPI document.
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Everything the application factory needs; cloned once per worker.
#[derive(Clone)]
pub struct AppDependencies {
    /// Handler state wrapping the data access port.
    pub http_state: web::Data<HttpState>,
    /// Prefix for the record endpoints, for example `/data`.
    pub resource_path: String,
    /// Pre-rendered API document; `None` disables the documentation UI.
    pub openapi: Option<Value>,
}

/// Respond to unmatched paths and methods.
pub async fn page_not_found() -> HttpResponse {
    ApiError::page_not_found().error_response()
}

async fn docs_redirect() -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, format!("{DOCS_PATH}/")))
        .finish()
}

/// Build the application.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use actix_web::web;
/// use data_api::inbound::http::router::{AppDependencies, build_app};
/// use data_api::inbound::http::state::HttpState;
/// use data_api::outbound::memory::InMemoryDataStore;
/// use mockable::DefaultClock;
///
/// let _app = build_app(AppDependencies {
///     http_state: web::Data::new(HttpState::new(Arc::new(InMemoryDataStore::new(
///         Arc::new(DefaultClock),
///     )))),
///     resource_path: "/data".to_owned(),
///     openapi: None,
/// });
/// ```
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        http_state,
        resource_path,
        openapi,
    } = deps;

    let app = App::new()
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(web::scope(&resource_path).configure(data::configure));

    let app = match openapi {
        Some(doc) => app
            .route(DOCS_PATH, web::get().to(docs_redirect))
            .service(
                SwaggerUi::new(format!("{DOCS_PATH}/{{_:.*}}"))
                    .external_url_unchecked(OPENAPI_JSON_PATH, doc),
            ),
        None => app,
    };

    app.default_service(web::to(page_not_found))
}
