//! OpenAPI documentation.
//!
//! [`ApiDoc`] derives the document from the `#[utoipa::path]` metadata next to
//! each handler. Bootstrap calls [`ApiDoc::build`] and [`render`] once and
//! hands the result to the router, which serves it with Swagger UI. The
//! `openapi-dump` binary prints the same document for external tooling.
//!
//! utoipa always stamps its own OpenAPI version on the model; [`render`]
//! declares [`OPENAPI_VERSION`] instead. The schemas used here contain no
//! nullable or multi-type members, so they read the same under 3.0.

use serde_json::Value;
use utoipa::OpenApi;
use utoipa::openapi::server::Server;

use crate::domain::{DeletionReceipt, Record, RecordDraft, RecordPatch};
use crate::inbound::http::error::ErrorBody;

/// Resource prefix used in the `#[utoipa::path]` annotations.
pub const DOCUMENTED_RESOURCE_PATH: &str = "/data";

/// OpenAPI version declared by the served document.
pub const OPENAPI_VERSION: &str = "3.0.0";

/// Server URL declared when none is configured.
pub const DEFAULT_PUBLIC_URL: &str = "http://localhost:7070";

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "My API",
        version = "1.0.0",
        description = "API documentation"
    ),
    servers((url = "http://localhost:7070")),
    paths(
        crate::inbound::http::data::list_records,
        crate::inbound::http::data::get_record,
        crate::inbound::http::data::create_record,
        crate::inbound::http::data::update_record,
        crate::inbound::http::data::delete_record,
    ),
    components(schemas(Record, RecordDraft, RecordPatch, DeletionReceipt, ErrorBody)),
    tags((name = "Data", description = "User record operations"))
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Build the document for a deployment serving records under
    /// `resource_path` and reachable at `public_url`.
    ///
    /// # Examples
    /// ```
    /// use data_api::doc::ApiDoc;
    ///
    /// let doc = ApiDoc::build("/users", "https://api.example.test");
    /// assert!(doc.paths.paths.contains_key("/users/{id}"));
    /// ```
    #[must_use]
    pub fn build(resource_path: &str, public_url: &str) -> utoipa::openapi::OpenApi {
        let mut doc = Self::openapi();
        doc.servers = Some(vec![Server::new(public_url)]);
        if resource_path != DOCUMENTED_RESOURCE_PATH {
            let paths = std::mem::take(&mut doc.paths.paths);
            doc.paths.paths = paths
                .into_iter()
                .map(|(path, item)| (rebase(&path, resource_path), item))
                .collect();
        }
        doc
    }
}

/// Serialise `doc` into the JSON served to clients, declaring
/// [`OPENAPI_VERSION`].
///
/// # Errors
/// Propagates [`serde_json::Error`] when the document cannot be serialised.
///
/// # Examples
/// ```
/// use data_api::doc::{ApiDoc, OPENAPI_VERSION, render};
///
/// let json = render(&ApiDoc::build("/data", "http://localhost:7070")).expect("document JSON");
/// assert_eq!(json["openapi"], OPENAPI_VERSION);
/// ```
pub fn render(doc: &utoipa::openapi::OpenApi) -> Result<Value, serde_json::Error> {
    let mut json = serde_json::to_value(doc)?;
    if let Some(root) = json.as_object_mut() {
        root.insert("openapi".to_owned(), Value::from(OPENAPI_VERSION));
    }
    Ok(json)
}

fn rebase(path: &str, resource_path: &str) -> String {
    match path.strip_prefix(DOCUMENTED_RESOURCE_PATH) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("{resource_path}{rest}"),
        _ => path.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    //! Tests verifying the generated OpenAPI document.

    use super::*;
    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    fn assert_object_schema_has_field(doc: &utoipa::openapi::OpenApi, schema: &str, field: &str) {
        let components = doc.components.as_ref().expect("components");
        match components.schemas.get(schema) {
            Some(RefOr::T(Schema::Object(obj))) => assert!(
                obj.properties.contains_key(field),
                "schema {schema} should have field '{field}'"
            ),
            _ => panic!("expected Object schema for {schema}"),
        }
    }

    #[test]
    fn document_declares_info_and_server() {
        let doc = ApiDoc::build(DOCUMENTED_RESOURCE_PATH, DEFAULT_PUBLIC_URL);
        assert_eq!(doc.info.title, "My API");
        assert_eq!(doc.info.version, "1.0.0");
        assert_eq!(doc.info.description.as_deref(), Some("API documentation"));
        let servers = doc.servers.as_ref().expect("servers");
        assert_eq!(servers.len(), 1);
        assert_eq!(servers[0].url, "http://localhost:7070");

    }

    #[test]
    fn rendered_document_declares_openapi_3_0_0() {
        let doc = ApiDoc::build(DOCUMENTED_RESOURCE_PATH, DEFAULT_PUBLIC_URL);
        let json = render(&doc).expect("document JSON");

        assert_eq!(json.get("openapi").and_then(Value::as_str), Some("3.0.0"));
        assert_eq!(
            json.pointer("/info/title").and_then(Value::as_str),
            Some("My API")
        );
        assert!(json.pointer("/paths/~1data~1{id}/delete").is_some());
    }

    #[test]
    fn document_covers_all_record_operations() {
        let doc = ApiDoc::openapi();
        let collection = doc.paths.paths.get("/data").expect("/data path");
        assert!(collection.get.is_some());
        assert!(collection.post.is_some());

        let item = doc.paths.paths.get("/data/{id}").expect("/data/{id} path");
        assert!(item.get.is_some());
        assert!(item.patch.is_some());
        assert!(item.delete.is_some());
    }

    #[rstest]
    #[case("Record", "createdAt")]
    #[case("Record", "updatedAt")]
    #[case("DeletionReceipt", "message")]
    #[case("ErrorBody", "status")]
    fn schemas_expose_wire_fields(#[case] schema: &str, #[case] field: &str) {
        assert_object_schema_has_field(&ApiDoc::openapi(), schema, field);
    }

    #[rstest]
    #[case("RecordDraft")]
    #[case("RecordPatch")]
    fn body_schemas_are_free_form_objects(#[case] schema: &str) {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        let json = serde_json::to_value(components.schemas.get(schema).expect("schema"))
            .expect("schema JSON");
        assert_eq!(json.get("type").and_then(Value::as_str), Some("object"));
        assert!(json.get("properties").is_none());
    }

    #[test]
    fn build_rebases_record_paths_and_server() {
        let doc = ApiDoc::build("/users", "https://api.example.test");
        assert!(doc.paths.paths.contains_key("/users"));
        assert!(doc.paths.paths.contains_key("/users/{id}"));
        assert!(!doc.paths.paths.contains_key("/data"));
        let servers = doc.servers.expect("servers");
        assert_eq!(servers[0].url, "https://api.example.test");
    }

    #[rstest]
    #[case("/data", "/v2/data", "/v2/data")]
    #[case("/data/{id}", "/v2/data", "/v2/data/{id}")]
    #[case("/database", "/v2/data", "/database")]
    #[case("/api-docs", "/v2/data", "/api-docs")]
    fn rebase_only_touches_the_record_prefix(
        #[case] path: &str,
        #[case] prefix: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(rebase(path, prefix), expected);
    }
}
