//! Record API handlers.
//!
//! ```text
//! GET    /data
//! GET    /data/{id}
//! POST   /data        {"name":"John Doe","email":"john@x.com","password":"p","role":"user"}
//! PATCH  /data/{id}   {"name":"New Name"}
//! DELETE /data/{id}
//! ```
//!
//! Path ids are parsed with leading-integer semantics and forwarded even when
//! they are not numbers; the data access service decides how to react.
//! Bodies must be JSON objects; their members are forwarded untouched, and
//! a missing `Content-Type` is tolerated.

use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, web};

use crate::domain::{DeletionReceipt, Record, RecordDraft, RecordPatch, RequestedId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::guard::guarded;
use crate::inbound::http::state::HttpState;

/// Body returned by a successful create.
pub const CREATED_MESSAGE: &str = "User created successfully";

/// Status used when a list failure carries no status of its own.
pub const LIST_FALLBACK_STATUS: StatusCode = StatusCode::FORBIDDEN;

/// Status used by the remaining handlers when a failure carries none.
pub const DEFAULT_FALLBACK_STATUS: StatusCode = StatusCode::INTERNAL_SERVER_ERROR;

/// Register the record handlers on a scope or app.
///
/// The collection answers with and without a trailing slash. Each route
/// guards on its method, so other methods fall through to the app's default
/// service.
pub fn configure(cfg: &mut web::ServiceConfig) {
    for collection in ["", "/"] {
        cfg.route(collection, web::get().to(list_records))
            .route(collection, web::post().to(create_record));
    }
    cfg.route("/{id}", web::get().to(get_record))
        .route("/{id}", web::patch().to(update_record))
        .route("/{id}", web::delete().to(delete_record));
}

/// List all records.
#[utoipa::path(
    get,
    path = "/data",
    responses(
        (status = 200, description = "Success", body = [Record]),
        (status = 403, description = "Listing failed", body = ErrorBody)
    ),
    tags = ["Data"],
    operation_id = "listRecords",
    summary = "Get all users"
)]
pub async fn list_records(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Record>>> {
    let records = guarded(LIST_FALLBACK_STATUS, state.data.list_all()).await?;
    Ok(web::Json(records))
}

/// Fetch one record by id.
#[utoipa::path(
    get,
    path = "/data/{id}",
    params(("id" = i64, Path, description = "Record identifier", example = 1)),
    responses(
        (status = 200, description = "Success", body = Record),
        (status = 404, description = "Record not found", body = ErrorBody),
        (status = 500, description = "Lookup failed", body = ErrorBody)
    ),
    tags = ["Data"],
    operation_id = "getRecord",
    summary = "Get user by ID"
)]
pub async fn get_record(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Record>> {
    let id = RequestedId::parse(&path);
    let record = guarded(DEFAULT_FALLBACK_STATUS, state.data.get_by_id(id)).await?;
    Ok(web::Json(record))
}

/// Create a record.
///
/// The created record is not echoed back; clients receive a fixed
/// confirmation string.
#[utoipa::path(
    post,
    path = "/data",
    request_body = RecordDraft,
    responses(
        (
            status = 201,
            description = "User created successfully",
            body = String,
            content_type = "text/plain",
            example = json!("User created successfully")
        ),
        (status = 400, description = "Malformed JSON body", body = ErrorBody),
        (status = 500, description = "Creation failed", body = ErrorBody)
    ),
    tags = ["Data"],
    operation_id = "createRecord",
    summary = "Create new user"
)]
pub async fn create_record(
    state: web::Data<HttpState>,
    payload: web::Json<RecordDraft>,
) -> ApiResult<HttpResponse> {
    guarded(DEFAULT_FALLBACK_STATUS, state.data.create(payload.into_inner())).await?;
    Ok(HttpResponse::Created()
        .content_type(ContentType::plaintext())
        .body(CREATED_MESSAGE))
}

/// Merge fields into a record.
#[utoipa::path(
    patch,
    path = "/data/{id}",
    params(("id" = i64, Path, description = "Record identifier", example = 1)),
    request_body = RecordPatch,
    responses(
        (status = 200, description = "User updated successfully", body = Record),
        (status = 400, description = "Malformed JSON body", body = ErrorBody),
        (status = 404, description = "Record not found", body = ErrorBody),
        (status = 500, description = "Update failed", body = ErrorBody)
    ),
    tags = ["Data"],
    operation_id = "updateRecord",
    summary = "Update user by ID"
)]
pub async fn update_record(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<RecordPatch>,
) -> ApiResult<web::Json<Record>> {
    let id = RequestedId::parse(&path);
    let record = guarded(
        DEFAULT_FALLBACK_STATUS,
        state.data.update(id, payload.into_inner()),
    )
    .await?;
    Ok(web::Json(record))
}

/// Delete a record.
#[utoipa::path(
    delete,
    path = "/data/{id}",
    params(("id" = i64, Path, description = "Record identifier", example = 1)),
    responses(
        (status = 200, description = "User deleted successfully", body = DeletionReceipt),
        (status = 404, description = "Record not found", body = ErrorBody),
        (status = 500, description = "Deletion failed", body = ErrorBody)
    ),
    tags = ["Data"],
    operation_id = "deleteRecord",
    summary = "Delete user by ID"
)]
pub async fn delete_record(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletionReceipt>> {
    let id = RequestedId::parse(&path);
    let receipt = guarded(DEFAULT_FALLBACK_STATUS, state.data.delete(id)).await?;
    Ok(web::Json(receipt))
}
