//! Driven port for record persistence.
//!
//! Inbound adapters reach the backing store only through
//! [`DataAccessService`]. Failures carry an optional status hint and a
//! message; callers forward both without interpreting them further.

use async_trait::async_trait;

use crate::domain::{
    DeletionReceipt, FieldTypeError, Record, RecordDraft, RecordId, RecordPatch, RequestedId,
};

use super::define_port_error;

define_port_error! {
    /// Failures raised by data access adapters.
    pub enum DataAccessError {
        /// No record exists for the identifier.
        NotFound { id: RecordId } => (Some(404), "record {id} not found"),
        /// The requested identifier is not a number.
        InvalidId { raw: String } => (Some(400), "invalid record id: {raw}"),
        /// A known record field holds a non-string value.
        InvalidField { field: String } => (Some(400), "field {field} must be a string"),
        /// Another record already holds the email address.
        DuplicateEmail { email: String } =>
            (Some(409), "email {email} is already registered"),
        /// Adapter-defined rejection with an explicit status.
        Rejected { status: u16, message: String } => (Some(*status), "{message}"),
        /// Backing store failure without a status hint.
        Store { message: String } => (None, "data store failure: {message}"),
    }
}

impl DataAccessError {
    /// Map a requested identifier to its numeric form or an
    /// [`DataAccessError::InvalidId`] failure.
    ///
    /// # Errors
    /// Returns [`DataAccessError::InvalidId`] for not-a-number identifiers.
    pub fn require_number(id: &RequestedId) -> Result<RecordId, Self> {
        match id {
            RequestedId::Number(id) => Ok(*id),
            RequestedId::NotANumber { raw } => Err(Self::invalid_id(raw.as_str())),
        }
    }
}

impl From<FieldTypeError> for DataAccessError {
    fn from(err: FieldTypeError) -> Self {
        Self::invalid_field(err.field())
    }
}

/// Port exposing the five record operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DataAccessService: Send + Sync {
    /// Return every record in store order.
    async fn list_all(&self) -> Result<Vec<Record>, DataAccessError>;

    /// Fetch one record.
    async fn get_by_id(&self, id: RequestedId) -> Result<Record, DataAccessError>;

    /// Store a new record, assigning its id and timestamps.
    async fn create(&self, draft: RecordDraft) -> Result<Record, DataAccessError>;

    /// Merge `patch` into an existing record and return the result.
    async fn update(&self, id: RequestedId, patch: RecordPatch)
    -> Result<Record, DataAccessError>;

    /// Remove a record and return a confirmation.
    async fn delete(&self, id: RequestedId) -> Result<DeletionReceipt, DataAccessError>;
}
