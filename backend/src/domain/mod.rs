//! Domain model and ports.
//!
//! Purpose: hold the record types exchanged with the data access service and
//! the port through which inbound adapters reach it. Nothing here knows about
//! HTTP.
//!
//! Public surface:
//! - Record, RecordDraft, RecordPatch, DeletionReceipt: payloads.
//! - FieldTypeError: a known member of a draft or patch was not a string.
//! - RecordId, RequestedId: identifiers, the latter possibly not-a-number.
//! - TraceId: request correlation identifier.

pub mod ports;
pub mod record;
pub mod trace_id;

pub use self::record::{
    DEFAULT_ROLE, DELETION_MESSAGE, DeletionReceipt, FieldTypeError, Record, RecordDraft, RecordId,
    RecordPatch, RequestedId,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
