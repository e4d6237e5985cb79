//! Data record model.
//!
//! A record is the user-like entity owned by the data access service. HTTP
//! adapters treat it as an opaque payload: they forward drafts and patches
//! verbatim and return whatever the service hands back.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use utoipa::ToSchema;

/// Confirmation message carried by [`DeletionReceipt`].
pub const DELETION_MESSAGE: &str = "User deleted successfully";

/// Role assigned when a draft omits one.
pub const DEFAULT_ROLE: &str = "user";

/// Numeric record identifier assigned by the data access service.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(transparent)]
pub struct RecordId(i64);

impl RecordId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw integer value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// Identifier requested through a path segment.
///
/// Parsing never fails: text without a leading integer becomes
/// [`RequestedId::NotANumber`] and is forwarded to the data access service,
/// which decides how to react.
///
/// # Examples
/// ```
/// use data_api::domain::{RecordId, RequestedId};
///
/// assert_eq!(RequestedId::parse("42"), RequestedId::Number(RecordId::new(42)));
/// assert_eq!(RequestedId::parse(" 7abc"), RequestedId::Number(RecordId::new(7)));
/// assert!(matches!(RequestedId::parse("abc"), RequestedId::NotANumber { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedId {
    /// The segment starts with a base-10 integer.
    Number(RecordId),
    /// The segment has no leading integer; `raw` keeps the original text.
    NotANumber {
        /// Path segment as received.
        raw: String,
    },
}

impl RequestedId {
    /// Parse a path segment using leading-integer semantics.
    ///
    /// Leading whitespace and a single sign are accepted; parsing stops at
    /// the first non-digit. Values outside the `i64` range are treated as
    /// not-a-number.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let sign_len = usize::from(trimmed.starts_with(['+', '-']));
        let digits = trimmed.get(sign_len..).unwrap_or_default();
        let digit_len = digits
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(digits.len());
        if digit_len == 0 {
            return Self::not_a_number(raw);
        }

        trimmed
            .get(..sign_len + digit_len)
            .and_then(|number| number.parse::<i64>().ok())
            .map_or_else(|| Self::not_a_number(raw), |id| Self::Number(RecordId(id)))
    }

    fn not_a_number(raw: &str) -> Self {
        Self::NotANumber {
            raw: raw.to_owned(),
        }
    }

    /// Return the numeric identifier when parsing succeeded.
    #[must_use]
    pub fn number(&self) -> Option<RecordId> {
        match self {
            Self::Number(id) => Some(*id),
            Self::NotANumber { .. } => None,
        }
    }
}

impl From<RecordId> for RequestedId {
    fn from(value: RecordId) -> Self {
        Self::Number(value)
    }
}

impl fmt::Display for RequestedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(id) => write!(f, "{id}"),
            Self::NotANumber { raw } => f.write_str(raw),
        }
    }
}

/// Stored record.
///
/// ## Invariants
/// - `id` and `created_at` never change after creation.
/// - `updated_at` never moves backwards.
///
/// The password is stored exactly as supplied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Record {
    /// Identifier assigned at creation.
    pub id: RecordId,
    /// Display name.
    #[schema(example = "John Doe")]
    pub name: String,
    /// Contact email.
    #[schema(example = "john.doe@example.com")]
    pub email: String,
    /// Password as stored by the data access service.
    #[schema(example = "hashed_password_here")]
    pub password: String,
    /// Free-form role, for example `user` or `admin`.
    #[schema(example = "user")]
    pub role: String,
    /// Creation timestamp.
    #[schema(example = "2023-10-10T10:00:00Z")]
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    #[schema(example = "2023-10-10T12:00:00Z")]
    pub updated_at: DateTime<Utc>,
}

impl Record {
    /// Build a record from a draft, filling absent fields.
    ///
    /// # Errors
    /// Returns [`FieldTypeError`] when a known field holds a non-string value.
    pub fn from_draft(
        id: RecordId,
        draft: &RecordDraft,
        now: DateTime<Utc>,
    ) -> Result<Self, FieldTypeError> {
        let fields = TextFields::read(draft.fields())?;
        Ok(Self {
            id,
            name: fields.name.unwrap_or_default().to_owned(),
            email: fields.email.unwrap_or_default().to_owned(),
            password: fields.password.unwrap_or_default().to_owned(),
            role: fields.role.unwrap_or(DEFAULT_ROLE).to_owned(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Merge the fields present in `patch` and bump `updated_at`.
    ///
    /// Nothing changes when a known field holds a non-string value.
    /// `updated_at` is clamped so a clock running backwards cannot make it
    /// decrease.
    ///
    /// # Errors
    /// Returns [`FieldTypeError`] for the first offending field.
    pub fn apply(&mut self, patch: &RecordPatch, now: DateTime<Utc>) -> Result<(), FieldTypeError> {
        let fields = TextFields::read(patch.fields())?;
        for (slot, value) in [
            (&mut self.name, fields.name),
            (&mut self.email, fields.email),
            (&mut self.password, fields.password),
            (&mut self.role, fields.role),
        ] {
            if let Some(value) = value {
                value.clone_into(slot);
            }
        }
        self.updated_at = self.updated_at.max(now);
        Ok(())
    }
}

/// A known record field carried a JSON value other than a string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field {field} must be a string")]
pub struct FieldTypeError {
    field: &'static str,
}

impl FieldTypeError {
    /// Name of the offending field.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        self.field
    }
}

/// Borrowed view of the string fields a record understands.
struct TextFields<'a> {
    name: Option<&'a str>,
    email: Option<&'a str>,
    password: Option<&'a str>,
    role: Option<&'a str>,
}

impl<'a> TextFields<'a> {
    fn read(fields: &'a Map<String, Value>) -> Result<Self, FieldTypeError> {
        Ok(Self {
            name: text(fields, "name")?,
            email: text(fields, "email")?,
            password: text(fields, "password")?,
            role: text(fields, "role")?,
        })
    }
}

fn text<'a>(
    fields: &'a Map<String, Value>,
    field: &'static str,
) -> Result<Option<&'a str>, FieldTypeError> {
    fields
        .get(field)
        .map(|value| value.as_str().ok_or(FieldTypeError { field }))
        .transpose()
}

/// JSON object submitted on creation, kept exactly as received.
///
/// The HTTP adapter does not inspect it; the data access service decides
/// which members it understands and which values it rejects.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(
    value_type = Object,
    example = json!({
        "name": "John Doe",
        "email": "john.doe@example.com",
        "password": "hashed_password_here",
        "role": "user"
    })
)]
pub struct RecordDraft(Map<String, Value>);

impl RecordDraft {
    /// Wrap a JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Members as submitted.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Submitted `email`, when present.
    ///
    /// # Errors
    /// Returns [`FieldTypeError`] when `email` is not a string.
    pub fn email(&self) -> Result<Option<&str>, FieldTypeError> {
        text(&self.0, "email")
    }
}

impl From<Map<String, Value>> for RecordDraft {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// JSON object of members to merge into an existing record, kept exactly as
/// received. Absent members leave the record untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(
    value_type = Object,
    example = json!({ "name": "Updated Name", "email": "updated.email@example.com" })
)]
pub struct RecordPatch(Map<String, Value>);

impl RecordPatch {
    /// Wrap a JSON object.
    #[must_use]
    pub const fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// Members as submitted.
    #[must_use]
    pub const fn fields(&self) -> &Map<String, Value> {
        &self.0
    }

    /// Submitted `email`, when present.
    ///
    /// # Errors
    /// Returns [`FieldTypeError`] when `email` is not a string.
    pub fn email(&self) -> Result<Option<&str>, FieldTypeError> {
        text(&self.0, "email")
    }
}

impl From<Map<String, Value>> for RecordPatch {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}

/// Confirmation returned after a record is deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletionReceipt {
    /// Identifier of the removed record.
    pub id: RecordId,
    /// Human-readable confirmation.
    #[schema(example = "User deleted successfully")]
    pub message: String,
}

impl DeletionReceipt {
    /// Build the standard receipt for `id`.
    #[must_use]
    pub fn for_record(id: RecordId) -> Self {
        Self {
            id,
            message: DELETION_MESSAGE.to_owned(),
        }
    }
}
