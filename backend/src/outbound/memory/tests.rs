//! Tests for the in-memory data store.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, TimeZone, Utc};
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::*;

/// Clock returning queued instants, repeating the last one once drained.
struct SteppingClock {
    instants: Mutex<Vec<DateTime<Utc>>>,
}

impl SteppingClock {
    fn new(mut instants: Vec<DateTime<Utc>>) -> Self {
        instants.reverse();
        Self {
            instants: Mutex::new(instants),
        }
    }
}

impl Clock for SteppingClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        let mut instants = self.instants.lock().expect("clock lock");
        if instants.len() > 1 {
            instants.pop().expect("queued instant")
        } else {
            *instants.last().expect("at least one instant")
        }
    }
}

fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2023, 10, 10, 10, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

#[fixture]
fn store() -> InMemoryDataStore {
    InMemoryDataStore::new(Arc::new(SteppingClock::new(vec![fixture_timestamp()])))
}

fn raw_draft(value: Value) -> RecordDraft {
    serde_json::from_value(value).expect("draft JSON")
}

fn draft(name: &str, email: &str) -> RecordDraft {
    raw_draft(json!({
        "name": name,
        "email": email,
        "password": "p",
        "role": "user"
    }))
}

fn patch(value: Value) -> RecordPatch {
    serde_json::from_value(value).expect("patch JSON")
}

fn id(value: i64) -> RequestedId {
    RequestedId::Number(RecordId::new(value))
}

#[rstest]
#[tokio::test]
async fn create_assigns_increasing_ids(store: InMemoryDataStore) {
    let first = store.create(draft("Ada", "ada@x.com")).await.expect("first");
    let second = store.create(draft("Bob", "bob@x.com")).await.expect("second");

    assert_eq!(first.id, RecordId::new(1));
    assert_eq!(second.id, RecordId::new(2));
    assert_eq!(first.created_at, fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn ids_are_not_reused_after_delete(store: InMemoryDataStore) {
    store.create(draft("Ada", "ada@x.com")).await.expect("first");
    store.delete(id(1)).await.expect("deleted");

    let next = store.create(draft("Bob", "bob@x.com")).await.expect("second");
    assert_eq!(next.id, RecordId::new(2));
}

#[rstest]
#[tokio::test]
async fn list_all_returns_records_in_id_order(store: InMemoryDataStore) {
    for (name, email) in [("Ada", "ada@x.com"), ("Bob", "bob@x.com"), ("Cy", "cy@x.com")] {
        store.create(draft(name, email)).await.expect("created");
    }

    let names: Vec<String> = store
        .list_all()
        .await
        .expect("list")
        .into_iter()
        .map(|record| record.name)
        .collect();
    assert_eq!(names, ["Ada", "Bob", "Cy"]);
}

#[rstest]
#[tokio::test]
async fn get_by_id_reports_missing_records(store: InMemoryDataStore) {
    let err = store.get_by_id(id(9)).await.expect_err("missing");
    assert_eq!(err, DataAccessError::not_found(RecordId::new(9)));
    assert_eq!(err.status(), Some(404));
}

#[rstest]
#[tokio::test]
async fn not_a_number_ids_are_rejected(store: InMemoryDataStore) {
    let raw = RequestedId::parse("abc");
    let err = store.get_by_id(raw.clone()).await.expect_err("invalid id");
    assert_eq!(err.status(), Some(400));

    let err = store
        .update(raw.clone(), RecordPatch::default())
        .await
        .expect_err("invalid id");
    assert_eq!(err, DataAccessError::invalid_id("abc"));

    let err = store.delete(raw).await.expect_err("invalid id");
    assert_eq!(err, DataAccessError::invalid_id("abc"));
}

#[rstest]
#[tokio::test]
async fn duplicate_emails_are_rejected(store: InMemoryDataStore) {
    store.create(draft("Ada", "ada@x.com")).await.expect("first");
    store.create(draft("Bob", "bob@x.com")).await.expect("second");

    let err = store
        .create(draft("Eve", "ada@x.com"))
        .await
        .expect_err("duplicate on create");
    assert_eq!(err.status(), Some(409));

    let err = store
        .update(
            id(2),
            patch(json!({ "email": "ada@x.com" })),
        )
        .await
        .expect_err("duplicate on update");
    assert_eq!(err, DataAccessError::duplicate_email("ada@x.com"));
}

#[rstest]
#[tokio::test]
async fn updating_own_email_is_allowed(store: InMemoryDataStore) {
    store.create(draft("Ada", "ada@x.com")).await.expect("created");

    let updated = store
        .update(
            id(1),
            patch(json!({ "email": "ada@x.com" })),
        )
        .await
        .expect("updated");
    assert_eq!(updated.email, "ada@x.com");
}

#[tokio::test]
async fn update_keeps_created_at_and_never_rewinds_updated_at() {
    let created = fixture_timestamp();
    let later = created + Duration::minutes(10);
    let rewound = created - Duration::minutes(10);
    let store = InMemoryDataStore::new(Arc::new(SteppingClock::new(vec![
        created, later, rewound,
    ])));
    store.create(draft("Ada", "ada@x.com")).await.expect("created");

    let first = store
        .update(
            id(1),
            patch(json!({ "name": "New Name" })),
        )
        .await
        .expect("first update");
    assert_eq!(first.name, "New Name");
    assert_eq!(first.created_at, created);
    assert_eq!(first.updated_at, later);

    let second = store
        .update(id(1), RecordPatch::default())
        .await
        .expect("second update");
    assert_eq!(second.created_at, created);
    assert_eq!(second.updated_at, later);
}

#[rstest]
#[tokio::test]
async fn delete_returns_receipt_and_removes_record(store: InMemoryDataStore) {
    store.create(draft("Ada", "ada@x.com")).await.expect("created");

    let receipt = store.delete(id(1)).await.expect("deleted");
    assert_eq!(receipt, DeletionReceipt::for_record(RecordId::new(1)));
    assert_eq!(receipt.message, "User deleted successfully");

    let err = store.delete(id(1)).await.expect_err("already deleted");
    assert_eq!(err, DataAccessError::not_found(RecordId::new(1)));
}

#[rstest]
#[tokio::test]
async fn non_string_fields_are_rejected_without_consuming_ids(store: InMemoryDataStore) {
    let err = store
        .create(raw_draft(json!({ "name": 5 })))
        .await
        .expect_err("numeric name");
    assert_eq!(err, DataAccessError::invalid_field("name"));
    assert_eq!(err.status(), Some(400));

    let created = store.create(draft("Ada", "ada@x.com")).await.expect("created");
    assert_eq!(created.id, RecordId::new(1));

    let err = store
        .update(id(1), patch(json!({ "email": false })))
        .await
        .expect_err("boolean email");
    assert_eq!(err, DataAccessError::invalid_field("email"));
    let unchanged = store.get_by_id(id(1)).await.expect("still stored");
    assert_eq!(unchanged, created);
}

#[rstest]
#[tokio::test]
async fn unknown_members_are_ignored(store: InMemoryDataStore) {
    let created = store
        .create(raw_draft(json!({ "name": "Ada", "nickname": "countess" })))
        .await
        .expect("created");
    assert_eq!(created.name, "Ada");
    assert_eq!(created.role, "user");

    let updated = store
        .update(id(1), patch(json!({ "favouriteColour": "teal" })))
        .await
        .expect("updated");
    assert_eq!(updated.name, "Ada");
}
