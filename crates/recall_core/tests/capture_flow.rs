use recall_core::db::open_db_in_memory;
use recall_core::{
    CaptureError, CaptureService, ContactIndex, ContactRecord, SqliteEntryRepository,
};
use uuid::Uuid;

fn contacts() -> ContactIndex {
    ContactIndex::from_records(&[ContactRecord {
        id: "1".to_string(),
        name: "Jeremy Fox".to_string(),
    }])
}

#[test]
fn capture_persists_parsed_name_and_note() {
    let conn = open_db_in_memory().unwrap();
    let service = CaptureService::new(SqliteEntryRepository::new(&conn));

    let stored = service
        .capture("Liz: follow up with deck", None)
        .unwrap()
        .expect("entry should be stored");
    assert_eq!(stored.name, "Liz");
    assert_eq!(stored.note, "follow up with deck");
    assert!(stored.created_at > 0);
    assert_eq!(stored.contact_id, None);

    let fetched = service.get_entry(stored.uuid).unwrap();
    assert_eq!(fetched, Some(stored));
}

#[test]
fn capture_uses_contact_index_for_canonical_names() {
    let conn = open_db_in_memory().unwrap();
    let service = CaptureService::new(SqliteEntryRepository::new(&conn));

    let stored = service
        .capture("Jeremy Fox intro from meetup", Some(&contacts()))
        .unwrap()
        .expect("entry should be stored");
    assert_eq!(stored.name, "Jeremy Fox");
    assert_eq!(stored.note, "intro from meetup");
}

#[test]
fn capture_of_blank_input_stores_nothing() {
    let conn = open_db_in_memory().unwrap();
    let service = CaptureService::new(SqliteEntryRepository::new(&conn));

    assert_eq!(service.capture("   \n ", Some(&contacts())).unwrap(), None);
    let recent = service.list_recent(None, 0).unwrap();
    assert!(recent.items.is_empty());
}

#[test]
fn list_recent_normalizes_limit() {
    let conn = open_db_in_memory().unwrap();
    let service = CaptureService::new(SqliteEntryRepository::new(&conn));

    service.capture("Jeremy — one", None).unwrap();
    service.capture("Sarah — two", None).unwrap();

    let defaulted = service.list_recent(None, 0).unwrap();
    assert_eq!(defaulted.applied_limit, 20);
    assert_eq!(defaulted.items.len(), 2);

    let clamped = service.list_recent(Some(10_000), 0).unwrap();
    assert_eq!(clamped.applied_limit, 100);
}

#[test]
fn link_and_unlink_contact_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let service = CaptureService::new(SqliteEntryRepository::new(&conn));

    let stored = service
        .capture("Sarah — from event", None)
        .unwrap()
        .expect("entry should be stored");

    let linked = service
        .link_contact(stored.uuid, "contact-2".to_string())
        .unwrap();
    assert_eq!(linked.contact_id.as_deref(), Some("contact-2"));

    let unlinked = service.unlink_contact(stored.uuid).unwrap();
    assert_eq!(unlinked.contact_id, None);
}

#[test]
fn linking_missing_entry_reports_entry_not_found() {
    let conn = open_db_in_memory().unwrap();
    let service = CaptureService::new(SqliteEntryRepository::new(&conn));

    let missing = Uuid::new_v4();
    let err = service
        .link_contact(missing, "contact-9".to_string())
        .unwrap_err();
    match err {
        CaptureError::EntryNotFound(entry_id) => assert_eq!(entry_id, missing),
        other => panic!("unexpected error: {other}"),
    }
}
