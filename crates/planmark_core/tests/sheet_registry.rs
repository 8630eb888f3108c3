use planmark_core::{RegistryError, SheetEvent, SheetRegistry};
use std::collections::HashSet;
use uuid::Uuid;

#[test]
fn add_sheet_assigns_identity_and_stamp() {
    let mut registry = SheetRegistry::new();

    let id = registry.add_sheet("level-2.pdf", "file:///plans/level-2.pdf");

    let sheet = registry.get(id).unwrap();
    assert_eq!(sheet.id, id);
    assert_eq!(sheet.name, "level-2.pdf");
    assert_eq!(sheet.content_ref, "file:///plans/level-2.pdf");
    assert!(sheet.uploaded_at > 0);
}

#[test]
fn add_sequences_have_unique_ids_and_non_decreasing_stamps() {
    let mut registry = SheetRegistry::new();

    let mut ids = HashSet::new();
    for index in 0..20 {
        let id = registry.add_sheet(format!("sheet-{index}.pdf"), "file:///tmp/sheet.pdf");
        assert!(ids.insert(id));
    }

    let stamps: Vec<i64> = registry.list().iter().map(|sheet| sheet.uploaded_at).collect();
    assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn set_current_rejects_unknown_id_and_keeps_previous_pointer() {
    let mut registry = SheetRegistry::new();
    let id = registry.add_sheet("a.pdf", "file:///a.pdf");
    registry.set_current(Some(id)).unwrap();

    let missing = Uuid::new_v4();
    let err = registry.set_current(Some(missing)).unwrap_err();

    assert!(matches!(err, RegistryError::SheetNotFound(id) if id == missing));
    assert_eq!(registry.current_id(), Some(id));

    registry.set_current(None).unwrap();
    assert_eq!(registry.current_id(), None);
}

#[test]
fn current_sheet_is_resolved_by_lookup() {
    let mut registry = SheetRegistry::new();
    let id = registry.add_sheet("a.pdf", "file:///a.pdf");

    assert!(registry.current_sheet().is_none());
    registry.set_current(Some(id)).unwrap();
    assert_eq!(registry.current_sheet().unwrap().id, id);
}

#[test]
fn delete_clears_current_pointer_only_for_the_current_sheet() {
    let mut registry = SheetRegistry::new();
    let first = registry.add_sheet("a.pdf", "file:///a.pdf");
    let second = registry.add_sheet("b.pdf", "file:///b.pdf");

    registry.set_current(Some(first)).unwrap();
    registry.delete(second).unwrap();
    assert_eq!(registry.current_id(), Some(first));

    registry.delete(first).unwrap();
    assert_eq!(registry.current_id(), None);
    assert!(registry.is_empty());
}

#[test]
fn delete_missing_sheet_reports_not_found() {
    let mut registry = SheetRegistry::new();

    let missing = Uuid::new_v4();
    let err = registry.delete(missing).unwrap_err();

    assert!(matches!(err, RegistryError::SheetNotFound(id) if id == missing));
}

#[test]
fn mutations_notify_subscribers_in_order() {
    let mut registry = SheetRegistry::new();
    let events = registry.subscribe();

    let id = registry.add_sheet("a.pdf", "file:///a.pdf");
    registry.set_current(Some(id)).unwrap();
    registry.delete(id).unwrap();

    let received: Vec<SheetEvent> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            SheetEvent::Added(id),
            SheetEvent::CurrentChanged(Some(id)),
            SheetEvent::Deleted(id),
            SheetEvent::CurrentChanged(None),
        ]
    );
}
