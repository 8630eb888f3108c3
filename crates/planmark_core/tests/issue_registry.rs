use planmark_core::{
    IssueEvent, IssueKind, IssuePatch, IssuePriority, IssueRegistry, IssueStatus, NewIssue,
    RegistryError,
};
use std::collections::HashSet;
use uuid::Uuid;

#[test]
fn create_assigns_identity_and_empty_thread() {
    let mut registry = IssueRegistry::new();

    let id = registry.create(draft("Cracked slab")).unwrap();

    let issue = registry.get(id).unwrap();
    assert_eq!(issue.id, id);
    assert_eq!(issue.title, "Cracked slab");
    assert!(issue.comments.is_empty());
    assert!(issue.tags.is_empty());
    assert!(issue.created_at > 0);
}

#[test]
fn create_sequences_have_unique_ids_and_non_decreasing_stamps() {
    let mut registry = IssueRegistry::new();

    let mut ids = HashSet::new();
    for index in 0..50 {
        let id = registry.create(draft(&format!("issue {index}"))).unwrap();
        assert!(ids.insert(id));
    }

    let stamps: Vec<i64> = registry.list().iter().map(|issue| issue.created_at).collect();
    assert!(stamps.windows(2).all(|pair| pair[0] <= pair[1]));
}

#[test]
fn create_normalizes_supplied_tags() {
    let mut registry = IssueRegistry::new();

    let mut incoming = draft("Tagged");
    incoming.tags = vec![
        " electrical ".to_string(),
        "electrical".to_string(),
        "".to_string(),
    ];
    let id = registry.create(incoming).unwrap();

    assert_eq!(registry.get(id).unwrap().tags, vec!["electrical".to_string()]);
}

#[test]
fn create_rejects_negative_cost_and_leaves_registry_empty() {
    let mut registry = IssueRegistry::new();

    let mut incoming = draft("Too cheap");
    incoming.cost = Some(-1.0);
    let err = registry.create(incoming).unwrap_err();

    assert!(matches!(err, RegistryError::Validation(_)));
    assert!(registry.is_empty());
}

#[test]
fn update_merges_into_stored_record() {
    let mut registry = IssueRegistry::new();
    let id = registry.create(draft("Leaky valve")).unwrap();

    registry
        .update(
            id,
            IssuePatch {
                status: Some(IssueStatus::Resolved),
                assigned_to: Some(Some("sam".to_string())),
                ..IssuePatch::default()
            },
        )
        .unwrap();

    let issue = registry.get(id).unwrap();
    assert_eq!(issue.status, IssueStatus::Resolved);
    assert_eq!(issue.assigned_to.as_deref(), Some("sam"));
    assert_eq!(issue.title, "Leaky valve");
}

#[test]
fn update_missing_issue_reports_not_found() {
    let mut registry = IssueRegistry::new();

    let missing = Uuid::new_v4();
    let err = registry.update(missing, IssuePatch::default()).unwrap_err();

    assert!(matches!(err, RegistryError::IssueNotFound(id) if id == missing));
}

#[test]
fn failed_update_leaves_stored_record_untouched() {
    let mut registry = IssueRegistry::new();
    let id = registry.create(draft("Valid")).unwrap();

    let err = registry
        .update(
            id,
            IssuePatch {
                title: Some("Poisoned merge".to_string()),
                cost: Some(Some(-40.0)),
                ..IssuePatch::default()
            },
        )
        .unwrap_err();

    assert!(matches!(err, RegistryError::Validation(_)));
    let issue = registry.get(id).unwrap();
    assert_eq!(issue.title, "Valid");
    assert_eq!(issue.cost, None);
}

#[test]
fn selection_observes_updates_immediately() {
    let mut registry = IssueRegistry::new();
    let id = registry.create(draft("Stale check")).unwrap();
    registry.select(Some(id)).unwrap();

    registry
        .update(
            id,
            IssuePatch {
                status: Some(IssueStatus::Resolved),
                ..IssuePatch::default()
            },
        )
        .unwrap();

    let selected = registry.selected_issue().unwrap();
    assert_eq!(selected.status, IssueStatus::Resolved);
}

#[test]
fn select_rejects_unknown_id_and_keeps_previous_selection() {
    let mut registry = IssueRegistry::new();
    let id = registry.create(draft("Selected")).unwrap();
    registry.select(Some(id)).unwrap();

    let missing = Uuid::new_v4();
    let err = registry.select(Some(missing)).unwrap_err();

    assert!(matches!(err, RegistryError::IssueNotFound(id) if id == missing));
    assert_eq!(registry.selected_id(), Some(id));

    registry.select(None).unwrap();
    assert_eq!(registry.selected_id(), None);
}

#[test]
fn delete_clears_selection_only_for_the_selected_issue() {
    let mut registry = IssueRegistry::new();
    let first = registry.create(draft("First")).unwrap();
    let second = registry.create(draft("Second")).unwrap();

    registry.select(Some(first)).unwrap();
    registry.delete(second).unwrap();
    assert_eq!(registry.selected_id(), Some(first));

    registry.delete(first).unwrap();
    assert_eq!(registry.selected_id(), None);
    assert!(registry.selected_issue().is_none());
}

#[test]
fn delete_missing_issue_reports_not_found() {
    let mut registry = IssueRegistry::new();

    let missing = Uuid::new_v4();
    let err = registry.delete(missing).unwrap_err();

    assert!(matches!(err, RegistryError::IssueNotFound(id) if id == missing));
}

#[test]
fn add_comment_appends_exactly_one_record() {
    let mut registry = IssueRegistry::new();
    let id = registry.create(draft("Commented")).unwrap();

    let comment_id = registry.add_comment(id, "ok", "site-lead").unwrap();

    let comments = &registry.get(id).unwrap().comments;
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].id, comment_id);
    assert_eq!(comments[0].content, "ok");
    assert_eq!(comments[0].created_by, "site-lead");
}

#[test]
fn add_comment_rejects_blank_content_and_keeps_thread_unchanged() {
    let mut registry = IssueRegistry::new();
    let id = registry.create(draft("Quiet")).unwrap();

    for blank in ["", "   ", "\n\t"] {
        let err = registry.add_comment(id, blank, "site-lead").unwrap_err();
        assert!(matches!(err, RegistryError::EmptyComment));
    }

    assert!(registry.get(id).unwrap().comments.is_empty());
}

#[test]
fn add_comment_trims_content_and_preserves_append_order() {
    let mut registry = IssueRegistry::new();
    let id = registry.create(draft("Threaded")).unwrap();

    registry.add_comment(id, "  first  ", "a").unwrap();
    registry.add_comment(id, "second", "b").unwrap();

    let comments = &registry.get(id).unwrap().comments;
    assert_eq!(comments[0].content, "first");
    assert_eq!(comments[1].content, "second");
    assert!(comments[0].created_at <= comments[1].created_at);
    assert_ne!(comments[0].id, comments[1].id);
}

#[test]
fn add_comment_to_missing_issue_reports_not_found() {
    let mut registry = IssueRegistry::new();

    let missing = Uuid::new_v4();
    let err = registry.add_comment(missing, "hello", "a").unwrap_err();

    assert!(matches!(err, RegistryError::IssueNotFound(id) if id == missing));
}

#[test]
fn add_tag_skips_blanks_and_duplicates() {
    let mut registry = IssueRegistry::new();
    let id = registry.create(draft("Tagged")).unwrap();

    registry.add_tag(id, " electrical ").unwrap();
    registry.add_tag(id, "electrical").unwrap();
    registry.add_tag(id, "   ").unwrap();
    registry.add_tag(id, "urgent").unwrap();

    assert_eq!(
        registry.get(id).unwrap().tags,
        vec!["electrical".to_string(), "urgent".to_string()]
    );
}

#[test]
fn issues_on_page_returns_only_matching_anchors() {
    let mut registry = IssueRegistry::new();
    let sheet_a = Uuid::new_v4();
    let sheet_b = Uuid::new_v4();

    let mut on_a1 = draft("A page 1");
    on_a1.pdf_id = sheet_a;
    on_a1.page_number = 1;
    let a1 = registry.create(on_a1).unwrap();

    let mut on_a2 = draft("A page 2");
    on_a2.pdf_id = sheet_a;
    on_a2.page_number = 2;
    registry.create(on_a2).unwrap();

    let mut on_b1 = draft("B page 1");
    on_b1.pdf_id = sheet_b;
    on_b1.page_number = 1;
    registry.create(on_b1).unwrap();

    let page = registry.issues_on_page(sheet_a, 1);
    assert_eq!(page.len(), 1);
    assert_eq!(page[0].id, a1);
}

#[test]
fn known_tags_are_distinct_and_sorted() {
    let mut registry = IssueRegistry::new();

    let mut first = draft("First");
    first.tags = vec!["urgent".to_string(), "electrical".to_string()];
    registry.create(first).unwrap();

    let mut second = draft("Second");
    second.tags = vec!["hvac".to_string(), "urgent".to_string()];
    registry.create(second).unwrap();

    assert_eq!(
        registry.known_tags(),
        vec![
            "electrical".to_string(),
            "hvac".to_string(),
            "urgent".to_string()
        ]
    );
}

#[test]
fn mutations_notify_subscribers_in_order() {
    let mut registry = IssueRegistry::new();
    let events = registry.subscribe();

    let id = registry.create(draft("Watched")).unwrap();
    registry.select(Some(id)).unwrap();
    registry.delete(id).unwrap();

    let received: Vec<IssueEvent> = events.try_iter().collect();
    assert_eq!(
        received,
        vec![
            IssueEvent::Created(id),
            IssueEvent::SelectionChanged(Some(id)),
            IssueEvent::Deleted(id),
            IssueEvent::SelectionChanged(None),
        ]
    );
}

fn draft(title: &str) -> NewIssue {
    NewIssue {
        x: 25.0,
        y: 75.0,
        title: title.to_string(),
        description: String::new(),
        status: IssueStatus::Open,
        priority: IssuePriority::Medium,
        kind: IssueKind::Observation,
        assigned_to: None,
        due_date: None,
        cost: None,
        created_by: "inspector-7".to_string(),
        pdf_id: Uuid::new_v4(),
        page_number: 1,
        images: Vec::new(),
        tags: Vec::new(),
    }
}
