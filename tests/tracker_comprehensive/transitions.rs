//! Transition Rule Tests
//!
//! The fixed table, rejected transitions, and the deletion path.

use crate::*;

const TABLE: &[(Option<Status>, &[Status])] = &[
    (None, &[Status::Draft]),
    (Some(Status::Draft), &[Status::Review, Status::Archived]),
    (Some(Status::Review), &[Status::Approved, Status::Draft, Status::Archived]),
    (Some(Status::Approved), &[Status::Published, Status::Review, Status::Archived]),
    (Some(Status::Published), &[Status::Archived]),
    (Some(Status::Archived), &[Status::Draft]),
    (Some(Status::Deleted), &[]),
];

#[test]
fn can_transition_matches_table_for_every_pair() {
    let (tracker, _) = create_tracker();
    for (from, targets) in TABLE {
        for to in Status::ALL {
            assert_eq!(
                tracker.can_transition(*from, to),
                targets.contains(&to),
                "{} -> {}",
                status_label(*from),
                to
            );
        }
    }
}

#[test]
fn none_reaches_only_draft() {
    let (tracker, _) = create_tracker();
    assert!(tracker.can_transition(None, Status::Draft));
    for to in [Status::Review, Status::Approved, Status::Published, Status::Archived, Status::Deleted] {
        assert!(!tracker.can_transition(None, to));
    }
}

#[test]
fn available_transitions_follow_current_status() {
    let (tracker, clock) = create_tracker();
    walk(&tracker, &clock, "E1", "u1", &[Status::Review, Status::Approved], 1);

    assert_eq!(
        tracker.get_available_transitions(&eid("E1")),
        vec![Status::Published, Status::Review, Status::Archived]
    );
    assert!(tracker.get_available_transitions(&eid("unknown")).is_empty());
}

#[test]
fn rejected_transition_reports_from_and_to() {
    let (tracker, clock) = create_tracker();
    walk(&tracker, &clock, "E1", "u1", &[Status::Review, Status::Approved, Status::Published], 1);

    let err = tracker
        .transition_to(&eid("E1"), Status::Draft, &actor("u1"), None)
        .unwrap_err();
    assert!(err.is_invalid_transition());
    assert_eq!(
        err.as_lifecycle(),
        Some(&LifecycleError::InvalidTransition {
            from: Some(Status::Published),
            to: Status::Draft,
        })
    );
}

#[test]
fn transition_to_deleted_is_not_a_table_edge() {
    let (tracker, _) = create_tracker();
    tracker.initialize(&Document::new("E1", "u1")).unwrap();

    let err = tracker
        .transition_to(&eid("E1"), Status::Deleted, &actor("u1"), None)
        .unwrap_err();
    assert!(err.is_invalid_transition());
    assert_eq!(tracker.get_current_status(&eid("E1")), Some(Status::Draft));
}

#[test]
fn archived_documents_can_be_revived() {
    let (tracker, clock) = create_tracker();
    walk(&tracker, &clock, "E1", "u1", &[Status::Archived, Status::Draft, Status::Review], 1);
    assert_eq!(tracker.get_current_status(&eid("E1")), Some(Status::Review));
}

#[test]
fn deleted_blocks_every_later_write() {
    let (tracker, clock) = create_tracker();
    walk(&tracker, &clock, "E1", "u1", &[Status::Review], 1);
    tracker.delete(&eid("E1"), &actor("admin"), Some("duplicate")).unwrap();

    for to in Status::ALL {
        assert!(tracker.transition_to(&eid("E1"), to, &actor("u1"), None).is_err());
    }
    assert!(tracker.delete(&eid("E1"), &actor("admin"), None).is_err());
    assert!(tracker
        .update(&Document::new("E1", "u1").with_status(Status::Draft))
        .is_err());

    // log survives as the audit trail
    let history = tracker.get_lifecycle_history(&eid("E1"));
    assert_eq!(history.len(), 3);
    assert_eq!(history[2].reason, "duplicate");
    assert_eq!(history[2].actor_id, actor("admin"));
}

#[test]
fn automated_transition_uses_system_actor() {
    let clock = Arc::new(ManualClock::new(0));
    let tracker = Tracker::builder()
        .clock(clock)
        .system_actor("archiver")
        .build();
    tracker.initialize(&Document::new("E1", "u1")).unwrap();

    let event = tracker
        .transition_automated(&eid("E1"), Status::Archived, Some("stale for 90 days"))
        .unwrap();
    assert_eq!(event.actor_id, actor("archiver"));
    assert_eq!(event.kind, EventKind::Automated);
    assert_eq!(event.source, EventSource::System);
    assert_eq!(event.reason, "stale for 90 days");
}
