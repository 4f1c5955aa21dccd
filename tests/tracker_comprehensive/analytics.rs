//! Global Analytics Tests

use crate::*;

#[test]
fn empty_tracker() {
    let (tracker, _) = create_tracker();
    let analytics = tracker.get_global_analytics();

    assert_eq!(analytics.total_documents, 0);
    assert_eq!(analytics.total_events, 0);
    assert_eq!(analytics.average_events_per_document, 0.0);
    assert!(analytics.status_distribution.is_empty());
    assert_eq!(analytics.most_common_status, None);
    assert_eq!(analytics.most_common_transition, None);
    assert_eq!(analytics.most_active_user, None);
}

#[test]
fn two_entities_with_three_events_each() {
    let (tracker, clock) = create_tracker();
    walk(&tracker, &clock, "A", "u1", &[Status::Review, Status::Approved], 1);
    walk(&tracker, &clock, "B", "u2", &[Status::Archived, Status::Draft], 1);

    let analytics = tracker.get_global_analytics();
    assert_eq!(analytics.total_documents, 2);
    assert_eq!(analytics.total_events, 6);
    assert_eq!(analytics.average_events_per_document, 3.0);
}

#[test]
fn distributions_and_leaders() {
    let (tracker, clock) = create_tracker();
    walk(&tracker, &clock, "A", "u1", &[Status::Review, Status::Draft, Status::Review], 1);
    walk(&tracker, &clock, "B", "u2", &[Status::Review], 1);

    let analytics = tracker.get_global_analytics();
    // A: draft, review, draft, review  B: draft, review
    assert_eq!(
        analytics.status_distribution,
        vec![(Status::Draft, 3), (Status::Review, 3)]
    );
    // tie at 3; draft is seen first
    assert_eq!(analytics.most_common_status, Some(Status::Draft));
    assert_eq!(analytics.count_for(Status::Review), 3);

    assert_eq!(
        analytics.transition_distribution,
        vec![
            ("none->draft".to_string(), 2),
            ("draft->review".to_string(), 3),
            ("review->draft".to_string(), 1),
        ]
    );
    assert_eq!(analytics.most_common_transition.as_deref(), Some("draft->review"));
    assert_eq!(analytics.most_active_user, Some(actor("u1")));
    assert_eq!(analytics.current_status_distribution, vec![(Status::Review, 2)]);
}

#[test]
fn entities_are_walked_in_ascending_id_order() {
    let (tracker, clock) = create_tracker();
    // created in reverse order; "a" must still be aggregated first
    walk(&tracker, &clock, "b", "zed", &[Status::Archived], 1);
    walk(&tracker, &clock, "a", "amy", &[Status::Review], 1);

    let analytics = tracker.get_global_analytics();
    assert_eq!(analytics.most_active_user, Some(actor("amy")));
    assert_eq!(
        analytics.status_distribution,
        vec![(Status::Draft, 2), (Status::Review, 1), (Status::Archived, 1)]
    );
    assert_eq!(
        analytics.current_status_distribution,
        vec![(Status::Review, 1), (Status::Archived, 1)]
    );
}

#[test]
fn analytics_are_reproducible() {
    let (tracker, clock) = create_tracker();
    for (id, owner) in [("p3", "x"), ("p1", "y"), ("p2", "z")] {
        walk(&tracker, &clock, id, owner, &[Status::Review], 1);
    }

    let first = tracker.get_global_analytics();
    for _ in 0..10 {
        assert_eq!(tracker.get_global_analytics(), first);
    }
    assert_eq!(first.most_active_user, Some(actor("y")));
}

#[test]
fn deleted_entities_stay_in_analytics() {
    let (tracker, clock) = create_tracker();
    walk(&tracker, &clock, "A", "u1", &[], 1);
    tracker.delete(&eid("A"), &actor("u1"), None).unwrap();

    let analytics = tracker.get_global_analytics();
    assert_eq!(analytics.total_documents, 1);
    assert_eq!(analytics.count_for(Status::Deleted), 1);
    assert_eq!(analytics.current_status_distribution, vec![(Status::Deleted, 1)]);
}
