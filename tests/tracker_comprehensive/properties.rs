//! Property Tests
//!
//! Random request sequences against one tracker: the log stays chained and
//! the current status always matches its tail.

use crate::*;
use proptest::prelude::*;

fn any_status() -> impl Strategy<Value = Status> {
    prop::sample::select(Status::ALL.to_vec())
}

/// A request is either an explicit transition or a deletion
fn any_request() -> impl Strategy<Value = Option<Status>> {
    prop::option::weighted(0.9, any_status())
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_walks_keep_the_log_chained(
        requests in prop::collection::vec(any_request(), 0..40),
        gaps in prop::collection::vec(0i64..500, 40),
    ) {
        let (tracker, clock) = create_tracker();
        let id = eid("walk");
        tracker.initialize(&Document::new("walk", "u1")).unwrap();

        let mut accepted = 0usize;
        for (request, gap) in requests.iter().zip(&gaps) {
            clock.advance(*gap);
            let before = tracker.get_current_status(&id);
            let result = match request {
                Some(to) => tracker.transition_to(&id, *to, &actor("u1"), None),
                None => tracker.delete(&id, &actor("u1"), None),
            };

            let allowed = match request {
                Some(to) => tracker.can_transition(before, *to),
                None => before.map_or(false, |s| !s.is_terminal()),
            };
            prop_assert_eq!(result.is_ok(), allowed);
            if result.is_ok() {
                accepted += 1;
            } else {
                prop_assert_eq!(tracker.get_current_status(&id), before);
            }
        }

        let history = tracker.get_lifecycle_history(&id);
        prop_assert_eq!(history.len(), 1 + accepted);
        prop_assert_eq!(history[0].from_status, None);
        for pair in history.windows(2) {
            prop_assert_eq!(pair[1].from_status, Some(pair[0].to_status));
            prop_assert!(pair[1].timestamp >= pair[0].timestamp);
        }
        prop_assert_eq!(
            tracker.get_current_status(&id),
            history.last().map(|e| e.to_status)
        );

        let stats = tracker.get_lifecycle_stats(&id);
        prop_assert_eq!(
            stats.total_lifecycle_time,
            history[history.len() - 1].timestamp - history[0].timestamp
        );
    }
}
