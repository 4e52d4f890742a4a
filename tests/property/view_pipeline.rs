//! Property-based tests for the filter and sort pipeline.
//!
//! Uses proptest to verify:
//! 1. Every visible task matches the active filter.
//! 2. The view holds exactly the matching tasks, nothing lost or invented.
//! 3. Without a sort key the view keeps collection order.
//! 4. Priority order is monotone and stable within a rank.
//! 5. Due-date order is ascending with date-less tasks last.
//! 6. The pipeline never mutates the collection it reads.

use chrono::NaiveDate;
use proptest::prelude::*;
use termtask::tasks::view::{self, SortKey, StatusFilter};
use termtask_proto::task::{Priority, Status, Task, TaskId};

// --- Arbitrary implementations ---

/// Strategy for generating arbitrary `Priority` values.
fn arb_priority() -> impl Strategy<Value = Priority> {
    prop_oneof![
        Just(Priority::Low),
        Just(Priority::Medium),
        Just(Priority::High),
    ]
}

/// Strategy for generating arbitrary `Status` values.
fn arb_status() -> impl Strategy<Value = Status> {
    prop_oneof![
        Just(Status::Todo),
        Just(Status::InProgress),
        Just(Status::Done),
    ]
}

/// Strategy for generating arbitrary optional due dates.
fn arb_due_date() -> impl Strategy<Value = Option<NaiveDate>> {
    prop::option::of((2000i32..2100, 1u32..13, 1u32..29).prop_map(|(year, month, day)| {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
    }))
}

/// Strategy for generating a task collection with unique positional ids
/// (`t0`, `t1`, ...), so order properties can be checked by id.
fn arb_collection() -> impl Strategy<Value = Vec<Task>> {
    prop::collection::vec((arb_status(), arb_priority(), arb_due_date()), 0..32).prop_map(|specs| {
        specs
            .into_iter()
            .enumerate()
            .map(|(index, (status, priority, due_date))| Task {
                id: TaskId::from_raw(format!("t{index}")),
                title: format!("task {index}"),
                description: String::new(),
                priority,
                due_date,
                status,
                subtasks: Vec::new(),
            })
            .collect()
    })
}

/// Strategy for generating arbitrary `StatusFilter` values.
fn arb_filter() -> impl Strategy<Value = StatusFilter> {
    prop_oneof![
        Just(StatusFilter::All),
        Just(StatusFilter::Todo),
        Just(StatusFilter::InProgress),
        Just(StatusFilter::Done),
    ]
}

/// Strategy for generating arbitrary `SortKey` values.
fn arb_sort() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::None),
        Just(SortKey::Priority),
        Just(SortKey::DueDate),
    ]
}

/// Collection positions of the visible tasks, in view order.
fn collection_positions(tasks: &[Task], visible: &[&Task]) -> Vec<usize> {
    visible
        .iter()
        .map(|shown| {
            tasks
                .iter()
                .position(|task| task.id == shown.id)
                .expect("visible task comes from the collection")
        })
        .collect()
}

// --- Property tests ---

proptest! {
    /// Every task the view shows matches the active filter.
    #[test]
    fn every_visible_task_matches_the_filter(
        tasks in arb_collection(),
        filter in arb_filter(),
        sort in arb_sort(),
    ) {
        for task in view::apply(&tasks, filter, sort) {
            prop_assert!(filter.matches(task.status));
        }
    }

    /// The view holds exactly the matching tasks: sorting rearranges, it
    /// never drops or invents.
    #[test]
    fn view_holds_exactly_the_matching_tasks(
        tasks in arb_collection(),
        filter in arb_filter(),
        sort in arb_sort(),
    ) {
        let mut shown: Vec<&str> = view::apply(&tasks, filter, sort)
            .iter()
            .map(|task| task.id.as_str())
            .collect();
        let mut expected: Vec<&str> = tasks
            .iter()
            .filter(|task| filter.matches(task.status))
            .map(|task| task.id.as_str())
            .collect();
        shown.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(shown, expected);
    }

    /// Without a sort key, filtering alone keeps collection order.
    #[test]
    fn unsorted_view_keeps_collection_order(
        tasks in arb_collection(),
        filter in arb_filter(),
    ) {
        let visible = view::apply(&tasks, filter, SortKey::None);
        let positions = collection_positions(&tasks, &visible);
        prop_assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
    }

    /// Priority order never puts a lower urgency before a higher one.
    #[test]
    fn priority_sort_ranks_never_decrease(
        tasks in arb_collection(),
        filter in arb_filter(),
    ) {
        let visible = view::apply(&tasks, filter, SortKey::Priority);
        prop_assert!(
            visible
                .windows(2)
                .all(|pair| pair[0].priority.rank() <= pair[1].priority.rank())
        );
    }

    /// Tasks sharing a priority keep their collection order. Equal ranks sit
    /// next to each other after sorting, so checking neighbours covers every
    /// tied pair.
    #[test]
    fn priority_ties_keep_collection_order(tasks in arb_collection()) {
        let visible = view::apply(&tasks, StatusFilter::All, SortKey::Priority);
        let positions = collection_positions(&tasks, &visible);
        for (pair, index) in visible.windows(2).zip(1..) {
            if pair[0].priority.rank() == pair[1].priority.rank() {
                prop_assert!(positions[index - 1] < positions[index]);
            }
        }
    }

    /// Due-date order is ascending, and once a date-less task appears no
    /// dated task follows it.
    #[test]
    fn due_date_sort_is_ascending_with_dateless_last(
        tasks in arb_collection(),
        filter in arb_filter(),
    ) {
        let visible = view::apply(&tasks, filter, SortKey::DueDate);
        for pair in visible.windows(2) {
            match (pair[0].due_date, pair[1].due_date) {
                (Some(earlier), Some(later)) => prop_assert!(earlier <= later),
                (None, Some(_)) => prop_assert!(false, "dated task after a date-less one"),
                (Some(_) | None, None) => {}
            }
        }
    }

    /// The pipeline reads the collection, it never rewrites it.
    #[test]
    fn apply_never_mutates_the_collection(
        tasks in arb_collection(),
        filter in arb_filter(),
        sort in arb_sort(),
    ) {
        let before = tasks.clone();
        let _ = view::apply(&tasks, filter, sort);
        prop_assert_eq!(tasks, before);
    }
}
