//! Property-based wire-format tests for the task document types.
//!
//! Uses proptest to verify:
//! 1. Any valid `Task` survives a JSON serialize → deserialize round-trip.
//! 2. Any valid `TaskPayload` survives the same round-trip.
//! 3. Serialized documents carry the store's field names (`_id`, `dueDate`).
//! 4. Arbitrary `dueDate` strings never panic and never fail the document.
//! 5. Datetime-suffixed due dates truncate to their date part.

use chrono::NaiveDate;
use proptest::prelude::*;
use termtask_proto::date;
use termtask_proto::task::{Priority, Status, Subtask, Task, TaskId, TaskPayload};

// --- Arbitrary implementations for document types ---

/// Strategy for generating arbitrary `TaskId` values.
fn arb_task_id() -> impl Strategy<Value = TaskId> {
    "[a-f0-9]{1,24}".prop_map(TaskId::from_raw)
}

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

/// Strategy for generating arbitrary calendar dates.
/// Days stop at 28 so every generated triple is a real date.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (1970i32..2100, 1u32..13, 1u32..29).prop_map(|(year, month, day)| {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid calendar date")
    })
}

/// Strategy for generating arbitrary `Subtask` values.
fn arb_subtask() -> impl Strategy<Value = Subtask> {
    ("[^\x00]{0,64}", any::<bool>()).prop_map(|(title, done)| Subtask { title, done })
}

/// Strategy for generating arbitrary `Task` documents.
/// Titles are non-empty to match what the store actually hands back.
fn arb_task() -> impl Strategy<Value = Task> {
    (
        arb_task_id(),
        "[^\x00]{1,128}",
        "[^\x00]{0,256}",
        arb_priority(),
        prop::option::of(arb_date()),
        arb_status(),
        prop::collection::vec(arb_subtask(), 0..8),
    )
        .prop_map(
            |(id, title, description, priority, due_date, status, subtasks)| Task {
                id,
                title,
                description,
                priority,
                due_date,
                status,
                subtasks,
            },
        )
}

/// Strategy for generating arbitrary `TaskPayload` bodies.
fn arb_payload() -> impl Strategy<Value = TaskPayload> {
    arb_task().prop_map(|task| TaskPayload::from(&task))
}

// --- Property tests ---

proptest! {
    /// Any valid Task survives a JSON serialize → deserialize round-trip.
    #[test]
    fn task_round_trip(task in arb_task()) {
        let json = serde_json::to_string(&task).expect("serialize should succeed");
        let decoded: Task = serde_json::from_str(&json).expect("deserialize should succeed");
        prop_assert_eq!(task, decoded);
    }

    /// Any valid TaskPayload survives a JSON serialize → deserialize round-trip.
    #[test]
    fn payload_round_trip(payload in arb_payload()) {
        let json = serde_json::to_string(&payload).expect("serialize should succeed");
        let decoded: TaskPayload = serde_json::from_str(&json).expect("deserialize should succeed");
        prop_assert_eq!(payload, decoded);
    }

    /// Serialized tasks carry the store's field names, never the Rust ones.
    #[test]
    fn task_uses_wire_field_names(task in arb_task()) {
        let value = serde_json::to_value(&task).expect("serialize should succeed");
        let object = value.as_object().expect("task serializes to an object");
        prop_assert!(object.contains_key("_id"));
        prop_assert!(object.contains_key("dueDate"));
        prop_assert!(!object.contains_key("id"));
        prop_assert!(!object.contains_key("due_date"));
    }

    /// A payload built from a task rebuilds the identical document, so every
    /// field a mutation sends is every field the store holds.
    #[test]
    fn payload_preserves_every_field(task in arb_task()) {
        let payload = TaskPayload::from(&task);
        let rebuilt = Task::from_payload(task.id.clone(), payload);
        prop_assert_eq!(task, rebuilt);
    }

    /// Arbitrary dueDate strings never fail the document; unreadable values
    /// deserialize as unset.
    #[test]
    fn hostile_due_date_strings_never_panic(raw in "[^\x00]{0,32}") {
        let json = serde_json::json!({"_id": "t1", "title": "ship it", "dueDate": raw});
        let task: Task = serde_json::from_value(json).expect("lenient dates never fail the document");
        // Whether the value parsed or not is the parser's business; the
        // document itself must survive.
        let _ = task.due_date;
    }

    /// `date::parse` never panics, whatever the input.
    #[test]
    fn date_parse_never_panics(raw in ".{0,40}") {
        let _ = date::parse(&raw);
    }

    /// Datetime strings truncate to their date part when parsed.
    #[test]
    fn datetime_suffixes_truncate_to_the_date(
        date in arb_date(),
        suffix in "T[0-9]{2}:[0-9]{2}:[0-9]{2}(\\.[0-9]{3})?Z?",
    ) {
        let raw = format!("{}{}", date.format(date::WIRE_FORMAT), suffix);
        prop_assert_eq!(date::parse(&raw), Some(date));
    }
}
