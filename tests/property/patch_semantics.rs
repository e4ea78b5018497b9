//! Property tests for partial-update semantics.
//!
//! For any task and any patch: absent fields never change, present fields
//! always apply, and no patch can ever produce a task that violates the
//! priority invariant or the `created_at <= updated_at` invariant.

#![allow(clippy::expect_used, clippy::unwrap_used)]

use chrono::{Duration, Utc};
use proptest::prelude::*;

use taskdeck_proto::patch::TaskPatch;
use taskdeck_proto::task::{NewTask, PRIORITY_MAX, PRIORITY_MIN, Task};

/// Any valid stored task.
fn task_strategy() -> impl Strategy<Value = Task> {
    (
        "[a-z]{1,16}",
        "[a-z ]{0,24}",
        PRIORITY_MIN..=PRIORITY_MAX,
        any::<bool>(),
    )
        .prop_map(|(text, description, priority, completed)| {
            NewTask {
                task: text,
                description: Some(description),
                priority: Some(priority),
                completed: Some(completed),
            }
            .into_task(Utc::now())
            .expect("generated task is valid")
        })
}

/// Any patch whose present fields are all valid.
fn valid_patch_strategy() -> impl Strategy<Value = TaskPatch> {
    (
        proptest::option::of("[a-z]{1,16}"),
        proptest::option::of("[a-z ]{0,24}"),
        proptest::option::of(PRIORITY_MIN..=PRIORITY_MAX),
        proptest::option::of(any::<bool>()),
    )
        .prop_map(|(task, description, priority, completed)| TaskPatch {
            task,
            description,
            priority,
            completed,
        })
}

proptest! {
    #[test]
    fn valid_patch_applies_exactly_the_present_fields(
        task in task_strategy(),
        patch in valid_patch_strategy(),
    ) {
        let mut patched = task.clone();
        let now = task.updated_at + Duration::seconds(1);
        patched.apply(&patch, now).expect("valid patch applies");

        prop_assert_eq!(patched.id, task.id);
        prop_assert_eq!(patched.created_at, task.created_at);
        prop_assert_eq!(patched.updated_at, now);
        prop_assert!(patched.created_at <= patched.updated_at);

        prop_assert_eq!(&patched.task, patch.task.as_ref().unwrap_or(&task.task));
        prop_assert_eq!(
            &patched.description,
            patch.description.as_ref().unwrap_or(&task.description)
        );
        prop_assert_eq!(patched.priority, patch.priority.unwrap_or(task.priority));
        prop_assert_eq!(patched.completed, patch.completed.unwrap_or(task.completed));

        prop_assert!((PRIORITY_MIN..=PRIORITY_MAX).contains(&patched.priority));
    }

    #[test]
    fn out_of_range_priority_never_partially_applies(
        task in task_strategy(),
        mut patch in valid_patch_strategy(),
        bad in prop_oneof![Just(0u8), (PRIORITY_MAX + 1)..=u8::MAX],
    ) {
        patch.priority = Some(bad);

        let mut patched = task.clone();
        let result = patched.apply(&patch, Utc::now());
        prop_assert!(result.is_err());
        prop_assert_eq!(patched, task);
    }

    #[test]
    fn patch_json_round_trips_with_presence_preserved(patch in valid_patch_strategy()) {
        let json = serde_json::to_string(&patch).expect("serialize");
        let decoded: TaskPatch = serde_json::from_str(&json).expect("deserialize");
        prop_assert_eq!(&decoded, &patch);

        // Absent fields must not appear in the JSON at all.
        let value: serde_json::Value = serde_json::from_str(&json).expect("value");
        let obj = value.as_object().expect("object");
        let present = usize::from(patch.task.is_some())
            + usize::from(patch.description.is_some())
            + usize::from(patch.priority.is_some())
            + usize::from(patch.completed.is_some());
        prop_assert_eq!(obj.len(), present);
    }
}
