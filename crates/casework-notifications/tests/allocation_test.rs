//! End-to-end tests for allocation-change fan-out.

mod common;

use std::time::Duration;

use casework_core::change::ChangeType;
use casework_core::error::DispatchError;
use casework_notifications::application::ports::CaseEventListener;
use casework_notifications::domain::events::NotificationEvent;
use casework_notifications::domain::records::{
    WorkItemAllocationOperationInfo, WorkItemOperationKind, WorkItemOperationSourceInfo,
};
use casework_test_support::{actor_ref, case_record, oidless_ref, work_item};

use common::harness;

fn escalation(
    current: Vec<casework_core::reference::ObjectReference>,
    new: Option<Vec<casework_core::reference::ObjectReference>>,
) -> WorkItemAllocationOperationInfo {
    WorkItemAllocationOperationInfo {
        operation_kind: WorkItemOperationKind::Escalate,
        current_actors: current,
        new_actors: new,
    }
}

#[tokio::test]
async fn test_current_actors_with_advance_warning_fan_out_as_modify() {
    // Arrange
    let mut h = harness();
    let case = case_record(actor_ref("alice"), actor_ref("bob"));
    let a1 = actor_ref("first");
    let a2 = actor_ref("second");
    let info = escalation(vec![a1.clone(), a2.clone()], None);

    // Act
    h.dispatcher
        .on_work_item_allocation_change_current_actors(
            &work_item(7),
            &info,
            None,
            Some(Duration::from_secs(3600)),
            &case,
            &h.task,
            &mut h.result,
        )
        .await
        .unwrap();

    // Assert: one event per actor, engine-supplied order, identical payload.
    let dispatched = h.pipeline.dispatched();
    assert_eq!(dispatched.len(), 2);
    let expected = [a1.oid.clone(), a2.oid.clone()];
    for (delivered, expected_oid) in dispatched.iter().zip(expected) {
        match &delivered.event {
            NotificationEvent::WorkItemAllocation(event) => {
                assert_eq!(event.base.change_type, ChangeType::Modify);
                assert_eq!(event.assignee.as_ref().unwrap().oid, expected_oid);
                assert_eq!(event.work_item.id, 7);
                assert_eq!(event.time_before, Some(Duration::from_secs(3600)));
            }
            other => panic!("expected WorkItemAllocation, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_current_actors_without_advance_warning_fan_out_as_delete() {
    let mut h = harness();
    let case = case_record(actor_ref("alice"), actor_ref("bob"));
    let info = escalation(vec![actor_ref("first"), actor_ref("second")], None);

    h.dispatcher
        .on_work_item_allocation_change_current_actors(
            &work_item(7),
            &info,
            None,
            None,
            &case,
            &h.task,
            &mut h.result,
        )
        .await
        .unwrap();

    let dispatched = h.pipeline.dispatched();
    assert_eq!(dispatched.len(), 2);
    for delivered in &dispatched {
        assert_eq!(delivered.event.change_type(), ChangeType::Delete);
    }
}

#[tokio::test]
async fn test_new_actors_fan_out_as_add_in_input_order() {
    let mut h = harness();
    let case = case_record(actor_ref("alice"), actor_ref("bob"));
    let b1 = actor_ref("gains-first");
    let b2 = actor_ref("gains-second");
    let info = escalation(vec![actor_ref("holder")], Some(vec![b1.clone(), b2.clone()]));

    h.dispatcher
        .on_work_item_allocation_change_new_actors(
            &work_item(7),
            &info,
            None,
            &case,
            &h.task,
            &mut h.result,
        )
        .await
        .unwrap();

    let dispatched = h.pipeline.dispatched();
    assert_eq!(dispatched.len(), 2);
    let assignees: Vec<_> = dispatched
        .iter()
        .map(|d| d.event.assignee().unwrap().oid.clone())
        .collect();
    assert_eq!(assignees, vec![b1.oid, b2.oid]);
    for delivered in &dispatched {
        assert_eq!(delivered.event.change_type(), ChangeType::Add);
        match &delivered.event {
            NotificationEvent::WorkItemAllocation(event) => {
                assert!(event.time_before.is_none());
            }
            other => panic!("expected WorkItemAllocation, got {other:?}"),
        }
    }
}

#[tokio::test]
async fn test_duplicate_actor_refs_are_not_deduplicated() {
    let mut h = harness();
    let case = case_record(actor_ref("alice"), actor_ref("bob"));
    let actor = actor_ref("twice");
    let info = escalation(vec![actor.clone(), actor.clone()], None);

    h.dispatcher
        .on_work_item_allocation_change_current_actors(
            &work_item(7),
            &info,
            None,
            None,
            &case,
            &h.task,
            &mut h.result,
        )
        .await
        .unwrap();

    assert_eq!(h.pipeline.dispatched().len(), 2);
}

#[tokio::test]
async fn test_empty_current_actor_list_emits_nothing() {
    let mut h = harness();
    let case = case_record(actor_ref("alice"), actor_ref("bob"));
    let info = escalation(vec![], None);

    h.dispatcher
        .on_work_item_allocation_change_current_actors(
            &work_item(7),
            &info,
            None,
            None,
            &case,
            &h.task,
            &mut h.result,
        )
        .await
        .unwrap();

    assert!(h.pipeline.dispatched().is_empty());
}

#[tokio::test]
async fn test_oidless_current_actor_rejects_whole_callback() {
    let mut h = harness();
    let case = case_record(actor_ref("alice"), actor_ref("bob"));
    let info = escalation(vec![actor_ref("valid"), oidless_ref("ghost")], None);

    let err = h
        .dispatcher
        .on_work_item_allocation_change_current_actors(
            &work_item(7),
            &info,
            None,
            None,
            &case,
            &h.task,
            &mut h.result,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::InvalidActorReference(_)));
    assert!(h.pipeline.dispatched().is_empty());
}

#[tokio::test]
async fn test_oidless_new_actor_rejects_whole_callback() {
    let mut h = harness();
    let case = case_record(actor_ref("alice"), actor_ref("bob"));
    let info = escalation(
        vec![actor_ref("holder")],
        Some(vec![actor_ref("valid"), oidless_ref("ghost")]),
    );

    let err = h
        .dispatcher
        .on_work_item_allocation_change_new_actors(
            &work_item(7),
            &info,
            None,
            &case,
            &h.task,
            &mut h.result,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::InvalidActorReference(_)));
    assert!(h.pipeline.dispatched().is_empty());
}

#[tokio::test]
async fn test_missing_new_actor_list_is_invalid_callback() {
    let mut h = harness();
    let case = case_record(actor_ref("alice"), actor_ref("bob"));
    let info = escalation(vec![actor_ref("holder")], None);

    let err = h
        .dispatcher
        .on_work_item_allocation_change_new_actors(
            &work_item(7),
            &info,
            None,
            &case,
            &h.task,
            &mut h.result,
        )
        .await
        .unwrap_err();

    assert!(matches!(err, DispatchError::InvalidCallback(_)));
    assert!(h.pipeline.dispatched().is_empty());
}

#[tokio::test]
async fn test_allocation_events_carry_initiator_from_source_info() {
    let mut h = harness();
    let case = case_record(actor_ref("alice"), actor_ref("bob"));
    let initiator = actor_ref("manager");
    let source_info = WorkItemOperationSourceInfo {
        initiator_ref: Some(initiator.clone()),
        cause: None,
        notification_action: None,
    };
    let info = escalation(vec![actor_ref("holder")], None);

    h.dispatcher
        .on_work_item_allocation_change_current_actors(
            &work_item(7),
            &info,
            Some(&source_info),
            None,
            &case,
            &h.task,
            &mut h.result,
        )
        .await
        .unwrap();

    match &h.pipeline.dispatched()[0].event {
        NotificationEvent::WorkItemAllocation(event) => {
            assert_eq!(event.initiator.as_ref().unwrap().oid, initiator.oid);
            assert!(event.source_info.is_some());
        }
        other => panic!("expected WorkItemAllocation, got {other:?}"),
    }
}
