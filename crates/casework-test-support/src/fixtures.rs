//! Fixture builders for cases, work-items, and actor references.

use uuid::Uuid;

use casework_core::reference::ObjectReference;
use casework_notifications::domain::records::{ApprovalContext, CaseRecord, CaseWorkItem};

/// A user reference with a fresh oid and the given display name.
#[must_use]
pub fn actor_ref(name: &str) -> ObjectReference {
    ObjectReference::new(Uuid::new_v4().to_string(), "c:UserType").with_target_name(name)
}

/// A user reference without an oid, for rejection tests.
#[must_use]
pub fn oidless_ref(name: &str) -> ObjectReference {
    ObjectReference {
        oid: None,
        type_name: "c:UserType".to_owned(),
        target_name: Some(name.to_owned()),
    }
}

/// An open approval case with the given requester and requestee.
#[must_use]
pub fn case_record(requester: ObjectReference, requestee: ObjectReference) -> CaseRecord {
    CaseRecord {
        oid: Uuid::new_v4().to_string(),
        name: Some("role assignment approval".to_owned()),
        state: Some("open".to_owned()),
        requester_ref: Some(requester),
        object_ref: Some(requestee),
        approval_context: Some(ApprovalContext(serde_json::json!({
            "stageCount": 1,
            "policy": "manager-approval",
        }))),
    }
}

/// A first-stage approval work-item with the given id.
#[must_use]
pub fn work_item(id: i64) -> CaseWorkItem {
    CaseWorkItem {
        id,
        name: Some("approve assignment".to_owned()),
        stage_number: Some(1),
        created: None,
        deadline: None,
    }
}
