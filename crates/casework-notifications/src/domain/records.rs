//! Data shapes supplied by the workflow engine and the profile subsystem.
//!
//! These records mirror the engine's case model closely enough to carry its
//! callbacks; the dispatch core copies them into events and never mutates
//! them. Engine-opaque payloads (approval context, handler definitions)
//! stay as raw JSON values.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use casework_core::reference::ObjectReference;

/// Engine-defined payload describing the approval workflow's state.
///
/// Opaque to the dispatch core; carried through verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApprovalContext(pub serde_json::Value);

/// A unit of work tracked by the workflow engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseRecord {
    /// Case object identifier.
    pub oid: String,
    /// Case name.
    pub name: Option<String>,
    /// Engine-defined lifecycle state.
    pub state: Option<String>,
    /// Who requested the case (e.g. who asked for an assignment).
    pub requester_ref: Option<ObjectReference>,
    /// The subject of the case (the requestee).
    pub object_ref: Option<ObjectReference>,
    /// Approval workflow state.
    pub approval_context: Option<ApprovalContext>,
}

/// A sub-task of a case assigned to one or more actors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseWorkItem {
    /// Work-item identifier, unique within the case.
    pub id: i64,
    /// Work-item name.
    pub name: Option<String>,
    /// Approval stage this work-item belongs to.
    pub stage_number: Option<i32>,
    /// Creation timestamp.
    pub created: Option<DateTime<Utc>>,
    /// Deadline for acting on the work-item.
    pub deadline: Option<DateTime<Utc>>,
}

/// The engine operation that produced a work-item callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkItemOperationKind {
    /// The work-item was completed (approved, rejected, ...).
    Complete,
    /// The work-item was delegated to another actor.
    Delegate,
    /// The work-item was escalated to the next level.
    Escalate,
    /// The work-item was cancelled together with its case.
    Cancel,
    /// An actor claimed the work-item.
    Claim,
    /// An actor released a previously claimed work-item.
    Release,
}

/// Operation metadata attached to work-item lifecycle callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemOperationInfo {
    /// What kind of operation produced the callback.
    pub operation_kind: WorkItemOperationKind,
}

/// Operation metadata for allocation changes, carrying the affected actors.
///
/// `current_actors` holds the actors whose allocation is changing;
/// `new_actors` holds the actors gaining the work-item and is present only
/// on the new-actors callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemAllocationOperationInfo {
    /// What kind of operation produced the callback.
    pub operation_kind: WorkItemOperationKind,
    /// Actors currently holding the work-item.
    pub current_actors: Vec<ObjectReference>,
    /// Actors about to gain the work-item.
    pub new_actors: Option<Vec<ObjectReference>>,
}

/// Why a work-item operation happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkItemEventCauseKind {
    /// A person acted on the work-item.
    UserAction,
    /// A scheduled action (e.g. an escalation timer) fired.
    TimedAction,
}

/// Cause descriptor for work-item operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkItemEventCause {
    /// User action or timed action.
    pub kind: WorkItemEventCauseKind,
    /// Machine name of the cause (e.g. the timed-action name).
    pub name: Option<String>,
    /// Display name of the cause.
    pub display_name: Option<String>,
}

/// Engine-defined custom notification action raised against a work-item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemNotificationAction {
    /// Action name.
    pub name: Option<String>,
    /// Inline handler definition, if the action carries one.
    pub handler: Option<EventHandler>,
}

/// Source metadata for a work-item operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemOperationSourceInfo {
    /// Who triggered the operation.
    pub initiator_ref: Option<ObjectReference>,
    /// Why the operation happened.
    pub cause: Option<WorkItemEventCause>,
    /// The notification action that raised the operation, for custom events.
    pub notification_action: Option<WorkItemNotificationAction>,
}

/// An inline event handler definition.
///
/// Opaque to the dispatch core; the downstream pipeline evaluates it under
/// the supplied expression profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHandler(pub serde_json::Value);

/// Where a piece of handler configuration came from.
///
/// This is trust metadata, not provenance: `UndeterminedSafe` means the
/// origin cannot be attributed to a specific configured source but the
/// wrapped configuration is safe to pass downstream. The core never
/// attempts to resolve an actual origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigurationOrigin {
    /// Origin unknown, configuration trusted.
    UndeterminedSafe,
    /// Origin unknown, configuration untrusted.
    UndeterminedStrict,
}

/// An inline handler wrapped with its configuration origin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventHandlerConfig {
    /// The handler definition.
    pub handler: EventHandler,
    /// Trust marker for the handler's origin.
    pub origin: ConfigurationOrigin,
}

impl EventHandlerConfig {
    /// Wraps a handler at the `undetermined-safe` origin.
    #[must_use]
    pub fn undetermined_safe(handler: EventHandler) -> Self {
        Self {
            handler,
            origin: ConfigurationOrigin::UndeterminedSafe,
        }
    }
}

/// Default decision a profile applies to operations it does not list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccessDecision {
    /// Permit by default.
    Allow,
    /// Refuse by default.
    Deny,
}

/// A security policy constraining what an evaluated expression may do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpressionProfile {
    /// Profile identifier.
    pub identifier: String,
    /// Decision for operations the profile does not mention.
    pub default_decision: AccessDecision,
}

#[cfg(test)]
mod tests {
    use super::{ConfigurationOrigin, EventHandler, EventHandlerConfig};

    #[test]
    fn test_undetermined_safe_wraps_handler_with_safe_origin() {
        let handler = EventHandler(serde_json::json!({"script": "notify()"}));

        let config = EventHandlerConfig::undetermined_safe(handler.clone());

        assert_eq!(config.origin, ConfigurationOrigin::UndeterminedSafe);
        assert_eq!(config.handler, handler);
    }
}
