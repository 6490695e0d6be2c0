//! The notification event family.
//!
//! Every event the dispatcher emits shares the [`CaseEventCore`] base:
//! a process-unique identifier, a change type, the originating case, and the
//! requester/requestee references derived from it. Events are built inside
//! a single engine callback, enriched, handed to the downstream pipeline,
//! and then discarded; nothing here is long-lived.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use casework_core::change::ChangeType;
use casework_core::identifier::LightweightIdentifier;
use casework_core::reference::SimpleObjectRef;

use super::records::{
    ApprovalContext, CaseRecord, CaseWorkItem, WorkItemAllocationOperationInfo,
    WorkItemEventCause, WorkItemNotificationAction, WorkItemOperationInfo,
    WorkItemOperationSourceInfo,
};

/// Base fields shared by every case-management event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseEventCore {
    /// Process-unique event identifier.
    pub event_id: LightweightIdentifier,
    /// What kind of change the event describes.
    pub change_type: ChangeType,
    /// The originating case, copied at build time.
    pub case: CaseRecord,
    /// Normalized requester reference. Assigned by [`CaseEventCore::initialize`];
    /// `None` only when the case carries no requester reference.
    pub requester: Option<SimpleObjectRef>,
    /// Normalized requestee reference. Assigned by [`CaseEventCore::initialize`];
    /// `None` only when the case carries no object reference.
    pub requestee: Option<SimpleObjectRef>,
    /// Approval workflow state, copied from the case.
    pub approval_context: Option<ApprovalContext>,
}

impl CaseEventCore {
    /// Builds the base for a new event. The requester and requestee fields
    /// stay unassigned until [`CaseEventCore::initialize`] runs.
    #[must_use]
    pub fn new(event_id: LightweightIdentifier, change_type: ChangeType, case: CaseRecord) -> Self {
        let approval_context = case.approval_context.clone();
        Self {
            event_id,
            change_type,
            case,
            requester: None,
            requestee: None,
            approval_context,
        }
    }

    /// Enrichment step: derives requester and requestee from the owning
    /// case. Runs after construction so every emitted event has uniform
    /// base fields regardless of variant. Deterministic and idempotent.
    pub fn initialize(&mut self) {
        self.requester = SimpleObjectRef::from_ref(self.case.requester_ref.as_ref());
        self.requestee = SimpleObjectRef::from_ref(self.case.object_ref.as_ref());
    }
}

/// Emitted on case lifecycle transitions (opening and closing).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseEvent {
    /// Shared base fields.
    pub base: CaseEventCore,
}

/// Emitted on work-item creation and closing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemLifecycleEvent {
    /// Shared base fields.
    pub base: CaseEventCore,
    /// The work-item the event concerns.
    pub work_item: CaseWorkItem,
    /// Original recipient of the work-item.
    pub assignee: Option<SimpleObjectRef>,
    /// Who triggered the operation, when known.
    pub initiator: Option<SimpleObjectRef>,
    /// Operation metadata; present on close.
    pub operation_info: Option<WorkItemOperationInfo>,
    /// Source metadata; present on close.
    pub source_info: Option<WorkItemOperationSourceInfo>,
}

/// Emitted once per actor when a work-item allocation changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemAllocationEvent {
    /// Shared base fields.
    pub base: CaseEventCore,
    /// The work-item whose allocation changed.
    pub work_item: CaseWorkItem,
    /// The actor this per-actor event concerns.
    pub assignee: Option<SimpleObjectRef>,
    /// Who triggered the allocation change, when known.
    pub initiator: Option<SimpleObjectRef>,
    /// The allocation operation, including the full actor lists.
    pub operation_info: WorkItemAllocationOperationInfo,
    /// Source metadata for the allocation change.
    pub source_info: Option<WorkItemOperationSourceInfo>,
    /// Advance-warning window. Present means the change is announced ahead
    /// of time (change type `Modify`); absent means immediate deallocation
    /// (change type `Delete`).
    pub time_before: Option<Duration>,
}

/// Emitted for engine-defined custom work-item events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkItemCustomEvent {
    /// Shared base fields.
    pub base: CaseEventCore,
    /// The work-item the event concerns.
    pub work_item: CaseWorkItem,
    /// Original recipient of the work-item.
    pub assignee: Option<SimpleObjectRef>,
    /// The custom action that raised the event.
    pub notification_action: WorkItemNotificationAction,
    /// Why the action fired.
    pub cause: Option<WorkItemEventCause>,
    /// Source metadata synthesized from the cause and action.
    pub source_info: Option<WorkItemOperationSourceInfo>,
}

/// The tagged family of events handed to the downstream pipeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum NotificationEvent {
    /// Case lifecycle transition.
    Case(CaseEvent),
    /// Work-item creation or closing.
    WorkItemLifecycle(WorkItemLifecycleEvent),
    /// Per-actor allocation change.
    WorkItemAllocation(WorkItemAllocationEvent),
    /// Engine-defined custom work-item event.
    WorkItemCustom(WorkItemCustomEvent),
}

impl NotificationEvent {
    /// Event type name for logging and routing.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            NotificationEvent::Case(_) => "case",
            NotificationEvent::WorkItemLifecycle(_) => "work_item_lifecycle",
            NotificationEvent::WorkItemAllocation(_) => "work_item_allocation",
            NotificationEvent::WorkItemCustom(_) => "work_item_custom",
        }
    }

    /// The shared base fields of any variant.
    #[must_use]
    pub fn base(&self) -> &CaseEventCore {
        match self {
            NotificationEvent::Case(event) => &event.base,
            NotificationEvent::WorkItemLifecycle(event) => &event.base,
            NotificationEvent::WorkItemAllocation(event) => &event.base,
            NotificationEvent::WorkItemCustom(event) => &event.base,
        }
    }

    /// The event identifier.
    #[must_use]
    pub fn event_id(&self) -> &LightweightIdentifier {
        &self.base().event_id
    }

    /// The change type.
    #[must_use]
    pub fn change_type(&self) -> ChangeType {
        self.base().change_type
    }

    /// The per-actor assignee, for work-item variants.
    #[must_use]
    pub fn assignee(&self) -> Option<&SimpleObjectRef> {
        match self {
            NotificationEvent::Case(_) => None,
            NotificationEvent::WorkItemLifecycle(event) => event.assignee.as_ref(),
            NotificationEvent::WorkItemAllocation(event) => event.assignee.as_ref(),
            NotificationEvent::WorkItemCustom(event) => event.assignee.as_ref(),
        }
    }
}

impl fmt::Display for NotificationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.event_type(), self.base().event_id)
    }
}

impl From<CaseEvent> for NotificationEvent {
    fn from(event: CaseEvent) -> Self {
        NotificationEvent::Case(event)
    }
}

impl From<WorkItemLifecycleEvent> for NotificationEvent {
    fn from(event: WorkItemLifecycleEvent) -> Self {
        NotificationEvent::WorkItemLifecycle(event)
    }
}

impl From<WorkItemAllocationEvent> for NotificationEvent {
    fn from(event: WorkItemAllocationEvent) -> Self {
        NotificationEvent::WorkItemAllocation(event)
    }
}

impl From<WorkItemCustomEvent> for NotificationEvent {
    fn from(event: WorkItemCustomEvent) -> Self {
        NotificationEvent::WorkItemCustom(event)
    }
}
