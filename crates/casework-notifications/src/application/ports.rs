//! Ports to external collaborators.
//!
//! The workflow engine (upstream), the notification pipeline and the
//! expression profile manager (downstream) are all owned by other
//! subsystems; the dispatch core talks to them through these traits.
//! Every implementation is expected to be internally thread-safe.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use casework_core::error::{DispatchError, ProfileError};
use casework_core::reference::ObjectReference;
use casework_core::task::{OperationResult, TaskHandle};

use crate::domain::events::NotificationEvent;
use crate::domain::records::{
    CaseRecord, CaseWorkItem, EventHandlerConfig, ExpressionProfile,
    WorkItemAllocationOperationInfo, WorkItemEventCause, WorkItemNotificationAction,
    WorkItemOperationInfo, WorkItemOperationSourceInfo,
};

/// Downstream pipeline that delivers notification events.
///
/// Delivery is synchronous relative to the engine callback: the callback
/// completes only after `process_event` returns. Timeouts are the
/// pipeline's responsibility.
#[async_trait]
pub trait NotificationPipeline: Send + Sync {
    /// Default path: hand over a completed event.
    async fn process_event(
        &self,
        event: NotificationEvent,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError>;

    /// Custom-event path: the pipeline must apply the supplied handler,
    /// under the supplied profile, in preference to configured handlers.
    async fn process_custom_event(
        &self,
        event: NotificationEvent,
        handler_config: Option<EventHandlerConfig>,
        profile: Option<ExpressionProfile>,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError>;
}

/// Resolves the expression profiles that govern custom handler logic.
#[async_trait]
pub trait ExpressionProfileManager: Send + Sync {
    /// The profile dedicated to custom workflow notifications.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError`] on schema or configuration problems.
    async fn profile_for_custom_workflow_notifications(
        &self,
        result: &mut OperationResult,
    ) -> Result<ExpressionProfile, ProfileError>;
}

/// The workflow engine, as far as registration is concerned.
///
/// The engine invokes the registered listener's callbacks, possibly from
/// multiple threads concurrently, and unregisters on shutdown at most
/// (process exit suffices).
pub trait CaseEngine: Send + Sync {
    /// Registers the sole case-event listener.
    fn register_event_listener(&self, listener: Arc<dyn CaseEventListener>);
}

/// The seven entry points the workflow engine calls.
///
/// The set is closed deliberately: the call-site semantics differ in how
/// many events each callback produces and which validation applies, so the
/// upstream surface stays a fixed set of methods rather than a polymorphic
/// event object.
#[allow(clippy::too_many_arguments)]
#[async_trait]
pub trait CaseEventListener: Send + Sync {
    /// A case was opened.
    async fn on_case_opening(
        &self,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError>;

    /// A case was closed.
    async fn on_case_closing(
        &self,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError>;

    /// A work-item was created for an assignee.
    async fn on_work_item_creation(
        &self,
        assignee: Option<&ObjectReference>,
        work_item: &CaseWorkItem,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError>;

    /// A work-item was closed.
    async fn on_work_item_closing(
        &self,
        assignee: Option<&ObjectReference>,
        work_item: &CaseWorkItem,
        operation_info: Option<&WorkItemOperationInfo>,
        source_info: Option<&WorkItemOperationSourceInfo>,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError>;

    /// An engine-defined custom event was raised against a work-item.
    async fn on_work_item_custom_event(
        &self,
        assignee: Option<&ObjectReference>,
        work_item: &CaseWorkItem,
        notification_action: &WorkItemNotificationAction,
        cause: Option<&WorkItemEventCause>,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError>;

    /// The allocation of a work-item is changing for its current actors.
    /// A present `time_before` makes this an advance warning.
    async fn on_work_item_allocation_change_current_actors(
        &self,
        work_item: &CaseWorkItem,
        operation_info: &WorkItemAllocationOperationInfo,
        source_info: Option<&WorkItemOperationSourceInfo>,
        time_before: Option<Duration>,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError>;

    /// The allocation of a work-item is changing; new actors gain it.
    /// `operation_info.new_actors` must be present.
    async fn on_work_item_allocation_change_new_actors(
        &self,
        work_item: &CaseWorkItem,
        operation_info: &WorkItemAllocationOperationInfo,
        source_info: Option<&WorkItemOperationSourceInfo>,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError>;
}
