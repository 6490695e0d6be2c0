//! The case-event listener: builds, enriches, and dispatches events.
//!
//! One dispatcher instance is registered with the workflow engine at
//! startup. Each engine callback validates its input, constructs the
//! matching event variant (fanning allocation changes out per actor),
//! enriches the base fields from the case, and hands the event to the
//! downstream pipeline on the engine's own thread. The dispatcher holds no
//! mutable state beyond the one-shot registration flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use casework_core::change::ChangeType;
use casework_core::error::DispatchError;
use casework_core::identifier::IdentifierGenerator;
use casework_core::reference::{ObjectReference, SimpleObjectRef, require_oids};
use casework_core::task::{OperationResult, TaskHandle};

use crate::domain::events::{
    CaseEvent, CaseEventCore, WorkItemAllocationEvent, WorkItemCustomEvent,
    WorkItemLifecycleEvent,
};
use crate::domain::records::{
    CaseRecord, CaseWorkItem, EventHandlerConfig, WorkItemAllocationOperationInfo,
    WorkItemEventCause, WorkItemNotificationAction, WorkItemOperationInfo,
    WorkItemOperationSourceInfo,
};

use super::ports::{CaseEngine, CaseEventListener, ExpressionProfileManager, NotificationPipeline};

/// Turns workflow-engine callbacks into notification events.
pub struct CaseNotificationDispatcher {
    identifiers: Arc<dyn IdentifierGenerator>,
    pipeline: Arc<dyn NotificationPipeline>,
    profiles: Arc<dyn ExpressionProfileManager>,
    registered: AtomicBool,
}

impl CaseNotificationDispatcher {
    /// Creates a dispatcher wired to its collaborators.
    #[must_use]
    pub fn new(
        identifiers: Arc<dyn IdentifierGenerator>,
        pipeline: Arc<dyn NotificationPipeline>,
        profiles: Arc<dyn ExpressionProfileManager>,
    ) -> Self {
        Self {
            identifiers,
            pipeline,
            profiles,
            registered: AtomicBool::new(false),
        }
    }

    /// Registers the dispatcher as the engine's case-event listener.
    ///
    /// Without an engine the dispatcher runs in degraded mode: a single
    /// warning is logged and the callbacks are never invoked. A repeated
    /// call with an engine is a warned no-op.
    pub fn init(self: &Arc<Self>, engine: Option<&dyn CaseEngine>) {
        match engine {
            Some(engine) => {
                if self.registered.swap(true, Ordering::SeqCst) {
                    warn!("case-event listener already registered, ignoring repeated init");
                    return;
                }
                engine.register_event_listener(Arc::clone(self) as Arc<dyn CaseEventListener>);
                debug!("registered case-event listener with the workflow engine");
            }
            None => {
                warn!("workflow engine not present, case notifications will not be emitted");
            }
        }
    }

    /// Builds an enriched base for a new event.
    fn event_core(&self, change_type: ChangeType, case: &CaseRecord) -> CaseEventCore {
        let mut core = CaseEventCore::new(self.identifiers.next(), change_type, case.clone());
        core.initialize();
        core
    }

    fn initiator(source_info: Option<&WorkItemOperationSourceInfo>) -> Option<SimpleObjectRef> {
        source_info.and_then(|source| SimpleObjectRef::from_ref(source.initiator_ref.as_ref()))
    }

    async fn dispatch_case_event(
        &self,
        change_type: ChangeType,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        let event = CaseEvent {
            base: self.event_core(change_type, case),
        };
        debug!(case_oid = %case.oid, change = %change_type, "dispatching case event");
        self.pipeline.process_event(event.into(), task, result).await
    }

    /// Emits one per-actor allocation event.
    #[allow(clippy::too_many_arguments)]
    async fn dispatch_allocation_event(
        &self,
        actor: &ObjectReference,
        change_type: ChangeType,
        work_item: &CaseWorkItem,
        operation_info: &WorkItemAllocationOperationInfo,
        source_info: Option<&WorkItemOperationSourceInfo>,
        time_before: Option<Duration>,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        let event = WorkItemAllocationEvent {
            base: self.event_core(change_type, case),
            work_item: work_item.clone(),
            assignee: SimpleObjectRef::from_ref(Some(actor)),
            initiator: Self::initiator(source_info),
            operation_info: operation_info.clone(),
            source_info: source_info.cloned(),
            time_before,
        };
        self.pipeline.process_event(event.into(), task, result).await
    }
}

#[allow(clippy::too_many_arguments)]
#[async_trait]
impl CaseEventListener for CaseNotificationDispatcher {
    async fn on_case_opening(
        &self,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        self.dispatch_case_event(ChangeType::Add, case, task, result)
            .await
    }

    async fn on_case_closing(
        &self,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        self.dispatch_case_event(ChangeType::Delete, case, task, result)
            .await
    }

    async fn on_work_item_creation(
        &self,
        assignee: Option<&ObjectReference>,
        work_item: &CaseWorkItem,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        let event = WorkItemLifecycleEvent {
            base: self.event_core(ChangeType::Add, case),
            work_item: work_item.clone(),
            assignee: SimpleObjectRef::from_ref(assignee),
            initiator: None,
            operation_info: None,
            source_info: None,
        };
        debug!(case_oid = %case.oid, work_item = work_item.id, "dispatching work-item creation");
        self.pipeline.process_event(event.into(), task, result).await
    }

    async fn on_work_item_closing(
        &self,
        assignee: Option<&ObjectReference>,
        work_item: &CaseWorkItem,
        operation_info: Option<&WorkItemOperationInfo>,
        source_info: Option<&WorkItemOperationSourceInfo>,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        let event = WorkItemLifecycleEvent {
            base: self.event_core(ChangeType::Delete, case),
            work_item: work_item.clone(),
            assignee: SimpleObjectRef::from_ref(assignee),
            initiator: Self::initiator(source_info),
            operation_info: operation_info.copied(),
            source_info: source_info.cloned(),
        };
        debug!(case_oid = %case.oid, work_item = work_item.id, "dispatching work-item closing");
        self.pipeline.process_event(event.into(), task, result).await
    }

    async fn on_work_item_custom_event(
        &self,
        assignee: Option<&ObjectReference>,
        work_item: &CaseWorkItem,
        notification_action: &WorkItemNotificationAction,
        cause: Option<&WorkItemEventCause>,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        // Uniform source-info shape for downstream consumers: the custom
        // event has no initiator, only a cause and the raising action.
        let source_info = WorkItemOperationSourceInfo {
            initiator_ref: None,
            cause: cause.cloned(),
            notification_action: Some(notification_action.clone()),
        };
        let event = WorkItemCustomEvent {
            base: self.event_core(ChangeType::Add, case),
            work_item: work_item.clone(),
            assignee: SimpleObjectRef::from_ref(assignee),
            notification_action: notification_action.clone(),
            cause: cause.cloned(),
            source_info: Some(source_info),
        };
        debug!(case_oid = %case.oid, work_item = work_item.id, "dispatching custom work-item event");

        if let Some(handler) = &notification_action.handler {
            let config = EventHandlerConfig::undetermined_safe(handler.clone());
            let profile = self
                .profiles
                .profile_for_custom_workflow_notifications(result)
                .await?;
            self.pipeline
                .process_custom_event(event.into(), Some(config), Some(profile), task, result)
                .await
        } else {
            self.pipeline.process_event(event.into(), task, result).await
        }
    }

    async fn on_work_item_allocation_change_current_actors(
        &self,
        work_item: &CaseWorkItem,
        operation_info: &WorkItemAllocationOperationInfo,
        source_info: Option<&WorkItemOperationSourceInfo>,
        time_before: Option<Duration>,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        require_oids(&operation_info.current_actors)?;

        // Deallocation without advance warning is a deletion of the old
        // assignment; with a time-before window it is a modification.
        let change_type = if time_before.is_some() {
            ChangeType::Modify
        } else {
            ChangeType::Delete
        };
        debug!(
            case_oid = %case.oid,
            work_item = work_item.id,
            actors = operation_info.current_actors.len(),
            change = %change_type,
            "dispatching allocation change for current actors"
        );
        for actor in &operation_info.current_actors {
            self.dispatch_allocation_event(
                actor,
                change_type,
                work_item,
                operation_info,
                source_info,
                time_before,
                case,
                task,
                result,
            )
            .await?;
        }
        Ok(())
    }

    async fn on_work_item_allocation_change_new_actors(
        &self,
        work_item: &CaseWorkItem,
        operation_info: &WorkItemAllocationOperationInfo,
        source_info: Option<&WorkItemOperationSourceInfo>,
        case: &CaseRecord,
        task: &TaskHandle,
        result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        let new_actors = operation_info.new_actors.as_ref().ok_or_else(|| {
            DispatchError::InvalidCallback(
                "new-actors list is missing on allocation change".to_owned(),
            )
        })?;
        require_oids(&operation_info.current_actors)?;
        require_oids(new_actors)?;

        debug!(
            case_oid = %case.oid,
            work_item = work_item.id,
            actors = new_actors.len(),
            "dispatching allocation change for new actors"
        );
        for actor in new_actors {
            self.dispatch_allocation_event(
                actor,
                ChangeType::Add,
                work_item,
                operation_info,
                source_info,
                None,
                case,
                task,
                result,
            )
            .await?;
        }
        Ok(())
    }
}
