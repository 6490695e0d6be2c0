//! Test profile managers — mock `ExpressionProfileManager` implementations.

use async_trait::async_trait;

use casework_core::error::ProfileError;
use casework_core::task::OperationResult;
use casework_notifications::application::ports::ExpressionProfileManager;
use casework_notifications::domain::records::{AccessDecision, ExpressionProfile};

/// A profile manager that always returns the same profile.
#[derive(Debug, Clone)]
pub struct StaticProfileManager(pub ExpressionProfile);

impl StaticProfileManager {
    /// The profile manager used by most tests: a deny-by-default profile
    /// named `custom-workflow-notifications`.
    #[must_use]
    pub fn custom_workflow_notifications() -> Self {
        Self(ExpressionProfile {
            identifier: "custom-workflow-notifications".to_owned(),
            default_decision: AccessDecision::Deny,
        })
    }
}

#[async_trait]
impl ExpressionProfileManager for StaticProfileManager {
    async fn profile_for_custom_workflow_notifications(
        &self,
        _result: &mut OperationResult,
    ) -> Result<ExpressionProfile, ProfileError> {
        Ok(self.0.clone())
    }
}

/// A profile manager that always fails with a configuration error.
#[derive(Debug, Default)]
pub struct FailingProfileManager;

#[async_trait]
impl ExpressionProfileManager for FailingProfileManager {
    async fn profile_for_custom_workflow_notifications(
        &self,
        _result: &mut OperationResult,
    ) -> Result<ExpressionProfile, ProfileError> {
        Err(ProfileError::Configuration(
            "no profile configured for custom workflow notifications".into(),
        ))
    }
}
