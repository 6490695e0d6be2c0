//! Object reference shapes and normalization.
//!
//! The workflow engine supplies raw [`ObjectReference`] values; events carry
//! the normalized [`SimpleObjectRef`] shape. Normalization is a pure copy of
//! `oid`, type name, and target name with no lookups and no I/O.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DispatchError;

/// A raw object reference as supplied by the workflow engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObjectReference {
    /// Object identifier. Absent on references the engine has not yet bound.
    pub oid: Option<String>,
    /// Qualified type name, e.g. `c:UserType`.
    pub type_name: String,
    /// Human-readable name of the target, if known.
    pub target_name: Option<String>,
}

impl ObjectReference {
    /// Creates a reference with a bound oid.
    #[must_use]
    pub fn new(oid: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            oid: Some(oid.into()),
            type_name: type_name.into(),
            target_name: None,
        }
    }

    /// Sets the target display name.
    #[must_use]
    pub fn with_target_name(mut self, target_name: impl Into<String>) -> Self {
        self.target_name = Some(target_name.into());
        self
    }
}

impl fmt::Display for ObjectReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.type_name,
            self.oid.as_deref().unwrap_or("<no oid>")
        )
    }
}

/// The normalized reference shape carried by notification events.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleObjectRef {
    /// Object identifier, copied verbatim from the raw reference.
    pub oid: Option<String>,
    /// Qualified type name, copied verbatim.
    pub type_name: String,
    /// Target display name, copied verbatim.
    pub target_name: Option<String>,
}

impl SimpleObjectRef {
    /// Normalizes a raw reference. Returns `None` for absent input.
    #[must_use]
    pub fn from_ref(raw: Option<&ObjectReference>) -> Option<Self> {
        raw.map(|r| Self {
            oid: r.oid.clone(),
            type_name: r.type_name.clone(),
            target_name: r.target_name.clone(),
        })
    }
}

/// Validates that every actor reference carries an oid.
///
/// # Errors
///
/// Returns [`DispatchError::InvalidActorReference`] naming the first
/// offending reference.
pub fn require_oids(refs: &[ObjectReference]) -> Result<(), DispatchError> {
    for reference in refs {
        if reference.oid.is_none() {
            return Err(DispatchError::InvalidActorReference(reference.to_string()));
        }
    }
    Ok(())
}
