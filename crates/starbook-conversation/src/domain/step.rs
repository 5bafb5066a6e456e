//! Workflow steps of the authoring wizard.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the four linear stages of the wizard.
///
/// Steps are ordered; a conversation only ever moves to the same or a later
/// step. `Generation` is terminal.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum WorkflowStep {
    /// The user describes the situation in their own words.
    #[default]
    InitialCapture,
    /// The assistant asks for the missing STAR sections.
    Clarification,
    /// Every section is answered; the user may add detail.
    Refinement,
    /// A draft story has been generated.
    Generation,
}

impl WorkflowStep {
    /// All steps in order.
    pub const ALL: [Self; 4] = [
        Self::InitialCapture,
        Self::Clarification,
        Self::Refinement,
        Self::Generation,
    ];

    /// The step after this one, or `None` at the end.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        match self {
            Self::InitialCapture => Some(Self::Clarification),
            Self::Clarification => Some(Self::Refinement),
            Self::Refinement => Some(Self::Generation),
            Self::Generation => None,
        }
    }

    /// Returns true for the final step.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// Wire name, as used in JSON.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialCapture => "initialCapture",
            Self::Clarification => "clarification",
            Self::Refinement => "refinement",
            Self::Generation => "generation",
        }
    }
}

impl fmt::Display for WorkflowStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
