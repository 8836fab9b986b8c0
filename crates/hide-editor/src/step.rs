//! Editor steps and their transitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where an editing session is in the tracing workflow.
///
/// ```text
/// capturing_reference → capturing_target → done
/// ```
///
/// Adjusting an existing result starts directly at `done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditorStep {
    CapturingReference,
    CapturingTarget,
    Done,
}

impl EditorStep {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::CapturingReference => &[Self::CapturingTarget],
            Self::CapturingTarget => &[Self::Done],
            Self::Done => &[],
        }
    }

    /// Check whether transitioning to `next` is valid.
    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// The step `advance` moves to, if any.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::CapturingReference => Some(Self::CapturingTarget),
            Self::CapturingTarget => Some(Self::Done),
            Self::Done => None,
        }
    }

    /// Whether pointer presses append points in this step.
    #[must_use]
    pub const fn is_capturing(self) -> bool {
        matches!(self, Self::CapturingReference | Self::CapturingTarget)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CapturingReference => "capturing_reference",
            Self::CapturingTarget => "capturing_target",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for EditorStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
