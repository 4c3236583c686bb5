//! Per-run state machine

use serde::{Deserialize, Serialize};

/// States a single pipeline run moves through
///
/// State transitions:
/// ```text
/// Idle → WorkspaceAcquired → ToolsResolved → Invoked → Resolved → PostProcessed → Completed
///                 │                 │           │          │              │
///                 └─────────────────┴───────────┴──────────┴──────────────┴──→ Failed
/// ```
///
/// `Completed` and `Failed` are only entered after the workspace has been
/// released, so both are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Run has not started
    #[default]
    Idle,
    /// Scratch workspace exists
    WorkspaceAcquired,
    /// Compiler and plugin executables located
    ToolsResolved,
    /// Compiler exited successfully
    Invoked,
    /// Generated file located inside the workspace
    Resolved,
    /// Artifact read and rewritten
    PostProcessed,
    /// Workspace released, artifact returned
    Completed,
    /// Workspace released, error returned
    Failed,
}

impl RunState {
    /// Check if this state can transition to the target state
    pub fn can_transition_to(&self, target: RunState) -> bool {
        use RunState::*;
        matches!(
            (self, target),
            (Idle, WorkspaceAcquired)
                | (WorkspaceAcquired, ToolsResolved)
                | (ToolsResolved, Invoked)
                | (Invoked, Resolved)
                | (Resolved, PostProcessed)
                | (PostProcessed, Completed)
                // Failing is possible from any non-terminal state
                | (Idle, Failed)
                | (WorkspaceAcquired, Failed)
                | (ToolsResolved, Failed)
                | (Invoked, Failed)
                | (Resolved, Failed)
                | (PostProcessed, Failed)
        )
    }

    /// Check if the run is finished
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunState::Completed | RunState::Failed)
    }

}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Idle => write!(f, "Idle"),
            RunState::WorkspaceAcquired => write!(f, "WorkspaceAcquired"),
            RunState::ToolsResolved => write!(f, "ToolsResolved"),
            RunState::Invoked => write!(f, "Invoked"),
            RunState::Resolved => write!(f, "Resolved"),
            RunState::PostProcessed => write!(f, "PostProcessed"),
            RunState::Completed => write!(f, "Completed"),
            RunState::Failed => write!(f, "Failed"),
        }
    }
}


#[cfg(test)]
#[path = "lifecycle/lifecycle_parameterized_tests.rs"]
mod lifecycle_parameterized_tests;
