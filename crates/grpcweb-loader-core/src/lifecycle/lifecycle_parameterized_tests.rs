#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized valid transitions
// ============================================================================

#[test_case(RunState::Idle, RunState::WorkspaceAcquired)]
#[test_case(RunState::WorkspaceAcquired, RunState::ToolsResolved)]
#[test_case(RunState::ToolsResolved, RunState::Invoked)]
#[test_case(RunState::Invoked, RunState::Resolved)]
#[test_case(RunState::Resolved, RunState::PostProcessed)]
#[test_case(RunState::PostProcessed, RunState::Completed)]
#[test_case(RunState::Idle, RunState::Failed)]
#[test_case(RunState::WorkspaceAcquired, RunState::Failed)]
#[test_case(RunState::ToolsResolved, RunState::Failed)]
#[test_case(RunState::Invoked, RunState::Failed)]
#[test_case(RunState::Resolved, RunState::Failed)]
#[test_case(RunState::PostProcessed, RunState::Failed)]
fn RunState___valid_transitions___allowed(from: RunState, to: RunState) {
    assert!(
        from.can_transition_to(to),
        "{:?} should transition to {:?}",
        from,
        to
    );
}

// ============================================================================
// Parameterized invalid transitions
// ============================================================================

#[test_case(RunState::Idle, RunState::ToolsResolved)]
#[test_case(RunState::Idle, RunState::Completed)]
#[test_case(RunState::WorkspaceAcquired, RunState::Invoked)]
#[test_case(RunState::ToolsResolved, RunState::Resolved)]
#[test_case(RunState::Invoked, RunState::PostProcessed)]
#[test_case(RunState::Resolved, RunState::Completed)]
#[test_case(RunState::PostProcessed, RunState::Resolved)]
#[test_case(RunState::Completed, RunState::Idle)]
#[test_case(RunState::Completed, RunState::Failed)]
#[test_case(RunState::Failed, RunState::Idle)]
#[test_case(RunState::Failed, RunState::Completed)]
#[test_case(RunState::Failed, RunState::Failed)]
fn RunState___invalid_transitions___not_allowed(from: RunState, to: RunState) {
    assert!(
        !from.can_transition_to(to),
        "{:?} should not transition to {:?}",
        from,
        to
    );
}

// ============================================================================
// Parameterized is_terminal tests
// ============================================================================

#[test_case(RunState::Completed, true)]
#[test_case(RunState::Failed, true)]
#[test_case(RunState::Idle, false)]
#[test_case(RunState::WorkspaceAcquired, false)]
#[test_case(RunState::Invoked, false)]
#[test_case(RunState::PostProcessed, false)]
fn RunState___is_terminal___correct_state(state: RunState, expected: bool) {
    assert_eq!(
        state.is_terminal(),
        expected,
        "State {:?} is_terminal should be {}",
        state,
        expected
    );
}

// ============================================================================
// Parameterized to_string tests
// ============================================================================

#[test_case(RunState::Idle, "Idle")]
#[test_case(RunState::WorkspaceAcquired, "WorkspaceAcquired")]
#[test_case(RunState::ToolsResolved, "ToolsResolved")]
#[test_case(RunState::Invoked, "Invoked")]
#[test_case(RunState::Resolved, "Resolved")]
#[test_case(RunState::PostProcessed, "PostProcessed")]
#[test_case(RunState::Completed, "Completed")]
#[test_case(RunState::Failed, "Failed")]
fn RunState___to_string___correct_representation(state: RunState, expected_str: &str) {
    assert_eq!(state.to_string(), expected_str);
}
