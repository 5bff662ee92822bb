//! Redraw suspension state.
//!
//! While suspended, refresh requests are captured instead of executed so
//! that batched mutations pay for one re-render. At most one request is
//! held: overlapping requests merge by keeping the earliest pipeline
//! position, because it is always safe to redo more work and never safe to
//! skip a stage that was requested while suspended.

use crate::pipeline::{PipelinePhase, StageId};

/// A refresh captured while redraw is suspended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PendingRefresh {
    /// Phase the cascade starts at.
    pub phase: PipelinePhase,
    /// Stage index within the starting phase.
    pub index: usize,
    /// Stage the request named, if any. Re-resolved on resume so that
    /// registry changes made while suspended are honoured.
    pub stage: Option<StageId>,
    /// Whether the named stage itself should be skipped.
    pub skip_stage: bool,
    /// Whether the follow-up render preserves scroll position.
    pub render_in_place: bool,
}

impl PendingRefresh {
    /// Whether `self` starts earlier in the cascade than `other`.
    pub fn earlier_than(&self, other: &PendingRefresh) -> bool {
        self.phase < other.phase || (self.phase == other.phase && self.index < other.index)
    }
}

/// Suspend/resume state for the redraw coordinator.
#[derive(Debug, Default)]
pub(crate) struct RedrawState {
    suspended: bool,
    pending: Option<PendingRefresh>,
    pending_in_place: bool,
}

impl RedrawState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Enter the suspended state, clearing any stale pending request.
    pub fn suspend(&mut self) {
        self.suspended = true;
        self.pending = None;
    }

    /// Capture a refresh request, keeping the earliest pipeline position.
    pub fn capture(&mut self, request: PendingRefresh) {
        match &self.pending {
            Some(existing) if !request.earlier_than(existing) => {}
            _ => self.pending = Some(request),
        }
    }

    /// Record that an in-place re-render was requested while suspended.
    pub fn request_in_place(&mut self) {
        self.pending_in_place = true;
    }

    /// Leave the suspended state, returning the captured refresh (if any)
    /// and whether a bare in-place re-render was requested.
    pub fn resume(&mut self) -> (Option<PendingRefresh>, bool) {
        self.suspended = false;
        let pending = self.pending.take();
        let in_place = std::mem::take(&mut self.pending_in_place);
        (pending, in_place)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(phase: PipelinePhase, index: usize) -> PendingRefresh {
        PendingRefresh {
            phase,
            index,
            stage: None,
            skip_stage: false,
            render_in_place: false,
        }
    }

    #[test]
    fn test_earliest_phase_wins() {
        let mut state = RedrawState::new();
        state.suspend();
        state.capture(request(PipelinePhase::DisplayStages, 0));
        state.capture(request(PipelinePhase::All, 0));
        state.capture(request(PipelinePhase::End, 0));
        let (pending, _) = state.resume();
        assert_eq!(pending.unwrap().phase, PipelinePhase::All);
    }

    #[test]
    fn test_earliest_index_wins_within_phase() {
        let mut state = RedrawState::new();
        state.suspend();
        state.capture(request(PipelinePhase::DataStages, 2));
        state.capture(request(PipelinePhase::DataStages, 1));
        state.capture(request(PipelinePhase::DataStages, 3));
        let (pending, _) = state.resume();
        assert_eq!(pending.unwrap().index, 1);
    }

    #[test]
    fn test_suspend_clears_stale_pending() {
        let mut state = RedrawState::new();
        state.suspend();
        state.capture(request(PipelinePhase::All, 0));
        state.suspend();
        let (pending, in_place) = state.resume();
        assert!(pending.is_none());
        assert!(!in_place);
    }

    #[test]
    fn test_in_place_request_survives_until_resume() {
        let mut state = RedrawState::new();
        state.suspend();
        state.request_in_place();
        let (pending, in_place) = state.resume();
        assert!(pending.is_none());
        assert!(in_place);
    }
}
