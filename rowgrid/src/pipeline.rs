//! Pipeline stage registries.
//!
//! Two registries exist per collection: the data phase produces the active
//! row set from the full row set, the display phase produces ordered
//! projections from the active set. Stages run in ascending priority order,
//! ties broken by registration order. A stage must not mutate the sequence
//! it receives; it returns a new sequence, or `None` to pass through
//! unchanged.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::row::Row;

/// Identifier handed back at stage registration.
///
/// Used to resume a refresh at that stage when its configuration changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StageId(usize);

impl StageId {
    fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "__stage_{}", self.0)
    }
}

/// The five ordered phases of a pipeline refresh.
///
/// A refresh starts at one phase and cascades through every later phase.
/// The derived ordering is load-bearing: redraw suspension merges pending
/// refreshes by keeping the earliest phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum PipelinePhase {
    /// Reset from scratch: reseed stage zero from the full row set.
    All,
    /// Run data-phase stages, each consuming the previous stage's output.
    DataStages,
    /// Seed projection zero from the final data-phase output.
    ResetDisplay,
    /// Run display-phase stages, each consuming the previous projection.
    DisplayStages,
    /// Terminal marker: run nothing further.
    End,
}

/// Data-phase handler: previous sequence in, new sequence out
/// (`None` = pass through unchanged).
pub type DataHandler = Box<dyn FnMut(Vec<Row>) -> Option<Vec<Row>> + Send>;

/// Display-phase handler: previous projection in plus a
/// preserve-scroll-position hint, new projection out (`None` = pass through).
pub type DisplayHandler = Box<dyn FnMut(Vec<Row>, bool) -> Option<Vec<Row>> + Send>;

pub(crate) struct Stage<H> {
    pub id: StageId,
    pub priority: i32,
    pub handler: H,
}

/// Priority-ordered stage list for one pipeline phase.
pub(crate) struct StageRegistry<H> {
    stages: Vec<Stage<H>>,
}

impl<H> StageRegistry<H> {
    pub fn new() -> Self {
        Self { stages: Vec::new() }
    }

    /// Register a stage. The sort is stable, so equal priorities keep
    /// registration order.
    pub fn register(&mut self, priority: i32, handler: H) -> StageId {
        let id = StageId::new();
        self.stages.push(Stage {
            id,
            priority,
            handler,
        });
        self.stages.sort_by_key(|s| s.priority);
        id
    }

    /// Execution index of a registered stage.
    pub fn index_of(&self, id: StageId) -> Option<usize> {
        self.stages.iter().position(|s| s.id == id)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn handler_mut(&mut self, index: usize) -> &mut H {
        &mut self.stages[index].handler
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop() -> DataHandler {
        Box::new(|_| None)
    }

    #[test]
    fn test_stages_sorted_by_priority() {
        let mut registry: StageRegistry<DataHandler> = StageRegistry::new();
        let late = registry.register(20, noop());
        let early = registry.register(10, noop());
        assert_eq!(registry.index_of(early), Some(0));
        assert_eq!(registry.index_of(late), Some(1));
    }

    #[test]
    fn test_equal_priority_keeps_registration_order() {
        let mut registry: StageRegistry<DataHandler> = StageRegistry::new();
        let first = registry.register(10, noop());
        let second = registry.register(10, noop());
        assert_eq!(registry.index_of(first), Some(0));
        assert_eq!(registry.index_of(second), Some(1));
    }

    #[test]
    fn test_phase_ordering() {
        assert!(PipelinePhase::All < PipelinePhase::DataStages);
        assert!(PipelinePhase::DataStages < PipelinePhase::ResetDisplay);
        assert!(PipelinePhase::ResetDisplay < PipelinePhase::DisplayStages);
        assert!(PipelinePhase::DisplayStages < PipelinePhase::End);
    }
}
