//! Per-iteration hooks for searches.
//!
//! Every search loop reports each expanded node to a [`SearchObserver`] and
//! asks it whether to stop before the next expansion. Pacing for animated
//! front-ends and cooperative cancellation both live here, outside the search
//! logic itself.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::geo::NodeId;

/// Snapshot of a single outer-loop iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SearchStep {
    /// 1-based iteration counter.
    pub iteration: usize,
    /// Node selected for expansion in this iteration.
    pub current: NodeId,
    /// Nodes still waiting in the unvisited/open set after selection.
    pub frontier: usize,
}

/// Hook invoked once per outer-loop iteration of a search.
pub trait SearchObserver {
    /// Called after a node has been selected for expansion.
    fn on_step(&mut self, _step: &SearchStep) {}

    /// Checked before each iteration; returning `true` abandons the search.
    fn is_cancelled(&self) -> bool {
        false
    }
}

/// Observer that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SearchObserver for NoopObserver {}

/// Sleeps for a fixed duration after every step to pace visualisations.
#[derive(Debug, Clone, Copy)]
pub struct StepDelay(pub Duration);

impl StepDelay {
    pub fn from_millis(millis: u64) -> Self {
        Self(Duration::from_millis(millis))
    }
}

impl SearchObserver for StepDelay {
    fn on_step(&mut self, _step: &SearchStep) {
        if !self.0.is_zero() {
            std::thread::sleep(self.0);
        }
    }
}

/// Shared flag that lets another thread stop a running search.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    flag: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

impl SearchObserver for CancellationToken {
    fn is_cancelled(&self) -> bool {
        CancellationToken::is_cancelled(self)
    }
}

/// Cancels the search once `limit` iterations have run.
#[derive(Debug, Clone, Copy)]
pub struct IterationLimit {
    limit: usize,
    seen: usize,
}

impl IterationLimit {
    pub fn new(limit: usize) -> Self {
        Self { limit, seen: 0 }
    }
}

impl SearchObserver for IterationLimit {
    fn on_step(&mut self, _step: &SearchStep) {
        self.seen += 1;
    }

    fn is_cancelled(&self) -> bool {
        self.seen >= self.limit
    }
}

/// Records every step, in expansion order.
#[derive(Debug, Clone, Default)]
pub struct StepRecorder {
    pub steps: Vec<SearchStep>,
}

impl StepRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Node ids in the order they were expanded.
    pub fn expansion_order(&self) -> Vec<NodeId> {
        self.steps.iter().map(|step| step.current).collect()
    }
}

impl SearchObserver for StepRecorder {
    fn on_step(&mut self, step: &SearchStep) {
        self.steps.push(*step);
    }
}

/// Adapts a closure into an observer.
pub struct StepCallback<F>(pub F);

impl<F> SearchObserver for StepCallback<F>
where
    F: FnMut(&SearchStep),
{
    fn on_step(&mut self, step: &SearchStep) {
        (self.0)(step);
    }
}

impl<T: SearchObserver + ?Sized> SearchObserver for &mut T {
    fn on_step(&mut self, step: &SearchStep) {
        (**self).on_step(step);
    }

    fn is_cancelled(&self) -> bool {
        (**self).is_cancelled()
    }
}

impl<A: SearchObserver, B: SearchObserver> SearchObserver for (A, B) {
    fn on_step(&mut self, step: &SearchStep) {
        self.0.on_step(step);
        self.1.on_step(step);
    }

    fn is_cancelled(&self) -> bool {
        self.0.is_cancelled() || self.1.is_cancelled()
    }
}
