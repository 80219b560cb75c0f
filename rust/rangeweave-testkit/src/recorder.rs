//! A push-protocol callback that records what it sees and can stop the range at a
//! chosen element.

use rangeweave::BreakOrContinue;

/// Push-protocol callback state: remembers every element it is handed and asks for
/// a stop once it has seen `break_after` of them.
#[derive(Debug, Clone)]
pub struct Recorder<T> {
    seen: Vec<T>,
    break_after: Option<usize>,
}

impl<T> Recorder<T> {
    /// Never asks for a stop.
    pub fn new() -> Self {
        Recorder {
            seen: Vec::new(),
            break_after: None,
        }
    }

    /// Returns `Break` from the `count`-th call on.
    pub fn breaking_after(count: usize) -> Self {
        Recorder {
            seen: Vec::new(),
            break_after: Some(count),
        }
    }

    pub fn record(&mut self, item: T) -> BreakOrContinue {
        self.seen.push(item);
        BreakOrContinue::break_if(self.break_after.is_some_and(|k| self.seen.len() >= k))
    }

    /// Same as `record`, for sinks that return nothing.
    pub fn observe(&mut self, item: T) {
        self.seen.push(item);
    }

    pub fn calls(&self) -> usize {
        self.seen.len()
    }

    pub fn seen(&self) -> &[T] {
        &self.seen
    }

    pub fn into_seen(self) -> Vec<T> {
        self.seen
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}
