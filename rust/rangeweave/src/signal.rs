//! Early-termination signal threaded through push-protocol callbacks.
//!
//! A push range hands every element to a sink. The sink answers with a [`Signal`]:
//! either nothing at all (`()`), meaning "keep going", or a [`BreakOrContinue`].
//! A producer that observes `Break` stops right after the current element and returns
//! `Break` to its own caller.
//!
//! Whether a push range is able to stop early is a declared capability of the range,
//! expressed by its [`Flow`] marker:
//!
//! - [`Abortable`]: sinks return [`BreakOrContinue`], the range returns it too.
//! - [`NonAbortable`]: sinks return `()`, the range returns `()`.
//!
//! [`Lift`] coerces whatever a user callback returns into the flow's signal type.
//! [`NonAbortable`] has no `Lift<BreakOrContinue>`: handing a stop-requesting callback
//! to a range that cannot stop fails to compile.

use std::ops::ControlFlow;

/// Two-valued result of a push-protocol callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BreakOrContinue {
    Break,
    Continue,
}

impl BreakOrContinue {
    #[inline]
    pub fn is_break(self) -> bool {
        self == BreakOrContinue::Break
    }

    #[inline]
    pub fn is_continue(self) -> bool {
        self == BreakOrContinue::Continue
    }

    /// Returns `Break` when `stop` is true, `Continue` otherwise.
    #[inline]
    pub fn break_if(stop: bool) -> BreakOrContinue {
        if stop {
            BreakOrContinue::Break
        } else {
            BreakOrContinue::Continue
        }
    }
}

impl From<ControlFlow<()>> for BreakOrContinue {
    fn from(flow: ControlFlow<()>) -> Self {
        match flow {
            ControlFlow::Break(()) => BreakOrContinue::Break,
            ControlFlow::Continue(()) => BreakOrContinue::Continue,
        }
    }
}

impl From<BreakOrContinue> for ControlFlow<()> {
    fn from(signal: BreakOrContinue) -> Self {
        match signal {
            BreakOrContinue::Break => ControlFlow::Break(()),
            BreakOrContinue::Continue => ControlFlow::Continue(()),
        }
    }
}

/// A value a push-protocol sink may return.
pub trait Signal: Sized {
    /// The "keep going" value.
    fn proceed() -> Self;

    fn is_break(&self) -> bool;

    /// Normalizes the signal: `()` always continues.
    fn into_flow(self) -> BreakOrContinue;
}

impl Signal for () {
    #[inline]
    fn proceed() -> Self {}

    #[inline]
    fn is_break(&self) -> bool {
        false
    }

    #[inline]
    fn into_flow(self) -> BreakOrContinue {
        BreakOrContinue::Continue
    }
}

impl Signal for BreakOrContinue {
    #[inline]
    fn proceed() -> Self {
        BreakOrContinue::Continue
    }

    #[inline]
    fn is_break(&self) -> bool {
        *self == BreakOrContinue::Break
    }

    #[inline]
    fn into_flow(self) -> BreakOrContinue {
        self
    }
}

/// Early-termination capability of a push range.
pub trait Flow {
    /// What sinks of this range return, and what the range returns.
    type Signal: Signal;

    const ABORTABLE: bool;
}

/// The range stops as soon as a sink returns [`BreakOrContinue::Break`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Abortable;

/// The range always delivers every element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NonAbortable;

impl Flow for Abortable {
    type Signal = BreakOrContinue;

    const ABORTABLE: bool = true;
}

impl Flow for NonAbortable {
    type Signal = ();

    const ABORTABLE: bool = false;
}

/// Coerces a callback result `S` into the signal type of the flow.
pub trait Lift<S>: Flow {
    fn lift(signal: S) -> Self::Signal;
}

impl Lift<()> for Abortable {
    #[inline]
    fn lift(_: ()) -> BreakOrContinue {
        BreakOrContinue::Continue
    }
}

impl Lift<BreakOrContinue> for Abortable {
    #[inline]
    fn lift(signal: BreakOrContinue) -> BreakOrContinue {
        signal
    }
}

impl Lift<()> for NonAbortable {
    #[inline]
    fn lift(_: ()) {}
}
