//! # rangeweave: composable ranges over push and pull protocols
//!
//! A range is a sequence that can be consumed in one of two ways:
//!
//! * **pull** ([`IndexRange`]): the consumer asks for a start position, advances it and
//!   dereferences it until the range reports the end. Positions may also move backward
//!   ([`BidirectionalIndexRange`]) or jump ([`RandomAccessIndexRange`]).
//! * **push** ([`GeneratorRange`]): the range drives the iteration and hands every
//!   element to a callback. An [`Abortable`] range stops as soon as the callback
//!   returns [`BreakOrContinue::Break`]; a [`NonAbortable`] one always runs to the end.
//!
//! Derived ranges (filters, transforms, views) are built on an [`Adaptor`], which stores
//! the base range by value or by reference, and on two traits: [`Apply`] customizes the
//! push path element by element, [`IndexAdaptor`] forwards (or overrides) the pull
//! path. A derived range never exposes a traversal stronger than both its own
//! declaration and its base.
//!
//! ## Module Organization
//!
//! * [`signal`] - early-termination signal and flow markers
//! * [`traversal`] - traversal tags and their type-level demotion
//! * [`index_range`] - the pull protocol and its implementations for containers
//! * [`generator`] - the push protocol
//! * [`storage`] - how a derived range holds its base range
//! * [`adaptor`] - the shared machinery of derived ranges
//! * [`index_iterator`] - cursors and Rust iterators on top of the pull protocol
//!
//! Most code only needs the [`prelude`].

pub mod adaptor;
pub mod generator;
pub mod index_iterator;
pub mod index_range;
pub mod signal;
pub mod storage;
pub mod traversal;

pub use adaptor::{AdaptedTraversal, Adaptor, Apply, IndexAdaptor, RangeAdaptor};
pub use generator::{ByIndex, FromIter, GeneratorRange, GeneratorRangeExt, from_iter};
pub use index_iterator::{Cursor, CursorMut, IndexRangeExt, Iter};
pub use index_range::{
    BidirectionalIndexRange, IndexRange, IndexRangeMut, RandomAccessIndexRange, SliceRange,
    SliceRangeMut,
};
pub use signal::{Abortable, BreakOrContinue, NonAbortable};

/// Traits and types needed to consume and build ranges.
///
/// [`IndexAdaptor`] is not included: its hooks share names with the
/// [`IndexRange`] methods and would make method calls on derived ranges ambiguous.
pub mod prelude {
    pub use crate::adaptor::{Adaptor, Apply, RangeAdaptor};
    pub use crate::generator::{ByIndex, GeneratorRange, GeneratorRangeExt};
    pub use crate::index_iterator::IndexRangeExt;
    pub use crate::index_range::{
        BidirectionalIndexRange, IndexRange, IndexRangeMut, RandomAccessIndexRange,
        SliceRange, SliceRangeMut,
    };
    pub use crate::signal::{Abortable, BreakOrContinue, Flow, NonAbortable, Signal};
    pub use crate::storage::{ByValue, RangeStorage, RangeStorageMut};
    pub use crate::traversal::{Bidirectional, Forward, RandomAccess, TraversalTag, UseDefault};
}
