//! The push (generator) protocol.
//!
//! A push range drives the iteration itself: [`GeneratorRange::generate`] calls the
//! sink once per element, in order, and stops as soon as the sink returns
//! [`BreakOrContinue::Break`](crate::signal::BreakOrContinue::Break) if the range's
//! [`Flow`] is [`Abortable`]. The range then returns `Break` to its caller.
//!
//! Any pull range can present itself as a push range by synthesizing the calls from
//! its indices, see [`generate_by_index`]. The containers made into pull ranges by
//! [`crate::index_range`] do exactly that; other pull ranges get it by being wrapped
//! in [`ByIndex`] or through [`impl_generator_by_index!`](crate::impl_generator_by_index).

use std::{marker::PhantomData, ops::Range};

use crate::{
    index_range::{
        BidirectionalIndexRange, IndexRange, IndexRangeMut, RandomAccessIndexRange, SliceRange,
        SliceRangeMut,
    },
    signal::{Abortable, BreakOrContinue, Flow, Lift, NonAbortable, Signal},
};

/// Push-protocol range.
pub trait GeneratorRange {
    /// Element handed to the sink.
    type Item<'a>
    where
        Self: 'a;

    /// Declared early-termination capability.
    type Flow: Flow;

    fn generate<'a, F>(&'a self, sink: F) -> <Self::Flow as Flow>::Signal
    where
        F: FnMut(Self::Item<'a>) -> <Self::Flow as Flow>::Signal;
}

/// Drives `sink` over every position of a pull range, from `begin_index` until
/// `at_end_index`, stopping at the first `Break`.
pub fn generate_by_index<'a, R, F, S>(range: &'a R, mut sink: F) -> S
where
    R: IndexRange,
    F: FnMut(R::Ref<'a>) -> S,
    S: Signal,
{
    let mut idx = range.begin_index();
    while !range.at_end_index(&idx) {
        let signal = sink(range.dereference_index(&idx));
        if signal.is_break() {
            log::trace!("index-driven generation stopped early");
            return signal;
        }
        range.increment_index(&mut idx);
    }
    S::proceed()
}

/// Implements [`GeneratorRange`] for a pull range by index synthesis, with the
/// [`Abortable`] flow.
///
/// The generics go between brackets; the lifetime naming the borrow of the range is
/// spelled out before the element type:
///
/// ```
/// use rangeweave::prelude::*;
///
/// struct Evens(u32);
///
/// impl IndexRange for Evens {
///     type Index = u32;
///     type Traversal = Forward;
///     type Ref<'a> = u32;
///
///     fn begin_index(&self) -> u32 { 0 }
///     fn end_index(&self) -> u32 { self.0 }
///     fn at_end_index(&self, idx: &u32) -> bool { *idx >= self.0 }
///     fn equal_index(&self, lhs: &u32, rhs: &u32) -> bool { lhs == rhs }
///     fn increment_index(&self, idx: &mut u32) { *idx += 1 }
///     fn dereference_index<'a>(&'a self, idx: &u32) -> u32 { *idx * 2 }
/// }
///
/// rangeweave::impl_generator_by_index!([] Evens, 'a => u32);
///
/// assert_eq!(Evens(4).collect_items(), vec![0, 2, 4, 6]);
/// ```
#[macro_export]
macro_rules! impl_generator_by_index {
    ([$($generics:tt)*] $ty:ty, $lt:lifetime => $item:ty) => {
        impl<$($generics)*> $crate::generator::GeneratorRange for $ty {
            type Item<$lt>
                = $item
            where
                Self: $lt;
            type Flow = $crate::signal::Abortable;

            #[inline]
            fn generate<$lt, F>(
                &$lt self,
                sink: F,
            ) -> <Self::Flow as $crate::signal::Flow>::Signal
            where
                F: FnMut(Self::Item<$lt>) -> <Self::Flow as $crate::signal::Flow>::Signal,
            {
                $crate::generator::generate_by_index(self, sink)
            }
        }
    };
}

impl_generator_by_index!([T] Vec<T>, 'a => &'a T);
impl_generator_by_index!(['s, T] SliceRange<'s, T>, 'a => &'a T);
impl_generator_by_index!(['s, T] SliceRangeMut<'s, T>, 'a => &'a T);
impl_generator_by_index!([] Range<usize>, 'a => usize);
impl_generator_by_index!([] Range<u32>, 'a => u32);
impl_generator_by_index!([] Range<u64>, 'a => u64);
impl_generator_by_index!([] Range<i32>, 'a => i32);
impl_generator_by_index!([] Range<i64>, 'a => i64);

/// Gives any pull range a push presentation.
///
/// `ByIndex<R>` is the pull range `R` itself (every index operation forwards to it)
/// plus an [`Abortable`] [`GeneratorRange`] synthesized with [`generate_by_index`].
/// Wrap a pull-only range in it to build derived ranges over it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ByIndex<R>(pub R);

impl<R> ByIndex<R> {
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R: IndexRange> IndexRange for ByIndex<R> {
    type Index = R::Index;
    type Traversal = R::Traversal;
    type Ref<'a>
        = R::Ref<'a>
    where
        Self: 'a;

    #[inline]
    fn begin_index(&self) -> R::Index {
        self.0.begin_index()
    }

    #[inline]
    fn end_index(&self) -> R::Index {
        self.0.end_index()
    }

    #[inline]
    fn at_end_index(&self, idx: &R::Index) -> bool {
        self.0.at_end_index(idx)
    }

    #[inline]
    fn equal_index(&self, lhs: &R::Index, rhs: &R::Index) -> bool {
        self.0.equal_index(lhs, rhs)
    }

    #[inline]
    fn increment_index(&self, idx: &mut R::Index) {
        self.0.increment_index(idx)
    }

    #[inline]
    fn dereference_index<'a>(&'a self, idx: &R::Index) -> R::Ref<'a> {
        self.0.dereference_index(idx)
    }
}

impl<R: BidirectionalIndexRange> BidirectionalIndexRange for ByIndex<R> {
    #[inline]
    fn decrement_index(&self, idx: &mut R::Index) {
        self.0.decrement_index(idx)
    }
}

impl<R: RandomAccessIndexRange> RandomAccessIndexRange for ByIndex<R> {
    #[inline]
    fn advance_index(&self, idx: &mut R::Index, distance: isize) {
        self.0.advance_index(idx, distance)
    }

    #[inline]
    fn distance_to_index(&self, lhs: &R::Index, rhs: &R::Index) -> isize {
        self.0.distance_to_index(lhs, rhs)
    }

    #[inline]
    fn middle_point(&self, begin: &mut R::Index, end: &R::Index) {
        self.0.middle_point(begin, end)
    }
}

impl<R: IndexRangeMut> IndexRangeMut for ByIndex<R> {
    type RefMut<'a>
        = R::RefMut<'a>
    where
        Self: 'a;

    #[inline]
    fn dereference_index_mut<'a>(&'a mut self, idx: &R::Index) -> R::RefMut<'a> {
        self.0.dereference_index_mut(idx)
    }
}

impl_generator_by_index!([R: IndexRange] ByIndex<R>, 'a => R::Ref<'a>);

/// A push-only range replaying a cloneable iterator on every generation.
///
/// The flow parameter decides whether the range honors `Break`
/// ([`Abortable`], see [`from_iter`]) or always delivers every element
/// ([`NonAbortable`], see [`from_iter_non_abortable`]).
#[derive(Debug, Clone)]
pub struct FromIter<I, F = Abortable> {
    iter: I,
    _flow: PhantomData<F>,
}

/// Wraps `iter` as an abortable push range.
pub fn from_iter<I>(iter: I) -> FromIter<I::IntoIter, Abortable>
where
    I: IntoIterator,
    I::IntoIter: Clone,
{
    FromIter {
        iter: iter.into_iter(),
        _flow: PhantomData,
    }
}

/// Wraps `iter` as a push range that cannot stop early.
pub fn from_iter_non_abortable<I>(iter: I) -> FromIter<I::IntoIter, NonAbortable>
where
    I: IntoIterator,
    I::IntoIter: Clone,
{
    FromIter {
        iter: iter.into_iter(),
        _flow: PhantomData,
    }
}

impl<I, F> GeneratorRange for FromIter<I, F>
where
    I: Iterator + Clone,
    F: Flow,
{
    type Item<'a>
        = I::Item
    where
        Self: 'a;
    type Flow = F;

    fn generate<'a, G>(&'a self, mut sink: G) -> F::Signal
    where
        G: FnMut(Self::Item<'a>) -> F::Signal,
    {
        for item in self.iter.clone() {
            let signal = sink(item);
            if signal.is_break() {
                log::trace!("iterator generation stopped early");
                return signal;
            }
        }
        <F::Signal as Signal>::proceed()
    }
}

/// Convenience operations available on every push range.
pub trait GeneratorRangeExt: GeneratorRange {
    /// Calls `f` once per element. `f` may return `()` or, for abortable ranges,
    /// [`BreakOrContinue`]; the result of the whole generation is returned.
    fn for_each_item<'a, F, S>(&'a self, mut f: F) -> <Self::Flow as Flow>::Signal
    where
        F: FnMut(Self::Item<'a>) -> S,
        Self::Flow: Lift<S>,
    {
        self.generate(move |item| <Self::Flow as Lift<S>>::lift(f(item)))
    }

    /// Collects every element into a `Vec`.
    fn collect_items<'a>(&'a self) -> Vec<Self::Item<'a>> {
        let mut items = Vec::new();
        let _ = self.generate(|item| {
            items.push(item);
            <<Self::Flow as Flow>::Signal as Signal>::proceed()
        });
        items
    }

    fn count_items(&self) -> usize {
        let mut count = 0;
        let _ = self.generate(|_| {
            count += 1;
            <<Self::Flow as Flow>::Signal as Signal>::proceed()
        });
        count
    }

    /// Returns the first element, stopping the generation right after it.
    fn first_item<'a>(&'a self) -> Option<Self::Item<'a>>
    where
        Self: GeneratorRange<Flow = Abortable>,
    {
        let mut first = None;
        let _ = self.generate(|item| {
            first = Some(item);
            BreakOrContinue::Break
        });
        first
    }
}

impl<R: GeneratorRange + ?Sized> GeneratorRangeExt for R {}
