//! Derived ranges used throughout the tests.
//!
//! - [`PassThrough`] forwards everything and declares any traversal, which makes it
//!   the reference for forwarding fidelity and traversal demotion.
//! - [`EvenFilter`] changes the logical sequence on both protocols and is
//!   forward-only.
//! - [`Scaled`] changes the element type and is push-only.
//! - [`TakeN`] ends the sequence by itself after a fixed number of elements, which
//!   needs an abortable base.

use std::{cell::Cell, marker::PhantomData};

use rangeweave::{
    Abortable, Adaptor, Apply, BreakOrContinue, GeneratorRange, IndexRange, RangeAdaptor,
    adaptor::{BaseItem, BaseSignal},
    signal::Signal,
    storage::RangeStorage,
    traversal::{Forward, UseDefault},
};

/// Forwards every element and every pull operation to the base range.
pub struct PassThrough<S: RangeStorage, T = UseDefault> {
    adaptor: Adaptor<S>,
    _traversal: PhantomData<T>,
}

impl<S: RangeStorage, T> PassThrough<S, T> {
    pub fn new(base: S) -> Self {
        PassThrough {
            adaptor: Adaptor::new(base),
            _traversal: PhantomData,
        }
    }

    pub fn from_adaptor(adaptor: Adaptor<S>) -> Self {
        PassThrough {
            adaptor,
            _traversal: PhantomData,
        }
    }

    pub fn into_adaptor(self) -> Adaptor<S> {
        self.adaptor
    }
}

impl<S: RangeStorage, T> RangeAdaptor for PassThrough<S, T> {
    type Base = S::Range;
    type Storage = S;
    type DeclaredTraversal = T;

    fn adaptor(&self) -> &Adaptor<S> {
        &self.adaptor
    }

    fn adaptor_mut(&mut self) -> &mut Adaptor<S> {
        &mut self.adaptor
    }
}

impl<S, T> Apply for PassThrough<S, T>
where
    S: RangeStorage,
    S::Range: GeneratorRange,
{
    type Item<'a>
        = <S::Range as GeneratorRange>::Item<'a>
    where
        Self: 'a;

    #[inline]
    fn apply<'a, F>(&'a self, sink: &mut F, item: BaseItem<'a, Self>) -> BaseSignal<Self>
    where
        F: FnMut(<Self as Apply>::Item<'a>) -> BaseSignal<Self>,
    {
        sink(item)
    }
}

impl<S, T> rangeweave::IndexAdaptor for PassThrough<S, T>
where
    S: RangeStorage,
    S::Range: IndexRange,
{
}

/// Keeps the even values of a `Vec<i64>`.
pub struct EvenFilter<S: RangeStorage<Range = Vec<i64>>> {
    adaptor: Adaptor<S>,
}

impl<S: RangeStorage<Range = Vec<i64>>> EvenFilter<S> {
    pub fn new(base: S) -> Self {
        EvenFilter {
            adaptor: Adaptor::new(base),
        }
    }

    /// First position at or after `idx` holding an even value.
    fn next_even(&self, mut idx: usize) -> usize {
        let values = self.adaptor.base_range();
        while idx < values.len() && values[idx] % 2 != 0 {
            idx += 1;
        }
        idx
    }
}

impl<S: RangeStorage<Range = Vec<i64>>> RangeAdaptor for EvenFilter<S> {
    type Base = Vec<i64>;
    type Storage = S;
    type DeclaredTraversal = Forward;

    fn adaptor(&self) -> &Adaptor<S> {
        &self.adaptor
    }

    fn adaptor_mut(&mut self) -> &mut Adaptor<S> {
        &mut self.adaptor
    }
}

impl<S: RangeStorage<Range = Vec<i64>>> Apply for EvenFilter<S> {
    type Item<'a>
        = &'a i64
    where
        Self: 'a;

    #[inline]
    fn apply<'a, F>(&'a self, sink: &mut F, item: &'a i64) -> BaseSignal<Self>
    where
        F: FnMut(<Self as Apply>::Item<'a>) -> BaseSignal<Self>,
    {
        if item % 2 == 0 { sink(item) } else { Signal::proceed() }
    }
}

impl<S: RangeStorage<Range = Vec<i64>>> rangeweave::IndexAdaptor for EvenFilter<S> {
    fn begin_index(&self) -> usize {
        self.next_even(0)
    }

    fn increment_index(&self, idx: &mut usize) {
        *idx = self.next_even(*idx + 1);
    }
}

/// Multiplies every value of a `Vec<i64>` by a factor.
pub struct Scaled<S: RangeStorage<Range = Vec<i64>>> {
    adaptor: Adaptor<S>,
    factor: i64,
}

impl<S: RangeStorage<Range = Vec<i64>>> Scaled<S> {
    pub fn new(base: S, factor: i64) -> Self {
        Scaled {
            adaptor: Adaptor::new(base),
            factor,
        }
    }
}

impl<S: RangeStorage<Range = Vec<i64>>> RangeAdaptor for Scaled<S> {
    type Base = Vec<i64>;
    type Storage = S;
    type DeclaredTraversal = UseDefault;

    fn adaptor(&self) -> &Adaptor<S> {
        &self.adaptor
    }

    fn adaptor_mut(&mut self) -> &mut Adaptor<S> {
        &mut self.adaptor
    }
}

impl<S: RangeStorage<Range = Vec<i64>>> Apply for Scaled<S> {
    type Item<'a>
        = i64
    where
        Self: 'a;

    #[inline]
    fn apply<'a, F>(&'a self, sink: &mut F, item: &'a i64) -> BaseSignal<Self>
    where
        F: FnMut(<Self as Apply>::Item<'a>) -> BaseSignal<Self>,
    {
        sink(*item * self.factor)
    }
}

/// Delivers at most `limit` elements of an abortable base, then stops it.
///
/// Push-only. The count restarts with every generation.
pub struct TakeN<S: RangeStorage> {
    adaptor: Adaptor<S>,
    limit: usize,
    taken: Cell<usize>,
}

impl<S: RangeStorage> TakeN<S> {
    pub fn new(base: S, limit: usize) -> Self {
        TakeN {
            adaptor: Adaptor::new(base),
            limit,
            taken: Cell::new(0),
        }
    }
}

impl<S: RangeStorage> RangeAdaptor for TakeN<S> {
    type Base = S::Range;
    type Storage = S;
    type DeclaredTraversal = UseDefault;

    fn adaptor(&self) -> &Adaptor<S> {
        &self.adaptor
    }

    fn adaptor_mut(&mut self) -> &mut Adaptor<S> {
        &mut self.adaptor
    }
}

impl<S> Apply for TakeN<S>
where
    S: RangeStorage,
    S::Range: GeneratorRange<Flow = Abortable>,
{
    type Item<'a>
        = <S::Range as GeneratorRange>::Item<'a>
    where
        Self: 'a;

    fn begin_generation(&self) {
        self.taken.set(0);
    }

    fn apply<'a, F>(&'a self, sink: &mut F, item: BaseItem<'a, Self>) -> BaseSignal<Self>
    where
        F: FnMut(<Self as Apply>::Item<'a>) -> BaseSignal<Self>,
    {
        let taken = self.taken.get();
        if taken >= self.limit {
            return BreakOrContinue::Break;
        }
        self.taken.set(taken + 1);
        match sink(item) {
            BreakOrContinue::Continue if taken + 1 < self.limit => BreakOrContinue::Continue,
            _ => BreakOrContinue::Break,
        }
    }
}
