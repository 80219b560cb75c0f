//! The range adaptor: the reusable base every derived range is built on.
//!
//! A derived range is a plain struct that embeds an [`Adaptor`] (its stored base
//! range) and implements:
//!
//! - [`RangeAdaptor`]: the narrow accessor through which the shared machinery reaches
//!   the concrete type, plus the declared traversal;
//! - [`Apply`]: the per-element customization point of the push protocol. Every
//!   `Apply` type is a [`GeneratorRange`] whose flow is the flow of its base range:
//!   whether the derived range can stop early is discovered from the base, not
//!   declared again;
//! - optionally [`IndexAdaptor`], when the base range is a pull range. Every
//!   `IndexAdaptor` is an [`IndexRange`] forwarding to the base, exposing the demoted
//!   traversal, and gains the bidirectional, random-access and mutable-access
//!   capabilities only when both the demoted tag and the storage allow them.
//!
//! All dispatch is static; a chain of adaptors monomorphizes into a single loop.
//!
//! ```
//! use rangeweave::prelude::*;
//! use rangeweave::adaptor::{BaseItem, BaseSignal};
//! use rangeweave::{Adaptor, Apply, IndexAdaptor, RangeAdaptor};
//!
//! struct Identity<S: RangeStorage> {
//!     adaptor: Adaptor<S>,
//! }
//!
//! impl<S: RangeStorage> RangeAdaptor for Identity<S> {
//!     type Base = S::Range;
//!     type Storage = S;
//!     type DeclaredTraversal = UseDefault;
//!
//!     fn adaptor(&self) -> &Adaptor<S> {
//!         &self.adaptor
//!     }
//!
//!     fn adaptor_mut(&mut self) -> &mut Adaptor<S> {
//!         &mut self.adaptor
//!     }
//! }
//!
//! impl<S> Apply for Identity<S>
//! where
//!     S: RangeStorage,
//!     S::Range: GeneratorRange,
//! {
//!     type Item<'a>
//!         = <S::Range as GeneratorRange>::Item<'a>
//!     where
//!         Self: 'a;
//!
//!     fn apply<'a, F>(
//!         &'a self,
//!         sink: &mut F,
//!         item: BaseItem<'a, Self>,
//!     ) -> BaseSignal<Self>
//!     where
//!         F: FnMut(<Self as Apply>::Item<'a>) -> BaseSignal<Self>,
//!     {
//!         sink(item)
//!     }
//! }
//!
//! impl<S> IndexAdaptor for Identity<S>
//! where
//!     S: RangeStorage,
//!     S::Range: IndexRange + GeneratorRange,
//! {
//! }
//!
//! let base = vec![1, 2, 3, 4, 5];
//! let derived = Identity { adaptor: Adaptor::new(&base) };
//!
//! let pulled: Vec<i32> = derived.index_iter().copied().collect();
//! assert_eq!(pulled, vec![1, 2, 3, 4, 5]);
//!
//! let mut pushed = Vec::new();
//! let result = derived.for_each_item(|x| {
//!     pushed.push(*x);
//!     BreakOrContinue::break_if(*x == 3)
//! });
//! assert_eq!(pushed, vec![1, 2, 3]);
//! assert_eq!(result, BreakOrContinue::Break);
//! ```
//!
//! ## Compile-time guarantees
//!
//! Mutable element access needs both an exclusive borrow of the derived range and a
//! mutable storage. Through a shared reference it is refused:
//!
//! ```compile_fail
//! use rangeweave::prelude::*;
//! use rangeweave_testkit::adaptors::PassThrough;
//!
//! let mut base = vec![1, 2, 3];
//! let derived = PassThrough::<_, UseDefault>::new(&mut base);
//! let shared = &derived;
//! *IndexRangeMut::dereference_index_mut(shared, &0) = 10;
//! ```
//!
//! and over a shared-reference storage as well:
//!
//! ```compile_fail
//! use rangeweave::prelude::*;
//! use rangeweave_testkit::adaptors::PassThrough;
//!
//! let base = vec![1, 2, 3];
//! let mut derived = PassThrough::<_, UseDefault>::new(&base);
//! *IndexRangeMut::dereference_index_mut(&mut derived, &0) = 10;
//! ```
//!
//! A shared view never re-binds into an exclusive one:
//!
//! ```compile_fail
//! use rangeweave::Adaptor;
//!
//! let base = vec![1, 2, 3];
//! let shared = Adaptor::new(&base);
//! let exclusive: Adaptor<&mut Vec<i32>> = Adaptor::from_adaptor(&shared);
//! ```
//!
//! A non-abortable range accepts no callback asking for a stop:
//!
//! ```compile_fail
//! use rangeweave::generator::from_iter_non_abortable;
//! use rangeweave::prelude::*;
//!
//! from_iter_non_abortable(0..3).for_each_item(|_| BreakOrContinue::Break);
//! ```
//!
//! and a derived range that stops by itself has no push side over such a base:
//!
//! ```compile_fail
//! use rangeweave::generator::from_iter_non_abortable;
//! use rangeweave::prelude::*;
//! use rangeweave_testkit::adaptors::TakeN;
//!
//! let taken = TakeN::new(ByValue(from_iter_non_abortable(0..3)), 2);
//! taken.collect_items();
//! ```

use crate::{
    generator::GeneratorRange,
    index_range::{BidirectionalIndexRange, IndexRange, IndexRangeMut, RandomAccessIndexRange},
    signal::Flow,
    storage::{ByValue, ConstCompatible, Ownership, RangeStorage, RangeStorageMut},
    traversal::{AtLeastBidirectional, AtLeastRandomAccess, Demote, Demoted},
};

/// The stored base range of a derived range.
///
/// `S` is one of [`ByValue<R>`], `&R` or `&mut R`. `Default` is only available for
/// a default-constructible owned base range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Adaptor<S> {
    base: S,
}

impl<S: RangeStorage> Adaptor<S> {
    /// Stores `base` as-is.
    #[inline]
    pub fn new(base: S) -> Self {
        Adaptor { base }
    }

    /// Re-binds from another adaptor reached through a shared reference.
    pub fn from_adaptor<'s, T>(source: &'s Adaptor<T>) -> Self
    where
        S: ConstCompatible<&'s T>,
    {
        Adaptor {
            base: S::rebind(&source.base),
        }
    }

    /// Re-binds from another adaptor reached through an exclusive reference.
    pub fn from_adaptor_mut<'s, T>(source: &'s mut Adaptor<T>) -> Self
    where
        S: ConstCompatible<&'s mut T>,
    {
        Adaptor {
            base: S::rebind(&mut source.base),
        }
    }

    pub fn ownership(&self) -> Ownership {
        S::OWNERSHIP
    }

    #[inline]
    pub fn base_range(&self) -> &S::Range {
        self.base.get()
    }

    #[inline]
    pub fn base_range_mut(&mut self) -> &mut S::Range
    where
        S: RangeStorageMut,
    {
        self.base.get_mut()
    }

    /// Immutable re-view of the same base range.
    pub fn as_const(&self) -> Adaptor<&S::Range> {
        Adaptor {
            base: self.base.get(),
        }
    }

    /// Copying conversion: the result owns a clone of the base range.
    pub fn to_owned_base(&self) -> Adaptor<ByValue<S::Range>>
    where
        S::Range: Clone,
    {
        Adaptor {
            base: ByValue(self.base.get().clone()),
        }
    }

    /// Gives the storage back: the base range itself when owned, the reference otherwise.
    pub fn into_storage(self) -> S {
        self.base
    }
}

impl<R> Adaptor<ByValue<R>> {
    pub fn owned(base: R) -> Self {
        Adaptor { base: ByValue(base) }
    }

    pub fn into_base_range(self) -> R {
        self.base.0
    }
}

impl<'a, R> Adaptor<&'a mut R> {
    /// Gives up mutable access for the rest of the borrow.
    pub fn into_const(self) -> Adaptor<&'a R> {
        Adaptor { base: self.base }
    }
}

/// Implemented by every derived range: the access path from the shared machinery to
/// the concrete type.
pub trait RangeAdaptor {
    type Base;

    type Storage: RangeStorage<Range = Self::Base>;

    /// Traversal this range declares; [`UseDefault`](crate::traversal::UseDefault)
    /// exposes whatever the base supports.
    type DeclaredTraversal;

    fn adaptor(&self) -> &Adaptor<Self::Storage>;

    fn adaptor_mut(&mut self) -> &mut Adaptor<Self::Storage>;

    #[inline]
    fn base_range(&self) -> &Self::Base {
        self.adaptor().base_range()
    }

    #[inline]
    fn base_range_mut(&mut self) -> &mut Self::Base
    where
        Self::Storage: RangeStorageMut,
    {
        self.adaptor_mut().base_range_mut()
    }
}

/// Element the base range of the derived range `D` generates.
pub type BaseItem<'a, D> = <<D as RangeAdaptor>::Base as GeneratorRange>::Item<'a>;

/// Signal of the base range of the derived range `D`: [`BreakOrContinue`] when the
/// base is [`Abortable`], `()` when it is [`NonAbortable`].
///
/// [`BreakOrContinue`]: crate::signal::BreakOrContinue
/// [`Abortable`]: crate::signal::Abortable
/// [`NonAbortable`]: crate::signal::NonAbortable
pub type BaseSignal<D> =
    <<<D as RangeAdaptor>::Base as GeneratorRange>::Flow as Flow>::Signal;

/// The per-element customization point of the push protocol.
///
/// `apply` receives one element of the base range and the sink of the derived
/// range's consumer. It decides what, if anything, reaches the sink, and returns
/// the signal the base range acts on, in the base's own signal type:
///
/// - the sink's signal, unchanged, to keep early termination working end to end;
/// - [`Signal::proceed`](crate::signal::Signal::proceed) to skip an element;
/// - `BreakOrContinue::Break` to end the sequence on its own (take-n, take-while).
///   This only type-checks when the base range is abortable: an implementation that
///   stops by itself bounds its base with `GeneratorRange<Flow = Abortable>`, and a
///   non-abortable base then leaves the derived range without a push side.
///
/// [`begin_generation`](Apply::begin_generation) runs once before every generation
/// and resets whatever per-pass state `apply` keeps.
///
/// When `Item<'a>` does not mention `'a` (a transform producing values), spell the
/// sink bound as `F: FnMut(<Self as Apply>::Item<'a>) -> ...` rather than with the
/// concrete item type: otherwise `'a` is late-bound in the implementation while it
/// is early-bound in the trait, and the impl is rejected (E0195).
pub trait Apply: RangeAdaptor<Base: GeneratorRange> {
    /// Element delivered to the derived range's consumer.
    type Item<'a>
    where
        Self: 'a;

    #[inline]
    fn begin_generation(&self) {}

    fn apply<'a, F>(
        &'a self,
        sink: &mut F,
        item: BaseItem<'a, Self>,
    ) -> BaseSignal<Self>
    where
        F: FnMut(<Self as Apply>::Item<'a>) -> BaseSignal<Self>;
}

/// The adaptor functor handed to the base range: binds the derived range and the
/// consumer's sink, and routes each base element through [`Apply::apply`].
///
/// The functor returns the base range's signal type, so it is abortable exactly when
/// the base range is.
#[inline]
fn adaptor_fn<'a, D, F>(
    derived: &'a D,
    mut sink: F,
) -> impl FnMut(BaseItem<'a, D>) -> BaseSignal<D>
where
    D: Apply,
    F: FnMut(<D as Apply>::Item<'a>) -> BaseSignal<D>,
{
    move |item| derived.apply(&mut sink, item)
}

impl<D: Apply> GeneratorRange for D {
    type Item<'a>
        = <D as Apply>::Item<'a>
    where
        Self: 'a;
    type Flow = <D::Base as GeneratorRange>::Flow;

    #[inline]
    fn generate<'a, F>(&'a self, sink: F) -> <Self::Flow as Flow>::Signal
    where
        F: FnMut(Self::Item<'a>) -> <Self::Flow as Flow>::Signal,
    {
        self.begin_generation();
        self.base_range().generate(adaptor_fn(self, sink))
    }
}

type IndexOf<R> = <R as IndexRange>::Index;

/// Pull-protocol forwarding hooks.
///
/// Every hook forwards to the base range by default; a derived range that changes
/// the logical sequence overrides the hooks it needs (typically `begin_index` and
/// `increment_index`) and keeps the rest. The [`IndexRange`] family of traits is
/// implemented for every `IndexAdaptor` on top of these hooks.
///
/// Usually implemented through its path (`impl rangeweave::IndexAdaptor for ...`):
/// the hook names match the [`IndexRange`] methods they back.
pub trait IndexAdaptor: RangeAdaptor<Base: IndexRange> {
    #[inline]
    fn begin_index(&self) -> IndexOf<Self::Base> {
        IndexRange::begin_index(self.base_range())
    }

    #[inline]
    fn end_index(&self) -> IndexOf<Self::Base> {
        IndexRange::end_index(self.base_range())
    }

    #[inline]
    fn at_end_index(&self, idx: &IndexOf<Self::Base>) -> bool {
        IndexRange::at_end_index(self.base_range(), idx)
    }

    #[inline]
    fn equal_index(&self, lhs: &IndexOf<Self::Base>, rhs: &IndexOf<Self::Base>) -> bool {
        IndexRange::equal_index(self.base_range(), lhs, rhs)
    }

    #[inline]
    fn increment_index(&self, idx: &mut IndexOf<Self::Base>) {
        IndexRange::increment_index(self.base_range(), idx)
    }

    #[inline]
    fn dereference_index<'a>(
        &'a self,
        idx: &IndexOf<Self::Base>,
    ) -> <Self::Base as IndexRange>::Ref<'a> {
        IndexRange::dereference_index(self.base_range(), idx)
    }

    #[inline]
    fn dereference_index_mut<'a>(
        &'a mut self,
        idx: &IndexOf<Self::Base>,
    ) -> <Self::Base as IndexRangeMut>::RefMut<'a>
    where
        Self::Base: IndexRangeMut,
        Self::Storage: RangeStorageMut,
    {
        IndexRangeMut::dereference_index_mut(self.base_range_mut(), idx)
    }

    #[inline]
    fn decrement_index(&self, idx: &mut IndexOf<Self::Base>)
    where
        Self::Base: BidirectionalIndexRange,
    {
        BidirectionalIndexRange::decrement_index(self.base_range(), idx)
    }

    #[inline]
    fn advance_index(&self, idx: &mut IndexOf<Self::Base>, distance: isize)
    where
        Self::Base: RandomAccessIndexRange,
    {
        RandomAccessIndexRange::advance_index(self.base_range(), idx, distance)
    }

    #[inline]
    fn distance_to_index(&self, lhs: &IndexOf<Self::Base>, rhs: &IndexOf<Self::Base>) -> isize
    where
        Self::Base: RandomAccessIndexRange,
    {
        RandomAccessIndexRange::distance_to_index(self.base_range(), lhs, rhs)
    }

    #[inline]
    fn middle_point(&self, begin: &mut IndexOf<Self::Base>, end: &IndexOf<Self::Base>)
    where
        Self::Base: RandomAccessIndexRange,
    {
        RandomAccessIndexRange::middle_point(self.base_range(), begin, end)
    }
}

/// Traversal exposed by the derived range `D`.
pub type AdaptedTraversal<D> = Demoted<
    <D as RangeAdaptor>::DeclaredTraversal,
    <<D as RangeAdaptor>::Base as IndexRange>::Traversal,
>;

impl<D> IndexRange for D
where
    D: IndexAdaptor,
    <D as RangeAdaptor>::DeclaredTraversal: Demote<<D::Base as IndexRange>::Traversal>,
{
    type Index = IndexOf<D::Base>;
    type Traversal = AdaptedTraversal<D>;
    type Ref<'a>
        = <D::Base as IndexRange>::Ref<'a>
    where
        Self: 'a;

    #[inline]
    fn begin_index(&self) -> Self::Index {
        IndexAdaptor::begin_index(self)
    }

    #[inline]
    fn end_index(&self) -> Self::Index {
        IndexAdaptor::end_index(self)
    }

    #[inline]
    fn at_end_index(&self, idx: &Self::Index) -> bool {
        IndexAdaptor::at_end_index(self, idx)
    }

    #[inline]
    fn equal_index(&self, lhs: &Self::Index, rhs: &Self::Index) -> bool {
        IndexAdaptor::equal_index(self, lhs, rhs)
    }

    #[inline]
    fn increment_index(&self, idx: &mut Self::Index) {
        IndexAdaptor::increment_index(self, idx)
    }

    #[inline]
    fn dereference_index<'a>(&'a self, idx: &Self::Index) -> Self::Ref<'a> {
        IndexAdaptor::dereference_index(self, idx)
    }
}

impl<D> BidirectionalIndexRange for D
where
    D: IndexAdaptor,
    D::Base: BidirectionalIndexRange,
    <D as RangeAdaptor>::DeclaredTraversal: Demote<<D::Base as IndexRange>::Traversal>,
    AdaptedTraversal<D>: AtLeastBidirectional,
{
    #[inline]
    fn decrement_index(&self, idx: &mut Self::Index) {
        IndexAdaptor::decrement_index(self, idx)
    }
}

impl<D> RandomAccessIndexRange for D
where
    D: IndexAdaptor,
    D::Base: RandomAccessIndexRange,
    <D as RangeAdaptor>::DeclaredTraversal: Demote<<D::Base as IndexRange>::Traversal>,
    AdaptedTraversal<D>: AtLeastRandomAccess,
{
    #[inline]
    fn advance_index(&self, idx: &mut Self::Index, distance: isize) {
        IndexAdaptor::advance_index(self, idx, distance)
    }

    #[inline]
    fn distance_to_index(&self, lhs: &Self::Index, rhs: &Self::Index) -> isize {
        IndexAdaptor::distance_to_index(self, lhs, rhs)
    }

    #[inline]
    fn middle_point(&self, begin: &mut Self::Index, end: &Self::Index) {
        IndexAdaptor::middle_point(self, begin, end)
    }
}

impl<D> IndexRangeMut for D
where
    D: IndexAdaptor,
    D::Base: IndexRangeMut,
    D::Storage: RangeStorageMut,
    <D as RangeAdaptor>::DeclaredTraversal: Demote<<D::Base as IndexRange>::Traversal>,
{
    type RefMut<'a>
        = <D::Base as IndexRangeMut>::RefMut<'a>
    where
        Self: 'a;

    #[inline]
    fn dereference_index_mut<'a>(&'a mut self, idx: &Self::Index) -> Self::RefMut<'a> {
        IndexAdaptor::dereference_index_mut(self, idx)
    }
}
