//! The pull (index) protocol.
//!
//! A pull range exposes opaque positions ("indices") and lets the consumer drive
//! iteration: `begin_index`, `end_index`, `at_end_index`, `equal_index`,
//! `increment_index` and `dereference_index`. Bidirectional and random-access
//! capabilities are separate traits, so a consumer that needs them states so in its
//! bounds and a range that lacks them fails to compile there.
//!
//! Moving an index past the end or dereferencing the end index is outside the
//! protocol; the implementations in this module panic on out-of-bounds access the way
//! slice indexing does, and add no other checks.
//!
//! This module also turns the common containers into pull ranges: `Vec<T>`,
//! borrowed slices ([`SliceRange`], [`SliceRangeMut`]) and the integer counting ranges
//! (`std::ops::Range<usize>`, `Range<u64>`, ...). All of them are random access.

use std::ops::Range;

use rangeweave_common::{Result, verify_arg};

use crate::traversal::{RandomAccess, TraversalTag};

/// Forward-traversal pull protocol.
pub trait IndexRange {
    /// Opaque position within the range.
    type Index: Clone;

    /// Strongest traversal the range supports.
    type Traversal: TraversalTag;

    /// Immutable access to an element.
    type Ref<'a>
    where
        Self: 'a;

    fn begin_index(&self) -> Self::Index;

    fn end_index(&self) -> Self::Index;

    /// Whether `idx` is past the last element. May be cheaper than comparing with
    /// `end_index()`.
    fn at_end_index(&self, idx: &Self::Index) -> bool;

    fn equal_index(&self, lhs: &Self::Index, rhs: &Self::Index) -> bool;

    fn increment_index(&self, idx: &mut Self::Index);

    fn dereference_index<'a>(&'a self, idx: &Self::Index) -> Self::Ref<'a>;
}

pub trait BidirectionalIndexRange: IndexRange {
    fn decrement_index(&self, idx: &mut Self::Index);
}

pub trait RandomAccessIndexRange: BidirectionalIndexRange {
    fn advance_index(&self, idx: &mut Self::Index, distance: isize);

    fn distance_to_index(&self, lhs: &Self::Index, rhs: &Self::Index) -> isize;

    /// Moves `begin` halfway towards `end`.
    fn middle_point(&self, begin: &mut Self::Index, end: &Self::Index);
}

/// Mutable element access.
///
/// Only reachable through `&mut self`: a shared handle to a range never yields
/// mutable elements, whatever the range itself refers to.
pub trait IndexRangeMut: IndexRange {
    type RefMut<'a>
    where
        Self: 'a;

    fn dereference_index_mut<'a>(&'a mut self, idx: &Self::Index) -> Self::RefMut<'a>;
}

/// A borrowed slice presented as a random-access pull range.
#[derive(Debug)]
pub struct SliceRange<'s, T> {
    slice: &'s [T],
}

impl<T> Clone for SliceRange<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for SliceRange<'_, T> {}

impl<'s, T> SliceRange<'s, T> {
    pub fn new(slice: &'s [T]) -> Self {
        SliceRange { slice }
    }

    pub fn as_slice(&self) -> &'s [T] {
        self.slice
    }

    /// Returns the sub-range covering `range` of this one.
    pub fn subrange(&self, range: Range<usize>) -> Result<SliceRange<'s, T>> {
        verify_arg!(range, range.start <= range.end);
        verify_arg!(range, range.end <= self.slice.len());
        Ok(SliceRange {
            slice: &self.slice[range],
        })
    }
}

impl<'s, T> From<&'s [T]> for SliceRange<'s, T> {
    fn from(slice: &'s [T]) -> Self {
        SliceRange::new(slice)
    }
}

/// A mutably borrowed slice presented as a random-access pull range.
#[derive(Debug)]
pub struct SliceRangeMut<'s, T> {
    slice: &'s mut [T],
}

impl<'s, T> SliceRangeMut<'s, T> {
    pub fn new(slice: &'s mut [T]) -> Self {
        SliceRangeMut { slice }
    }

    pub fn as_slice(&self) -> &[T] {
        self.slice
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        self.slice
    }
}

impl<'s, T> From<&'s mut [T]> for SliceRangeMut<'s, T> {
    fn from(slice: &'s mut [T]) -> Self {
        SliceRangeMut::new(slice)
    }
}

/// Implements the random-access pull protocol over anything with `as_slice()`.
macro_rules! slice_index_range {
    ([$($generics:tt)*] $ty:ty) => {
        impl<$($generics)*> IndexRange for $ty {
            type Index = usize;
            type Traversal = RandomAccess;
            type Ref<'a>
                = &'a T
            where
                Self: 'a;

            #[inline]
            fn begin_index(&self) -> usize {
                0
            }

            #[inline]
            fn end_index(&self) -> usize {
                self.as_slice().len()
            }

            #[inline]
            fn at_end_index(&self, idx: &usize) -> bool {
                *idx == self.as_slice().len()
            }

            #[inline]
            fn equal_index(&self, lhs: &usize, rhs: &usize) -> bool {
                lhs == rhs
            }

            #[inline]
            fn increment_index(&self, idx: &mut usize) {
                *idx += 1;
            }

            #[inline]
            fn dereference_index<'a>(&'a self, idx: &usize) -> &'a T {
                &self.as_slice()[*idx]
            }
        }

        impl<$($generics)*> BidirectionalIndexRange for $ty {
            #[inline]
            fn decrement_index(&self, idx: &mut usize) {
                *idx -= 1;
            }
        }

        impl<$($generics)*> RandomAccessIndexRange for $ty {
            #[inline]
            fn advance_index(&self, idx: &mut usize, distance: isize) {
                *idx = idx.wrapping_add_signed(distance);
            }

            #[inline]
            fn distance_to_index(&self, lhs: &usize, rhs: &usize) -> isize {
                (*rhs as isize) - (*lhs as isize)
            }

            #[inline]
            fn middle_point(&self, begin: &mut usize, end: &usize) {
                *begin += (*end - *begin) / 2;
            }
        }
    };
}

slice_index_range!([T] Vec<T>);
slice_index_range!(['s, T] SliceRange<'s, T>);
slice_index_range!(['s, T] SliceRangeMut<'s, T>);

impl<T> IndexRangeMut for Vec<T> {
    type RefMut<'a>
        = &'a mut T
    where
        Self: 'a;

    #[inline]
    fn dereference_index_mut<'a>(&'a mut self, idx: &usize) -> &'a mut T {
        &mut self[*idx]
    }
}

impl<'s, T> IndexRangeMut for SliceRangeMut<'s, T> {
    type RefMut<'a>
        = &'a mut T
    where
        Self: 'a;

    #[inline]
    fn dereference_index_mut<'a>(&'a mut self, idx: &usize) -> &'a mut T {
        &mut self.slice[*idx]
    }
}

/// Counting ranges: the index is the value. A reversed range (`start > end`) is empty
/// and its end index is `start`, as for `Range`'s own iterator.
macro_rules! counting_index_range {
    ($($num:ty),*) => {
        $(
            impl IndexRange for Range<$num> {
                type Index = $num;
                type Traversal = RandomAccess;
                type Ref<'a>
                    = $num
                where
                    Self: 'a;

                #[inline]
                fn begin_index(&self) -> $num {
                    self.start
                }

                #[inline]
                fn end_index(&self) -> $num {
                    self.end.max(self.start)
                }

                #[inline]
                fn at_end_index(&self, idx: &$num) -> bool {
                    *idx >= self.end
                }

                #[inline]
                fn equal_index(&self, lhs: &$num, rhs: &$num) -> bool {
                    lhs == rhs
                }

                #[inline]
                fn increment_index(&self, idx: &mut $num) {
                    *idx += 1;
                }

                #[inline]
                fn dereference_index<'a>(&'a self, idx: &$num) -> $num {
                    *idx
                }
            }

            impl BidirectionalIndexRange for Range<$num> {
                #[inline]
                fn decrement_index(&self, idx: &mut $num) {
                    *idx -= 1;
                }
            }

            impl RandomAccessIndexRange for Range<$num> {
                #[inline]
                fn advance_index(&self, idx: &mut $num, distance: isize) {
                    *idx = (*idx as i128 + distance as i128) as $num;
                }

                #[inline]
                fn distance_to_index(&self, lhs: &$num, rhs: &$num) -> isize {
                    (*rhs as i128 - *lhs as i128) as isize
                }

                #[inline]
                fn middle_point(&self, begin: &mut $num, end: &$num) {
                    let (lo, hi) = (*begin as i128, *end as i128);
                    *begin = (lo + (hi - lo) / 2) as $num;
                }
            }
        )*
    };
}

counting_index_range!(usize, u32, u64, i32, i64);

#[cfg(test)]
mod tests {
    use rangeweave_common::error::ErrorKind;

    use super::*;

    fn collect_by_index<R: IndexRange>(range: &R) -> Vec<R::Ref<'_>> {
        let mut out = Vec::new();
        let mut idx = range.begin_index();
        while !range.at_end_index(&idx) {
            out.push(range.dereference_index(&idx));
            range.increment_index(&mut idx);
        }
        out
    }

    #[test]
    fn test_vec_pull_protocol() {
        let v = vec![1, 2, 3, 4, 5];
        assert_eq!(collect_by_index(&v), vec![&1, &2, &3, &4, &5]);
        assert!(v.equal_index(&v.end_index(), &5));

        let mut idx = v.end_index();
        v.decrement_index(&mut idx);
        assert_eq!(*v.dereference_index(&idx), 5);
        v.advance_index(&mut idx, -3);
        assert_eq!(*v.dereference_index(&idx), 2);
        assert_eq!(v.distance_to_index(&idx, &v.end_index()), 4);
    }

    #[test]
    fn test_middle_point() {
        let v = vec![0u8; 10];
        let mut begin = 2;
        v.middle_point(&mut begin, &10);
        assert_eq!(begin, 6);

        let r = 10u64..20;
        let mut begin = r.begin_index();
        r.middle_point(&mut begin, &r.end_index());
        assert_eq!(begin, 15);
    }

    #[test]
    fn test_vec_mutable_access() {
        let mut v = vec![1, 2, 3];
        *v.dereference_index_mut(&1) = 20;
        assert_eq!(v, vec![1, 20, 3]);
    }

    #[test]
    fn test_counting_range() {
        let r = -2i64..3;
        assert_eq!(collect_by_index(&r), vec![-2, -1, 0, 1, 2]);
        let mut idx = r.begin_index();
        r.advance_index(&mut idx, 4);
        assert_eq!(idx, 2);
        assert_eq!(r.distance_to_index(&r.begin_index(), &r.end_index()), 5);
        assert!(collect_by_index(&(7usize..7)).is_empty());
    }

    #[test]
    fn test_reversed_counting_range_is_empty() {
        let r = 5i32..2;
        assert!(r.at_end_index(&r.begin_index()));
        assert!(collect_by_index(&r).is_empty());
        assert_eq!(r.end_index(), 5);
        assert_eq!(r.distance_to_index(&r.begin_index(), &r.end_index()), 0);

        let r = 9u64..0;
        assert!(collect_by_index(&r).is_empty());
    }

    #[test]
    fn test_middle_point_full_width() {
        let r = i32::MIN..i32::MAX;
        let mut begin = r.begin_index();
        r.middle_point(&mut begin, &r.end_index());
        assert_eq!(begin, -1);

        let r = 0u64..u64::MAX;
        let mut begin = r.begin_index();
        r.middle_point(&mut begin, &r.end_index());
        assert_eq!(begin, u64::MAX / 2);
    }

    #[test]
    fn test_slice_range_subrange() {
        let data = [10, 20, 30, 40, 50];
        let range = SliceRange::new(&data[..]);
        let sub = range.subrange(1..4).unwrap();
        assert_eq!(collect_by_index(&sub), vec![&20, &30, &40]);
        assert!(range.subrange(5..5).unwrap().as_slice().is_empty());

        let err = range.subrange(2..6).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
        #[allow(clippy::reversed_empty_ranges)]
        let err = range.subrange(3..1).unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::InvalidArgument { .. }));
    }

    #[test]
    fn test_slice_range_mut() {
        let mut data = [1, 2, 3];
        let mut range = SliceRangeMut::new(&mut data[..]);
        let end = range.end_index();
        let mut idx = range.begin_index();
        while !range.equal_index(&idx, &end) {
            *range.dereference_index_mut(&idx) *= 10;
            range.increment_index(&mut idx);
        }
        assert_eq!(range.as_slice(), &[10, 20, 30]);
        range.as_mut_slice()[0] = 0;
        assert_eq!(data, [0, 20, 30]);
    }
}
