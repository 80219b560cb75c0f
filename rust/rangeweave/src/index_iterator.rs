//! Iterator objects synthesized on top of the pull protocol.
//!
//! [`Cursor`] and [`CursorMut`] are positions bound to a range; they differ only in the
//! access they grant to the element under them. [`Iter`] adapts a pair of positions to
//! a Rust [`Iterator`], double-ended when the range is bidirectional.
//!
//! The capabilities of all three follow the capabilities of the range: `move_prev`
//! needs a [`BidirectionalIndexRange`], `advance` and `distance_to` need a
//! [`RandomAccessIndexRange`]. A derived range exposes only its demoted traversal, so
//! cursors over it are demoted as well.

use std::{fmt, iter::FusedIterator};

use crate::index_range::{
    BidirectionalIndexRange, IndexRange, IndexRangeMut, RandomAccessIndexRange,
};

/// Immutable position within a pull range.
pub struct Cursor<'a, R: IndexRange> {
    range: &'a R,
    index: R::Index,
}

impl<'a, R: IndexRange> Cursor<'a, R> {
    pub fn new(range: &'a R, index: R::Index) -> Self {
        Cursor { range, index }
    }

    pub fn range(&self) -> &'a R {
        self.range
    }

    pub fn index(&self) -> &R::Index {
        &self.index
    }

    pub fn into_index(self) -> R::Index {
        self.index
    }

    pub fn is_end(&self) -> bool {
        self.range.at_end_index(&self.index)
    }

    /// The element under the cursor. The cursor must not be at the end.
    #[inline]
    pub fn get(&self) -> R::Ref<'a> {
        self.range.dereference_index(&self.index)
    }

    #[inline]
    pub fn move_next(&mut self) {
        self.range.increment_index(&mut self.index);
    }
}

impl<R: BidirectionalIndexRange> Cursor<'_, R> {
    #[inline]
    pub fn move_prev(&mut self) {
        self.range.decrement_index(&mut self.index);
    }
}

impl<R: RandomAccessIndexRange> Cursor<'_, R> {
    #[inline]
    pub fn advance(&mut self, distance: isize) {
        self.range.advance_index(&mut self.index, distance);
    }

    /// Number of steps from `self` to `other`.
    pub fn distance_to(&self, other: &Self) -> isize {
        debug_assert!(std::ptr::eq(self.range, other.range));
        self.range.distance_to_index(&self.index, &other.index)
    }

    /// The cursor halfway between `self` and `end`.
    pub fn middle(&self, end: &Self) -> Self {
        let mut index = self.index.clone();
        self.range.middle_point(&mut index, &end.index);
        Cursor::new(self.range, index)
    }
}

impl<R: IndexRange> Clone for Cursor<'_, R> {
    fn clone(&self) -> Self {
        Cursor {
            range: self.range,
            index: self.index.clone(),
        }
    }
}

impl<R: IndexRange> PartialEq for Cursor<'_, R> {
    fn eq(&self, other: &Self) -> bool {
        debug_assert!(std::ptr::eq(self.range, other.range));
        self.range.equal_index(&self.index, &other.index)
    }
}

impl<R> fmt::Debug for Cursor<'_, R>
where
    R: IndexRange,
    R::Index: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cursor").field("index", &self.index).finish()
    }
}

/// Mutable position within a pull range.
///
/// Holds the range exclusively; element references borrow from the cursor, so at
/// most one of them is alive at a time.
pub struct CursorMut<'a, R: IndexRangeMut> {
    range: &'a mut R,
    index: R::Index,
}

impl<'a, R: IndexRangeMut> CursorMut<'a, R> {
    pub fn new(range: &'a mut R, index: R::Index) -> Self {
        CursorMut { range, index }
    }

    pub fn index(&self) -> &R::Index {
        &self.index
    }

    pub fn into_index(self) -> R::Index {
        self.index
    }

    pub fn is_end(&self) -> bool {
        self.range.at_end_index(&self.index)
    }

    #[inline]
    pub fn get(&self) -> R::Ref<'_> {
        self.range.dereference_index(&self.index)
    }

    #[inline]
    pub fn get_mut(&mut self) -> R::RefMut<'_> {
        self.range.dereference_index_mut(&self.index)
    }

    #[inline]
    pub fn move_next(&mut self) {
        self.range.increment_index(&mut self.index);
    }

    /// Downgrades to an immutable cursor at the same position.
    pub fn into_const(self) -> Cursor<'a, R> {
        Cursor::new(self.range, self.index)
    }
}

impl<R: IndexRangeMut + BidirectionalIndexRange> CursorMut<'_, R> {
    #[inline]
    pub fn move_prev(&mut self) {
        self.range.decrement_index(&mut self.index);
    }
}

impl<R: IndexRangeMut + RandomAccessIndexRange> CursorMut<'_, R> {
    #[inline]
    pub fn advance(&mut self, distance: isize) {
        self.range.advance_index(&mut self.index, distance);
    }
}

impl<R> fmt::Debug for CursorMut<'_, R>
where
    R: IndexRangeMut,
    R::Index: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CursorMut")
            .field("index", &self.index)
            .finish()
    }
}

/// Iterator over the elements of a pull range.
pub struct Iter<'a, R: IndexRange> {
    range: &'a R,
    front: R::Index,
    /// Materialized lazily: forward iteration only needs `at_end_index`.
    back: Option<R::Index>,
}

impl<'a, R: IndexRange> Iter<'a, R> {
    pub fn new(range: &'a R) -> Self {
        Iter {
            range,
            front: range.begin_index(),
            back: None,
        }
    }

    /// Iterates `[begin, end)`.
    pub fn between(begin: Cursor<'a, R>, end: Cursor<'a, R>) -> Self {
        debug_assert!(std::ptr::eq(begin.range, end.range));
        Iter {
            range: begin.range,
            front: begin.index,
            back: Some(end.index),
        }
    }

    fn is_done(&self) -> bool {
        match &self.back {
            Some(back) => self.range.equal_index(&self.front, back),
            None => self.range.at_end_index(&self.front),
        }
    }
}

impl<'a, R: IndexRange> Iterator for Iter<'a, R> {
    type Item = R::Ref<'a>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.is_done() {
            return None;
        }
        let item = self.range.dereference_index(&self.front);
        self.range.increment_index(&mut self.front);
        Some(item)
    }
}

impl<R: BidirectionalIndexRange> DoubleEndedIterator for Iter<'_, R> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        let range = self.range;
        let back = self.back.get_or_insert_with(|| range.end_index());
        if range.equal_index(&self.front, back) {
            return None;
        }
        range.decrement_index(back);
        Some(range.dereference_index(back))
    }
}

impl<R: IndexRange> FusedIterator for Iter<'_, R> {}

impl<R: IndexRange> Clone for Iter<'_, R> {
    fn clone(&self) -> Self {
        Iter {
            range: self.range,
            front: self.front.clone(),
            back: self.back.clone(),
        }
    }
}

/// Iterator-style access available on every pull range.
pub trait IndexRangeExt: IndexRange + Sized {
    fn make_cursor(&self, idx: Self::Index) -> Cursor<'_, Self> {
        Cursor::new(self, idx)
    }

    fn begin(&self) -> Cursor<'_, Self> {
        Cursor::new(self, self.begin_index())
    }

    fn end(&self) -> Cursor<'_, Self> {
        Cursor::new(self, self.end_index())
    }

    fn make_cursor_mut(&mut self, idx: Self::Index) -> CursorMut<'_, Self>
    where
        Self: IndexRangeMut,
    {
        CursorMut::new(self, idx)
    }

    fn begin_mut(&mut self) -> CursorMut<'_, Self>
    where
        Self: IndexRangeMut,
    {
        let idx = self.begin_index();
        CursorMut::new(self, idx)
    }

    fn index_iter(&self) -> Iter<'_, Self> {
        Iter::new(self)
    }

    /// Asks the range whether its begin index is already at the end, without
    /// materializing the end index.
    fn is_empty(&self) -> bool {
        self.at_end_index(&self.begin_index())
    }

    fn size(&self) -> usize
    where
        Self: RandomAccessIndexRange,
    {
        self.distance_to_index(&self.begin_index(), &self.end_index()) as usize
    }

    fn front(&self) -> Option<Self::Ref<'_>> {
        let idx = self.begin_index();
        if self.at_end_index(&idx) {
            None
        } else {
            Some(self.dereference_index(&idx))
        }
    }
}

impl<R: IndexRange> IndexRangeExt for R {}

#[cfg(test)]
mod tests {
    use crate::index_range::SliceRange;

    use super::*;

    #[test]
    fn test_cursor_walk() {
        let v = vec![1, 2, 3, 4, 5];
        let mut cursor = v.begin();
        assert_eq!(*cursor.get(), 1);
        cursor.move_next();
        cursor.advance(2);
        assert_eq!(*cursor.get(), 4);
        cursor.move_prev();
        assert_eq!(*cursor.get(), 3);
        assert_eq!(cursor.distance_to(&v.end()), 3);

        let mut end = v.end();
        assert!(end.is_end());
        end.move_prev();
        assert_eq!(*end.get(), 5);
        assert_eq!(v.begin().middle(&v.end()).into_index(), 2);
    }

    #[test]
    fn test_cursor_equality() {
        let v = vec![7, 8];
        let mut cursor = v.begin();
        assert_ne!(cursor, v.end());
        cursor.move_next();
        cursor.move_next();
        assert_eq!(cursor, v.end());
        assert_eq!(v.make_cursor(1).index(), &1);
    }

    #[test]
    fn test_iter_both_ends() {
        let v = vec![1, 2, 3, 4];
        let mut it = v.index_iter();
        assert_eq!(it.next(), Some(&1));
        assert_eq!(it.next_back(), Some(&4));
        assert_eq!(it.next_back(), Some(&3));
        assert_eq!(it.next(), Some(&2));
        assert_eq!(it.next(), None);
        assert_eq!(it.next_back(), None);

        let rev: Vec<i32> = v.index_iter().rev().copied().collect();
        assert_eq!(rev, vec![4, 3, 2, 1]);
    }

    #[test]
    fn test_iter_between() {
        let r = 0u32..10;
        let mut begin = r.begin();
        begin.advance(2);
        let mut end = r.end();
        end.advance(-3);
        let values: Vec<u32> = Iter::between(begin, end).collect();
        assert_eq!(values, vec![2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_cursor_mut() {
        let mut v = vec![1, 2, 3];
        {
            let mut cursor = v.begin_mut();
            while !cursor.is_end() {
                *cursor.get_mut() *= 2;
                cursor.move_next();
            }
            cursor.move_prev();
            assert_eq!(*cursor.get(), 6);
            let cursor = cursor.into_const();
            assert_eq!(*cursor.get(), 6);
        }
        let mut cursor = v.make_cursor_mut(1);
        cursor.advance(-1);
        *cursor.get_mut() = 0;
        assert_eq!(v, vec![0, 4, 6]);
    }

    #[test]
    fn test_empty_size_front() {
        let empty: Vec<u8> = Vec::new();
        assert!(IndexRangeExt::is_empty(&empty));
        assert_eq!(empty.front(), None);

        let data = [3, 4, 5];
        let slice = SliceRange::new(&data[..]);
        assert!(!slice.is_empty());
        assert_eq!(slice.size(), 3);
        assert_eq!(slice.front(), Some(&3));
        assert_eq!((5i64..9).size(), 4);

        let reversed = 5i32..2;
        assert!(IndexRangeExt::is_empty(&reversed));
        assert_eq!(reversed.size(), 0);
        assert_eq!(reversed.index_iter().count(), 0);
    }
}
