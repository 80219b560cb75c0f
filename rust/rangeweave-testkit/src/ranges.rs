//! Base ranges with a weaker traversal than a `Vec`.
//!
//! Both wrap a `Vec<T>` and use its positions as indices, but only implement the
//! capability traits their traversal names, so derived ranges built over them are
//! demoted accordingly.

use rangeweave::{
    BidirectionalIndexRange, IndexRange, IndexRangeMut,
    traversal::{Bidirectional, Forward},
};

macro_rules! list_range {
    ($(#[$attr:meta])* $name:ident, $traversal:ty) => {
        $(#[$attr])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name<T> {
            items: Vec<T>,
        }

        impl<T> $name<T> {
            pub fn new(items: Vec<T>) -> Self {
                $name { items }
            }

            pub fn items(&self) -> &[T] {
                &self.items
            }
        }

        impl<T> From<Vec<T>> for $name<T> {
            fn from(items: Vec<T>) -> Self {
                $name { items }
            }
        }

        impl<T> IndexRange for $name<T> {
            type Index = usize;
            type Traversal = $traversal;
            type Ref<'a>
                = &'a T
            where
                Self: 'a;

            fn begin_index(&self) -> usize {
                0
            }

            fn end_index(&self) -> usize {
                self.items.len()
            }

            fn at_end_index(&self, idx: &usize) -> bool {
                *idx >= self.items.len()
            }

            fn equal_index(&self, lhs: &usize, rhs: &usize) -> bool {
                lhs == rhs
            }

            fn increment_index(&self, idx: &mut usize) {
                *idx += 1;
            }

            fn dereference_index<'a>(&'a self, idx: &usize) -> &'a T {
                &self.items[*idx]
            }
        }

        impl<T> IndexRangeMut for $name<T> {
            type RefMut<'a>
                = &'a mut T
            where
                Self: 'a;

            fn dereference_index_mut<'a>(&'a mut self, idx: &usize) -> &'a mut T {
                &mut self.items[*idx]
            }
        }

        rangeweave::impl_generator_by_index!([T] $name<T>, 'a => &'a T);
    };
}

list_range!(
    /// Forward-only list.
    ForwardList,
    Forward
);

list_range!(
    /// List that can step both ways but not jump.
    BidiList,
    Bidirectional
);

impl<T> BidirectionalIndexRange for BidiList<T> {
    fn decrement_index(&self, idx: &mut usize) {
        *idx -= 1;
    }
}
