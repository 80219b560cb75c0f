//! How a derived range holds its base range, and which re-bindings are allowed.
//!
//! A derived range either owns a copy of its base range ([`ByValue`]) or refers to
//! one (`&R` or `&mut R`). With a reference, the base range must outlive the derived
//! range; the borrow checker enforces this, there is no runtime guard.
//!
//! Re-binding a derived range from another one goes through [`ConstCompatible`],
//! whose impls spell out the conversion table:
//!
//! | target \ source  | owns-value | borrows-mutable | borrows-immutable |
//! |------------------|------------|-----------------|-------------------|
//! | owns-value       | copy       | copy            | copy              |
//! | borrows-mutable  | `&mut` src | `&mut` src      | rejected          |
//! | borrows-immutable| yes        | yes             | yes               |
//!
//! A mutable target additionally needs exclusive access to the source. The only
//! rejected cell is the one that would let an element reached through an immutable
//! view be mutated. [`Ownership::check_conversion`] reports the same table at runtime.

use std::fmt;

use rangeweave_common::{Result, error::Error};

/// Runtime description of a storage mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Ownership {
    Owned,
    BorrowedMut,
    Borrowed,
}

impl Ownership {
    pub fn name(self) -> &'static str {
        match self {
            Ownership::Owned => "owns-value",
            Ownership::BorrowedMut => "borrows-mutable",
            Ownership::Borrowed => "borrows-immutable",
        }
    }

    pub fn is_reference(self) -> bool {
        self != Ownership::Owned
    }

    /// Whether a base range stored as `self` may be built from one viewed as `source`.
    ///
    /// `source` is the mode through which the source is reached: an owned base range
    /// reached through a shared reference counts as [`Ownership::Borrowed`].
    pub fn can_convert_from(self, source: Ownership) -> bool {
        match self {
            Ownership::Owned | Ownership::Borrowed => true,
            Ownership::BorrowedMut => source != Ownership::Borrowed,
        }
    }

    pub fn check_conversion(self, source: Ownership) -> Result<()> {
        if self.can_convert_from(source) {
            Ok(())
        } else {
            log::debug!(
                "rejecting base range conversion from {} to {}",
                source.name(),
                self.name()
            );
            Err(Error::const_violation(self.name(), source.name()))
        }
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Storage of a base range inside a derived range.
pub trait RangeStorage {
    type Range;

    const OWNERSHIP: Ownership;

    fn get(&self) -> &Self::Range;
}

pub trait RangeStorageMut: RangeStorage {
    fn get_mut(&mut self) -> &mut Self::Range;
}

/// Owned base range.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ByValue<R>(pub R);

impl<R> ByValue<R> {
    pub fn into_inner(self) -> R {
        self.0
    }
}

impl<R> RangeStorage for ByValue<R> {
    type Range = R;

    const OWNERSHIP: Ownership = Ownership::Owned;

    #[inline]
    fn get(&self) -> &R {
        &self.0
    }
}

impl<R> RangeStorageMut for ByValue<R> {
    #[inline]
    fn get_mut(&mut self) -> &mut R {
        &mut self.0
    }
}

impl<R> RangeStorage for &R {
    type Range = R;

    const OWNERSHIP: Ownership = Ownership::Borrowed;

    #[inline]
    fn get(&self) -> &R {
        self
    }
}

impl<R> RangeStorage for &mut R {
    type Range = R;

    const OWNERSHIP: Ownership = Ownership::BorrowedMut;

    #[inline]
    fn get(&self) -> &R {
        self
    }
}

impl<R> RangeStorageMut for &mut R {
    #[inline]
    fn get_mut(&mut self) -> &mut R {
        self
    }
}

/// Builds this storage from `Source`, the way the source storage is reached.
///
/// `Source` is `&S`, `&mut S` or `S` for a source storage `S`.
pub trait ConstCompatible<Source>: RangeStorage + Sized {
    fn rebind(source: Source) -> Self;
}

// Immutable targets accept every source.

impl<'a, R> ConstCompatible<&'a ByValue<R>> for &'a R {
    fn rebind(source: &'a ByValue<R>) -> Self {
        &source.0
    }
}

impl<'a, R> ConstCompatible<&'a mut ByValue<R>> for &'a R {
    fn rebind(source: &'a mut ByValue<R>) -> Self {
        &source.0
    }
}

impl<'s, 'a, R> ConstCompatible<&'s &'a R> for &'a R {
    fn rebind(source: &'s &'a R) -> Self {
        source
    }
}

impl<'s, 'a, R> ConstCompatible<&'s mut &'a R> for &'a R {
    fn rebind(source: &'s mut &'a R) -> Self {
        source
    }
}

impl<'a, 'b, R> ConstCompatible<&'a &'b mut R> for &'a R {
    fn rebind(source: &'a &'b mut R) -> Self {
        source
    }
}

impl<'a, 'b, R> ConstCompatible<&'a mut &'b mut R> for &'a R {
    fn rebind(source: &'a mut &'b mut R) -> Self {
        source
    }
}

// Mutable targets need exclusive access to a mutable source.

impl<'a, R> ConstCompatible<&'a mut ByValue<R>> for &'a mut R {
    fn rebind(source: &'a mut ByValue<R>) -> Self {
        &mut source.0
    }
}

impl<'a, 'b, R> ConstCompatible<&'a mut &'b mut R> for &'a mut R {
    fn rebind(source: &'a mut &'b mut R) -> Self {
        source
    }
}

// Owned targets copy.

impl<R> ConstCompatible<ByValue<R>> for ByValue<R> {
    fn rebind(source: ByValue<R>) -> Self {
        source
    }
}

impl<R: Clone> ConstCompatible<&ByValue<R>> for ByValue<R> {
    fn rebind(source: &ByValue<R>) -> Self {
        source.clone()
    }
}

impl<R: Clone> ConstCompatible<&mut ByValue<R>> for ByValue<R> {
    fn rebind(source: &mut ByValue<R>) -> Self {
        source.clone()
    }
}

impl<R: Clone> ConstCompatible<&&R> for ByValue<R> {
    fn rebind(source: &&R) -> Self {
        ByValue((*source).clone())
    }
}

impl<R: Clone> ConstCompatible<&mut &R> for ByValue<R> {
    fn rebind(source: &mut &R) -> Self {
        ByValue((*source).clone())
    }
}

impl<R: Clone> ConstCompatible<&&mut R> for ByValue<R> {
    fn rebind(source: &&mut R) -> Self {
        ByValue((**source).clone())
    }
}

impl<R: Clone> ConstCompatible<&mut &mut R> for ByValue<R> {
    fn rebind(source: &mut &mut R) -> Self {
        ByValue((**source).clone())
    }
}

#[cfg(test)]
mod tests {
    use rangeweave_common::error::ErrorKind;

    use super::*;

    fn rebind_checked<T, S>(source: S, source_mode: Ownership) -> T
    where
        T: ConstCompatible<S>,
    {
        assert!(T::OWNERSHIP.can_convert_from(source_mode));
        T::rebind(source)
    }

    #[test]
    fn test_storage_modes() {
        let mut v = vec![1, 2, 3];
        assert_eq!(<ByValue<Vec<i32>> as RangeStorage>::OWNERSHIP, Ownership::Owned);
        assert_eq!(<&Vec<i32> as RangeStorage>::OWNERSHIP, Ownership::Borrowed);
        {
            let mut borrowed = &mut v;
            RangeStorageMut::get_mut(&mut borrowed).push(4);
            assert_eq!(RangeStorage::get(&borrowed).len(), 4);
        }
        let owned = ByValue(v);
        assert_eq!(owned.get(), &vec![1, 2, 3, 4]);
        assert_eq!(owned.into_inner().len(), 4);
    }

    #[test]
    fn test_compile_time_table_agrees_with_runtime_table() {
        let mut owned = ByValue(vec![1, 2]);

        let copy: ByValue<Vec<i32>> = rebind_checked(&owned, Ownership::Borrowed);
        assert_eq!(copy.0, vec![1, 2]);

        let shared: &Vec<i32> = rebind_checked(&owned, Ownership::Borrowed);
        assert_eq!(shared.len(), 2);

        {
            let mut exclusive: &mut Vec<i32> = rebind_checked(&mut owned, Ownership::BorrowedMut);
            exclusive.push(3);
            let reborrowed: &mut Vec<i32> = rebind_checked(&mut exclusive, Ownership::BorrowedMut);
            reborrowed.push(4);
            let relaxed: &Vec<i32> = rebind_checked(&exclusive, Ownership::BorrowedMut);
            assert_eq!(relaxed, &vec![1, 2, 3, 4]);
        }

        let shared = &owned.0;
        let copied: ByValue<Vec<i32>> = rebind_checked(&shared, Ownership::Borrowed);
        assert_eq!(copied.0.len(), 4);
    }

    #[test]
    fn test_immutable_to_mutable_rejected() {
        assert!(Ownership::BorrowedMut.can_convert_from(Ownership::Owned));
        assert!(Ownership::Borrowed.can_convert_from(Ownership::BorrowedMut));
        assert!(Ownership::Owned.can_convert_from(Ownership::Borrowed));

        let err = Ownership::BorrowedMut
            .check_conversion(Ownership::Borrowed)
            .unwrap_err();
        assert!(matches!(err.kind(), ErrorKind::ConstViolation { .. }));
        assert_eq!(Ownership::Borrowed.to_string(), "borrows-immutable");
        assert!(Ownership::BorrowedMut.is_reference());
        assert!(!Ownership::Owned.is_reference());
    }
}
