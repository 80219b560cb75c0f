//! Traversal capability tags and their compile-time demotion.
//!
//! Every pull range carries a [`TraversalTag`] describing the strongest positional
//! movement it supports. A derived range additionally *declares* a traversal; the
//! traversal it actually exposes is the weaker of the declared one and the one of
//! its base range ([`Demote`]). Declaring [`UseDefault`] means "as strong as the base
//! allows": it is read as random access and then demoted.
//!
//! Capability traits are implemented only when the demoted tag allows it, see
//! [`AtLeastBidirectional`] and [`AtLeastRandomAccess`].

use std::fmt;

/// Runtime mirror of the traversal tags, ordered from weakest to strongest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TraversalKind {
    Forward,
    Bidirectional,
    RandomAccess,
}

impl TraversalKind {
    /// The weaker of the two capabilities.
    pub const fn weakest(self, other: TraversalKind) -> TraversalKind {
        if (self as u8) <= (other as u8) {
            self
        } else {
            other
        }
    }

    /// Demotion rule applied to a declaration: `None` stands for [`UseDefault`].
    pub const fn demote(declared: Option<TraversalKind>, actual: TraversalKind) -> TraversalKind {
        match declared {
            Some(declared) => declared.weakest(actual),
            None => TraversalKind::RandomAccess.weakest(actual),
        }
    }
}

impl fmt::Display for TraversalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TraversalKind::Forward => "forward",
            TraversalKind::Bidirectional => "bidirectional",
            TraversalKind::RandomAccess => "random-access",
        };
        f.write_str(name)
    }
}

/// A traversal capability a pull range can expose.
pub trait TraversalTag {
    const KIND: TraversalKind;
}

/// A traversal a derived range can declare.
pub trait DeclaredTraversal {
    /// `None` for [`UseDefault`].
    const DECLARED: Option<TraversalKind>;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Forward;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Bidirectional;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RandomAccess;

/// Declaration-only tag: expose whatever the base range supports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UseDefault;

impl TraversalTag for Forward {
    const KIND: TraversalKind = TraversalKind::Forward;
}

impl TraversalTag for Bidirectional {
    const KIND: TraversalKind = TraversalKind::Bidirectional;
}

impl TraversalTag for RandomAccess {
    const KIND: TraversalKind = TraversalKind::RandomAccess;
}

impl<T: TraversalTag> DeclaredTraversal for T {
    const DECLARED: Option<TraversalKind> = Some(T::KIND);
}

impl DeclaredTraversal for UseDefault {
    const DECLARED: Option<TraversalKind> = None;
}

pub trait AtLeastBidirectional: TraversalTag {}

pub trait AtLeastRandomAccess: AtLeastBidirectional {}

impl AtLeastBidirectional for Bidirectional {}
impl AtLeastBidirectional for RandomAccess {}
impl AtLeastRandomAccess for RandomAccess {}

/// Type-level "weakest of the declared traversal and `Actual`".
pub trait Demote<Actual> {
    type Output: TraversalTag;
}

/// The traversal exposed by a range declaring `Declared` over a base supporting `Actual`.
pub type Demoted<Declared, Actual> = <Declared as Demote<Actual>>::Output;

macro_rules! demotion_table {
    ($($declared:ty, $actual:ty => $output:ty;)*) => {
        $(
            impl Demote<$actual> for $declared {
                type Output = $output;
            }
        )*
    };
}

demotion_table! {
    UseDefault, Forward => Forward;
    UseDefault, Bidirectional => Bidirectional;
    UseDefault, RandomAccess => RandomAccess;
    Forward, Forward => Forward;
    Forward, Bidirectional => Forward;
    Forward, RandomAccess => Forward;
    Bidirectional, Forward => Forward;
    Bidirectional, Bidirectional => Bidirectional;
    Bidirectional, RandomAccess => Bidirectional;
    RandomAccess, Forward => Forward;
    RandomAccess, Bidirectional => Bidirectional;
    RandomAccess, RandomAccess => RandomAccess;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demoted_kind<D, A>() -> TraversalKind
    where
        D: Demote<A> + DeclaredTraversal,
        A: TraversalTag,
    {
        let kind = <Demoted<D, A> as TraversalTag>::KIND;
        assert_eq!(kind, TraversalKind::demote(D::DECLARED, A::KIND));
        kind
    }

    #[test]
    fn test_demotion_never_upgrades() {
        assert_eq!(demoted_kind::<RandomAccess, Forward>(), TraversalKind::Forward);
        assert_eq!(
            demoted_kind::<RandomAccess, Bidirectional>(),
            TraversalKind::Bidirectional
        );
        assert_eq!(demoted_kind::<Forward, RandomAccess>(), TraversalKind::Forward);
        assert_eq!(
            demoted_kind::<Bidirectional, RandomAccess>(),
            TraversalKind::Bidirectional
        );
        assert_eq!(demoted_kind::<Bidirectional, Forward>(), TraversalKind::Forward);
    }

    #[test]
    fn test_use_default_follows_base() {
        assert_eq!(demoted_kind::<UseDefault, Forward>(), TraversalKind::Forward);
        assert_eq!(
            demoted_kind::<UseDefault, Bidirectional>(),
            TraversalKind::Bidirectional
        );
        assert_eq!(
            demoted_kind::<UseDefault, RandomAccess>(),
            TraversalKind::RandomAccess
        );
    }

    #[test]
    fn test_kind_ordering() {
        assert!(TraversalKind::Forward < TraversalKind::Bidirectional);
        assert!(TraversalKind::Bidirectional < TraversalKind::RandomAccess);
        assert_eq!(
            TraversalKind::RandomAccess.weakest(TraversalKind::Forward),
            TraversalKind::Forward
        );
        assert_eq!(TraversalKind::Bidirectional.to_string(), "bidirectional");
    }
}
