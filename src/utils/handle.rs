use std::fmt;
use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Deref;

/// `HandleIndex` type is arbitrary. Keeping it 16-bits makes the handle of every resource
/// small enough to be packed into a `SortKey`.
pub type HandleIndex = u16;

/// `Handle` is a lightweight identifier of some resource owned elsewhere. It carries no
/// ownership and is free to be copied around. The maximum index is reserved as sentinel
/// which means "nothing", every lookup must check for it before indexing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Handle {
    index: HandleIndex,
}

impl Handle {
    /// The sentinel `Handle`.
    pub const INVALID: Handle = Handle {
        index: HandleIndex::max_value(),
    };

    /// Constructs a new `Handle`.
    #[inline]
    pub const fn new(index: HandleIndex) -> Self {
        Handle { index }
    }

    /// Constructs a nil/uninitialized `Handle`.
    #[inline]
    pub fn nil() -> Self {
        Handle::INVALID
    }

    /// Returns true if this `Handle` is not the sentinel.
    #[inline]
    pub fn is_valid(self) -> bool {
        self.index != HandleIndex::max_value()
    }

    /// Invalidate this `Handle` to the sentinel.
    #[inline]
    pub fn invalidate(&mut self) {
        self.index = HandleIndex::max_value();
    }

    /// Returns index value.
    #[inline]
    pub fn index(self) -> HandleIndex {
        self.index
    }
}

impl Default for Handle {
    fn default() -> Self {
        Handle::INVALID
    }
}

impl Deref for Handle {
    type Target = HandleIndex;

    fn deref(&self) -> &HandleIndex {
        &self.index
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_valid() {
            write!(f, "Handle ({})", self.index)
        } else {
            write!(f, "Handle (nil)")
        }
    }
}

pub trait HandleLike: Debug + Copy + Hash + PartialEq + Eq {
    fn new(index: HandleIndex) -> Self;
    fn index(&self) -> HandleIndex;

    #[inline]
    fn is_valid(&self) -> bool {
        self.index() != HandleIndex::max_value()
    }
}

impl HandleLike for Handle {
    #[inline]
    fn new(index: HandleIndex) -> Self {
        Handle { index }
    }

    #[inline]
    fn index(&self) -> HandleIndex {
        self.index
    }
}

#[macro_export]
macro_rules! impl_handle {
    ($name:ident) => {
        #[derive(
            Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name($crate::utils::handle::Handle);

        impl $name {
            /// The sentinel handle, which refers to nothing.
            pub const INVALID: $name = $name($crate::utils::handle::Handle::INVALID);

            #[inline]
            pub const fn new(index: $crate::utils::handle::HandleIndex) -> Self {
                $name($crate::utils::handle::Handle::new(index))
            }
        }

        impl From<$name> for $crate::utils::handle::Handle {
            fn from(handle: $name) -> Self {
                handle.0
            }
        }

        impl From<$crate::utils::handle::Handle> for $name {
            fn from(handle: $crate::utils::handle::Handle) -> Self {
                $name(handle)
            }
        }

        impl ::std::ops::Deref for $name {
            type Target = $crate::utils::handle::Handle;
            fn deref(&self) -> &$crate::utils::handle::Handle {
                &self.0
            }
        }

        impl $crate::utils::handle::HandleLike for $name {
            #[inline]
            fn new(index: $crate::utils::handle::HandleIndex) -> Self {
                $name($crate::utils::handle::Handle::new(index))
            }

            #[inline]
            fn index(&self) -> $crate::utils::handle::HandleIndex {
                self.0.index()
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                if self.0.is_valid() {
                    write!(f, "{} ({})", stringify!($name), self.0.index())
                } else {
                    write!(f, "{} (nil)", stringify!($name))
                }
            }
        }
    };
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn basic() {
        let mut h2 = Handle::new(2);
        assert_eq!(h2.index(), 2);
        assert!(h2.is_valid());
        assert_eq!(*h2, 2);

        h2.invalidate();
        assert_eq!(h2, Handle::INVALID);
        assert!(!h2.is_valid());
        assert_eq!(*h2, HandleIndex::max_value());
        assert!(!Handle::default().is_valid());
    }

    #[test]
    fn container() {
        use crate::utils::hash::FastHashSet;

        let h1 = Handle::new(1);
        let h2 = Handle::new(2);
        let h3 = Handle::new(1);

        let mut map = FastHashSet::default();
        assert_eq!(map.insert(h1), true);
        assert_eq!(map.contains(&h1), true);
        assert_eq!(map.insert(h3), false);
        assert_eq!(map.insert(h2), true);
    }

    impl_handle!(TypeSafeHandle);

    #[test]
    fn type_safe_handle() {
        let h1 = TypeSafeHandle::default();
        assert_eq!(h1, TypeSafeHandle::INVALID);
        assert!(!h1.is_valid());

        let h2 = TypeSafeHandle::new(3);
        assert_eq!(*h2, Handle::new(3));
        assert_eq!(format!("{}", h2), "TypeSafeHandle (3)");
        assert_eq!(format!("{}", h1), "TypeSafeHandle (nil)");
    }
}
