use std::{fmt::Debug, hash::Hash};

use bimap::BiMap;

/// The integer type backing [`StateId`] and [`SymbolId`].
pub type DefaultIdType = u32;

/// Types that can serve as a dense index into a collection of named things.
pub trait IdType: Copy + Eq + Hash + Ord + Debug {
    /// Creates the id with the given position.
    fn from_index(index: usize) -> Self;
    /// Returns the position that `self` refers to.
    fn index(self) -> usize;
}

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Eq, PartialEq, PartialOrd, Ord, Hash)]
        pub struct $name(DefaultIdType);

        impl IdType for $name {
            fn from_index(index: usize) -> Self {
                Self(index as DefaultIdType)
            }
            fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

id_type!(
    /// Index of a state, assigned in the order in which the states are declared.
    StateId,
    "#q"
);
id_type!(
    /// Index of an alphabet symbol, assigned in the order in which the symbols are declared.
    SymbolId,
    "#s"
);

/// Assigns dense ids to names. The first occurrence of a name determines its id, interning
/// the same name again returns the id it already has.
#[derive(Clone, Debug)]
pub struct Interner<I: IdType> {
    names: BiMap<String, I>,
}

impl<I: IdType> Default for Interner<I> {
    fn default() -> Self {
        Self {
            names: BiMap::new(),
        }
    }
}

impl<I: IdType> Interner<I> {
    /// Interns every name of the given iterator in order.
    pub fn from_names<S: AsRef<str>, N: IntoIterator<Item = S>>(names: N) -> Self {
        let mut interner = Self::default();
        for name in names {
            interner.intern(name.as_ref());
        }
        interner
    }

    /// Returns the id of `name`, creating a fresh one if `name` has not been seen before.
    pub fn intern(&mut self, name: &str) -> I {
        if let Some(id) = self.id(name) {
            return id;
        }
        let id = I::from_index(self.names.len());
        self.names.insert(name.to_string(), id);
        id
    }

    /// Looks up the id of `name`.
    pub fn id(&self, name: &str) -> Option<I> {
        self.names.get_by_left(name).copied()
    }

    /// Looks up the name belonging to `id`.
    pub fn name(&self, id: I) -> Option<&str> {
        self.names.get_by_right(&id).map(String::as_str)
    }

    /// Returns true if `name` has been interned.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_left(name)
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Returns true if no name has been interned yet.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterates over all ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        (0..self.len()).map(I::from_index)
    }

    /// Iterates over all `(id, name)` pairs in ascending order of the ids.
    pub fn iter(&self) -> impl Iterator<Item = (I, &str)> + '_ {
        self.ids()
            .filter_map(move |id| self.name(id).map(|name| (id, name)))
    }
}

impl<I: IdType> PartialEq for Interner<I> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<I: IdType> Eq for Interner<I> {}
