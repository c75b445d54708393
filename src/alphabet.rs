use itertools::Itertools;

use crate::id::{Interner, SymbolId};

/// The alphabet of an automaton, an ordered collection of distinct symbols. A symbol is an arbitrary
/// whitespace free string, although words given as plain strings can only make use of symbols that
/// consist of a single `char`.
///
/// # Example
/// Assume we have an [`Alphabet`] over the symbols `a` and `b`. Then the word `"abba"` is made up of
/// the symbols `a`, `b`, `b`, `a`, while the word `"abc"` contains `c`, which is not a symbol of the
/// alphabet.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Alphabet(Interner<SymbolId>);

impl Alphabet {
    /// Creates a new alphabet from the given symbols. Repeated symbols are only kept once, at the
    /// position where they first occur.
    pub fn new<S: AsRef<str>, I: IntoIterator<Item = S>>(symbols: I) -> Self {
        Self(Interner::from_names(symbols))
    }

    /// Creates the alphabet consisting of the first `size` lowercase letters, i.e. `a` to `z`.
    pub fn of_size(size: usize) -> Self {
        assert!(size <= 26, "Alphabet is too large");
        Self::new((0..size).map(|i| ((b'a' + i as u8) as char).to_string()))
    }

    /// Returns the number of symbols.
    pub fn size(&self) -> usize {
        self.0.len()
    }

    /// Returns true if there are no symbols at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether `symbol` belongs to the alphabet.
    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains(symbol)
    }

    /// Returns the id of `symbol`, if it belongs to the alphabet.
    pub fn id(&self, symbol: &str) -> Option<SymbolId> {
        self.0.id(symbol)
    }

    /// Returns the id of the single character symbol `chr`.
    pub fn char_id(&self, chr: char) -> Option<SymbolId> {
        let mut buf = [0u8; 4];
        self.0.id(chr.encode_utf8(&mut buf))
    }

    /// Returns the symbol with the given id.
    pub fn symbol(&self, id: SymbolId) -> Option<&str> {
        self.0.name(id)
    }

    /// Iterates over the symbols in declaration order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(|(_, sym)| sym)
    }

    /// Iterates over the symbols in declaration order, together with their ids.
    pub fn iter(&self) -> impl Iterator<Item = (SymbolId, &str)> + '_ {
        self.0.iter()
    }
}

impl std::fmt::Display for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{{{}}}", self.symbols().join(", "))
    }
}
