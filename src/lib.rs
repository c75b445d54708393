//! Library for loading deterministic finite automata (DFA) from a plain text description and
//! classifying finite words with them.
//!
//! A description consists of five records: the alphabet, the states, the final states, the initial
//! state and a list of transition rules `origin symbol destination`. The [`loader`] turns such a
//! description into an [`Automaton`], which is validated once and immutable afterwards. The
//! [`evaluate`](mod@evaluate) module then runs words through the automaton and assigns each of them a
//! [`Classification`]: a word is [`Classification::Accepted`] if its run ends in a final state,
//! [`Classification::Rejected`] if it does not, and [`Classification::Invalid`] if it uses a symbol
//! that is not part of the alphabet.
//!
//! The transition function may be partial. Whenever a run encounters a state/symbol pair for which no
//! transition is defined, it moves into the reject sink ([`Position::Sink`]), which is never final and
//! which it never leaves again.
//!
//! ```
//! use dfa_eval::prelude::*;
//!
//! let aut = load_str("a b\nq0 q1\nq1\nq0\nq0 a q1\nq1 b q0").unwrap();
//! assert_eq!(aut.classify("a"), Classification::Accepted);
//! assert_eq!(aut.classify("ab"), Classification::Rejected);
//! assert_eq!(aut.classify("b"), Classification::Rejected);
//! assert_eq!(aut.classify("ac"), Classification::Invalid);
//! ```
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

/// The prelude is supposed to make using this package easier. Including everything, i.e.
/// `use dfa_eval::prelude::*;` should be enough to use the package.
pub mod prelude {
    pub use super::{
        alphabet::Alphabet,
        automaton::{Automaton, AutomatonBuilder, InvalidTransition, Transition},
        evaluate::{evaluate, Classification, Evaluation, Position, Run},
        id::{IdType, StateId, SymbolId},
        loader::{load, load_read, load_str, LoadError, MalformedFile, Record},
        Map, Set,
    };
}

/// Dense indices for states and symbols together with the interner that hands them out.
pub mod id;

/// Module that contains the definition of the alphabet of an automaton.
pub mod alphabet;
pub use alphabet::Alphabet;

/// Defines the validated automaton model and the builder that enforces its invariants.
pub mod automaton;
pub use automaton::Automaton;

/// Parses the line oriented text format into an [`Automaton`].
pub mod loader;
pub use loader::{load, LoadError};

/// Runs words through an [`Automaton`] and classifies them.
pub mod evaluate;
pub use evaluate::{evaluate, Classification, Position};

/// Renders an [`Automaton`] in the graphviz DOT language.
pub mod dot;

/// Implements the generation of random automata. This is feature gated behind the `random` feature.
#[cfg(feature = "random")]
pub mod random;

/// Type alias for sets, we use this to hide which type of `HashSet` we are actually using.
pub type Set<S> = fxhash::FxHashSet<S>;
/// Type alias for maps, we use this to hide which type of `HashMap` we are actually using.
pub type Map<K, V> = fxhash::FxHashMap<K, V>;
