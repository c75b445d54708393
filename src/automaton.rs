use std::{fmt::Display, str::FromStr};

use itertools::Itertools;

use crate::{
    id::{IdType, Interner, StateId, SymbolId},
    loader::{load_str, LoadError},
    Alphabet, Map, Set,
};

mod builder;
pub use builder::{AutomatonBuilder, InvalidTransition};

/// A deterministic finite automaton over an [`Alphabet`] of string symbols.
///
/// Values of this type can only be obtained through an [`AutomatonBuilder`] (which is also what the
/// [`loader`](crate::loader) uses), so every automaton satisfies the following invariants:
/// - the initial state is one of the declared states,
/// - every final state is one of the declared states,
/// - every transition leads from a declared state to a declared state and is labeled with a symbol
///   of the alphabet,
/// - there is at most one transition for each pair of state and symbol.
///
/// The transition function may be partial. An automaton is immutable once it has been built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Automaton {
    alphabet: Alphabet,
    states: Interner<StateId>,
    finals: Set<StateId>,
    initial: StateId,
    transitions: Map<(StateId, SymbolId), StateId>,
}

/// A single transition of an [`Automaton`], given by the names of the involved states and symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Transition<'a> {
    /// The state in which the transition starts.
    pub origin: &'a str,
    /// The symbol that is consumed.
    pub symbol: &'a str,
    /// The state that is reached.
    pub destination: &'a str,
}

impl Display for Transition<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.origin, self.symbol, self.destination)
    }
}

impl Automaton {
    /// Returns the alphabet of `self`.
    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Returns the number of states.
    pub fn size(&self) -> usize {
        self.states.len()
    }

    /// Iterates over the names of all states in declaration order.
    pub fn states(&self) -> impl Iterator<Item = &str> + '_ {
        self.states.iter().map(|(_, name)| name)
    }

    /// Iterates over the ids of all states in declaration order.
    pub fn state_ids(&self) -> impl Iterator<Item = StateId> + '_ {
        self.states.ids()
    }

    /// Returns the id of the state called `name`, if it exists.
    pub fn state_id(&self, name: &str) -> Option<StateId> {
        self.states.id(name)
    }

    /// Returns the name of the state with the given id.
    pub fn state_name(&self, id: StateId) -> Option<&str> {
        self.states.name(id)
    }

    /// Returns the id of the initial state.
    pub fn initial(&self) -> StateId {
        self.initial
    }

    /// Returns the name of the initial state.
    pub fn initial_state(&self) -> &str {
        self.states.name(self.initial).unwrap_or_default()
    }

    /// Iterates over the names of the final states, in the order in which the states were declared.
    pub fn final_states(&self) -> impl Iterator<Item = &str> + '_ {
        self.states
            .iter()
            .filter(|(id, _)| self.finals.contains(id))
            .map(|(_, name)| name)
    }

    /// Returns true if the state with the given id is final.
    pub fn is_final(&self, state: StateId) -> bool {
        self.finals.contains(&state)
    }

    /// Returns the state that is reached from `state` on `symbol`, or `None` if no transition is
    /// defined for the pair.
    pub fn successor(&self, state: StateId, symbol: SymbolId) -> Option<StateId> {
        self.transitions.get(&(state, symbol)).copied()
    }

    /// Same as [`Self::successor`], but works on the names of states and symbols.
    pub fn transition(&self, state: &str, symbol: &str) -> Option<&str> {
        let state = self.states.id(state)?;
        let symbol = self.alphabet.id(symbol)?;
        self.successor(state, symbol)
            .and_then(|target| self.states.name(target))
    }

    /// Iterates over all transitions, ordered by origin state and then by symbol, both in the order
    /// in which they were declared.
    pub fn transitions(&self) -> impl Iterator<Item = Transition<'_>> + '_ {
        self.states.iter().flat_map(move |(q, origin)| {
            self.alphabet.iter().filter_map(move |(a, symbol)| {
                let destination = self.states.name(self.successor(q, a)?)?;
                Some(Transition {
                    origin,
                    symbol,
                    destination,
                })
            })
        })
    }

    /// Returns true if there is a transition for every pair of state and symbol.
    pub fn is_complete(&self) -> bool {
        self.transitions.len() == self.size() * self.alphabet.size()
    }

    /// Builds a table that has one row per state and one column per symbol. The initial state is
    /// marked with `->`, final states are marked with `*` and missing transitions are shown as `-`.
    pub fn transition_table(&self) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(
            std::iter::once("State".to_string())
                .chain(self.alphabet.symbols().map(str::to_string)),
        );
        for (q, name) in self.states.iter() {
            let marker = match (q == self.initial, self.is_final(q)) {
                (true, true) => "->*",
                (true, false) => "->",
                (false, true) => "*",
                (false, false) => "",
            };
            let mut row = vec![format!("{marker}{name}")];
            for (a, _) in self.alphabet.iter() {
                row.push(
                    self.successor(q, a)
                        .and_then(|target| self.states.name(target))
                        .unwrap_or("-")
                        .to_string(),
                );
            }
            builder.push_record(row);
        }

        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }

    pub(crate) fn from_parts(
        alphabet: Alphabet,
        states: Interner<StateId>,
        finals: Set<StateId>,
        initial: StateId,
        transitions: Map<(StateId, SymbolId), StateId>,
    ) -> Self {
        debug_assert!(initial.index() < states.len());
        debug_assert!(finals.iter().all(|q| q.index() < states.len()));
        Self {
            alphabet,
            states,
            finals,
            initial,
            transitions,
        }
    }
}

/// Writes `self` in the text format that the [`loader`](crate::loader) reads. The output is
/// canonical: states and symbols appear in declaration order and the transitions are sorted by
/// origin and symbol, so loading the output again yields an equal automaton.
impl Display for Automaton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.alphabet.symbols().join(" "))?;
        writeln!(f, "{}", self.states().join(" "))?;
        writeln!(f, "{}", self.final_states().join(" "))?;
        writeln!(f, "{}", self.initial_state())?;
        for transition in self.transitions() {
            writeln!(f, "{transition}")?;
        }
        Ok(())
    }
}

impl FromStr for Automaton {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        load_str(s)
    }
}
