use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    id::{Interner, StateId, SymbolId},
    loader::{LoadError, MalformedFile, Record},
    Alphabet, Automaton, Map, Set,
};

/// A transition that refers to a state or a symbol that has not been declared.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
#[error("transition `{origin} {symbol} {destination}` refers to an undeclared state or symbol")]
pub struct InvalidTransition {
    /// The origin state as it was given.
    pub origin: String,
    /// The symbol as it was given.
    pub symbol: String,
    /// The destination state as it was given.
    pub destination: String,
}

/// Helper struct for the construction of an [`Automaton`]. The header (alphabet, states, final
/// states and initial state) is checked when the builder is created, every transition is checked
/// when it is added. Hence [`AutomatonBuilder::build`] cannot fail.
///
/// If a transition is added for a pair of state and symbol that already has one, the old
/// destination is replaced.
///
/// # Example
/// ```
/// use dfa_eval::prelude::*;
///
/// let aut = AutomatonBuilder::new(["a", "b"], ["q0", "q1"], ["q1"], "q0")
///     .unwrap()
///     .with_transitions([("q0", "a", "q1"), ("q1", "b", "q0")])
///     .unwrap()
///     .build();
/// assert_eq!(aut.classify("aba"), Classification::Accepted);
/// ```
#[derive(Debug, Clone)]
pub struct AutomatonBuilder {
    alphabet: Alphabet,
    states: Interner<StateId>,
    finals: Set<StateId>,
    initial: StateId,
    transitions: Map<(StateId, SymbolId), StateId>,
}

impl AutomatonBuilder {
    /// Creates a builder for an automaton with the given alphabet, states, final states and initial
    /// state. Fails if the alphabet or the set of states is empty, or if the initial state or one of
    /// the final states is not among the states.
    pub fn new<A, B, S, F, T>(
        alphabet: A,
        states: S,
        final_states: F,
        initial: &str,
    ) -> Result<Self, LoadError>
    where
        A: IntoIterator<Item = B>,
        B: AsRef<str>,
        S: IntoIterator<Item = T>,
        T: AsRef<str>,
        F: IntoIterator<Item = T>,
    {
        let alphabet = Alphabet::new(alphabet);
        if alphabet.is_empty() {
            return Err(MalformedFile::EmptyRecord(Record::Alphabet).into());
        }
        let states: Interner<StateId> = Interner::from_names(states);
        if states.is_empty() {
            return Err(MalformedFile::EmptyRecord(Record::States).into());
        }

        let initial = states
            .id(initial)
            .ok_or_else(|| LoadError::InvalidStateReference(initial.to_string()))?;
        let finals = final_states
            .into_iter()
            .map(|name| {
                states
                    .id(name.as_ref())
                    .ok_or_else(|| LoadError::InvalidStateReference(name.as_ref().to_string()))
            })
            .collect::<Result<Set<_>, _>>()?;

        trace!(
            "header with {} symbols, {} states and {} final states",
            alphabet.size(),
            states.len(),
            finals.len()
        );
        Ok(Self {
            alphabet,
            states,
            finals,
            initial,
            transitions: Map::default(),
        })
    }

    /// Adds the transition from `origin` to `destination` on `symbol`. If a transition for `origin`
    /// and `symbol` existed before, it is overwritten and the previous destination is returned.
    pub fn add_transition(
        &mut self,
        origin: &str,
        symbol: &str,
        destination: &str,
    ) -> Result<Option<StateId>, InvalidTransition> {
        let resolved = (
            self.states.id(origin),
            self.alphabet.id(symbol),
            self.states.id(destination),
        );
        let (Some(q), Some(a), Some(p)) = resolved else {
            return Err(InvalidTransition {
                origin: origin.to_string(),
                symbol: symbol.to_string(),
                destination: destination.to_string(),
            });
        };

        let previous = self.transitions.insert((q, a), p);
        if previous.is_some_and(|old| old != p) {
            debug!("transition on `{origin} {symbol}` is redefined, now leads to `{destination}`");
        }
        Ok(previous)
    }

    /// Adds all given transitions, stopping at the first one that is invalid.
    pub fn with_transitions<'a, I>(mut self, transitions: I) -> Result<Self, InvalidTransition>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        for (origin, symbol, destination) in transitions {
            self.add_transition(origin, symbol, destination)?;
        }
        Ok(self)
    }

    /// Consumes the builder and produces the [`Automaton`].
    pub fn build(self) -> Automaton {
        Automaton::from_parts(
            self.alphabet,
            self.states,
            self.finals,
            self.initial,
            self.transitions,
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    #[test]
    fn header_is_validated() {
        assert_eq!(
            AutomatonBuilder::new(["a"], ["q0"], ["q0"], "q1").unwrap_err(),
            LoadError::InvalidStateReference("q1".to_string())
        );
        assert_eq!(
            AutomatonBuilder::new(["a"], ["q0", "q1"], ["q1", "q2"], "q0").unwrap_err(),
            LoadError::InvalidStateReference("q2".to_string())
        );
        assert_eq!(
            AutomatonBuilder::new(Vec::<&str>::new(), ["q0"], [], "q0").unwrap_err(),
            LoadError::MalformedFile(MalformedFile::EmptyRecord(Record::Alphabet))
        );
        assert_eq!(
            AutomatonBuilder::new(["a"], Vec::<&str>::new(), [], "q0").unwrap_err(),
            LoadError::MalformedFile(MalformedFile::EmptyRecord(Record::States))
        );
    }

    #[test]
    fn transitions_are_validated() {
        let mut builder = AutomatonBuilder::new(["a"], ["q0", "q1"], [], "q0").unwrap();
        assert!(builder.add_transition("q0", "b", "q1").is_err());
        assert!(builder.add_transition("q2", "a", "q1").is_err());
        assert!(builder.add_transition("q0", "a", "q2").is_err());
        assert_eq!(builder.add_transition("q0", "a", "q1"), Ok(None));
        assert!(builder.add_transition("q0", "a", "q0").unwrap().is_some());

        let aut = builder.build();
        assert_eq!(aut.transition("q0", "a"), Some("q0"));
        assert_eq!(aut.transitions().count(), 1);
        assert_eq!(aut.final_states().count(), 0);
    }
}
