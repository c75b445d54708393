use std::fmt::Display;

use indexmap::IndexMap;
use itertools::Itertools;
use owo_colors::OwoColorize;
use tracing::{debug, trace};

use crate::{
    id::{StateId, SymbolId},
    Automaton,
};

/// The outcome of running a single word through an [`Automaton`].
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub enum Classification {
    /// The word only uses symbols of the alphabet and its run ends in a final state.
    Accepted,
    /// The word only uses symbols of the alphabet but its run does not end in a final state.
    Rejected,
    /// The word contains a symbol that is not part of the alphabet.
    Invalid,
}

impl Classification {
    /// All classifications in the order `Accepted`, `Rejected`, `Invalid`.
    pub const ALL: [Classification; 3] = [
        Classification::Accepted,
        Classification::Rejected,
        Classification::Invalid,
    ];

    /// Returns true for [`Classification::Accepted`].
    pub fn is_accepted(&self) -> bool {
        matches!(self, Classification::Accepted)
    }

    /// The literal tag of `self`, i.e. `ACCEPTED`, `REJECTED` or `INVALID`.
    pub fn tag(&self) -> &'static str {
        match self {
            Classification::Accepted => "ACCEPTED",
            Classification::Rejected => "REJECTED",
            Classification::Invalid => "INVALID",
        }
    }

    /// The tag of `self` colored for display in a terminal.
    pub fn colored(&self) -> String {
        match self {
            Classification::Accepted => self.tag().green().to_string(),
            Classification::Rejected => self.tag().yellow().to_string(),
            Classification::Invalid => self.tag().red().to_string(),
        }
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Where a run currently is. Besides the states of the automaton, a run may be in the reject sink,
/// which it enters as soon as it encounters a missing transition. The sink is not final and it is
/// never left again.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Position {
    /// A state of the automaton.
    State(StateId),
    /// The reject sink.
    Sink,
}

/// The sequence of positions that a word visits, starting with the initial state. If the word turned
/// out to be invalid, the positions end with the one that was reached before the first symbol outside
/// of the alphabet.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Run {
    positions: Vec<Position>,
    classification: Classification,
}

impl Run {
    /// The visited positions.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// The position in which the run ended.
    pub fn reached(&self) -> Position {
        self.positions.last().copied().unwrap_or(Position::Sink)
    }

    /// How the word was classified.
    pub fn classification(&self) -> Classification {
        self.classification
    }
}

impl Automaton {
    /// Moves from position `from` along `symbol`. A missing transition leads into the sink.
    pub fn step(&self, from: Position, symbol: SymbolId) -> Position {
        match from {
            Position::State(q) => self
                .successor(q, symbol)
                .map(Position::State)
                .unwrap_or(Position::Sink),
            Position::Sink => Position::Sink,
        }
    }

    /// Returns true if `position` is a final state. The sink never is.
    pub fn is_accepting(&self, position: Position) -> bool {
        match position {
            Position::State(q) => self.is_final(q),
            Position::Sink => false,
        }
    }

    /// Gives the name of the state at `position`, the sink is shown as `⊥`.
    pub fn position_name(&self, position: Position) -> &str {
        match position {
            Position::State(q) => self.state_name(q).unwrap_or("?"),
            Position::Sink => "⊥",
        }
    }

    fn scan<I, F>(&self, symbols: I, mut visit: F) -> Classification
    where
        I: IntoIterator<Item = Option<SymbolId>>,
        F: FnMut(Position),
    {
        let mut current = Position::State(self.initial());
        visit(current);
        for symbol in symbols {
            let Some(symbol) = symbol else {
                return Classification::Invalid;
            };
            current = self.step(current, symbol);
            visit(current);
        }
        if self.is_accepting(current) {
            Classification::Accepted
        } else {
            Classification::Rejected
        }
    }

    /// Classifies `word`, where every `char` of the word is one symbol.
    pub fn classify(&self, word: &str) -> Classification {
        self.scan(word.chars().map(|c| self.alphabet().char_id(c)), |_| {})
    }

    /// Classifies a word that is given as a sequence of symbols. This also works for alphabets with
    /// symbols that are longer than a single `char`.
    pub fn classify_symbols<S, I>(&self, word: I) -> Classification
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        self.scan(
            word.into_iter().map(|s| self.alphabet().id(s.as_ref())),
            |_| {},
        )
    }

    /// Runs `word` and records every position that is visited, see [`Run`].
    pub fn run(&self, word: &str) -> Run {
        let mut positions = vec![];
        let classification = self.scan(word.chars().map(|c| self.alphabet().char_id(c)), |p| {
            positions.push(p)
        });
        trace!(
            "run of \"{word}\": {} => {classification}",
            positions.iter().map(|p| self.position_name(*p)).join(" ")
        );
        Run {
            positions,
            classification,
        }
    }
}

/// The classifications of a batch of words. Every word occurs once, in the order in which it was
/// first given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Evaluation(IndexMap<String, Classification, fxhash::FxBuildHasher>);

impl Evaluation {
    /// Returns the classification of `word`, if it was evaluated.
    pub fn get(&self, word: &str) -> Option<Classification> {
        self.0.get(word).copied()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no words were evaluated.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the words and their classifications.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Classification)> + '_ {
        self.0.iter().map(|(word, c)| (word.as_str(), *c))
    }

    /// Counts how many words received the given classification.
    pub fn count(&self, classification: Classification) -> usize {
        self.0.values().filter(|c| **c == classification).count()
    }

    /// Renders a table with one row per word. The empty word is shown as `ε`.
    pub fn table(&self, colored: bool) -> String {
        let mut builder = tabled::builder::Builder::default();
        builder.push_record(["Word", "Result"]);
        for (word, classification) in self.iter() {
            builder.push_record([
                display_word(word).to_string(),
                if colored {
                    classification.colored()
                } else {
                    classification.to_string()
                },
            ]);
        }
        builder
            .build()
            .with(tabled::settings::Style::rounded())
            .to_string()
    }
}

fn display_word(word: &str) -> &str {
    if word.is_empty() {
        "ε"
    } else {
        word
    }
}

impl Display for Evaluation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (word, classification) in self.iter() {
            writeln!(f, "{}: {classification}", display_word(word))?;
        }
        Ok(())
    }
}

impl IntoIterator for Evaluation {
    type Item = (String, Classification);
    type IntoIter = indexmap::map::IntoIter<String, Classification>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Classifies every word of `words` with `automaton`. Each distinct word appears exactly once in the
/// result, repeated words are only evaluated once.
pub fn evaluate<I, W>(automaton: &Automaton, words: I) -> Evaluation
where
    I: IntoIterator<Item = W>,
    W: AsRef<str>,
{
    let mut out = Evaluation::default();
    for word in words {
        let word = word.as_ref();
        if !out.0.contains_key(word) {
            out.0.insert(word.to_string(), automaton.classify(word));
        }
    }
    debug!(
        "evaluated {} words: {} accepted, {} rejected, {} invalid",
        out.len(),
        out.count(Classification::Accepted),
        out.count(Classification::Rejected),
        out.count(Classification::Invalid)
    );
    out
}
