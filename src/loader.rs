//! The text format consists of four header records followed by the transition rules:
//!
//! ```text
//! <symbol> <symbol> ...
//! <state> <state> ...
//! <final state> <final state> ...     (may be empty)
//! <initial state>
//! <origin> <symbol> <destination>
//! ...
//! ```
//!
//! Loading either produces a complete [`Automaton`] or fails with a [`LoadError`], no partially
//! built automaton is ever handed out.
use std::io::BufRead;

use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    automaton::{AutomatonBuilder, InvalidTransition},
    Automaton,
};

/// The header records of the text format, in the order in which they appear.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum Record {
    /// First line, the symbols of the alphabet.
    Alphabet,
    /// Second line, the states.
    States,
    /// Third line, the final states.
    FinalStates,
    /// Fourth line, the initial state.
    InitialState,
}

impl std::fmt::Display for Record {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Record::Alphabet => write!(f, "alphabet"),
            Record::States => write!(f, "states"),
            Record::FinalStates => write!(f, "final states"),
            Record::InitialState => write!(f, "initial state"),
        }
    }
}

/// Structural problems with the input that prevent reading the header.
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum MalformedFile {
    /// The input ended before the given record.
    #[error("missing {0} record")]
    MissingRecord(Record),
    /// The given record must not be empty.
    #[error("{0} record is empty")]
    EmptyRecord(Record),
    /// Reading the input failed.
    #[error("could not read input: {message}")]
    Io {
        /// What kind of I/O error occurred.
        kind: std::io::ErrorKind,
        /// The message of the underlying error.
        message: String,
    },
}

/// Abstracts the types of errors that can occur when loading an [`Automaton`].
#[derive(Debug, Clone, Eq, PartialEq, Error)]
pub enum LoadError {
    /// The input could not be read or its header is structurally broken.
    #[error("malformed automaton file: {0}")]
    MalformedFile(#[from] MalformedFile),
    /// The initial state or one of the final states is not a declared state.
    #[error("invalid initial or final state `{0}`")]
    InvalidStateReference(String),
    /// A transition rule does not consist of exactly three tokens.
    #[error("malformed transition on line {line}: expected `origin symbol destination`, found {found} token(s)")]
    MalformedTransitionLine {
        /// The 1-based line number of the rule.
        line: usize,
        /// The number of tokens on that line.
        found: usize,
    },
    /// A transition rule refers to an undeclared state or symbol.
    #[error("invalid transition on line {line}: {source}")]
    InvalidTransition {
        /// The 1-based line number of the rule.
        line: usize,
        /// The offending rule.
        source: InvalidTransition,
    },
}

impl From<std::io::Error> for LoadError {
    fn from(value: std::io::Error) -> Self {
        MalformedFile::Io {
            kind: value.kind(),
            message: value.to_string(),
        }
        .into()
    }
}

/// Loads an [`Automaton`] from the given lines. Leading and trailing whitespace of every line is
/// ignored.
pub fn load<I, S>(lines: I) -> Result<Automaton, LoadError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    load_records(lines.into_iter().map(Ok))
}

/// Loads an [`Automaton`] from a string, see [`load`].
pub fn load_str(input: &str) -> Result<Automaton, LoadError> {
    load(input.lines())
}

/// Loads an [`Automaton`] from a reader, see [`load`]. If reading fails, the I/O error is reported
/// as [`MalformedFile::Io`].
pub fn load_read<R: BufRead>(read: R) -> Result<Automaton, LoadError> {
    load_records(read.lines().map(|line| line.map_err(LoadError::from)))
}

fn header<I, S>(lines: &mut I, record: Record) -> Result<S, LoadError>
where
    I: Iterator<Item = Result<S, LoadError>>,
{
    lines
        .next()
        .unwrap_or_else(|| Err(MalformedFile::MissingRecord(record).into()))
}

fn load_records<I, S>(mut lines: I) -> Result<Automaton, LoadError>
where
    I: Iterator<Item = Result<S, LoadError>>,
    S: AsRef<str>,
{
    let alphabet = header(&mut lines, Record::Alphabet)?;
    let states = header(&mut lines, Record::States)?;
    let final_states = header(&mut lines, Record::FinalStates)?;
    let initial = header(&mut lines, Record::InitialState)?;

    let mut builder = AutomatonBuilder::new(
        alphabet.as_ref().split_whitespace(),
        states.as_ref().split_whitespace(),
        final_states.as_ref().split_whitespace(),
        initial.as_ref().trim(),
    )?;

    for (offset, line) in lines.enumerate() {
        let line_number = offset + 5;
        let line = line?;
        let tokens: Vec<&str> = line.as_ref().split_whitespace().collect();
        let [origin, symbol, destination] = tokens[..] else {
            return Err(LoadError::MalformedTransitionLine {
                line: line_number,
                found: tokens.len(),
            });
        };
        trace!("line {line_number}: transition {origin} --{symbol}--> {destination}");
        builder
            .add_transition(origin, symbol, destination)
            .map_err(|source| LoadError::InvalidTransition {
                line: line_number,
                source,
            })?;
    }

    let aut = builder.build();
    debug!(
        "loaded automaton with {} states over {} symbols",
        aut.size(),
        aut.alphabet().size()
    );
    Ok(aut)
}

#[cfg(test)]
mod tests {
    use std::io::{BufReader, Read};

    use crate::prelude::*;
    use crate::tests::EXAMPLE;

    #[test_log::test]
    fn load_example() {
        let aut = load_str(EXAMPLE).unwrap();
        assert_eq!(aut.alphabet().symbols().collect::<Vec<_>>(), vec!["a", "b"]);
        assert_eq!(
            aut.states().collect::<Vec<_>>(),
            vec!["q0", "q1", "q2", "q3"]
        );
        assert_eq!(aut.final_states().collect::<Vec<_>>(), vec!["q0", "q3"]);
        assert_eq!(aut.initial_state(), "q0");
        assert_eq!(aut.transition("q1", "b"), Some("q3"));
        assert_eq!(aut.transition("q3", "b"), Some("q2"));
    }

    #[test]
    fn surrounding_whitespace_and_crlf() {
        let aut = load_str("  a   b \r\n q0\tq1\r\n\r\n  q0  \r\n q0  a   q1 \r\n").unwrap();
        assert_eq!(aut.initial_state(), "q0");
        assert_eq!(aut.final_states().count(), 0);
        assert_eq!(aut.transition("q0", "a"), Some("q1"));
    }

    #[test]
    fn header_only_is_fine() {
        let aut = load(["a", "q0", "q0", "q0"]).unwrap();
        assert_eq!(aut.transitions().count(), 0);
        assert_eq!(aut.classify(""), Classification::Accepted);
        assert_eq!(aut.classify("a"), Classification::Rejected);
    }

    #[test]
    fn too_few_lines() {
        assert_eq!(
            load_str("a b\nq0 q1\nq1").unwrap_err(),
            LoadError::MalformedFile(MalformedFile::MissingRecord(Record::InitialState))
        );
        assert_eq!(
            load_str("").unwrap_err(),
            LoadError::MalformedFile(MalformedFile::MissingRecord(Record::Alphabet))
        );
    }

    #[test]
    fn empty_alphabet_or_states() {
        assert_eq!(
            load_str("\nq0\n\nq0\n").unwrap_err(),
            LoadError::MalformedFile(MalformedFile::EmptyRecord(Record::Alphabet))
        );
        assert_eq!(
            load_str("a\n  \n\nq0\n").unwrap_err(),
            LoadError::MalformedFile(MalformedFile::EmptyRecord(Record::States))
        );
    }

    #[test]
    fn unknown_initial_state() {
        let result = load_str("a b\nq0 q1\nq1\nq7\nq0 a q1\n");
        assert_eq!(
            result,
            Err(LoadError::InvalidStateReference("q7".to_string()))
        );
    }

    #[test]
    fn unknown_final_state() {
        let result = load_str("a b\nq0 q1\nq1 q5\nq0\n");
        assert_eq!(
            result,
            Err(LoadError::InvalidStateReference("q5".to_string()))
        );
    }

    #[test]
    fn initial_record_with_two_states() {
        assert_eq!(
            load_str("a\nq0 q1\n\nq0 q1\n").unwrap_err(),
            LoadError::InvalidStateReference("q0 q1".to_string())
        );
    }

    #[test]
    fn malformed_transition_lines() {
        assert_eq!(
            load_str("a b\nq0 q1\nq1\nq0\nq0 a q1\nq1 b\n").unwrap_err(),
            LoadError::MalformedTransitionLine { line: 6, found: 2 }
        );
        assert_eq!(
            load_str("a b\nq0 q1\nq1\nq0\nq0 a q1 q0\n").unwrap_err(),
            LoadError::MalformedTransitionLine { line: 5, found: 4 }
        );
        assert_eq!(
            load_str("a b\nq0 q1\nq1\nq0\nq0 a q1\n\n").unwrap_err(),
            LoadError::MalformedTransitionLine { line: 6, found: 0 }
        );
    }

    #[test]
    fn invalid_transitions() {
        let cases = [
            ("q0 c q1", "q0", "c", "q1"),
            ("q9 a q1", "q9", "a", "q1"),
            ("q0 a q9", "q0", "a", "q9"),
        ];
        for (rule, origin, symbol, destination) in cases {
            let input = format!("a b\nq0 q1\nq1\nq0\nq1 a q0\n{rule}\n");
            assert_eq!(
                load_str(&input).unwrap_err(),
                LoadError::InvalidTransition {
                    line: 6,
                    source: InvalidTransition {
                        origin: origin.to_string(),
                        symbol: symbol.to_string(),
                        destination: destination.to_string(),
                    }
                }
            );
        }
    }

    #[test]
    fn later_rules_override_earlier_ones() {
        let aut = load_str("a\nq0 q1 q2\nq2\nq0\nq0 a q1\nq0 a q2\n").unwrap();
        assert_eq!(aut.transition("q0", "a"), Some("q2"));
        assert_eq!(aut.transitions().count(), 1);
        assert_eq!(aut.classify("a"), Classification::Accepted);
    }

    #[test]
    fn duplicate_declarations_collapse() {
        let aut = load_str("a b a\nq0 q1 q0\nq1 q1\nq0\n").unwrap();
        assert_eq!(aut.alphabet().size(), 2);
        assert_eq!(aut.size(), 2);
        assert_eq!(aut.final_states().collect::<Vec<_>>(), vec!["q1"]);
    }

    #[test]
    fn load_from_reader() {
        let aut = load_read(BufReader::new(EXAMPLE.as_bytes())).unwrap();
        assert_eq!(aut, load_str(EXAMPLE).unwrap());
    }

    struct FailingRead;

    impl Read for FailingRead {
        fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "no access",
            ))
        }
    }

    #[test]
    fn io_failure_is_reported() {
        match load_read(BufReader::new(FailingRead)).unwrap_err() {
            LoadError::MalformedFile(MalformedFile::Io { kind, message }) => {
                assert_eq!(kind, std::io::ErrorKind::PermissionDenied);
                assert!(message.contains("no access"));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn io_failure_in_rules_is_reported() {
        let read = BufReader::new("a\nq0\nq0\nq0\n".as_bytes().chain(FailingRead));
        assert!(matches!(
            load_read(read),
            Err(LoadError::MalformedFile(MalformedFile::Io { .. }))
        ));
    }

    #[test]
    fn error_messages() {
        assert_eq!(
            LoadError::InvalidStateReference("q9".into()).to_string(),
            "invalid initial or final state `q9`"
        );
        assert_eq!(
            LoadError::from(MalformedFile::MissingRecord(Record::FinalStates)).to_string(),
            "malformed automaton file: missing final states record"
        );
    }
}
