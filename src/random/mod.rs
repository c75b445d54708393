use tracing::debug;

use crate::{automaton::AutomatonBuilder, Alphabet, Automaton};

/// Generate a random automaton with `size` states over the first `symbols` lowercase letters. The
/// states are called `q0`, `q1`, ... and `q0` is initial. The algorithm is as follows:
/// 1. Every state is made final with probability one half.
/// 2. For each state and each symbol, with probability `density` a transition to a uniformly drawn
///    target state is inserted. A `density` of `1.0` therefore yields a complete automaton, smaller
///    values leave some transitions undefined.
///
/// Depending on the drawn transitions, there may be states that are not reachable from `q0`.
pub fn generate_random_automaton(symbols: usize, size: usize, density: f64) -> Automaton {
    assert!(size > 0, "an automaton needs at least one state");
    assert!(symbols > 0, "an automaton needs at least one symbol");

    let alphabet = Alphabet::of_size(symbols);
    let states: Vec<String> = (0..size).map(|i| format!("q{i}")).collect();
    let finals: Vec<String> = states
        .iter()
        .filter(|_| fastrand::bool())
        .cloned()
        .collect();

    let mut builder =
        AutomatonBuilder::new(alphabet.symbols(), &states, &finals, &states[0])
            .expect("generated header only refers to generated states");
    for origin in &states {
        for symbol in alphabet.symbols() {
            if fastrand::f64() < density {
                let destination = &states[fastrand::usize(..size)];
                builder
                    .add_transition(origin, symbol, destination)
                    .expect("generated transition only refers to generated states and symbols");
            }
        }
    }

    let aut = builder.build();
    debug!(
        "generated random automaton with {} states and {} transitions",
        aut.size(),
        aut.transitions().count()
    );
    aut
}

/// Draws a random word of length at most `max_len` over the single character symbols of `alphabet`.
pub fn generate_random_word(alphabet: &Alphabet, max_len: usize) -> String {
    let symbols: Vec<char> = alphabet
        .symbols()
        .filter_map(|sym| {
            let mut chars = sym.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c),
                _ => None,
            }
        })
        .collect();
    if symbols.is_empty() {
        return String::new();
    }
    let len = fastrand::usize(..=max_len);
    (0..len)
        .map(|_| symbols[fastrand::usize(..symbols.len())])
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;

    use super::{generate_random_automaton, generate_random_word};

    #[test_log::test]
    fn random_automata_round_trip() {
        for _ in 0..50 {
            let aut = generate_random_automaton(3, 6, 0.7);
            let reloaded = load_str(&aut.to_string()).unwrap();
            assert_eq!(reloaded, aut);
            assert_eq!(reloaded.initial_state(), "q0");
        }
    }

    #[test]
    fn complete_when_dense() {
        let aut = generate_random_automaton(2, 5, 1.0);
        assert!(aut.is_complete());
        assert_eq!(aut.transitions().count(), 10);
    }

    #[test]
    fn random_words_are_never_invalid() {
        let aut = generate_random_automaton(4, 8, 0.5);
        for _ in 0..200 {
            let word = generate_random_word(aut.alphabet(), 12);
            assert!(word.chars().count() <= 12);
            let classification = aut.classify(&word);
            assert_ne!(classification, Classification::Invalid);
            assert_eq!(aut.run(&word).classification(), classification);
            assert_eq!(
                classification.is_accepted(),
                aut.is_accepting(aut.run(&word).reached())
            );
        }
    }

    #[test]
    fn undefined_transitions_reject() {
        let aut = generate_random_automaton(3, 4, 0.3);
        for _ in 0..200 {
            let word = generate_random_word(aut.alphabet(), 10);
            let run = aut.run(&word);
            if run.positions().contains(&Position::Sink) {
                assert_eq!(run.classification(), Classification::Rejected);
            }
        }
    }
}
