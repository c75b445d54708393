use itertools::Itertools;

use crate::{id::IdType, Automaton};

fn quote_dot_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
}

impl Automaton {
    /// Compute the graphviz representation, for more information on the DOT format,
    /// see the [graphviz documentation](https://graphviz.org/doc/info/lang.html).
    ///
    /// Final states are drawn with a double circle, the initial state is marked by an incoming edge
    /// from an invisible node. Transitions between the same pair of states are merged into a single
    /// edge that is labeled with all of their symbols.
    pub fn dot_representation(&self) -> String {
        let header = [
            "digraph A {".to_string(),
            "rankdir=LR".to_string(),
            "init [label=\"\", shape=none]".to_string(),
        ];

        let states = self.state_ids().filter_map(|q| {
            let name = self.state_name(q)?;
            let shape = if self.is_final(q) {
                "doublecircle"
            } else {
                "circle"
            };
            Some(format!("{} [shape={shape}]", quote_dot_ident(name)))
        });

        let initial = std::iter::once(format!(
            "init -> {}",
            quote_dot_ident(self.initial_state())
        ));

        let edges = self
            .transitions()
            .into_group_map_by(|t| (t.origin, t.destination))
            .into_iter()
            .sorted_by_key(|((origin, destination), _)| {
                (
                    self.state_id(origin).map(IdType::index),
                    self.state_id(destination).map(IdType::index),
                )
            })
            .map(|((origin, destination), group)| {
                format!(
                    "{} -> {} [label=\"{}\"]",
                    quote_dot_ident(origin),
                    quote_dot_ident(destination),
                    group.iter().map(|t| t.symbol).join(", ")
                )
            });

        header
            .into_iter()
            .chain(states)
            .chain(initial)
            .chain(edges)
            .chain(std::iter::once("}".to_string()))
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use crate::tests::example_automaton;

    #[test]
    fn dot_of_example() {
        let dot = example_automaton().dot_representation();
        assert!(dot.starts_with("digraph A {"));
        assert!(dot.ends_with('}'));
        assert!(dot.contains("\"q0\" [shape=doublecircle]"));
        assert!(dot.contains("\"q1\" [shape=circle]"));
        assert!(dot.contains("init -> \"q0\""));
        assert!(dot.contains("\"q0\" -> \"q1\" [label=\"a\"]"));
    }

    #[test]
    fn parallel_transitions_are_merged() {
        let aut = load_str("a b c\np q\"\nq\"\np\np a q\"\np c q\"\np b p\n").unwrap();
        let dot = aut.dot_representation();
        assert!(dot.contains("\"p\" -> \"q\\\"\" [label=\"a, c\"]"));
        assert!(dot.contains("\"p\" -> \"p\" [label=\"b\"]"));
    }
}
