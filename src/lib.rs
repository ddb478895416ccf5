/*!

A Levenshtein deterministic finite automaton (DFA) engine for bounded
edit-distance string matching, with *successor generation* for sublinear
dictionary seek.

Given a fixed target string `T` and a maximum edit distance `k` (`1` or `2`), the
engine decides in `O(|S|)` time whether `levenshtein(S, T) <= k`, and on a mismatch
produces a successor string `S'` such that `S' > S` lexicographically and no string
strictly between `S` and `S'` matches within `k` edits. A dictionary scanner can use
that successor to jump straight past an entire non-matching range instead of visiting
every key in it one at a time.

# Example

```rust
use levenshtein_dfa::{build, Casing, MatchResult};

let dfa = build("food", 1, Casing::Cased).unwrap();
assert_eq!(dfa.match_str("food"), MatchResult::Match { edits: 0, max_edits: 1 });
assert_eq!(dfa.match_str("foo"), MatchResult::Match { edits: 1, max_edits: 1 });

let mut successor = Vec::new();
let result = dfa.match_str_with_successor("foxx", &mut successor);
assert_eq!(result, MatchResult::Mismatch { max_edits: 1 });
assert_eq!(successor, b"foyd");
```

The construction follows **Fast String Correction with Levenshtein-Automata (2002)**
by Klaus Schulz and Stoyan Mihov for the table realization, generalized across three
interchangeable DFA realizations (implicit sparse-state stepping, an explicit graph
built via BFS, and the parametric table) sharing one match/successor algorithm.

!*/

mod dfa;
pub mod error;
mod match_algorithm;
mod metrics;
mod sparse;
mod stepping;
mod unicode;

pub use error::BuildError;

use dfa::{DfaMatcher, ExplicitDfa, ImplicitDfa, TableMatcher};
use match_algorithm::MatchOutcome;

/// Whether matching is case-sensitive. Applied once, at [`build`] time: in `Uncased`
/// mode both the stored target and every matched source character are lowercased at
/// code-point granularity before comparison, so successors come out lowercase too.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Casing {
    Cased,
    Uncased,
}

/// Which of the three interchangeable DFA implementations to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Realization {
    /// Evaluates the stepping kernel on demand for every character. Lowest
    /// construction cost (`O(|T|)`), no per-state storage beyond the target's
    /// code-point vector. The default.
    Implicit,
    /// A graph of nodes built once via BFS over the implicit realization's states.
    /// Faster matching at the cost of `O(nodes)` construction and memory.
    Explicit,
    /// A parametric transition table shared across all targets at a given `k`, plus a
    /// small per-target lookup. Construction and memory are `O(|T|)`.
    Table,
}

enum EngineImpl {
    Implicit(ImplicitDfa),
    Explicit(ExplicitDfa),
    Table(TableMatcher),
}

/// Builds a DFA for `target` at edit-distance bound `max_edits`, using the default
/// realization ([`Realization::Implicit`]).
pub fn build(target: &str, max_edits: u8, casing: Casing) -> Result<LevenshteinDfa, BuildError> {
    build_with_realization(target, max_edits, casing, Realization::Implicit)
}

/// Builds a DFA for `target` at edit-distance bound `max_edits`, using the given
/// realization.
pub fn build_with_realization(
    target: &str,
    max_edits: u8,
    casing: Casing,
    realization: Realization,
) -> Result<LevenshteinDfa, BuildError> {
    if !(1..=2).contains(&max_edits) {
        return Err(BuildError::InvalidMaxEdits { max_edits });
    }
    let cased = matches!(casing, Casing::Cased);
    let target_utf32 = unicode::str_to_utf32(target, !cased);

    log::debug!(
        "building {realization:?} Levenshtein DFA: target_len={} max_edits={max_edits} cased={cased}",
        target_utf32.len()
    );
    metrics::record_build();

    let imp = match realization {
        Realization::Implicit => EngineImpl::Implicit(ImplicitDfa::new(target_utf32, max_edits, cased)),
        Realization::Explicit => EngineImpl::Explicit(ExplicitDfa::build(&target_utf32, max_edits, cased)),
        Realization::Table => EngineImpl::Table(TableMatcher::build(&target_utf32, max_edits, cased)),
    };

    Ok(LevenshteinDfa { imp, max_edits, realization })
}

/// The outcome of a match: either `Match` with the exact edit distance, or
/// `Mismatch`. `match_str_with_successor`'s mismatch case additionally fills the
/// caller's successor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchResult {
    Match { edits: u8, max_edits: u8 },
    Mismatch { max_edits: u8 },
}

impl MatchResult {
    pub fn matches(&self) -> bool {
        matches!(self, MatchResult::Match { .. })
    }

    pub fn edits(&self) -> Option<u8> {
        match self {
            MatchResult::Match { edits, .. } => Some(*edits),
            MatchResult::Mismatch { .. } => None,
        }
    }

    pub fn max_edits(&self) -> u8 {
        match self {
            MatchResult::Match { max_edits, .. } | MatchResult::Mismatch { max_edits } => *max_edits,
        }
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchResult::Match { edits, .. } => write!(f, "match({edits} edits)"),
            MatchResult::Mismatch { .. } => write!(f, "mismatch"),
        }
    }
}

fn to_match_result(outcome: MatchOutcome, max_edits: u8) -> MatchResult {
    match outcome {
        MatchOutcome::Match { edits } => MatchResult::Match { edits, max_edits },
        MatchOutcome::Mismatch => MatchResult::Mismatch { max_edits },
    }
}

/// A built, immutable DFA for one target string. Cheap and safe to share across
/// threads for concurrent `match_str`/`match_str_with_successor` calls, as long as
/// each caller supplies its own successor buffer.
pub struct LevenshteinDfa {
    imp: EngineImpl,
    max_edits: u8,
    realization: Realization,
}

impl LevenshteinDfa {
    /// Matches `source` against the target. Never fails: every input yields a `Match`
    /// or `Mismatch`.
    pub fn match_str(&self, source: &str) -> MatchResult {
        metrics::record_match();
        let outcome = match &self.imp {
            EngineImpl::Implicit(m) => match_algorithm::match_str(m, source, None),
            EngineImpl::Explicit(m) => match_algorithm::match_str(m, source, None),
            EngineImpl::Table(m) => match_algorithm::match_str(m, source, None),
        };
        to_match_result(outcome, self.max_edits)
    }

    /// Matches `source` against the target; on mismatch, appends the smallest
    /// byte-lexicographically-greater string the DFA would accept to `successor`.
    /// Prior content of `successor` is preserved.
    pub fn match_str_with_successor(&self, source: &str, successor: &mut Vec<u8>) -> MatchResult {
        metrics::record_match();
        let outcome = match &self.imp {
            EngineImpl::Implicit(m) => match_algorithm::match_str(m, source, Some(successor)),
            EngineImpl::Explicit(m) => match_algorithm::match_str(m, source, Some(successor)),
            EngineImpl::Table(m) => match_algorithm::match_str(m, source, Some(successor)),
        };
        to_match_result(outcome, self.max_edits)
    }

    /// Approximate heap memory used by this DFA, excluding caller-owned buffers.
    pub fn memory_usage(&self) -> usize {
        match &self.imp {
            EngineImpl::Implicit(m) => m.memory_usage(),
            EngineImpl::Explicit(m) => m.memory_usage(),
            EngineImpl::Table(m) => m.memory_usage(),
        }
    }

    /// Dumps the explicit DFA's graph in Graphviz `digraph` format. Only meaningful
    /// for [`Realization::Explicit`]; other realizations return `UnsupportedOperation`.
    pub fn dump_graphviz<W: std::io::Write>(&self, out: &mut W) -> Result<(), BuildError> {
        match &self.imp {
            EngineImpl::Explicit(m) => Ok(m.dump_graphviz(out)?),
            _ => Err(BuildError::UnsupportedOperation {
                realization: realization_name(self.realization),
                operation: "dump_graphviz",
            }),
        }
    }
}

fn realization_name(r: Realization) -> &'static str {
    match r {
        Realization::Implicit => "Implicit",
        Realization::Explicit => "Explicit",
        Realization::Table => "Table",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_max_edits() {
        assert_eq!(
            build("food", 0, Casing::Cased).unwrap_err(),
            BuildError::InvalidMaxEdits { max_edits: 0 }
        );
        assert_eq!(
            build("food", 3, Casing::Cased).unwrap_err(),
            BuildError::InvalidMaxEdits { max_edits: 3 }
        );
    }

    #[test]
    fn scenario_food_k1_cased() {
        let dfa = build("food", 1, Casing::Cased).unwrap();
        assert_eq!(dfa.match_str("food"), MatchResult::Match { edits: 0, max_edits: 1 });
        assert_eq!(dfa.match_str("foo"), MatchResult::Match { edits: 1, max_edits: 1 });

        let mut successor = Vec::new();
        assert_eq!(
            dfa.match_str_with_successor("foxx", &mut successor),
            MatchResult::Mismatch { max_edits: 1 }
        );
        assert_eq!(successor, b"foyd");

        successor.clear();
        assert_eq!(
            dfa.match_str_with_successor("fo", &mut successor),
            MatchResult::Mismatch { max_edits: 1 }
        );
        assert_eq!(successor, b"fo\x01d");

        successor.clear();
        assert_eq!(
            dfa.match_str_with_successor("gp", &mut successor),
            MatchResult::Mismatch { max_edits: 1 }
        );
        assert_eq!(successor, b"hfood");
    }

    #[test]
    fn scenario_abc_k1() {
        let dfa = build("abc", 1, Casing::Cased).unwrap();
        assert_eq!(dfa.match_str("abc"), MatchResult::Match { edits: 0, max_edits: 1 });
        assert_eq!(dfa.match_str("ab"), MatchResult::Match { edits: 1, max_edits: 1 });
        assert_eq!(dfa.match_str("abd"), MatchResult::Match { edits: 1, max_edits: 1 });
        assert_eq!(dfa.match_str("abcd"), MatchResult::Match { edits: 1, max_edits: 1 });
        assert_eq!(dfa.match_str("abcde"), MatchResult::Mismatch { max_edits: 1 });
    }

    #[test]
    fn scenario_food_k2() {
        let dfa = build("food", 2, Casing::Cased).unwrap();
        assert_eq!(dfa.match_str("fxxd"), MatchResult::Match { edits: 2, max_edits: 2 });
        assert_eq!(dfa.match_str("xxxd"), MatchResult::Mismatch { max_edits: 2 });
    }

    #[test]
    fn scenario_uncased() {
        let dfa = build("Foo", 1, Casing::Uncased).unwrap();
        assert_eq!(dfa.match_str("foo"), MatchResult::Match { edits: 0, max_edits: 1 });
        assert_eq!(dfa.match_str("FOO"), MatchResult::Match { edits: 0, max_edits: 1 });
    }

    #[test]
    fn scenario_multibyte_target() {
        let dfa = build("h\u{00e9}llo", 1, Casing::Cased).unwrap();
        assert_eq!(dfa.match_str("hello"), MatchResult::Match { edits: 1, max_edits: 1 });
    }

    #[test]
    fn scenario_single_char_target() {
        let dfa = build("a", 1, Casing::Cased).unwrap();
        assert_eq!(dfa.match_str(""), MatchResult::Match { edits: 1, max_edits: 1 });

        let mut successor = Vec::new();
        let result = dfa.match_str_with_successor("zz", &mut successor);
        assert_eq!(result, MatchResult::Mismatch { max_edits: 1 });
        assert!(successor.as_slice() > b"zz".as_slice());
    }

    #[test]
    fn dump_graphviz_fails_for_non_explicit_realizations() {
        let dfa = build_with_realization("food", 1, Casing::Cased, Realization::Implicit).unwrap();
        let mut buf = Vec::new();
        assert!(matches!(dfa.dump_graphviz(&mut buf), Err(BuildError::UnsupportedOperation { .. })));
    }

    #[test]
    fn dump_graphviz_succeeds_for_explicit_realization() {
        let dfa = build_with_realization("food", 1, Casing::Cased, Realization::Explicit).unwrap();
        let mut buf = Vec::new();
        assert!(dfa.dump_graphviz(&mut buf).is_ok());
        assert!(String::from_utf8(buf).unwrap().starts_with("digraph"));
    }

    #[test]
    fn realizations_agree_on_scenarios() {
        for realization in [Realization::Implicit, Realization::Explicit, Realization::Table] {
            let dfa = build_with_realization("food", 1, Casing::Cased, realization).unwrap();
            assert_eq!(dfa.match_str("food"), MatchResult::Match { edits: 0, max_edits: 1 });
            assert_eq!(dfa.match_str("foo"), MatchResult::Match { edits: 1, max_edits: 1 });
            assert_eq!(dfa.match_str("abcde"), MatchResult::Mismatch { max_edits: 1 });
        }
    }
}
