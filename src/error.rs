use thiserror::Error;

/// Errors that can occur while constructing or introspecting a [`LevenshteinDfa`](crate::LevenshteinDfa).
///
/// Matching itself is total (see the crate docs): once a DFA has been built, `match_str`
/// and `match_str_with_successor` always return a [`MatchResult`](crate::MatchResult), never
/// an error.
#[derive(Debug, Error)]
pub enum BuildError {
    /// `max_edits` was outside the supported `{1, 2}` range.
    #[error("Levenshtein DFA max_edits must be 1 or 2, was {max_edits}")]
    InvalidMaxEdits { max_edits: u8 },

    /// The requested operation is not supported by the realization the DFA was built with.
    #[error("{operation} is not supported by the {realization} realization")]
    UnsupportedOperation {
        realization: &'static str,
        operation: &'static str,
    },

    /// `dump_graphviz`'s writer returned an I/O error.
    #[error("writing graphviz output failed: {0}")]
    GraphvizIo(#[from] std::io::Error),
}

impl PartialEq for BuildError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (BuildError::InvalidMaxEdits { max_edits: a }, BuildError::InvalidMaxEdits { max_edits: b }) => a == b,
            (
                BuildError::UnsupportedOperation { realization: ra, operation: oa },
                BuildError::UnsupportedOperation { realization: rb, operation: ob },
            ) => ra == rb && oa == ob,
            (BuildError::GraphvizIo(a), BuildError::GraphvizIo(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}
impl Eq for BuildError {}

pub type Result<T> = std::result::Result<T, BuildError>;
