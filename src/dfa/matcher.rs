//! The capability interface C5 runs the shared match/successor algorithm against.
//!
//! Each of `implicit`, `explicit` and `table` implements this trait once; `DfaMatcher`
//! is consumed generically (monomorphized) rather than through a `dyn` trait object —
//! the interface has many small, hot methods where inlining across the call matters
//! for throughput, and the façade only needs to pick a realization once, at `build()`
//! time, not on every `match_str` call.

/// Implemented once per DFA realization (implicit, explicit, table). `State` and `Edge`
/// are opaque to C5; it only ever calls back through these methods.
pub trait DfaMatcher {
    type State: Copy + Eq;
    type Edge: Copy;

    fn start(&self) -> Self::State;

    fn is_match(&self, s: Self::State) -> bool;
    fn can_match(&self, s: Self::State) -> bool;
    fn match_edit_distance(&self, s: Self::State) -> u8;

    fn match_input(&self, s: Self::State, c: u32) -> Self::State;
    fn match_wildcard(&self, s: Self::State) -> Self::State;

    fn has_higher_out_edge(&self, s: Self::State, c: u32) -> bool;
    fn has_exact_explicit_out_edge(&self, s: Self::State, c: u32) -> bool;

    /// Precondition: `has_higher_out_edge(s, c)` returned true and the caller already
    /// ruled out the wildcard path (see `emit_greater_suffix` in C5).
    fn lowest_higher_explicit_out_edge(&self, s: Self::State, c: u32) -> Self::Edge;
    /// Precondition: at least one explicit out-edge exists.
    fn smallest_explicit_out_edge(&self, s: Self::State) -> Self::Edge;

    fn edge_to_u32char(&self, e: Self::Edge) -> u32;
    fn edge_to_state(&self, s: Self::State, e: Self::Edge) -> Self::State;

    fn valid_state(&self, s: Self::State) -> bool;
    fn valid_edge(&self, e: Self::Edge) -> bool;

    fn is_cased(&self) -> bool;

    /// Optional shortcut: when `s` uniquely determines the remaining matching suffix,
    /// a realization may emit it directly instead of walking wildcard/smallest-edge
    /// steps one character at a time. Unused by any realization today (see DESIGN.md);
    /// the hooks are kept available per the original interface but stay inert.
    fn implies_exact_match_suffix(&self, _s: Self::State) -> bool {
        false
    }
    fn emit_exact_match_suffix(&self, _s: Self::State, _buf: &mut Vec<u8>) {
        unreachable!("implies_exact_match_suffix always returns false; this is never called")
    }
}
