//! The shared match/successor loop (C5), generic over any [`DfaMatcher`] realization.
//!
//! This is the one place where "mismatch" stops meaning just "no" and starts meaning
//! "here is the smallest string greater than the input that this DFA *would* accept" —
//! the successor lets a dictionary scanner jump straight past an entire run of
//! non-matching keys instead of visiting them one at a time.

use crate::dfa::matcher::DfaMatcher;
use crate::unicode::{self, Utf8Reader};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchOutcome {
    Match { edits: u8 },
    Mismatch,
}

/// Runs the matcher over `source`, optionally filling `successor` with the smallest
/// byte-lexicographically-greater string the DFA would accept when the result is a
/// mismatch. `successor` is the caller's buffer; any prior content (up to `prefix_len`)
/// is preserved, matching the source's buffer-reuse contract.
pub fn match_str<M: DfaMatcher>(m: &M, source: &str, mut successor: Option<&mut Vec<u8>>) -> MatchOutcome {
    let prefix_len = successor.as_ref().map_or(0, |b| b.len());

    let mut state = m.start();
    let mut last_branch_state: Option<M::State> = None;
    let mut branch_prefix_len = prefix_len;
    let mut branch_source_char: u32 = 0;

    let mut reader = Utf8Reader::new(source);
    while reader.has_more() {
        let c0 = reader.next_code_point();
        let c = if m.is_cased() { c0 } else { unicode::lowercase_codepoint(c0) };

        let pos_before = successor.as_ref().map_or(0, |b| b.len());
        if let Some(buf) = successor.as_deref_mut() {
            unicode::append_code_point(buf, c);
        }

        if m.has_higher_out_edge(state, c) {
            last_branch_state = Some(state);
            branch_prefix_len = pos_before;
            branch_source_char = c;
        }

        let next = m.match_input(state, c);
        if m.can_match(next) {
            state = next;
            continue;
        }

        if let Some(buf) = successor.as_deref_mut() {
            buf.truncate(branch_prefix_len);
            let branch_state = last_branch_state.expect(
                "a mismatch implies some earlier state had a higher out-edge: start() always \
                 accepts a first character via an explicit or wildcard edge",
            );
            debug_assert!(m.valid_state(branch_state));
            emit_greater_suffix(m, branch_state, branch_source_char, buf);
        }
        return MatchOutcome::Mismatch;
    }

    let edits = m.match_edit_distance(state);
    if m.is_match(state) {
        return MatchOutcome::Match { edits };
    }
    if let Some(buf) = successor.as_deref_mut() {
        emit_smallest_matching_suffix(m, state, buf);
    }
    MatchOutcome::Mismatch
}

/// Appends one character strictly greater than `c_branch`, then the smallest matching
/// suffix reachable from there.
fn emit_greater_suffix<M: DfaMatcher>(m: &M, s_branch: M::State, c_branch: u32, buf: &mut Vec<u8>) {
    let wildcard = m.match_wildcard(s_branch);
    if m.can_match(wildcard) && !m.has_exact_explicit_out_edge(s_branch, c_branch + 1) {
        // c_branch + 1 may equal 0x110000 (one past U+10FFFF); the encoder tolerates this.
        unicode::append_code_point(buf, c_branch + 1);
        emit_smallest_matching_suffix(m, wildcard, buf);
        return;
    }
    let edge = m.lowest_higher_explicit_out_edge(s_branch, c_branch);
    unicode::append_code_point(buf, m.edge_to_u32char(edge));
    emit_smallest_matching_suffix(m, m.edge_to_state(s_branch, edge), buf);
}

/// Appends the minimum lexicographic completion from `s` to an accepting state.
fn emit_smallest_matching_suffix<M: DfaMatcher>(m: &M, mut s: M::State, buf: &mut Vec<u8>) {
    while !m.is_match(s) {
        if m.implies_exact_match_suffix(s) {
            m.emit_exact_match_suffix(s, buf);
            return;
        }
        let wildcard = m.match_wildcard(s);
        if m.can_match(wildcard) {
            // 0x01 is the smallest non-NUL UTF-8 byte; callers guarantee no embedded
            // NUL in source, so this is always a valid "greater than empty" filler.
            buf.push(0x01);
            s = wildcard;
            continue;
        }
        let edge = m.smallest_explicit_out_edge(s);
        unicode::append_code_point(buf, m.edge_to_u32char(edge));
        s = m.edge_to_state(s, edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dfa::ImplicitDfa;

    fn utf32(s: &str) -> Vec<u32> {
        s.chars().map(|c| c as u32).collect()
    }

    fn run(target: &str, k: u8, source: &str) -> (MatchOutcome, String) {
        let m = ImplicitDfa::new(utf32(target), k, true);
        let mut buf = Vec::new();
        let outcome = match_str(&m, source, Some(&mut buf));
        (outcome, String::from_utf8_lossy(&buf).into_owned())
    }

    #[test]
    fn exact_match_food() {
        let (outcome, _) = run("food", 1, "food");
        assert_eq!(outcome, MatchOutcome::Match { edits: 0 });
    }

    #[test]
    fn prefix_match_food() {
        let (outcome, successor) = run("food", 1, "foo");
        assert_eq!(outcome, MatchOutcome::Match { edits: 1 });
        assert!(successor.is_empty());
    }

    #[test]
    fn mismatch_produces_successor_foyd() {
        let (outcome, successor) = run("food", 1, "foxx");
        assert_eq!(outcome, MatchOutcome::Mismatch);
        assert_eq!(successor, "foyd");
    }

    #[test]
    fn mismatch_prefix_emits_filler_byte() {
        let (outcome, successor) = run("food", 1, "fo");
        assert_eq!(outcome, MatchOutcome::Mismatch);
        assert_eq!(successor.as_bytes(), b"fo\x01d");
    }

    #[test]
    fn mismatch_from_start_jumps_to_next_higher_first_char() {
        let (outcome, successor) = run("food", 1, "gp");
        assert_eq!(outcome, MatchOutcome::Mismatch);
        assert_eq!(successor, "hfood");
    }

    #[test]
    fn successor_is_lexicographically_greater_than_source() {
        let (outcome, successor) = run("abc", 1, "abz");
        assert_eq!(outcome, MatchOutcome::Mismatch);
        assert!(successor.as_bytes() > "abz".as_bytes());
    }
}
