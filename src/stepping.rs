//! Pure row-to-row Levenshtein transition function over sparse states (C3).
//!
//! This is the one piece of arithmetic every DFA realization in `src/dfa/` is built on
//! top of: the implicit realization calls it directly on every input character, the
//! explicit realization calls it once per edge during its BFS build, and the table
//! realization's offline builder (`src/dfa/table_build.rs`) calls it once per
//! characteristic vector while enumerating parametric states.

use crate::sparse::SparseState;

/// The initial row for matching against a target of length `n` at edit-distance bound
/// `k`: `{(0,0), (1,1), ..., (min(k,n), min(k,n))}`.
pub fn start(k: u8, n: u32) -> SparseState {
    let mut s = SparseState::EMPTY;
    let bound = std::cmp::min(k as u32, n);
    for i in 0..=bound {
        s.append(i, i as u8);
    }
    s
}

/// Shared transition loop. `matches_at(i)` tells whether the input character equals
/// `target[i]`; `step` passes a real lookup, `wildcard_step` always answers `false`.
fn step_generic(sigma_in: &SparseState, k: u8, n: u32, matches_at: impl Fn(usize) -> bool) -> SparseState {
    if sigma_in.is_empty() {
        return SparseState::EMPTY;
    }
    let mut out = SparseState::EMPTY;

    // Deletion-column extension: carrying forward index 0 means "delete a prefix of
    // the source", which is always legal until cost k is exhausted.
    if sigma_in.index(0) == 0 && sigma_in.cost(0) < k {
        out.append(0, sigma_in.cost(0) + 1);
    }

    let len = sigma_in.len();
    for idx in 0..len {
        let i = sigma_in.index(idx);
        let c_i = sigma_in.cost(idx);
        if i == n {
            break;
        }
        let sub = if matches_at(i as usize) { 0 } else { 1 };
        let mut dist = c_i + sub;

        if !out.is_empty() && out.last_index() == i {
            dist = std::cmp::min(dist, out.last_cost() + 1); // insertion
        }
        if idx + 1 < len && sigma_in.index(idx + 1) == i + 1 {
            let c_next = sigma_in.cost(idx + 1);
            dist = std::cmp::min(dist, c_next + 1); // deletion
        }
        if dist <= k {
            out.append(i + 1, dist);
        }
    }
    out
}

/// Steps the row on concrete input character `c`.
pub fn step(sigma_in: &SparseState, c: u32, target: &[u32], k: u8) -> SparseState {
    step_generic(sigma_in, k, target.len() as u32, |i| target[i] == c)
}

/// Steps the row on the "some character not in target" sentinel.
pub fn wildcard_step(sigma_in: &SparseState, target: &[u32], k: u8) -> SparseState {
    step_generic(sigma_in, k, target.len() as u32, |_i| false)
}

/// Variant of the stepping kernel used by the table-DFA builder (C7), which works in
/// *relative* window coordinates instead of against a concrete target length: there is
/// no terminal index to stop at, since the builder doesn't know the eventual target's
/// length. Growth is bounded instead by the requirement that cost stays `<= k`, which
/// is what keeps the parametric state space finite.
pub(crate) fn step_relative(sigma_in: &SparseState, k: u8, matches_at: impl Fn(u32) -> bool) -> SparseState {
    step_generic(sigma_in, k, u32::MAX, |i| matches_at(i as u32))
}

/// Whether `wildcard_step` would yield a non-empty state, without materializing it.
///
/// Mirrors `step_generic`'s loop but returns as soon as the first entry that would be
/// appended is found. Since it exits on that first success, no earlier iteration ever
/// reaches the point of having appended anything (if one had, we'd already have
/// returned) — so, unlike `step_generic`, this never needs an insertion-cost lookback
/// against a prior appended entry.
pub fn can_wildcard_step(sigma_in: &SparseState, target: &[u32], k: u8) -> bool {
    if sigma_in.is_empty() {
        return false;
    }
    let n = target.len() as u32;

    if sigma_in.index(0) == 0 && sigma_in.cost(0) < k {
        return true;
    }

    let len = sigma_in.len();
    for idx in 0..len {
        let i = sigma_in.index(idx);
        let c_i = sigma_in.cost(idx);
        if i == n {
            break;
        }
        let mut dist = c_i + 1; // wildcard never matches
        if idx + 1 < len && sigma_in.index(idx + 1) == i + 1 {
            let c_next = sigma_in.cost(idx + 1);
            dist = std::cmp::min(dist, c_next + 1);
        }
        if dist <= k {
            return true;
        }
    }
    false
}

/// `{ target[i] : (i, _) in sigma, i < target.len() }`, sorted ascending.
pub fn transitions(sigma: &SparseState, target: &[u32]) -> crate::sparse::TransitionsSet {
    crate::sparse::TransitionsSet::from_state(sigma, target)
}

#[inline]
pub fn is_match(sigma: &SparseState, n: u32) -> bool {
    !sigma.is_empty() && sigma.last_index() == n
}

#[inline]
pub fn match_edit_distance(sigma: &SparseState, n: u32, k: u8) -> u8 {
    if is_match(sigma, n) {
        sigma.last_cost()
    } else {
        k + 1
    }
}

#[inline]
pub fn can_match(sigma: &SparseState) -> bool {
    !sigma.is_empty()
}
