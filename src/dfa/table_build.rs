//! Offline enumeration of the parametric (table) DFA's states and transitions (C7).
//!
//! Unlike the explicit realization's BFS, which builds states tied to one concrete
//! target, this builder works in *relative* coordinates: a window of
//! `diag(k) = 2k+1` positions around the current matching offset, described only by a
//! characteristic vector (which window positions the input character matches). Run
//! once per `k`, it produces the same two tables Schulz & Mihov's parametric
//! construction calls for: a transition table keyed by `(state, char_vec)` and an edit
//! table keyed by `(state, distance-from-end-of-target)`. `src/dfa/table.rs` combines
//! these static, target-independent tables with a small per-target lookup to realize
//! matching against one specific target.

use std::collections::{HashMap, VecDeque};

use crate::sparse::{diag, SparseState};
use crate::stepping;

/// `table[state][char_vec] = (step, next_state)`; `step` is how far the window
/// advances, `next_state` is the normalized successor state id.
/// `edits[state][j]` is the match edit distance when `j` positions from the end of the
/// target (`> k` if non-accepting at that distance).
pub struct TableDfa {
    pub k: u8,
    pub window: usize,
    pub num_states: usize,
    pub transitions: Vec<Vec<(u8, u32)>>,
    pub edits: Vec<Vec<u8>>,
}

/// State id `0`: the absorbing failed/doomed state.
pub const FAILED_STATE: u32 = 0;
/// State id `1`: the unconstrained start state `{(0,0),...,(k,k)}`.
pub const START_STATE: u32 = 1;

pub fn build(k: u8) -> TableDfa {
    let window = diag(k);
    let vec_count = 1usize << window;

    let mut repo: Vec<SparseState> = Vec::new();
    let mut index_of: HashMap<SparseState, u32> = HashMap::new();
    let mut queue: VecDeque<u32> = VecDeque::new();
    let mut transitions: Vec<Vec<(u8, u32)>> = Vec::new();

    let failed = SparseState::EMPTY;
    index_of.insert(failed, FAILED_STATE);
    repo.push(failed);
    transitions.push(vec![(0u8, FAILED_STATE); vec_count]);
    queue.push_back(FAILED_STATE);

    let mut start = SparseState::EMPTY;
    for i in 0..=(k as u32) {
        start.append(i, i as u8);
    }
    index_of.insert(start, START_STATE);
    repo.push(start);
    transitions.push(vec![(0u8, FAILED_STATE); vec_count]);
    queue.push_back(START_STATE);

    while let Some(id) = queue.pop_front() {
        let sigma = repo[id as usize];
        if sigma.is_empty() {
            // Every char_vec self-loops: once doomed, always doomed.
            continue;
        }
        let mut row = vec![(0u8, FAILED_STATE); vec_count];
        for cv in 0..vec_count {
            let next = stepping::step_relative(&sigma, k, |i| {
                let i = i as usize;
                i < window && (cv >> i) & 1 == 1
            });
            if next.is_empty() {
                row[cv] = (1, FAILED_STATE);
                continue;
            }
            let shift = next.index(0);
            let mut normalized = SparseState::EMPTY;
            for (idx, cost) in next.iter() {
                normalized.append(idx - shift, cost);
            }
            let next_id = *index_of.entry(normalized).or_insert_with(|| {
                let new_id = repo.len() as u32;
                repo.push(normalized);
                transitions.push(vec![(0u8, FAILED_STATE); vec_count]);
                queue.push_back(new_id);
                new_id
            });
            row[cv] = (shift as u8, next_id);
        }
        transitions[id as usize] = row;
    }

    let num_states = repo.len();
    let mut edits = vec![vec![0u8; window]; num_states];
    for (id, sigma) in repo.iter().enumerate() {
        for j in 0..window {
            if sigma.is_empty() {
                edits[id][j] = k + 1;
                continue;
            }
            let mut best = k + 1;
            for (idx, cost) in sigma.iter() {
                let delta = (idx as i64 - j as i64).unsigned_abs() as u8;
                best = std::cmp::min(best, std::cmp::min(delta.saturating_add(cost), k + 1));
            }
            edits[id][j] = best;
        }
    }

    log::debug!("table DFA built for k={k}: {num_states} parametric states");
    TableDfa { k, window, num_states, transitions, edits }
}
