//! Table realization: matching against one target by combining the shared,
//! target-independent parametric tables (`table_build`) with a small per-target
//! lookup of local characteristic vectors. `State = (index, state_id)`; `table` and
//! `edits` are effectively static constants (built once per `k`, cached process-wide).

use std::sync::OnceLock;

use crate::dfa::matcher::DfaMatcher;
use crate::dfa::table_build::{self, TableDfa, FAILED_STATE, START_STATE};

fn table_for_k(k: u8) -> &'static TableDfa {
    static K1: OnceLock<TableDfa> = OnceLock::new();
    static K2: OnceLock<TableDfa> = OnceLock::new();
    match k {
        1 => K1.get_or_init(|| table_build::build(1)),
        2 => K2.get_or_init(|| table_build::build(2)),
        _ => unreachable!("k is validated to {{1,2}} before any TableDfa is constructed"),
    }
}

/// Up to `diag(k)` `(char, char_vec)` pairs describing the window of the target
/// starting at a given position, sorted descending by char.
type LookupRow = Vec<(u32, u32)>;

pub struct TableMatcher {
    table: &'static TableDfa,
    lookup: Vec<LookupRow>,
    target_len: usize,
    k: u8,
    cased: bool,
}

impl TableMatcher {
    pub fn build(target: &[u32], k: u8, cased: bool) -> Self {
        let table = table_for_k(k);
        let lookup = build_lookup(target, table.window);
        TableMatcher { table, lookup, target_len: target.len(), k, cased }
    }

    pub fn memory_usage(&self) -> usize {
        let lookup_bytes: usize = self
            .lookup
            .iter()
            .map(|row| row.len() * std::mem::size_of::<(u32, u32)>())
            .sum();
        std::mem::size_of::<Self>() + lookup_bytes
    }

    fn row(&self, index: usize) -> &[(u32, u32)] {
        self.lookup.get(index).map(|r| r.as_slice()).unwrap_or(&[])
    }

    fn char_vec_for(&self, index: usize, c: u32) -> usize {
        self.row(index)
            .iter()
            .find(|(ch, _)| *ch == c)
            .map(|(_, bits)| *bits as usize)
            .unwrap_or(0)
    }

    fn step(&self, index: usize, state_id: u32, char_vec: usize) -> (usize, u32) {
        if state_id == FAILED_STATE {
            return (index + 1, FAILED_STATE);
        }
        let (step, next_id) = self.table.transitions[state_id as usize][char_vec];
        (index + step as usize, next_id)
    }
}

fn build_lookup(target: &[u32], window: usize) -> Vec<LookupRow> {
    let n = target.len();
    let mut lookup = Vec::with_capacity(n);
    for i in 0..n {
        let mut by_char: std::collections::HashMap<u32, u32> = std::collections::HashMap::new();
        for j in 0..window {
            let pos = i + j;
            if pos < n {
                *by_char.entry(target[pos]).or_insert(0) |= 1 << j;
            }
        }
        let mut row: LookupRow = by_char.into_iter().collect();
        row.sort_unstable_by(|a, b| b.0.cmp(&a.0));
        lookup.push(row);
    }
    lookup
}

impl DfaMatcher for TableMatcher {
    type State = (usize, u32);
    /// Self-contained `(char, dest_state)` pair.
    type Edge = (u32, (usize, u32));

    fn start(&self) -> Self::State {
        (0, START_STATE)
    }

    fn is_match(&self, s: Self::State) -> bool {
        let (index, state_id) = s;
        if state_id == FAILED_STATE || index > self.target_len {
            return false;
        }
        let distance_from_end = self.target_len - index;
        if distance_from_end >= self.table.window {
            return false;
        }
        self.table.edits[state_id as usize][distance_from_end] <= self.k
    }

    fn can_match(&self, s: Self::State) -> bool {
        s.1 != FAILED_STATE
    }

    fn match_edit_distance(&self, s: Self::State) -> u8 {
        if self.is_match(s) {
            let (index, state_id) = s;
            self.table.edits[state_id as usize][self.target_len - index]
        } else {
            self.k + 1
        }
    }

    fn match_input(&self, s: Self::State, c: u32) -> Self::State {
        let (index, state_id) = s;
        let cv = self.char_vec_for(index, c);
        self.step(index, state_id, cv)
    }

    fn match_wildcard(&self, s: Self::State) -> Self::State {
        let (index, state_id) = s;
        self.step(index, state_id, 0)
    }

    fn has_higher_out_edge(&self, s: Self::State, c: u32) -> bool {
        if s.1 == FAILED_STATE {
            return false;
        }
        let has_explicit = self
            .row(s.0)
            .iter()
            .any(|&(ch, bits)| ch > c && self.step(s.0, s.1, bits as usize).1 != FAILED_STATE);
        has_explicit || self.can_match(self.match_wildcard(s))
    }

    fn has_exact_explicit_out_edge(&self, s: Self::State, c: u32) -> bool {
        if s.1 == FAILED_STATE {
            return false;
        }
        self.row(s.0)
            .iter()
            .any(|&(ch, bits)| ch == c && self.step(s.0, s.1, bits as usize).1 != FAILED_STATE)
    }

    fn lowest_higher_explicit_out_edge(&self, s: Self::State, c: u32) -> Self::Edge {
        let (ch, dest) = self
            .row(s.0)
            .iter()
            .filter_map(|&(ch, bits)| {
                if ch <= c {
                    return None;
                }
                let dest = self.step(s.0, s.1, bits as usize);
                (dest.1 != FAILED_STATE).then_some((ch, dest))
            })
            .min_by_key(|(ch, _)| *ch)
            .expect("lowest_higher_explicit_out_edge called without a higher explicit edge");
        (ch, dest)
    }

    fn smallest_explicit_out_edge(&self, s: Self::State) -> Self::Edge {
        let (ch, dest) = self
            .row(s.0)
            .iter()
            .filter_map(|&(ch, bits)| {
                let dest = self.step(s.0, s.1, bits as usize);
                (dest.1 != FAILED_STATE).then_some((ch, dest))
            })
            .min_by_key(|(ch, _)| *ch)
            .expect("smallest_explicit_out_edge called without an explicit edge");
        (ch, dest)
    }

    fn edge_to_u32char(&self, e: Self::Edge) -> u32 {
        e.0
    }

    fn edge_to_state(&self, _s: Self::State, e: Self::Edge) -> Self::State {
        e.1
    }

    fn valid_state(&self, s: Self::State) -> bool {
        (s.1 as usize) < self.table.num_states
    }

    fn valid_edge(&self, _e: Self::Edge) -> bool {
        true
    }

    fn is_cased(&self) -> bool {
        self.cased
    }
}
