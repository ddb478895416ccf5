//! Implicit realization: every capability method runs the stepping kernel (C3) on
//! demand against the target's code points. No per-state storage beyond the target
//! itself, so `build()` for this realization is O(|T|) and `memory_usage()` is just
//! the code-point vector.

use crate::dfa::matcher::DfaMatcher;
use crate::sparse::SparseState;
use crate::stepping;

pub struct ImplicitDfa {
    target: Vec<u32>,
    k: u8,
    cased: bool,
}

impl ImplicitDfa {
    pub fn new(target: Vec<u32>, k: u8, cased: bool) -> Self {
        ImplicitDfa { target, k, cased }
    }

    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.target.len() * std::mem::size_of::<u32>()
    }

    fn n(&self) -> u32 {
        self.target.len() as u32
    }
}

impl DfaMatcher for ImplicitDfa {
    type State = SparseState;
    /// A raw candidate character; self-contained, so `edge_to_u32char` needs no state.
    type Edge = u32;

    fn start(&self) -> Self::State {
        stepping::start(self.k, self.n())
    }

    fn is_match(&self, s: Self::State) -> bool {
        stepping::is_match(&s, self.n())
    }

    fn can_match(&self, s: Self::State) -> bool {
        stepping::can_match(&s)
    }

    fn match_edit_distance(&self, s: Self::State) -> u8 {
        stepping::match_edit_distance(&s, self.n(), self.k)
    }

    fn match_input(&self, s: Self::State, c: u32) -> Self::State {
        stepping::step(&s, c, &self.target, self.k)
    }

    fn match_wildcard(&self, s: Self::State) -> Self::State {
        stepping::wildcard_step(&s, &self.target, self.k)
    }

    fn has_higher_out_edge(&self, s: Self::State, c: u32) -> bool {
        let has_explicit_higher = s
            .iter()
            .any(|(i, _cost)| (i as usize) < self.target.len() && self.target[i as usize] > c);
        has_explicit_higher || stepping::can_wildcard_step(&s, &self.target, self.k)
    }

    fn has_exact_explicit_out_edge(&self, s: Self::State, c: u32) -> bool {
        s.iter().any(|(i, _cost)| (i as usize) < self.target.len() && self.target[i as usize] == c)
    }

    fn lowest_higher_explicit_out_edge(&self, s: Self::State, c: u32) -> Self::Edge {
        s.iter()
            .filter_map(|(i, _cost)| {
                let i = i as usize;
                if i < self.target.len() && self.target[i] > c {
                    Some(self.target[i])
                } else {
                    None
                }
            })
            .min()
            .expect("lowest_higher_explicit_out_edge called without a higher explicit edge")
    }

    fn smallest_explicit_out_edge(&self, s: Self::State) -> Self::Edge {
        s.iter()
            .filter_map(|(i, _cost)| {
                let i = i as usize;
                if i < self.target.len() {
                    Some(self.target[i])
                } else {
                    None
                }
            })
            .min()
            .expect("smallest_explicit_out_edge called without an explicit edge")
    }

    fn edge_to_u32char(&self, e: Self::Edge) -> u32 {
        e
    }

    fn edge_to_state(&self, s: Self::State, e: Self::Edge) -> Self::State {
        self.match_input(s, e)
    }

    fn valid_state(&self, _s: Self::State) -> bool {
        true
    }

    fn valid_edge(&self, _e: Self::Edge) -> bool {
        true
    }

    fn is_cased(&self) -> bool {
        self.cased
    }
}
