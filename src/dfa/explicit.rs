//! Explicit realization: a graph of nodes built once via BFS over the implicit
//! realization's sparse states, then referenced purely by `u32` index thereafter.
//!
//! Nodes live in an arena (`Vec<DfaNode>`); neighbors are `u32` indices rather than
//! pointers, and BFS construction means most forward references point to
//! higher-numbered nodes (cache-friendly to walk). A node's absence of an edge is
//! represented by the sentinel `DOOMED = u32::MAX`, which doubles as the "absorbing
//! doomed state" id itself: stepping into it and then stepping again just yields
//! `DOOMED` right back, since it is never actually stored in the node arena.

use std::collections::{HashMap, VecDeque};

use crate::dfa::matcher::DfaMatcher;
use crate::sparse::{SparseState, MAX_DIAG};
use crate::stepping;

/// Sentinel used both for "no wildcard edge recorded" and as the virtual absorbing
/// state reached by stepping anywhere from a node that has none.
pub const DOOMED: u32 = u32::MAX;

#[derive(Clone, Copy, Debug, Default)]
struct OutEdge {
    ch: u32,
    dest: u32,
}

#[derive(Clone, Debug)]
pub struct DfaNode {
    out_edges: [OutEdge; MAX_DIAG],
    num_edges: u8,
    wildcard_edge: u32,
    /// Match edit distance if accepting, `> k` otherwise.
    edits: u8,
}

impl Default for DfaNode {
    fn default() -> Self {
        DfaNode {
            out_edges: [OutEdge::default(); MAX_DIAG],
            num_edges: 0,
            wildcard_edge: DOOMED,
            edits: u8::MAX,
        }
    }
}

pub struct ExplicitDfa {
    nodes: Vec<DfaNode>,
    k: u8,
    cased: bool,
}

impl ExplicitDfa {
    pub fn build(target: &[u32], k: u8, cased: bool) -> Self {
        log::trace!("building explicit DFA: target_len={} k={}", target.len(), k);
        let nodes = build_nodes(target, k);
        log::debug!("explicit DFA built: {} nodes", nodes.len());
        ExplicitDfa { nodes, k, cased }
    }

    pub fn memory_usage(&self) -> usize {
        std::mem::size_of::<Self>() + self.nodes.len() * std::mem::size_of::<DfaNode>()
    }

    pub fn dump_graphviz<W: std::io::Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "digraph levenshtein_dfa {{")?;
        for (id, node) in self.nodes.iter().enumerate() {
            let label = if node.edits <= self.k {
                format!("{id}({})", node.edits)
            } else {
                format!("{id}")
            };
            writeln!(out, "  {id} [label=\"{label}\"];")?;
            for e in &node.out_edges[..node.num_edges as usize] {
                writeln!(out, "  {id} -> {} [label=\"{}\"];", e.dest, char_label(e.ch))?;
            }
            if node.wildcard_edge != DOOMED {
                writeln!(out, "  {id} -> {} [label=\"*\"];", node.wildcard_edge)?;
            }
        }
        writeln!(out, "}}")
    }
}

fn char_label(c: u32) -> String {
    match char::from_u32(c) {
        Some(ch) => ch.to_string(),
        None => format!("U+{c:04X}"),
    }
}

fn build_nodes(target: &[u32], k: u8) -> Vec<DfaNode> {
    let n = target.len() as u32;
    let mut id_of: HashMap<SparseState, u32> = HashMap::new();
    let mut nodes: Vec<DfaNode> = Vec::new();
    let mut queue: VecDeque<(u32, SparseState)> = VecDeque::new();

    let start = stepping::start(k, n);
    id_of.insert(start, 0);
    nodes.push(DfaNode::default());
    queue.push_back((0, start));

    while let Some((id, sigma)) = queue.pop_front() {
        let edits = stepping::match_edit_distance(&sigma, n, k);

        let mut out_edges = [OutEdge::default(); MAX_DIAG];
        let mut num_edges = 0u8;
        for c in stepping::transitions(&sigma, target).iter() {
            let next = stepping::step(&sigma, c, target, k);
            debug_assert!(!next.is_empty(), "a transitions()-derived char must always step to a live state");
            let next_id = *id_of.entry(next).or_insert_with(|| {
                let new_id = nodes.len() as u32;
                nodes.push(DfaNode::default());
                queue.push_back((new_id, next));
                new_id
            });
            out_edges[num_edges as usize] = OutEdge { ch: c, dest: next_id };
            num_edges += 1;
        }

        let wildcard = stepping::wildcard_step(&sigma, target, k);
        let wildcard_edge = if wildcard.is_empty() {
            DOOMED
        } else {
            *id_of.entry(wildcard).or_insert_with(|| {
                let new_id = nodes.len() as u32;
                nodes.push(DfaNode::default());
                queue.push_back((new_id, wildcard));
                new_id
            })
        };

        nodes[id as usize] = DfaNode { out_edges, num_edges, wildcard_edge, edits };
    }

    nodes
}

impl DfaMatcher for ExplicitDfa {
    type State = u32;
    /// Self-contained `(char, dest_node)` pair, so `edge_to_u32char` needs no state.
    type Edge = (u32, u32);

    fn start(&self) -> Self::State {
        0
    }

    fn is_match(&self, s: Self::State) -> bool {
        s != DOOMED && self.nodes[s as usize].edits <= self.k
    }

    fn can_match(&self, s: Self::State) -> bool {
        s != DOOMED
    }

    fn match_edit_distance(&self, s: Self::State) -> u8 {
        if self.is_match(s) {
            self.nodes[s as usize].edits
        } else {
            self.k + 1
        }
    }

    fn match_input(&self, s: Self::State, c: u32) -> Self::State {
        if s == DOOMED {
            return DOOMED;
        }
        let node = &self.nodes[s as usize];
        let edges = &node.out_edges[..node.num_edges as usize];
        match edges.binary_search_by_key(&c, |e| e.ch) {
            Ok(i) => edges[i].dest,
            Err(_) => node.wildcard_edge,
        }
    }

    fn match_wildcard(&self, s: Self::State) -> Self::State {
        if s == DOOMED {
            DOOMED
        } else {
            self.nodes[s as usize].wildcard_edge
        }
    }

    fn has_higher_out_edge(&self, s: Self::State, c: u32) -> bool {
        if s == DOOMED {
            return false;
        }
        let node = &self.nodes[s as usize];
        let edges = &node.out_edges[..node.num_edges as usize];
        edges.iter().any(|e| e.ch > c) || node.wildcard_edge != DOOMED
    }

    fn has_exact_explicit_out_edge(&self, s: Self::State, c: u32) -> bool {
        if s == DOOMED {
            return false;
        }
        let node = &self.nodes[s as usize];
        let edges = &node.out_edges[..node.num_edges as usize];
        edges.binary_search_by_key(&c, |e| e.ch).is_ok()
    }

    fn lowest_higher_explicit_out_edge(&self, s: Self::State, c: u32) -> Self::Edge {
        let node = &self.nodes[s as usize];
        let edges = &node.out_edges[..node.num_edges as usize];
        edges
            .iter()
            .find(|e| e.ch > c)
            .map(|e| (e.ch, e.dest))
            .expect("lowest_higher_explicit_out_edge called without a higher explicit edge")
    }

    fn smallest_explicit_out_edge(&self, s: Self::State) -> Self::Edge {
        let node = &self.nodes[s as usize];
        assert!(node.num_edges > 0, "smallest_explicit_out_edge called without an explicit edge");
        let e = node.out_edges[0];
        (e.ch, e.dest)
    }

    fn edge_to_u32char(&self, e: Self::Edge) -> u32 {
        e.0
    }

    fn edge_to_state(&self, _s: Self::State, e: Self::Edge) -> Self::State {
        e.1
    }

    fn valid_state(&self, s: Self::State) -> bool {
        s == DOOMED || (s as usize) < self.nodes.len()
    }

    fn valid_edge(&self, _e: Self::Edge) -> bool {
        true
    }

    fn is_cased(&self) -> bool {
        self.cased
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utf32(s: &str) -> Vec<u32> {
        s.chars().map(|c| c as u32).collect()
    }

    #[test]
    fn start_node_is_zero() {
        let dfa = ExplicitDfa::build(&utf32("food"), 1, true);
        assert_eq!(dfa.start(), 0);
    }

    #[test]
    fn exact_target_is_accepted_with_zero_edits() {
        let dfa = ExplicitDfa::build(&utf32("food"), 1, true);
        let mut s = dfa.start();
        for c in utf32("food") {
            s = dfa.match_input(s, c);
        }
        assert!(dfa.is_match(s));
        assert_eq!(dfa.match_edit_distance(s), 0);
    }

    #[test]
    fn out_edges_are_sorted_ascending() {
        let dfa = ExplicitDfa::build(&utf32("food"), 1, true);
        let node = &dfa.nodes[0];
        let chars: Vec<u32> = node.out_edges[..node.num_edges as usize].iter().map(|e| e.ch).collect();
        let mut sorted = chars.clone();
        sorted.sort_unstable();
        assert_eq!(chars, sorted);
    }

    #[test]
    fn graphviz_dump_contains_digraph_header() {
        let dfa = ExplicitDfa::build(&utf32("abc"), 1, true);
        let mut buf = Vec::new();
        dfa.dump_graphviz(&mut buf).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.starts_with("digraph"));
        assert!(s.contains("*"));
    }
}
