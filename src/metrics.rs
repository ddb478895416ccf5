//! Lightweight, dependency-free build/match counters, surfaced through `log` rather
//! than a metrics backend (this crate has no ambient runtime to host one). Counting
//! is process-wide and approximate — `Ordering::Relaxed` is enough since these numbers
//! are for log-line context, not correctness.

use std::sync::atomic::{AtomicU64, Ordering};

static DFAS_BUILT: AtomicU64 = AtomicU64::new(0);
static MATCHES_RUN: AtomicU64 = AtomicU64::new(0);

pub fn record_build() {
    let count = DFAS_BUILT.fetch_add(1, Ordering::Relaxed) + 1;
    log::trace!("levenshtein-dfa: {count} DFA(s) built so far");
}

pub fn record_match() {
    let count = MATCHES_RUN.fetch_add(1, Ordering::Relaxed) + 1;
    if count % 100_000 == 0 {
        log::trace!("levenshtein-dfa: {count} match_str calls so far");
    }
}
