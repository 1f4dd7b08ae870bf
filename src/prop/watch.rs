//! Watchlists used to detect clauses that became unit.
//!
//! Each clause of size >= 2 is watched by exactly two of its literals (its positions 0 and 1).
//! Whenever a literal is falsified its watch list is scanned and, for each clause found there, the
//! watches are either kept or moved to restore the invariant that at least one watched literal is
//! not false (unless the other is already true). This mirrors the hardware watch-list memory
//! exactly: a length array and a clause-id array, both indexed by literal code.
use crate::clause::ClauseId;
use crate::lit::Lit;

/// Per-literal lists of clauses watching that literal.
#[derive(Default)]
pub struct Watchlists {
    /// Indexed by literal code. Entry `0`/`1` are unused, matching the reserved literal codes.
    watches: Vec<Vec<ClauseId>>,
}

impl Watchlists {
    /// Update structures for a new variable count.
    pub fn set_var_count(&mut self, count: usize) {
        self.watches.resize((count + 1) * 2, Vec::new());
    }

    /// Starts watching a clause on its first two literals.
    pub fn watch_clause(&mut self, cid: ClauseId, lits: [Lit; 2]) {
        self.watches[lits[0].code() as usize].push(cid);
        self.watches[lits[1].code() as usize].push(cid);
    }

    /// The watch list for a given literal.
    pub fn watched_by(&self, lit: Lit) -> &[ClauseId] {
        &self.watches[lit.code() as usize]
    }

    /// A mutable handle to the watch list for a given literal, used by the propagation loop to
    /// rewrite it in place.
    pub fn watched_by_mut(&mut self, lit: Lit) -> &mut Vec<ClauseId> {
        &mut self.watches[lit.code() as usize]
    }

    /// Makes `lit` additionally watch `cid` (used when a watch is moved during propagation).
    pub fn add_watch(&mut self, lit: Lit, cid: ClauseId) {
        self.watches[lit.code() as usize].push(cid);
    }
}
