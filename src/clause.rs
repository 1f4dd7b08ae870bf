//! Clause storage.
//!
//! Clauses are append-only: original clauses are inserted while the formula is loaded, learned
//! clauses are appended on every conflict, and nothing is ever deleted or reduced (there is no
//! clause-database reduction pass in this design, unlike most production CDCL solvers). Clauses are
//! identified by a dense, stable integer id assigned at insertion time so that reasons can be
//! stored as plain integers instead of pointers -- this is also exactly the representation the
//! hardware clause memory uses.
use crate::lit::Lit;

/// A stable, dense identifier for a clause in the [`ClauseDb`].
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct ClauseId(u32);

impl ClauseId {
    pub fn from_index(index: usize) -> ClauseId {
        ClauseId(index as u32)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A clause: an ordered list of literal codes, with positions `0` and `1` watched for clauses of
/// size >= 2.
pub struct Clause {
    lits: Vec<Lit>,
    learnt: bool,
}

impl Clause {
    pub fn lits(&self) -> &[Lit] {
        &self.lits
    }

    pub fn lits_mut(&mut self) -> &mut [Lit] {
        &mut self.lits
    }

    pub fn len(&self) -> usize {
        self.lits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lits.is_empty()
    }

    pub fn learnt(&self) -> bool {
        self.learnt
    }
}

/// Append-only database of original and learned clauses.
#[derive(Default)]
pub struct ClauseDb {
    clauses: Vec<Clause>,
}

impl ClauseDb {
    /// Adds a clause to the database, returning its new, dense id.
    ///
    /// The caller is responsible for setting up watches for clauses of size >= 2.
    pub fn add_clause(&mut self, lits: &[Lit], learnt: bool) -> ClauseId {
        let id = ClauseId::from_index(self.clauses.len());
        self.clauses.push(Clause {
            lits: lits.to_vec(),
            learnt,
        });
        id
    }

    pub fn clause(&self, id: ClauseId) -> &Clause {
        &self.clauses[id.index()]
    }

    pub fn clause_mut(&mut self, id: ClauseId) -> &mut Clause {
        &mut self.clauses[id.index()]
    }

    pub fn len(&self) -> usize {
        self.clauses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lits;

    #[test]
    fn ids_are_dense_and_stable() {
        let mut db = ClauseDb::default();
        let a = db.add_clause(&lits![1, 2, 3], false);
        let b = db.add_clause(&lits![-1, -2], true);
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(db.clause(a).len(), 3);
        assert!(db.clause(b).learnt());
        assert!(!db.clause(a).learnt());
    }
}
