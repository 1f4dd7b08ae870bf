//! The implication graph: for every assigned variable, the reason it was assigned and the
//! decision level at which that happened.
use crate::clause::{ClauseDb, ClauseId};
use crate::lit::{Lit, LitIdx, Var};

/// Why a variable was assigned.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Reason {
    /// A decision, or a root-level unit clause, or a learned clause of size 1. There is nothing to
    /// resolve on.
    Decided,
    /// A clause whose other literals (`lits[1..]`) were all false, forcing `lits[0]`.
    Clause(ClauseId),
}

impl Reason {
    /// The literals that caused the propagation (excludes the propagated literal itself).
    pub fn lits<'a>(&self, clause_db: &'a ClauseDb) -> &'a [Lit] {
        match self {
            Reason::Decided => &[],
            Reason::Clause(id) => &clause_db.clause(*id).lits()[1..],
        }
    }
}

/// A clause found to be false under the current assignment during propagation.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct Conflict(pub ClauseId);

impl Conflict {
    /// All literals of the conflicting clause.
    pub fn lits<'a>(&self, clause_db: &'a ClauseDb) -> &'a [Lit] {
        clause_db.clause(self.0).lits()
    }
}

/// Node of the implication graph for one assigned variable.
#[derive(Copy, Clone)]
pub struct ImplNode {
    pub reason: Reason,
    pub level: LitIdx,
}

/// The implication graph.
///
/// A DAG over all currently assigned variables, with unit clauses and decisions as sources. Stale
/// (unassigned) entries are never read; [`super::assignment::Assignment`] is the source of truth
/// for which variables are currently assigned.
#[derive(Default)]
pub struct ImplGraph {
    nodes: Vec<ImplNode>,
}

impl ImplGraph {
    pub fn set_var_count(&mut self, count: usize) {
        self.nodes.resize(
            count + 1,
            ImplNode {
                reason: Reason::Decided,
                level: 0,
            },
        );
    }

    /// The reason a variable was assigned. Stale if the variable isn't assigned.
    pub fn reason(&self, var: Var) -> Reason {
        self.nodes[var.index()].reason
    }

    /// The decision level a variable was assigned at. Stale if the variable isn't assigned.
    pub fn level(&self, var: Var) -> usize {
        self.nodes[var.index()].level as usize
    }

    pub fn set_node(&mut self, var: Var, reason: Reason, level: usize) {
        self.nodes[var.index()] = ImplNode {
            reason,
            level: level as LitIdx,
        };
    }
}
