//! First-UIP conflict analysis.
use std::mem::swap;

use partial_ref::{partial, PartialRef};

use crate::clause::ClauseDb;
use crate::context::{AnalyzeConflictP, ClauseDbP, Context, ImplGraphP, TrailP, VsidsP};
use crate::lit::{Lit, Var};
use crate::prop::{Conflict, Reason};

/// Scratch space for conflict analysis, reused across conflicts to avoid reallocating.
#[derive(Default)]
pub struct AnalyzeConflict {
    /// The learned clause, once analysis finishes. `clause[0]` is the negated UIP.
    clause: Vec<Lit>,
    /// How many literals of the clause under construction are at the conflict's decision level.
    current_level_count: usize,
    /// Whether a variable's literal is present in the clause under construction (or has already
    /// been resolved away), indexed by [`Var::index`].
    seen: Vec<bool>,
    /// Variables with `seen` set, so it can be cleared without rescanning the whole vector.
    to_clean: Vec<Var>,
}

impl AnalyzeConflict {
    pub fn set_var_count(&mut self, count: usize) {
        self.seen.resize(count + 1, false);
    }

    /// The learned clause from the most recently completed analysis.
    pub fn clause(&self) -> &[Lit] {
        &self.clause
    }
}

/// Performs first-UIP conflict analysis, returning the backtrack level for the learned clause.
///
/// Bumps the VSIDS activity of every variable touched during resolution and applies the decay
/// afterwards. The learned clause is left in [`AnalyzeConflict::clause`], with the asserted
/// literal (the negated UIP) at position 0 and, if the clause has more than one literal, the
/// literal of the highest lower level at position 1.
pub fn analyze_conflict(
    mut ctx: partial!(Context, mut AnalyzeConflictP, mut VsidsP, ClauseDbP, ImplGraphP, TrailP),
    conflict: Conflict,
) -> usize {
    {
        let analyze = ctx.part_mut(AnalyzeConflictP);
        analyze.clause.clear();
        analyze.current_level_count = 0;
    }

    let current_level = ctx.part(TrailP).current_level();

    if current_level == 0 {
        // A conflict with no decisions made: the empty clause is implied, the formula is UNSAT.
        return 0;
    }

    let (clause_db, mut ctx) = ctx.split_part(ClauseDbP);
    for &lit in conflict.lits(clause_db) {
        add_literal(ctx.borrow(), lit);
    }

    let (trail, mut ctx) = ctx.split_part(TrailP);
    for &lit in trail.trail().iter().rev() {
        let analyze = ctx.part_mut(AnalyzeConflictP);
        if !analyze.seen[lit.index()] {
            continue;
        }
        analyze.seen[lit.index()] = false;
        analyze.current_level_count -= 1;

        if analyze.current_level_count == 0 {
            // `lit` is the last current-level literal still present: it is the UIP.
            analyze.clause.push(!lit);
            let last = analyze.clause.len() - 1;
            analyze.clause.swap(0, last);
            break;
        }

        let (impl_graph, mut ctx) = ctx.split_part(ImplGraphP);
        let reason = impl_graph.reason(lit.var());
        let (clause_db, mut ctx) = ctx.split_part(ClauseDbP);
        for &reason_lit in reason.lits(clause_db) {
            add_literal(ctx.borrow(), reason_lit);
        }
    }

    let (analyze, mut ctx) = ctx.split_part_mut(AnalyzeConflictP);
    for var in analyze.to_clean.drain(..) {
        analyze.seen[var.index()] = false;
    }

    // Move the highest lower-level literal into position 1, so the two watched positions straddle
    // the two most recent decision levels on the trail after backtracking.
    let mut backtrack_level = 0;
    if analyze.clause.len() > 1 {
        let (prefix, rest) = analyze.clause.split_at_mut(2);
        let second = &mut prefix[1];
        backtrack_level = ctx.part(ImplGraphP).level(second.var());
        for lit in rest.iter_mut() {
            let level = ctx.part(ImplGraphP).level(lit.var());
            if level > backtrack_level {
                backtrack_level = level;
                swap(second, lit);
            }
        }
    }

    ctx.part_mut(VsidsP).decay();

    backtrack_level
}

/// Adds a literal encountered during resolution to the clause under construction: bumps its
/// variable's activity and either counts it towards the current level or appends it to the
/// learned clause.
fn add_literal(
    mut ctx: partial!(Context, mut AnalyzeConflictP, mut VsidsP, ImplGraphP, TrailP),
    lit: Lit,
) {
    let (analyze, mut ctx) = ctx.split_part_mut(AnalyzeConflictP);
    let level = ctx.part(ImplGraphP).level(lit.var());

    // Literals forced at the root are already false everywhere; nothing to resolve on them.
    if level == 0 || analyze.seen[lit.index()] {
        return;
    }

    ctx.part_mut(VsidsP).bump(lit.var());
    analyze.seen[lit.index()] = true;
    analyze.to_clean.push(lit.var());

    if level == ctx.part(TrailP).current_level() {
        analyze.current_level_count += 1;
    } else {
        analyze.clause.push(lit);
    }
}
