//! Loading a formula into the solver.
use partial_ref::{partial, PartialRef};

use crate::context::{
    AssignmentP, ClauseDbP, Context, HwP, ImplGraphP, SolverStateP, TrailP, WatchlistsP,
};
use crate::lit::Lit;
use crate::prop::{enqueue_assignment, Reason};
use crate::state::SatState;

/// Adds a clause to the current formula.
///
/// Removes duplicated literals, ignores tautological clauses (e.g. `x ∨ ¬x ∨ y`), and dispatches
/// among unit, empty and long clauses per §4.5 point 1. Does not adjust the solver's variable
/// count; callers must grow it first with [`crate::context::set_var_count`].
pub fn load_clause(
    mut ctx: partial!(
        Context,
        mut AssignmentP,
        mut ClauseDbP,
        mut HwP,
        mut ImplGraphP,
        mut SolverStateP,
        mut TrailP,
        mut WatchlistsP,
    ),
    lits: &[Lit],
) {
    match ctx.part(SolverStateP).sat_state {
        SatState::Unsat => return,
        SatState::Sat => ctx.part_mut(SolverStateP).sat_state = SatState::Unknown,
        SatState::Unknown => {}
    }

    let mut lits = lits.to_vec();
    lits.sort_unstable();
    lits.dedup();

    let mut last = None;
    for &lit in &lits {
        if last == Some(!lit) {
            // Tautological clause, always satisfied; nothing to add.
            return;
        }
        last = Some(lit);
    }

    let mut simplified = Vec::with_capacity(lits.len());
    for &lit in &lits {
        match ctx.part(AssignmentP).lit_value(lit) {
            Some(true) => return,
            Some(false) => {}
            None => simplified.push(lit),
        }
    }

    match simplified[..] {
        [] => ctx.part_mut(SolverStateP).sat_state = SatState::Unsat,
        [lit] => enqueue_assignment(ctx.borrow(), lit, Reason::Decided),
        _ => {
            let cid = ctx.part_mut(ClauseDbP).add_clause(&simplified, false);
            ctx.part_mut(WatchlistsP)
                .watch_clause(cid, [simplified[0], simplified[1]]);
            ctx.part_mut(HwP).mirror_clause(cid, &simplified);
        }
    }
}
