//! Conflict-driven clause learning: the top-level search loop.
use partial_ref::{partial, PartialRef};

use crate::analyze_conflict::analyze_conflict;
use crate::config::PropagationMode;
use crate::context::{
    AnalyzeConflictP, AssignmentP, ClauseDbP, Context, HwP, ImplGraphP, SolverConfigP,
    SolverStateP, TrailP, VsidsP, WatchlistsP,
};
use crate::decision::{make_decision, pick_decision_var};
use crate::error::SolverError;
use crate::prop::{backtrack, enqueue_assignment, propagate, Conflict, Reason};
use crate::state::SatState;

/// Runs propagation once, then either resolves a conflict, makes a decision, or declares the
/// formula satisfied.
///
/// Called repeatedly by [`crate::solver::Solver::solve`] until
/// `ctx.part(SolverStateP).sat_state != SatState::Unknown`.
pub fn conflict_step(
    mut ctx: partial!(
        Context,
        mut AnalyzeConflictP,
        mut AssignmentP,
        mut ClauseDbP,
        mut HwP,
        mut ImplGraphP,
        SolverConfigP,
        mut SolverStateP,
        mut TrailP,
        mut VsidsP,
        mut WatchlistsP,
    ),
) -> Result<(), SolverError> {
    let conflict = match find_conflict(ctx.borrow())? {
        Some(conflict) => conflict,
        None => {
            ctx.part_mut(SolverStateP).sat_state = SatState::Sat;
            return Ok(());
        }
    };

    ctx.part_mut(SolverStateP).conflicts += 1;

    let backtrack_to = analyze_conflict(ctx.borrow(), conflict);

    backtrack(ctx.borrow(), backtrack_to);

    let learnt = ctx.part(AnalyzeConflictP).clause().to_vec();

    if learnt.is_empty() {
        ctx.part_mut(SolverStateP).sat_state = SatState::Unsat;
        return Ok(());
    }

    let reason = if learnt.len() == 1 {
        Reason::Decided
    } else {
        let cid = ctx.part_mut(ClauseDbP).add_clause(&learnt, true);
        ctx.part_mut(WatchlistsP)
            .watch_clause(cid, [learnt[0], learnt[1]]);
        ctx.part_mut(HwP).mirror_learnt_clause(cid, &learnt);
        ctx.part_mut(SolverStateP).learned_clauses += 1;
        Reason::Clause(cid)
    };

    enqueue_assignment(ctx.borrow(), learnt[0], reason);

    Ok(())
}

/// Propagates to a fixed point and returns the conflict found, if any, or `None` once every
/// variable is assigned.
fn find_conflict(
    mut ctx: partial!(
        Context,
        mut AssignmentP,
        mut ClauseDbP,
        mut HwP,
        mut ImplGraphP,
        SolverConfigP,
        mut SolverStateP,
        mut TrailP,
        mut VsidsP,
        mut WatchlistsP,
    ),
) -> Result<Option<Conflict>, SolverError> {
    loop {
        let before = ctx.part(TrailP).trail().len();

        let result = match ctx.part(SolverConfigP).propagation_mode {
            PropagationMode::Software => propagate(ctx.borrow()),
            PropagationMode::Hardware => crate::hw::bridge::propagate_hw(ctx.borrow())?,
        };

        let after = ctx.part(TrailP).trail().len();
        ctx.part_mut(SolverStateP).propagations += (after - before) as u64;

        if let Err(conflict) = result {
            return Ok(Some(conflict));
        }

        match pick_decision_var(ctx.borrow()) {
            Some(var) => {
                make_decision(ctx.borrow(), var);
                ctx.part_mut(SolverStateP).decisions += 1;
            }
            None => return Ok(None),
        }
    }
}
