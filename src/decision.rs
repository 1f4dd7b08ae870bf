//! Decision heuristic dispatch.
mod vsids;

pub use vsids::Vsids;

use partial_ref::{partial, PartialRef};

use crate::context::{AssignmentP, Context, HwP, ImplGraphP, TrailP, VsidsP};
use crate::lit::Var;
use crate::prop::{enqueue_assignment, Reason};

/// Picks the next decision variable, or `None` if every variable is assigned (the formula is SAT).
///
/// Variables popped off the VSIDS heap may already be assigned again if they were bumped while
/// assigned and only later unassigned by backtracking past a point where they were re-admitted;
/// [`Vsids::make_available`] is only ever called from [`backtrack`](crate::prop::backtrack) and
/// from [`Vsids::set_var_count`] for newly-created variables, so in practice every popped variable
/// is unassigned, but the check is kept to avoid relying on that as an invariant enforced
/// elsewhere.
pub fn pick_decision_var(
    mut ctx: partial!(Context, mut VsidsP, AssignmentP),
) -> Option<Var> {
    loop {
        let var = ctx.part_mut(VsidsP).next()?;
        if ctx.part(AssignmentP).var_value(var).is_none() {
            return Some(var);
        }
    }
}

/// Starts a new decision level and enqueues `var` decided to FALSE (per the fixed FALSE-first
/// polarity policy).
pub fn make_decision(
    mut ctx: partial!(Context, mut AssignmentP, mut HwP, mut ImplGraphP, mut TrailP),
    var: Var,
) {
    ctx.part_mut(TrailP).new_decision_level();
    enqueue_assignment(ctx.borrow(), var.negative(), Reason::Decided);
}
