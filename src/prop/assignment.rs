//! Partial assignment, the propagation trail, and backtracking.
use partial_ref::{partial, PartialRef};

use crate::context::{AssignmentP, Context, HwP, ImplGraphP, TrailP, VsidsP};
use crate::lit::{Lit, LitIdx, Var};

use super::graph::Reason;

/// The current partial assignment, one `Option<bool>` per variable (`None` = unassigned).
#[derive(Default)]
pub struct Assignment {
    assignment: Vec<Option<bool>>,
}

impl Assignment {
    pub fn set_var_count(&mut self, count: usize) {
        self.assignment.resize(count + 1, None);
    }

    /// The full assignment vector, indexed by [`Var::index`].
    pub fn assignment(&self) -> &[Option<bool>] {
        &self.assignment
    }

    pub fn var_value(&self, var: Var) -> Option<bool> {
        self.assignment[var.index()]
    }

    pub fn lit_value(&self, lit: Lit) -> Option<bool> {
        self.assignment[lit.index()].map(|b| b ^ lit.is_negative())
    }

    pub fn lit_is_true(&self, lit: Lit) -> bool {
        self.lit_value(lit) == Some(true)
    }

    pub fn lit_is_false(&self, lit: Lit) -> bool {
        self.lit_value(lit) == Some(false)
    }

    pub fn lit_is_unassigned(&self, lit: Lit) -> bool {
        self.assignment[lit.index()].is_none()
    }

    fn assign_lit(&mut self, lit: Lit) {
        debug_assert!(self.assignment[lit.index()].is_none());
        self.assignment[lit.index()] = Some(lit.is_positive());
    }

    fn unassign(&mut self, var: Var) {
        self.assignment[var.index()] = None;
    }
}

/// The propagation trail: assigned literals in assignment order, with a `prop_head` index
/// separating already-propagated literals (front) from pending ones (back), and one delimiter per
/// decision level recording the trail length when that decision was pushed.
#[derive(Default)]
pub struct Trail {
    trail: Vec<Lit>,
    prop_head: usize,
    delimiters: Vec<LitIdx>,
}

impl Trail {
    /// The next literal due for propagation, if any.
    pub fn prop_head_lit(&self) -> Option<Lit> {
        self.trail.get(self.prop_head).cloned()
    }

    /// Pops the next pending literal off the propagation queue (distinct from the trail itself,
    /// which is only ever truncated on backtrack).
    pub fn pop_prop_head(&mut self) -> Option<Lit> {
        let lit = self.prop_head_lit();
        if lit.is_some() {
            self.prop_head += 1;
        }
        lit
    }

    pub fn trail(&self) -> &[Lit] {
        &self.trail
    }

    pub fn prop_head(&self) -> usize {
        self.prop_head
    }

    pub fn fully_propagated(&self) -> bool {
        self.prop_head == self.trail.len()
    }

    /// Starts a new decision level. Does not enqueue the decision itself.
    pub fn new_decision_level(&mut self) {
        self.delimiters.push(self.trail.len() as LitIdx);
    }

    /// The current decision level (`0` at the root).
    pub fn current_level(&self) -> usize {
        self.delimiters.len()
    }
}

/// Enqueues the assignment of `lit` to true.
///
/// Updates the assignment and the trail but performs no propagation. `lit` must be unassigned.
/// Also mirrors the new assignment into hardware memory, per the single-writer contract described
/// on [`HwBridge`](crate::hw::bridge::HwBridge): the host is the only party that ever writes
/// assignment memory, and it does so for every assignment regardless of which propagator produced
/// it.
pub fn enqueue_assignment(
    mut ctx: partial!(Context, mut AssignmentP, mut HwP, mut ImplGraphP, mut TrailP),
    lit: Lit,
    reason: Reason,
) {
    ctx.part_mut(AssignmentP).assign_lit(lit);
    ctx.part_mut(HwP).mirror_assign(lit);

    let (trail, mut ctx) = ctx.split_part_mut(TrailP);
    trail.trail.push(lit);
    let level = trail.delimiters.len();

    ctx.part_mut(ImplGraphP).set_node(lit.var(), reason, level);
}

/// Unwinds the trail down to (not including) the first literal of level `level + 1`.
///
/// Resets each unwound variable to unassigned and re-admits it to the VSIDS heap; if a hardware
/// bridge is active, mirrors the newly-unassigned variables down to the hardware assignment
/// memory, per the host-side reconciliation contract.
pub fn backtrack(
    mut ctx: partial!(Context, mut AssignmentP, mut TrailP, mut VsidsP, mut HwP),
    level: usize,
) {
    let (assignment, mut ctx) = ctx.split_part_mut(AssignmentP);
    let (trail, mut ctx) = ctx.split_part_mut(TrailP);

    if level >= trail.delimiters.len() {
        return;
    }

    let new_trail_len = trail.delimiters[level] as usize;

    trail.prop_head = new_trail_len;
    trail.delimiters.truncate(level);

    for &lit in &trail.trail[new_trail_len..] {
        let var = lit.var();
        ctx.part_mut(VsidsP).make_available(var);
        assignment.unassign(var);
        ctx.part_mut(HwP).clear_assign(var);
    }
    trail.trail.truncate(new_trail_len);
}
