//! Glue between the solver's [`Context`](crate::context::Context) and the hardware pipeline model:
//! owns the hardware-visible memories, mirrors software state into them, and drives rounds through
//! the wire protocol exactly as a host driver talking to real silicon would.
use partial_ref::{partial, PartialRef};

use crate::clause::ClauseId;
use crate::config::SolverConfig;
use crate::context::{AssignmentP, Context, HwP, ImplGraphP, TrailP};
use crate::error::SolverError;
use crate::lit::{Lit, Var};
use crate::prop::{enqueue_assignment, Conflict, Reason};

use super::pipeline::{run_round, ClauseRecord, HwMemories};
use super::protocol::{AssignVal, Response, ResponseDecoder, K_MAX};

/// Owns the hardware-visible memories and drives the cycle-accurate pipeline model.
///
/// Every mutating method here mirrors a change the host just made to its own software structures;
/// [`HwBridge`] never originates state on its own. Limit violations are latched in
/// `resource_error` rather than returned immediately, since the mirroring calls that can trigger
/// them (from [`crate::context::set_var_count`], clause loading, assignment) have no `Result` to
/// report through -- the error surfaces the next time [`propagate_hw`] actually needs the
/// hardware, per the "raised before any hardware interaction" contract in
/// [`SolverError::ResourceExceeded`].
pub struct HwBridge {
    mems: HwMemories,
    cycle_budget: u32,
    max_vars: usize,
    max_clauses: usize,
    max_clause_len: usize,
    max_watch_len: usize,
    clause_count: usize,
    resource_error: Option<String>,
}

impl Default for HwBridge {
    fn default() -> HwBridge {
        let config = SolverConfig::default();
        HwBridge {
            mems: HwMemories::default(),
            cycle_budget: config.hw_cycle_budget,
            max_vars: config.hw_max_vars,
            max_clauses: config.hw_max_clauses,
            max_clause_len: config.hw_max_clause_len,
            max_watch_len: config.hw_max_watch_len,
            clause_count: 0,
            resource_error: None,
        }
    }
}

impl HwBridge {
    pub fn configure(&mut self, config: &SolverConfig) {
        self.cycle_budget = config.hw_cycle_budget;
        self.max_vars = config.hw_max_vars;
        self.max_clauses = config.hw_max_clauses;
        self.max_clause_len = config.hw_max_clause_len;
        self.max_watch_len = config.hw_max_watch_len;
    }

    pub fn set_var_count(&mut self, count: usize) {
        if count > self.max_vars {
            self.resource_error
                .get_or_insert_with(|| format!("variable count {} exceeds hardware limit {}", count, self.max_vars));
            return;
        }
        self.mems.set_var_count(count);
    }

    /// Mirrors `var` becoming unassigned again (a backtrack unwound it).
    ///
    /// A no-op once a resource limit has been exceeded: the mirror is no longer a faithful model
    /// of the device's memories at that point, and [`propagate_hw`] will refuse to use it.
    pub fn clear_assign(&mut self, var: Var) {
        if self.resource_error.is_some() {
            return;
        }
        self.mems.write_assign(var.number() as u16, AssignVal::Unassigned);
    }

    /// Mirrors a newly-assigned literal. A no-op once a resource limit has been exceeded.
    pub fn mirror_assign(&mut self, lit: Lit) {
        if self.resource_error.is_some() {
            return;
        }
        let val = if lit.is_positive() {
            AssignVal::True
        } else {
            AssignVal::False
        };
        self.mems.write_assign(lit.var().number() as u16, val);
    }

    /// Mirrors a clause installed in the software [`ClauseDb`](crate::clause::ClauseDb), including
    /// its watches on its first two literals.
    pub fn mirror_clause(&mut self, cid: ClauseId, lits: &[Lit]) {
        if self.resource_error.is_some() {
            return;
        }
        if self.clause_count >= self.max_clauses {
            self.resource_error.get_or_insert_with(|| {
                format!("clause count exceeds hardware limit {}", self.max_clauses)
            });
            return;
        }
        if lits.len() > self.max_clause_len {
            self.resource_error.get_or_insert_with(|| {
                format!(
                    "clause of {} literals exceeds hardware limit {} (K_MAX={})",
                    lits.len(),
                    self.max_clause_len,
                    K_MAX
                )
            });
            return;
        }

        self.clause_count += 1;

        let mut record = ClauseRecord {
            sat: false,
            size: lits.len() as u8,
            lits: [0; K_MAX],
        };
        for (slot, lit) in record.lits.iter_mut().zip(lits) {
            *slot = lit.code() as u16;
        }

        let cid = cid.index() as u16;
        self.mems.write_clause(cid, record);

        if lits.len() >= 2 {
            for &lit in &lits[..2] {
                let code = lit.code() as usize;
                if self.mems.watch_mem[code].len() >= self.max_watch_len {
                    self.resource_error.get_or_insert_with(|| {
                        format!("watch list exceeds hardware limit {}", self.max_watch_len)
                    });
                    return;
                }
                self.mems.add_watch(lit.code() as u16, cid);
            }
        }
    }

    /// Mirrors a freshly-learned clause, same as [`HwBridge::mirror_clause`].
    pub fn mirror_learnt_clause(&mut self, cid: ClauseId, lits: &[Lit]) {
        self.mirror_clause(cid, lits);
    }

    fn check_limits(&self) -> Result<(), SolverError> {
        match &self.resource_error {
            Some(message) => Err(SolverError::ResourceExceeded(message.clone())),
            None => Ok(()),
        }
    }

    fn run_round(&self, false_lit_code: u16) -> Result<Vec<u8>, SolverError> {
        run_round(&self.mems, false_lit_code, self.cycle_budget)
    }
}

fn lit_from_hw(var: u16, val: AssignVal) -> Lit {
    let var = Var::new(var as u32);
    match val {
        AssignVal::True => var.positive(),
        AssignVal::False | AssignVal::Unassigned => var.negative(),
    }
}

/// Propagates to a fixed point using the hardware pipeline model.
///
/// Drains the trail exactly like [`crate::prop::sw::propagate`], but each pending literal drives
/// one hardware round over the byte-level protocol instead of an in-process watch-list scan.
/// Implications are applied to the trail one at a time, in the order the device returns them,
/// which is what makes the "drain already-queued implications before a conflict" rule in the
/// reconciliation contract hold for free. A reassignment to the opposite value of an
/// already-assigned variable -- a missed conflict the device couldn't have known about, since it
/// only ever sees a snapshot -- is treated as a conflict on the clause that tried to force it.
pub fn propagate_hw(
    mut ctx: partial!(Context, mut AssignmentP, mut HwP, mut ImplGraphP, mut TrailP),
) -> Result<Result<(), Conflict>, SolverError> {
    ctx.part(HwP).check_limits()?;

    loop {
        let lit = match ctx.part_mut(TrailP).pop_prop_head() {
            Some(lit) => lit,
            None => return Ok(Ok(())),
        };

        let false_lit = !lit;
        let bytes = ctx.part(HwP).run_round(false_lit.code() as u16)?;

        let mut decoder = ResponseDecoder::default();
        decoder.feed(&bytes);

        while let Some(response) = decoder.poll()? {
            match response {
                Response::Implication { var, val, reason } => {
                    let implied = lit_from_hw(var, val);
                    let reason_cid = ClauseId::from_index(reason as usize);

                    match ctx.part(AssignmentP).lit_value(implied) {
                        Some(true) => {}
                        Some(false) => {
                            log::debug!(
                                "missed conflict: hardware forced {:?} against clause {:?}, already assigned false",
                                implied,
                                reason_cid
                            );
                            return Ok(Err(Conflict(reason_cid)));
                        }
                        None => {
                            enqueue_assignment(ctx.borrow(), implied, Reason::Clause(reason_cid));
                        }
                    }
                }
                Response::DoneOk { .. } => break,
                Response::DoneConflict { cid } => {
                    return Ok(Err(Conflict(ClauseId::from_index(cid as usize))));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::Context;
    use crate::lits;
    use partial_ref::IntoPartialRefMut;

    fn add_clause(ctx: &mut Context, lits: [Lit; 2]) -> ClauseId {
        let id = ctx.clause_db.add_clause(&lits, false);
        ctx.watchlists.watch_clause(id, lits);
        ctx.hw.mirror_clause(id, &lits);
        id
    }

    #[test]
    fn hardware_round_matches_software_implication() {
        let mut ctx = Context::default();
        crate::context::set_var_count(ctx.into_partial_ref_mut(), 4);

        add_clause(&mut ctx, lits![-1, 2]);
        add_clause(&mut ctx, lits![-2, 3]);
        add_clause(&mut ctx, lits![-3, 4]);

        enqueue_assignment(ctx.into_partial_ref_mut(), lits![1][0], Reason::Decided);
        let result = propagate_hw(ctx.into_partial_ref_mut()).unwrap();

        assert!(result.is_ok());
        assert_eq!(ctx.trail.trail(), &lits![1, 2, 3, 4]);
    }

    #[test]
    fn hardware_conflict_is_reported() {
        let mut ctx = Context::default();
        crate::context::set_var_count(ctx.into_partial_ref_mut(), 2);

        let conflicting = add_clause(&mut ctx, lits![-1, -2]);
        add_clause(&mut ctx, lits![-1, 2]);

        enqueue_assignment(ctx.into_partial_ref_mut(), lits![1][0], Reason::Decided);
        let result = propagate_hw(ctx.into_partial_ref_mut()).unwrap();

        assert_eq!(result, Err(Conflict(conflicting)));
    }

    #[test]
    fn exceeding_variable_limit_is_reported_lazily() {
        let mut ctx = Context::default();
        let mut config = SolverConfig::default();
        config.hw_max_vars = 1;
        ctx.hw.configure(&config);

        crate::context::set_var_count(ctx.into_partial_ref_mut(), 4);

        enqueue_assignment(ctx.into_partial_ref_mut(), lits![1][0], Reason::Decided);
        let result = propagate_hw(ctx.into_partial_ref_mut());

        assert!(matches!(result, Err(SolverError::ResourceExceeded(_))));
    }
}
