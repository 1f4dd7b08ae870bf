//! Boolean satisfiability solver.
use partial_ref::{IntoPartialRef, IntoPartialRefMut, PartialRef};

use crate::cdcl::conflict_step;
use crate::cnf::CnfFormula;
use crate::config::SolverConfig;
use crate::context::{set_var_count, AssignmentP, Context, SolverStateP};
use crate::error::SolverError;
use crate::lit::{Lit, Var};
use crate::load::load_clause;
use crate::state::{SatState, SolverState};

/// A boolean satisfiability solver, optionally backed by the hardware BCP accelerator model (see
/// [`crate::hw`] and [`SolverConfig::propagation_mode`]).
#[derive(Default)]
pub struct Solver {
    ctx: Box<Context>,
}

impl Solver {
    /// Creates a new solver using software-only propagation.
    pub fn new() -> Solver {
        Solver::default()
    }

    /// Creates a new solver with an explicit configuration.
    pub fn with_config(config: SolverConfig) -> Solver {
        Solver {
            ctx: Box::new(Context::with_config(config)),
        }
    }

    /// Adds a formula to the solver.
    pub fn add_formula(&mut self, formula: &CnfFormula) {
        let mut ctx = self.ctx.into_partial_ref_mut();
        set_var_count(ctx.borrow(), formula.var_count());
        for clause in formula.iter() {
            load_clause(ctx.borrow(), clause);
        }
    }

    /// Checks the satisfiability of the current formula.
    ///
    /// Returns `Some(true)`/`Some(false)` for SAT/UNSAT. `Err` propagates a fatal hardware error
    /// (resource limit, pipeline deadlock, or protocol framing failure); the solve is aborted and
    /// the solver's state should not be relied upon afterwards.
    pub fn solve(&mut self) -> Result<Option<bool>, SolverError> {
        let mut ctx = self.ctx.into_partial_ref_mut();
        while ctx.part(SolverStateP).sat_state == SatState::Unknown {
            conflict_step(ctx.borrow())?;
        }
        let sat_state = ctx.part(SolverStateP).sat_state;
        log::info!(
            "solve finished: {:?} ({} decisions, {} conflicts, {} propagations, {} learnt clauses)",
            sat_state,
            ctx.part(SolverStateP).decisions,
            ctx.part(SolverStateP).conflicts,
            ctx.part(SolverStateP).propagations,
            ctx.part(SolverStateP).learned_clauses,
        );
        Ok(match sat_state {
            SatState::Unknown => None,
            SatState::Sat => Some(true),
            SatState::Unsat => Some(false),
        })
    }

    /// The satisfying assignment, if the formula was found SAT.
    pub fn model(&self) -> Option<Vec<Lit>> {
        let ctx = self.ctx.into_partial_ref();
        if ctx.part(SolverStateP).sat_state == SatState::Sat {
            Some(
                ctx.part(AssignmentP)
                    .assignment()
                    .iter()
                    .enumerate()
                    .flat_map(|(index, assignment)| {
                        assignment.map(|polarity| Lit::from_var(Var::new((index + 1) as u32), polarity))
                    })
                    .collect(),
            )
        } else {
            None
        }
    }

    /// Diagnostic counters (decisions, conflicts, propagations) accumulated so far.
    pub fn state(&self) -> &SolverState {
        &self.ctx.solver_state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cnf::CnfFormula;
    use crate::lits;

    fn formula(clauses: &[&[Lit]]) -> CnfFormula {
        CnfFormula::from(clauses.iter().map(|clause| clause.to_vec()))
    }

    #[test]
    fn empty_formula_is_sat() {
        let mut solver = Solver::new();
        assert_eq!(solver.solve().unwrap(), Some(true));
        assert_eq!(solver.model(), Some(vec![]));
    }

    #[test]
    fn unit_conflict_is_unsat_with_no_decisions() {
        let mut solver = Solver::new();
        solver.add_formula(&formula(&[&lits![1], &lits![-1]]));
        assert_eq!(solver.solve().unwrap(), Some(false));
        assert_eq!(solver.state().decisions, 0);
    }

    #[test]
    fn implication_chain_is_sat_with_a_model() {
        let mut solver = Solver::new();
        solver.add_formula(&formula(&[&lits![-1, 2], &lits![-2, 3], &lits![1]]));
        assert_eq!(solver.solve().unwrap(), Some(true));
        let model = solver.model().unwrap();
        assert!(model.contains(&lits![1][0]));
        assert!(model.contains(&lits![2][0]));
        assert!(model.contains(&lits![3][0]));
    }

    #[test]
    fn simple_conflict_is_unsat() {
        let mut solver = Solver::new();
        solver.add_formula(&formula(&[
            &lits![1, 2],
            &lits![1, -2],
            &lits![-1, 2],
            &lits![-1, -2],
        ]));
        assert_eq!(solver.solve().unwrap(), Some(false));
    }

    #[test]
    fn hardware_mode_matches_software_mode() {
        let mut config = SolverConfig::default();
        config.propagation_mode = crate::config::PropagationMode::Hardware;

        let clauses: [&[Lit]; 3] = [&lits![-1, 2], &lits![-2, 3], &lits![1]];

        let mut hw_solver = Solver::with_config(config);
        hw_solver.add_formula(&formula(&clauses));
        assert_eq!(hw_solver.solve().unwrap(), Some(true));

        let mut sw_solver = Solver::new();
        sw_solver.add_formula(&formula(&clauses));
        assert_eq!(sw_solver.solve().unwrap(), Some(true));

        assert_eq!(
            hw_solver.state().propagations,
            sw_solver.state().propagations
        );
        assert_eq!(hw_solver.state().decisions, sw_solver.state().decisions);
    }
}
