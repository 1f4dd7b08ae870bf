//! Solver-level integration tests: black-box SAT/UNSAT verdicts, model validity, and SW/HW
//! equivalence, covering the boundary behaviors and Testable Property 4 of the component design.
use proptest::prelude::*;

use vericdcl::cnf::CnfFormula;
use vericdcl::config::{PropagationMode, SolverConfig};
use vericdcl::lit::Lit;
use vericdcl::Solver;

fn formula_of(clauses: &[&[i64]]) -> CnfFormula {
    CnfFormula::from(
        clauses
            .iter()
            .map(|clause| clause.iter().map(|&n| Lit::from_dimacs(n)).collect::<Vec<_>>()),
    )
}

#[test]
fn empty_formula_is_sat_with_no_decisions() {
    let mut solver = Solver::new();
    assert_eq!(solver.solve().unwrap(), Some(true));
    assert_eq!(solver.state().decisions, 0);
}

#[test]
fn empty_clause_is_unsat_with_no_decisions() {
    let mut solver = Solver::new();
    solver.add_formula(&formula_of(&[&[]]));
    assert_eq!(solver.solve().unwrap(), Some(false));
    assert_eq!(solver.state().decisions, 0);
}

#[test]
fn unit_clause_against_an_already_opposite_assignment_is_unsat() {
    let mut solver = Solver::new();
    solver.add_formula(&formula_of(&[&[1], &[-1]]));
    assert_eq!(solver.solve().unwrap(), Some(false));
    assert_eq!(solver.state().decisions, 0);
}

#[test]
fn model_satisfies_every_clause() {
    let mut solver = Solver::new();
    let formula = formula_of(&[&[1, 2, 3], &[-1, 2], &[-2, 3], &[-3, 1]]);
    solver.add_formula(&formula);
    assert_eq!(solver.solve().unwrap(), Some(true));

    let model = solver.model().unwrap();
    for clause in formula.iter() {
        assert!(clause.iter().any(|lit| model.contains(lit)));
    }
}

#[test]
fn pigeonhole_two_into_one_is_unsat() {
    // Two pigeons, one hole: p1, p2 each in the hole, and not both.
    let mut solver = Solver::new();
    solver.add_formula(&formula_of(&[&[1], &[2], &[-1, -2]]));
    assert_eq!(solver.solve().unwrap(), Some(false));
}

fn arb_formula(vars: i64, clauses: usize, max_len: usize) -> impl Strategy<Value = CnfFormula> {
    prop::collection::vec(
        prop::collection::vec((1..=vars, any::<bool>()), 1..=max_len),
        0..=clauses,
    )
    .prop_map(move |raw_clauses| {
        let mut formula = CnfFormula::new();
        formula.set_var_count(vars as usize);
        for raw in raw_clauses {
            let clause: Vec<Lit> = raw
                .into_iter()
                .map(|(v, negative)| Lit::from_dimacs(if negative { -v } else { v }))
                .collect();
            formula.add_clause(clause);
        }
        formula
    })
}

proptest! {
    /// Testable Property 4: software and hardware propagation must agree on the verdict and on
    /// every diagnostic counter, for any formula within the hardware's fixed limits.
    #[test]
    fn sw_and_hw_propagation_agree(formula in arb_formula(6, 12, 4)) {
        let mut sw = Solver::new();
        sw.add_formula(&formula);
        let sw_result = sw.solve().unwrap();

        let mut hw_config = SolverConfig::default();
        hw_config.propagation_mode = PropagationMode::Hardware;
        let mut hw = Solver::with_config(hw_config);
        hw.add_formula(&formula);
        let hw_result = hw.solve().unwrap();

        prop_assert_eq!(sw_result, hw_result);
        prop_assert_eq!(sw.state().decisions, hw.state().decisions);
        prop_assert_eq!(sw.state().conflicts, hw.state().conflicts);
        prop_assert_eq!(sw.state().propagations, hw.state().propagations);

        if sw_result == Some(true) {
            let model: std::collections::HashSet<Lit> = hw.model().unwrap().into_iter().collect();
            for clause in formula.iter() {
                prop_assert!(clause.iter().any(|lit| model.contains(lit)));
            }
        }
    }
}
