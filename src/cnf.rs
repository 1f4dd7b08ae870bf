//! In-memory CNF formulas.
//!
//! Parsing formulas from DIMACS files, downloading benchmark corpora and other input concerns are
//! out of scope for this crate; callers build a [`CnfFormula`] however they like (by hand, from a
//! parser of their own, ...) and hand it to [`Solver::add_formula`](crate::solver::Solver).
use std::cmp::max;
use std::fmt;
use std::iter::Extend;
use std::ops::Range;

use crate::lit::Lit;

/// A formula in conjunctive normal form.
///
/// Equivalent to `Vec<Vec<Lit>>` but uses a single flat buffer for all literals.
#[derive(Default, Eq)]
pub struct CnfFormula {
    var_count: usize,
    literals: Vec<Lit>,
    clause_ranges: Vec<Range<usize>>,
}

impl CnfFormula {
    /// Creates an empty formula.
    pub fn new() -> CnfFormula {
        CnfFormula::default()
    }

    /// Number of variables in the formula.
    ///
    /// This also counts any variable with a lower index that does not appear in any clause.
    pub fn var_count(&self) -> usize {
        self.var_count
    }

    /// Increases the variable count. A no-op if `count` is not larger than the current count.
    pub fn set_var_count(&mut self, count: usize) {
        self.var_count = max(self.var_count, count)
    }

    /// Number of clauses in the formula.
    pub fn len(&self) -> usize {
        self.clause_ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clause_ranges.is_empty()
    }

    /// Appends a clause to the formula.
    pub fn add_clause<L>(&mut self, literals: impl IntoIterator<Item = L>)
    where
        Vec<Lit>: Extend<L>,
    {
        let begin = self.literals.len();
        self.literals.extend(literals);
        let end = self.literals.len();

        for &lit in self.literals[begin..end].iter() {
            self.var_count = max(lit.var().number() as usize, self.var_count);
        }

        self.clause_ranges.push(begin..end);
    }

    /// Iterator over all clauses, each as a slice of literals.
    pub fn iter(&self) -> impl Iterator<Item = &[Lit]> {
        let literals = &self.literals;
        self.clause_ranges
            .iter()
            .map(move |range| &literals[range.clone()])
    }
}

impl<F, I, L> From<F> for CnfFormula
where
    F: IntoIterator<Item = I>,
    I: IntoIterator<Item = L>,
    Vec<Lit>: Extend<L>,
{
    fn from(formula: F) -> CnfFormula {
        let mut cnf_formula = CnfFormula::new();
        for clause in formula {
            cnf_formula.add_clause(clause);
        }
        cnf_formula
    }
}

impl fmt::Debug for CnfFormula {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl PartialEq for CnfFormula {
    fn eq(&self, other: &CnfFormula) -> bool {
        self.var_count() == other.var_count()
            && self.clause_ranges.len() == other.clause_ranges.len()
            && self
                .clause_ranges
                .iter()
                .zip(other.clause_ranges.iter())
                .all(|(range_a, range_b)| {
                    self.literals[range_a.clone()] == other.literals[range_b.clone()]
                })
    }
}

#[cfg(test)]
pub mod strategy {
    use super::*;
    use proptest::{collection::SizeRange, prelude::*};

    use crate::lit::strategy::lit;

    /// A random clause over variables `1..=vars`, with a size in `size`.
    pub fn vec_clause(vars: usize, size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<Lit>> {
        prop::collection::vec(lit(1..=(vars as u32)), size)
    }

    /// A random formula over variables `1..=vars`.
    pub fn cnf_formula(
        vars: impl Strategy<Value = usize>,
        clause_count: impl Into<SizeRange>,
        clause_size: impl Into<SizeRange> + Clone,
    ) -> impl Strategy<Value = CnfFormula> {
        let clause_size = clause_size.into();
        vars.prop_flat_map(move |vars| {
            prop::collection::vec(vec_clause(vars.max(1), clause_size.clone()), clause_count.into())
                .prop_map(move |clauses| {
                    let mut formula = CnfFormula::from(clauses);
                    formula.set_var_count(vars);
                    formula
                })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lits;

    #[test]
    fn var_count_tracks_max_literal() {
        let mut formula = CnfFormula::new();
        formula.add_clause(lits![1, -3, 2].to_vec());
        assert_eq!(formula.var_count(), 3);
    }

    #[test]
    fn from_nested_iterables() {
        let formula = CnfFormula::from(vec![lits![1, 2].to_vec(), lits![-1, -2].to_vec()]);
        assert_eq!(formula.len(), 2);
        assert_eq!(formula.var_count(), 2);
    }
}
