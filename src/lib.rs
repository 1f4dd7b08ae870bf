//! A CDCL SAT solver whose Boolean constraint propagation step can run either in software or
//! against a cycle-accurate model of a hardware BCP accelerator (see [`hw`]).
//!
//! Parsing formulas from DIMACS files, downloading benchmark corpora, command-line handling and
//! JSON result serialization are all out of scope: build a [`cnf::CnfFormula`] however you like and
//! hand it to [`solver::Solver::add_formula`].
#[macro_use]
pub mod lit;
pub mod cnf;
pub mod config;
pub mod error;
pub mod hw;
pub mod state;

mod analyze_conflict;
mod cdcl;
mod clause;
mod context;
mod decision;
mod load;
mod prop;
mod solver;

pub use config::{PropagationMode, SolverConfig};
pub use error::SolverError;
pub use solver::Solver;
pub use state::{SatState, SolverState};
