//! Central solver data structure.
//!
//! [`Context`] holds all data used by the solver. Functions that need simultaneous access to
//! several of its fields take a [`partial_ref::partial`] reference naming exactly the parts they
//! touch (directly, or through a function they call) -- this documents each function's data
//! dependencies and lets the borrow checker verify disjoint mutable access without threading a
//! dozen separate `&mut` parameters through every call.
use partial_ref::{part, partial, PartialRef, PartialRefTarget};

use crate::analyze_conflict::AnalyzeConflict;
use crate::clause::ClauseDb;
use crate::config::SolverConfig;
use crate::decision::Vsids;
use crate::hw::bridge::HwBridge;
use crate::prop::{Assignment, ImplGraph, Trail, Watchlists};
use crate::state::SolverState;

/// Part declarations for the [`Context`] struct.
pub mod parts {
    use super::*;

    part!(pub AnalyzeConflictP: AnalyzeConflict);
    part!(pub AssignmentP: Assignment);
    part!(pub ClauseDbP: ClauseDb);
    part!(pub HwP: HwBridge);
    part!(pub ImplGraphP: ImplGraph);
    part!(pub SolverConfigP: SolverConfig);
    part!(pub SolverStateP: SolverState);
    part!(pub TrailP: Trail);
    part!(pub VsidsP: Vsids);
    part!(pub WatchlistsP: Watchlists);
}

use parts::*;

/// Central solver data structure.
///
/// The solver owns clauses, the trail, per-variable arrays, watch lists and VSIDS activity
/// outright. [`HwBridge`] mirrors clauses, watch lists and assignments for the hardware model but
/// never mutates them on its own -- the host (this struct's owner) writes to it whenever the
/// corresponding software structure changes.
#[derive(Default, PartialRefTarget)]
pub struct Context {
    #[part(AnalyzeConflictP)]
    pub analyze_conflict: AnalyzeConflict,
    #[part(AssignmentP)]
    pub assignment: Assignment,
    #[part(ClauseDbP)]
    pub clause_db: ClauseDb,
    #[part(HwP)]
    pub hw: HwBridge,
    #[part(ImplGraphP)]
    pub impl_graph: ImplGraph,
    #[part(SolverConfigP)]
    pub solver_config: SolverConfig,
    #[part(SolverStateP)]
    pub solver_state: SolverState,
    #[part(TrailP)]
    pub trail: Trail,
    #[part(VsidsP)]
    pub vsids: Vsids,
    #[part(WatchlistsP)]
    pub watchlists: Watchlists,
}

impl Context {
    pub fn with_config(config: SolverConfig) -> Context {
        let mut ctx = Context::default();
        ctx.hw.configure(&config);
        ctx.solver_config = config;
        ctx
    }
}

/// Grows all per-variable structures to cover at least `count` variables.
///
/// A no-op for structures that already cover `count` or more variables (they never shrink).
pub fn set_var_count(
    mut ctx: partial!(
        Context,
        mut AnalyzeConflictP,
        mut AssignmentP,
        mut HwP,
        mut ImplGraphP,
        mut VsidsP,
        mut WatchlistsP,
    ),
    count: usize,
) {
    ctx.part_mut(AnalyzeConflictP).set_var_count(count);
    ctx.part_mut(AssignmentP).set_var_count(count);
    ctx.part_mut(ImplGraphP).set_var_count(count);
    ctx.part_mut(VsidsP).set_var_count(count);
    ctx.part_mut(WatchlistsP).set_var_count(count);
    ctx.part_mut(HwP).set_var_count(count);
}
