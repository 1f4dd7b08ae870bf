//! Error types.
//!
//! Per the error handling design, `FormulaUnsat` is not an error: it is reported through
//! [`SatState`](crate::state::SatState), a normal solve outcome. Everything here is fatal: it
//! aborts the solve rather than being something a caller is expected to recover from locally.
use thiserror::Error;

/// Fatal errors that can terminate a solve.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The formula exceeds a fixed hardware limit (variables, clauses, literals per clause, or
    /// watch-list length). Raised before any hardware interaction; callers may retry in
    /// software-only mode.
    #[error("formula exceeds hardware limit: {0}")]
    ResourceExceeded(String),

    /// The hardware pipeline's `done` signal was not asserted within the per-round cycle budget.
    #[error(
        "hardware BCP pipeline deadlock after {cycles} cycles (budget {budget}); fsm={fsm_state:?} in_flight={in_flight}"
    )]
    PipelineDeadlock {
        cycles: u32,
        budget: u32,
        fsm_state: crate::hw::pipeline::FsmState,
        in_flight: u32,
    },

    /// The host-side response decoder encountered an unexpected byte in the device response
    /// stream.
    #[error("protocol framing error: unexpected response byte 0x{0:02x}")]
    ProtocolFraming(u8),
}
