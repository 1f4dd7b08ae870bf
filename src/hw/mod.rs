//! The hardware BCP accelerator model: a byte-level command/response protocol, a cycle-accurate
//! pipeline simulation, and the bridge that mirrors software state into it and drives rounds from
//! [`crate::cdcl`].
pub mod bridge;
pub mod pipeline;
pub mod protocol;

pub use bridge::HwBridge;
