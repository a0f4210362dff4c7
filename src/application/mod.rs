//! Application layer - use cases

pub mod in_flight;
pub mod lp_orchestrator;

pub use lp_orchestrator::{LpOrchestrator, DEFAULT_REQUIRED_SOL};
