//! Domain layer - LP parameters, pool snapshots and transaction batches

pub mod execution;
pub mod lp;
pub mod pool;
