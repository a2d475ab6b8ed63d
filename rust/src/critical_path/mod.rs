//! Critical Path Method scheduling.
//!
//! The pipeline runs strictly in sequence over an in-memory snapshot:
//! graph building, cycle detection, topological sort, forward pass, backward
//! pass, float classification and critical path extraction.

mod classify;
mod cycles;
mod engine;
mod graph;
mod passes;
mod paths;
mod topo;
mod types;

pub use classify::bucket_by_float;
pub use cycles::{find_cycle, has_cycle};
pub use engine::{analyze_float, calculate_critical_path, CpmError, CriticalPathEngine};
pub use graph::DependencyGraph;
pub use topo::topological_sort;
pub use types::{
    FloatCategory, RiskLevel, TaskTiming, NEAR_CRITICAL_THRESHOLD_DAYS, RISK_CRITICAL_PERCENT,
    RISK_HIGH_PERCENT, RISK_MEDIUM_PERCENT,
};
