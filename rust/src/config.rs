//! Configuration types for the CPM engine.

use pyo3::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for a critical path computation.
#[pyclass]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpmConfig {
    /// Verbosity level: 0=silent, 1=changes, 2=checks, 3=debug.
    #[pyo3(get, set)]
    pub verbosity: u8,
    /// Break ties by task ID so the topological order, critical task list and
    /// path enumeration are reproducible across runs. Timings never depend on it.
    #[pyo3(get, set)]
    pub stable_order: bool,
}

impl Default for CpmConfig {
    fn default() -> Self {
        Self {
            verbosity: 0,
            stable_order: true,
        }
    }
}

#[pymethods]
impl CpmConfig {
    #[new]
    #[pyo3(signature = (verbosity=None, stable_order=None))]
    fn new(verbosity: Option<u8>, stable_order: Option<bool>) -> Self {
        let defaults = Self::default();
        Self {
            verbosity: verbosity.unwrap_or(defaults.verbosity),
            stable_order: stable_order.unwrap_or(defaults.stable_order),
        }
    }

    fn __repr__(&self) -> String {
        format!(
            "CpmConfig(verbosity={}, stable_order={})",
            self.verbosity, self.stable_order
        )
    }
}
