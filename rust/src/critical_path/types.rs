//! Types for critical path calculation.

use serde::{Deserialize, Serialize};

/// Tasks with total float at or below this many days (but above zero) are
/// reported as near-critical.
pub const NEAR_CRITICAL_THRESHOLD_DAYS: i64 = 2;

/// Critical-task percentage at or above which a project is rated `critical`.
pub const RISK_CRITICAL_PERCENT: usize = 60;
/// Critical-task percentage at or above which a project is rated `high`.
pub const RISK_HIGH_PERCENT: usize = 40;
/// Critical-task percentage at or above which a project is rated `medium`.
pub const RISK_MEDIUM_PERCENT: usize = 20;

/// Per-task timing information, indexed by dense task index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskTiming {
    /// Earliest possible start (forward pass).
    pub early_start: i64,
    /// Earliest possible finish (forward pass).
    pub early_finish: i64,
    /// Latest allowable start (backward pass).
    pub late_start: i64,
    /// Latest allowable finish (backward pass).
    pub late_finish: i64,
    /// Total float = late_start - early_start.
    pub total_float: i64,
}

impl TaskTiming {
    pub fn is_critical(&self) -> bool {
        self.total_float == 0
    }
}

/// Reporting band for a task's total float.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FloatCategory {
    Critical,
    NearCritical,
    Normal,
}

impl FloatCategory {
    pub fn from_float(total_float: i64) -> Self {
        if total_float == 0 {
            Self::Critical
        } else if total_float <= NEAR_CRITICAL_THRESHOLD_DAYS {
            Self::NearCritical
        } else {
            Self::Normal
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::NearCritical => "near_critical",
            Self::Normal => "normal",
        }
    }
}

/// Overall schedule risk, derived from the share of critical tasks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    pub fn from_counts(critical_tasks: usize, total_tasks: usize) -> Self {
        if total_tasks == 0 {
            return Self::Low;
        }
        // Integer form of `critical / total * 100 >= band`.
        let scaled = critical_tasks * 100;
        if scaled >= RISK_CRITICAL_PERCENT * total_tasks {
            Self::Critical
        } else if scaled >= RISK_HIGH_PERCENT * total_tasks {
            Self::High
        } else if scaled >= RISK_MEDIUM_PERCENT * total_tasks {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}
