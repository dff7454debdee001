//! Core types shared by the study model and the plot builders.

use serde::{Deserialize, Serialize};

/// The direction of optimization.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Minimize the objective value.
    Minimize,
    /// Maximize the objective value.
    Maximize,
}

impl Direction {
    /// The value every objective value improves on: `+inf` when
    /// minimizing, `-inf` when maximizing.
    #[must_use]
    pub fn worst_value(self) -> f64 {
        match self {
            Self::Minimize => f64::INFINITY,
            Self::Maximize => f64::NEG_INFINITY,
        }
    }

    /// Return the better of two objective values in this direction.
    #[must_use]
    pub fn better(self, a: f64, b: f64) -> f64 {
        match self {
            Self::Minimize => a.min(b),
            Self::Maximize => a.max(b),
        }
    }
}

impl core::fmt::Display for Direction {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Minimize => f.write_str("Minimize"),
            Self::Maximize => f.write_str("Maximize"),
        }
    }
}

/// The state of a trial in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrialState {
    /// The trial is currently running.
    Running,
    /// The trial completed successfully.
    Complete,
    /// The trial was pruned (stopped early).
    Pruned,
    /// The trial failed with an error.
    Failed,
    /// The trial is queued but has not started.
    Waiting,
}

impl TrialState {
    /// Returns `true` for states that have finished and will not change.
    #[must_use]
    pub fn is_finished(self) -> bool {
        matches!(self, Self::Complete | Self::Pruned | Self::Failed)
    }
}

impl core::fmt::Display for TrialState {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let s = match self {
            Self::Running => "Running",
            Self::Complete => "Complete",
            Self::Pruned => "Pruned",
            Self::Failed => "Failed",
            Self::Waiting => "Waiting",
        };
        f.write_str(s)
    }
}
