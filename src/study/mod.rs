//! Study container holding the trial records of an optimization run.

use std::sync::Arc;

use parking_lot::RwLock;

use crate::trial::FrozenTrial;
use crate::types::{Direction, TrialState};

mod persistence;

pub use persistence::StudySnapshot;

/// An optimization direction plus the ordered trial records of a run.
///
/// Trials live behind a shared lock so that producers can keep recording
/// while a chart is being built: every reader works on a snapshot taken by
/// [`trials()`](Self::trials).
///
/// # Examples
///
/// ```
/// use optimizer_viz::{Direction, FrozenTrial, Study};
///
/// let study = Study::new(Direction::Minimize);
/// study.push(FrozenTrial::complete(0, 1.5));
/// study.push(FrozenTrial::pruned(1));
///
/// assert_eq!(study.n_trials(), 2);
/// assert_eq!(study.direction(), Direction::Minimize);
/// ```
#[derive(Clone, Debug)]
pub struct Study {
    direction: Direction,
    trials: Arc<RwLock<Vec<FrozenTrial>>>,
}

impl Study {
    /// Create an empty study with the given optimization direction.
    #[must_use]
    pub fn new(direction: Direction) -> Self {
        Self::with_trials(direction, Vec::new())
    }

    /// Create a study pre-populated with `trials`, kept in the given order.
    #[must_use]
    pub fn with_trials(direction: Direction, trials: Vec<FrozenTrial>) -> Self {
        Self {
            direction,
            trials: Arc::new(RwLock::new(trials)),
        }
    }

    /// Return the optimization direction.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Append a trial record.
    pub fn push(&self, trial: FrozenTrial) {
        self.trials.write().push(trial);
    }

    /// Return a snapshot of all trials in recorded order.
    #[must_use]
    pub fn trials(&self) -> Vec<FrozenTrial> {
        self.trials.read().clone()
    }

    /// Return a snapshot of the trials whose state is in `states`.
    #[must_use]
    pub fn trials_with_states(&self, states: &[TrialState]) -> Vec<FrozenTrial> {
        self.trials
            .read()
            .iter()
            .filter(|t| states.contains(&t.state))
            .cloned()
            .collect()
    }

    /// Return the total number of recorded trials.
    #[must_use]
    pub fn n_trials(&self) -> usize {
        self.trials.read().len()
    }

    /// Return the best completed trial, or `None` if no trial completed
    /// with a numeric value.
    #[must_use]
    pub fn best_trial(&self) -> Option<FrozenTrial> {
        let direction = self.direction;
        self.trials
            .read()
            .iter()
            .filter(|t| t.state == TrialState::Complete)
            .filter_map(|t| t.value.map(|v| (v, t)))
            .max_by(|(a, _), (b, _)| match direction {
                Direction::Minimize => b.total_cmp(a),
                Direction::Maximize => a.total_cmp(b),
            })
            .map(|(_, t)| t.clone())
    }
}
