//! Frozen trial records read by the plot builders.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::param::ParamValue;
use crate::types::TrialState;

/// A read-only record of one evaluation of the objective function.
///
/// Parameter keys are not uniform across trials: a conditional search
/// space may set `"n_units_l2"` in one trial and leave it out in the next.
///
/// `intermediate_values` is `None` when no pruning instrumentation was set
/// up for the trial, and `Some` (possibly empty) once reporting was enabled.
/// Steps keep the order in which they were reported.
///
/// # Examples
///
/// ```
/// use optimizer_viz::{FrozenTrial, TrialState};
///
/// let trial = FrozenTrial::complete(0, 0.25)
///     .with_param("lr", 1e-3)
///     .with_param("optimizer", "adam")
///     .report(0, 0.9)
///     .report(1, 0.4);
///
/// assert_eq!(trial.state, TrialState::Complete);
/// assert!(trial.has_intermediate_values());
/// assert_eq!(trial.intermediate_values().unwrap().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FrozenTrial {
    /// Sequence number of the trial within its study.
    pub number: u64,
    /// Lifecycle state of the trial.
    pub state: TrialState,
    /// The objective value. Must be present for completed trials.
    #[serde(default, with = "crate::serde_float::option")]
    pub value: Option<f64>,
    /// Sampled parameter values keyed by parameter name.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
    /// `(step, value)` pairs reported while the trial ran.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::serde_float::steps"
    )]
    pub intermediate_values: Option<Vec<(u64, f64)>>,
}

impl FrozenTrial {
    /// Creates a trial in the given state with no value and no parameters.
    #[must_use]
    pub fn new(number: u64, state: TrialState) -> Self {
        Self {
            number,
            state,
            value: None,
            params: BTreeMap::new(),
            intermediate_values: None,
        }
    }

    /// Creates a completed trial with the given objective value.
    #[must_use]
    pub fn complete(number: u64, value: f64) -> Self {
        Self::new(number, TrialState::Complete).with_value(Some(value))
    }

    /// Creates a pruned trial. Pruned trials carry no objective value.
    #[must_use]
    pub fn pruned(number: u64) -> Self {
        Self::new(number, TrialState::Pruned)
    }

    /// Creates a running trial.
    #[must_use]
    pub fn running(number: u64) -> Self {
        Self::new(number, TrialState::Running)
    }

    /// Sets the objective value.
    #[must_use]
    pub fn with_value(mut self, value: Option<f64>) -> Self {
        self.value = value;
        self
    }

    /// Sets a parameter value, replacing any previous value for `name`.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Replaces the intermediate values, enabling instrumentation.
    #[must_use]
    pub fn with_intermediate_values(mut self, values: Vec<(u64, f64)>) -> Self {
        self.intermediate_values = Some(values);
        self
    }

    /// Appends one intermediate value, enabling instrumentation if needed.
    #[must_use]
    pub fn report(mut self, step: u64, value: f64) -> Self {
        self.intermediate_values
            .get_or_insert_with(Vec::new)
            .push((step, value));
        self
    }

    /// Returns `true` if pruning instrumentation was set up for this trial.
    #[must_use]
    pub fn has_intermediate_values(&self) -> bool {
        self.intermediate_values.is_some()
    }

    /// Returns the reported `(step, value)` pairs, if instrumented.
    #[must_use]
    pub fn intermediate_values(&self) -> Option<&[(u64, f64)]> {
        self.intermediate_values.as_deref()
    }

    /// Returns the value of parameter `name`, if it was set in this trial.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&ParamValue> {
        self.params.get(name)
    }
}
