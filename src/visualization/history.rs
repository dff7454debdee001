use crate::error::{Error, Result};
use crate::study::Study;
use crate::types::{Direction, TrialState};

use super::figure::{Figure, Layout, Mode, Scatter};

/// Build the optimization history plot of a study without displaying it.
///
/// Completed trials are drawn as markers (objective value against trial
/// number) together with a best-so-far line in the study's direction.
/// Without completed trials a warning is logged and a figure without
/// traces is returned.
///
/// # Errors
///
/// Returns [`Error::NonNumericValue`] if a completed trial has no
/// objective value.
///
/// # Examples
///
/// ```
/// use optimizer_viz::{optimization_history_figure, Direction, FrozenTrial, Study};
///
/// let study = Study::with_trials(
///     Direction::Minimize,
///     vec![FrozenTrial::complete(0, 5.0), FrozenTrial::complete(1, 3.0)],
/// );
/// let figure = optimization_history_figure(&study).unwrap();
/// assert_eq!(figure.data[1].y, vec![5.0, 3.0]);
/// ```
pub fn optimization_history_figure(study: &Study) -> Result<Figure> {
    let layout = Layout::new("Optimization History Plot")
        .x_title("#Trials")
        .y_title("Objective Value");

    let trials = study.trials_with_states(&[TrialState::Complete]);

    if trials.is_empty() {
        trace_warn!("Study instance does not contain trials.");
        return Ok(Figure::new(layout));
    }

    let values = trials
        .iter()
        .map(|t| t.value.ok_or(Error::NonNumericValue { number: t.number }))
        .collect::<Result<Vec<f64>>>()?;
    let numbers: Vec<u64> = trials.iter().map(|t| t.number).collect();
    let best = best_values(&values, study.direction());

    let mut figure = Figure::new(layout);
    figure.add_trace(
        Scatter::new(numbers.iter().copied(), values)
            .mode(Mode::Markers)
            .name("Objective Value"),
    );
    figure.add_trace(
        Scatter::new(numbers, best)
            .mode(Mode::Lines)
            .name("Best Value"),
    );

    trace_debug!(trials = trials.len(), "optimization history plot built");
    Ok(figure)
}

/// Running best of `values`: element `i` is the best of `values[..=i]`.
pub(crate) fn best_values(values: &[f64], direction: Direction) -> Vec<f64> {
    values
        .iter()
        .scan(direction.worst_value(), |best, &v| {
            *best = direction.better(*best, v);
            Some(*best)
        })
        .collect()
}
