use crate::study::Study;
use crate::types::TrialState;

use super::figure::{Figure, Layout, Marker, Mode, Scatter};

/// Markers drawn per learning curve, however many steps were reported.
const MAX_DISPLAYED_MARKERS: u32 = 10;

const TARGET_STATES: [TrialState; 3] =
    [TrialState::Pruned, TrialState::Complete, TrialState::Running];

/// Build the intermediate values plot of a study without displaying it.
///
/// One `lines+markers` curve is drawn per pruned, complete or running
/// trial, with the reported steps on the x-axis in the order they were
/// reported. A trial that was not instrumented contributes an empty curve.
///
/// When the study has no such trials, or none of them was instrumented
/// for pruning, a warning is logged and a figure without traces is returned.
///
/// # Examples
///
/// ```
/// use optimizer_viz::{intermediate_values_figure, Direction, FrozenTrial, Study};
///
/// let study = Study::with_trials(
///     Direction::Minimize,
///     vec![FrozenTrial::pruned(0).report(0, 1.0).report(1, 0.8)],
/// );
/// let figure = intermediate_values_figure(&study);
/// assert_eq!(figure.data.len(), 1);
/// assert_eq!(figure.data[0].name.as_deref(), Some("Trial0"));
/// ```
#[must_use]
pub fn intermediate_values_figure(study: &Study) -> Figure {
    let layout = Layout::new("Intermediate Values Plot")
        .x_title("Step")
        .y_title("Intermediate Value")
        .show_legend(false);

    let trials = study.trials_with_states(&TARGET_STATES);

    if trials.is_empty() {
        trace_warn!("Study instance does not contain trials.");
        return Figure::new(layout);
    }
    if !trials.iter().any(|t| t.has_intermediate_values()) {
        trace_warn!("You need to set up the pruning feature to utilize plot_intermediate_values()");
        return Figure::new(layout);
    }

    let mut figure = Figure::new(layout);
    for trial in &trials {
        let values = trial.intermediate_values().unwrap_or_default();
        let trace = Scatter::new(
            values.iter().map(|&(step, _)| step),
            values.iter().map(|&(_, v)| v),
        )
        .mode(Mode::LinesMarkers)
        .marker(Marker {
            maxdisplayed: Some(MAX_DISPLAYED_MARKERS),
            ..Marker::default()
        })
        .name(format!("Trial{}", trial.number));
        figure.add_trace(trace);
    }

    trace_debug!(traces = figure.data.len(), "intermediate values plot built");
    figure
}
