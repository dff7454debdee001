use std::collections::BTreeSet;

use crate::param::ParamValue;
use crate::study::Study;
use crate::trial::FrozenTrial;
use crate::types::TrialState;

use super::figure::{ColorBar, Figure, Layout, Marker, Mode, Scatter, Title};

const OBJECTIVE_AXIS_TITLE: &str = "Objective Value";

/// Build the slice plot of a study without displaying it.
///
/// Each selected parameter gets a panel plotting the objective value of
/// every completed trial against that parameter's value, colored by trial
/// number. Trials that did not set a parameter are left out of its panel.
///
/// `params` selects the parameters; an empty slice selects all of them.
/// Names are de-duplicated and sorted. If any requested name does not
/// occur in a completed trial, a warning is logged and a figure without
/// traces is returned; the same happens when no trial has completed.
///
/// # Examples
///
/// ```
/// use optimizer_viz::{slice_figure, Direction, FrozenTrial, Study};
///
/// let study = Study::with_trials(
///     Direction::Minimize,
///     vec![
///         FrozenTrial::complete(0, 1.0).with_param("x", 0.5).with_param("y", 2.0),
///         FrozenTrial::complete(1, 0.4).with_param("x", 0.1),
///     ],
/// );
///
/// let figure = slice_figure(&study, &["x", "y"]);
/// assert_eq!(figure.data.len(), 2);
/// assert_eq!(figure.data[1].len(), 1);
/// ```
#[must_use]
pub fn slice_figure(study: &Study, params: &[&str]) -> Figure {
    let layout = Layout::new("Slice Plot");

    let trials = study.trials_with_states(&[TrialState::Complete]);

    if trials.is_empty() {
        trace_warn!("Your study does not have any completed trials.");
        return Figure::new(layout);
    }

    let all_params: BTreeSet<&str> = trials
        .iter()
        .flat_map(|t| t.params.keys().map(String::as_str))
        .collect();

    let sorted_params: Vec<&str> = if params.is_empty() {
        all_params.iter().copied().collect()
    } else {
        if let Some(unknown) = params.iter().find(|p| !all_params.contains(*p)) {
            trace_warn!("Parameter {} does not exist in your study.", unknown);
            return Figure::new(layout);
        }
        params
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    };

    let figure = match sorted_params.as_slice() {
        [] => Figure::new(layout),
        [param] => {
            let mut figure = Figure::new(layout);
            figure.add_trace(slice_trace(&trials, param));
            figure.update_xaxis_title(1, *param);
            figure.update_yaxis_title(1, OBJECTIVE_AXIS_TITLE);
            figure
        }
        many => {
            let mut figure = Figure::make_subplots(layout, many.len(), true);
            for (i, param) in many.iter().enumerate() {
                let col = i + 1;
                let mut trace = slice_trace(&trials, param);
                // One color bar is enough for the whole row.
                if let Some(marker) = trace.marker.as_mut() {
                    marker.showscale = Some(col == 1);
                }
                figure.add_trace_at(trace, col);
                figure.update_xaxis_title(col, *param);
                if col == 1 {
                    figure.update_yaxis_title(col, OBJECTIVE_AXIS_TITLE);
                }
            }
            figure
        }
    };

    trace_debug!(
        params = sorted_params.len(),
        trials = trials.len(),
        "slice plot built"
    );
    figure
}

/// Objective value against `param` for the trials that set it.
#[allow(clippy::cast_precision_loss)]
fn slice_trace(trials: &[FrozenTrial], param: &str) -> Scatter {
    let mut x = Vec::new();
    let mut y = Vec::new();
    let mut color = Vec::new();
    for trial in trials {
        if let Some(value) = trial.param(param) {
            x.push(plot_value(value));
            y.push(trial.value.unwrap_or(f64::NAN));
            color.push(trial.number as f64);
        }
    }
    Scatter::new(x, y)
        .mode(Mode::Markers)
        .marker(Marker {
            color: Some(color),
            colorscale: Some("Blues".to_owned()),
            colorbar: Some(ColorBar {
                title: Some(Title::new("#Trials")),
            }),
            ..Marker::default()
        })
        .show_legend(false)
}

/// Plotly point for a parameter value; non-finite floats become gaps.
fn plot_value(value: &ParamValue) -> serde_json::Value {
    match value {
        ParamValue::Int(v) => (*v).into(),
        ParamValue::Float(v) => (*v).into(),
        ParamValue::Categorical(v) => v.as_str().into(),
    }
}
