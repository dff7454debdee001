//! Plotly charts of a study's trials.
//!
//! Each plot comes as a pure builder returning a [`Figure`] and a display
//! operation that checks the rendering [`Backend`] first and then shows
//! the figure through it.
//!
//! | Plot | Builder | Display |
//! |---|---|---|
//! | **Intermediate values** | [`intermediate_values_figure`] | [`plot_intermediate_values`] |
//! | **Optimization history** | [`optimization_history_figure`] | [`plot_optimization_history`] |
//! | **Slice** | [`slice_figure`] | [`plot_slice`] |
//!
//! Missing data (no trials, no pruning instrumentation, an unknown
//! parameter name) is not an error: a warning is logged and the figure
//! comes back with a layout but no traces.
//!
//! # Usage
//!
//! ```no_run
//! use optimizer_viz::prelude::*;
//!
//! let study = Study::new(Direction::Minimize);
//! # study.push(FrozenTrial::complete(0, 1.0).with_param("x", 0.5));
//! let backend = HtmlBackend::new("plots");
//! plot_optimization_history(&study, &backend).unwrap();
//! plot_slice(&study, &["x"], &backend).unwrap();
//! ```

pub mod backend;
pub mod figure;
mod history;
mod intermediate;
mod report;
mod slice;

pub use backend::{Backend, Capability, HtmlBackend, HtmlBackendBuilder, PlotlyVersion};
pub use figure::Figure;
pub use history::optimization_history_figure;
pub use intermediate::intermediate_values_figure;
pub use report::generate_html_report;
pub use slice::slice_figure;

use crate::error::Result;
use crate::study::Study;

/// Plot the intermediate values of all trials in a study.
///
/// # Errors
///
/// Returns an availability error if `backend` is missing or outdated,
/// before the study is read, or the backend's rendering error.
pub fn plot_intermediate_values(study: &Study, backend: &dyn Backend) -> Result<()> {
    backend::check_availability(backend)?;
    let figure = intermediate_values_figure(study);
    backend.show(&figure)
}

/// Plot the optimization history of all trials in a study.
///
/// # Errors
///
/// Returns an availability error if `backend` is missing or outdated,
/// [`Error::NonNumericValue`](crate::Error::NonNumericValue) if a completed
/// trial has no objective value, or the backend's rendering error.
pub fn plot_optimization_history(study: &Study, backend: &dyn Backend) -> Result<()> {
    backend::check_availability(backend)?;
    let figure = optimization_history_figure(study)?;
    backend.show(&figure)
}

/// Plot the parameter relationship as a slice plot.
///
/// Pass `&[]` as `params` to plot every parameter. A trial that did not
/// set a parameter is not plotted in that parameter's panel.
///
/// # Errors
///
/// Returns an availability error if `backend` is missing or outdated,
/// before the study is read, or the backend's rendering error.
pub fn plot_slice(study: &Study, params: &[&str], backend: &dyn Backend) -> Result<()> {
    backend::check_availability(backend)?;
    let figure = slice_figure(study, params);
    backend.show(&figure)
}
