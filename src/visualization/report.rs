use core::fmt::Write as _;
use std::path::Path;

use crate::error::Result;
use crate::study::Study;

use super::backend::DEFAULT_PLOTLY_SRC;
use super::figure::{Figure, PAGE_FOOTER, page_header, write_plot};
use super::{intermediate_values_figure, optimization_history_figure, slice_figure};

/// Generate an HTML report with every study plot that has data.
///
/// Writes a self-contained page at `path` holding the optimization
/// history, intermediate values and slice plots. Plots that come out
/// empty (for example intermediate values of a study without pruning
/// instrumentation) are left out. Plotly.js is loaded from
/// [`DEFAULT_PLOTLY_SRC`].
///
/// # Errors
///
/// Returns [`Error::NonNumericValue`](crate::Error::NonNumericValue) if a
/// completed trial has no objective value, or an I/O error if the file
/// cannot be written.
///
/// # Examples
///
/// ```no_run
/// use optimizer_viz::{generate_html_report, Direction, FrozenTrial, Study};
///
/// let study = Study::with_trials(Direction::Minimize, vec![FrozenTrial::complete(0, 1.0)]);
/// generate_html_report(&study, "report.html").unwrap();
/// ```
pub fn generate_html_report(study: &Study, path: impl AsRef<Path>) -> Result<()> {
    let html = build_report(study, DEFAULT_PLOTLY_SRC)?;
    std::fs::write(path.as_ref(), html)?;
    trace_info!(path = %path.as_ref().display(), "report written");
    Ok(())
}

pub(crate) fn build_report(study: &Study, plotly_src: &str) -> Result<String> {
    // Every section and the header read the same snapshot.
    let snapshot = Study::with_trials(study.direction(), study.trials());
    let sections: [(&str, Figure); 3] = [
        ("history", optimization_history_figure(&snapshot)?),
        ("intermediate", intermediate_values_figure(&snapshot)),
        ("slices", slice_figure(&snapshot, &[])),
    ];

    let mut html = page_header("Optimization Report", plotly_src);
    let _ = write!(
        html,
        "<h1>Optimization Report</h1>\n<p class=\"subtitle\">{direction} &middot; {n} trials</p>\n",
        direction = snapshot.direction(),
        n = snapshot.n_trials(),
    );
    for (div_id, figure) in &sections {
        if !figure.is_empty() {
            write_plot(&mut html, div_id, figure)?;
        }
    }
    html.push_str(PAGE_FOOTER);
    Ok(html)
}
