#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![deny(unreachable_pub)]
#![deny(clippy::correctness)]
#![deny(clippy::suspicious)]
#![deny(clippy::style)]
#![deny(clippy::complexity)]
#![deny(clippy::perf)]
#![deny(clippy::pedantic)]
#![deny(clippy::std_instead_of_core)]

//! Plotly charts for hyperparameter optimization studies: per-trial
//! learning curves, the optimization history with its best-so-far line,
//! and slice plots of the objective against each parameter.
//!
//! # Getting Started
//!
//! ```
//! use optimizer_viz::prelude::*;
//!
//! let study = Study::new(Direction::Minimize);
//! for (i, x) in [0.9, 0.1, 0.5].into_iter().enumerate() {
//!     let number = i as u64;
//!     study.push(
//!         FrozenTrial::complete(number, (x - 0.3_f64).powi(2))
//!             .with_param("x", x)
//!             .report(0, 1.0)
//!             .report(1, x),
//!     );
//! }
//!
//! let history = optimization_history_figure(&study).unwrap();
//! assert_eq!(history.data.len(), 2);
//!
//! let slices = slice_figure(&study, &[]);
//! assert_eq!(slices.data.len(), 1);
//! ```
//!
//! # Core Concepts
//!
//! | Type | Role |
//! |------|------|
//! | [`Study`] | Direction plus the ordered trial records of an optimization run. |
//! | [`FrozenTrial`] | One finished or running evaluation: state, value, parameters, intermediate values. |
//! | [`Figure`] | Plotly traces and layout, serializable to Plotly.js JSON. |
//! | [`Backend`] | Renderer with a capability check; [`HtmlBackend`] writes HTML pages. |
//!
//! # Feature Flags
//!
//! | Flag | What it enables | Default |
//! |------|----------------|---------|
//! | `tracing` | Warnings and debug events via [`tracing`](https://docs.rs/tracing) | on |

/// Emit a `tracing::warn!` event when the `tracing` feature is enabled.
/// Otherwise the arguments are type-checked but never formatted.
#[cfg(feature = "tracing")]
macro_rules! trace_warn {
    ($($arg:tt)*) => { tracing::warn!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_warn {
    ($($arg:tt)*) => {
        if false {
            let _ = format!($($arg)*);
        }
    };
}

/// Emit a `tracing::info!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_info {
    ($($arg:tt)*) => { tracing::info!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_info {
    ($($arg:tt)*) => {};
}

/// Emit a `tracing::debug!` event when the `tracing` feature is enabled.
/// No-op otherwise.
#[cfg(feature = "tracing")]
macro_rules! trace_debug {
    ($($arg:tt)*) => { tracing::debug!($($arg)*) };
}

#[cfg(not(feature = "tracing"))]
macro_rules! trace_debug {
    ($($arg:tt)*) => {};
}

mod error;
mod param;
mod serde_float;
mod study;
mod trial;
mod types;
pub mod visualization;

pub use error::{Error, Result};
pub use param::ParamValue;
pub use study::{Study, StudySnapshot};
pub use trial::FrozenTrial;
pub use types::{Direction, TrialState};
pub use visualization::backend::{
    DEFAULT_PLOTLY_SRC, MIN_PLOTLY_VERSION, check_availability,
};
pub use visualization::{
    Backend, Capability, Figure, HtmlBackend, HtmlBackendBuilder, PlotlyVersion,
    figure, generate_html_report, intermediate_values_figure, optimization_history_figure,
    plot_intermediate_values, plot_optimization_history, plot_slice, slice_figure,
};

/// Convenient wildcard import for the most common types.
///
/// ```
/// use optimizer_viz::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::param::ParamValue;
    pub use crate::study::{Study, StudySnapshot};
    pub use crate::trial::FrozenTrial;
    pub use crate::types::{Direction, TrialState};
    pub use crate::visualization::{
        Backend, Capability, Figure, HtmlBackend, PlotlyVersion, generate_html_report,
        intermediate_values_figure, optimization_history_figure, plot_intermediate_values,
        plot_optimization_history, plot_slice, slice_figure,
    };
}
