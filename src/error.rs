/// Errors returned by plot builders, rendering backends and study snapshots.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Returned when the rendering backend cannot be found or loaded.
    #[error(
        "{backend} is not available. Please make Plotly.js reachable to use this feature: \
         point the backend at the official CDN build or at a local copy of plotly.min.js. \
         (The actual problem is as follows: {reason})"
    )]
    BackendUnavailable {
        /// The name of the backend that was queried.
        backend: String,
        /// Why the backend reported itself as missing.
        reason: String,
    },

    /// Returned when the rendering backend is older than the supported minimum.
    #[error(
        "your version of Plotly.js is {found}. Please use Plotly.js version {required} or \
         higher, for example https://cdn.plot.ly/plotly-{required}.min.js"
    )]
    BackendOutdated {
        /// The version the backend reported.
        found: String,
        /// The minimum supported version.
        required: String,
    },

    /// Returned when a completed trial carries no numeric objective value.
    #[error("Trial{number} has COMPLETE state, but its value is non float.")]
    NonNumericValue {
        /// The number of the offending trial.
        number: u64,
    },

    /// Returned when a version string cannot be parsed.
    #[error("invalid version string: '{0}'")]
    InvalidVersion(String),

    /// Returned when a study snapshot has an unknown schema version.
    #[error("unsupported snapshot version {0}")]
    UnsupportedSnapshot(u32),

    /// Returned when writing a figure or snapshot fails.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Returned when a figure or snapshot cannot be (de)serialized.
    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = core::result::Result<T, Error>;
