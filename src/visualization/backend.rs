//! Rendering backends and the availability check run before plotting.
//!
//! A [`Backend`] reports what it can render through
//! [`capability()`](Backend::capability), queried on every display call.
//! [`HtmlBackend`] writes each figure to a standalone HTML page that loads
//! Plotly.js.

use core::cmp::Ordering;
use core::fmt;
use core::str::FromStr;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

use super::figure::Figure;

/// Oldest Plotly.js release whose figure schema the builders target.
pub const MIN_PLOTLY_VERSION: PlotlyVersion = PlotlyVersion::new(2, 0, 0);

/// Plotly.js release loaded by [`HtmlBackend`] unless configured otherwise.
pub const DEFAULT_PLOTLY_SRC: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// A `major.minor.patch` release number.
///
/// Missing trailing components parse as zero, so `"2"` equals `"2.0.0"`.
/// Pre-release suffixes (`"2.0.0-rc.1"`) are ignored.
///
/// # Examples
///
/// ```
/// use optimizer_viz::PlotlyVersion;
///
/// let v: PlotlyVersion = "2.35.2".parse().unwrap();
/// assert!(v > PlotlyVersion::new(2, 9, 0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PlotlyVersion {
    /// Major release.
    pub major: u32,
    /// Minor release.
    pub minor: u32,
    /// Patch release.
    pub patch: u32,
}

impl PlotlyVersion {
    /// Creates a version from its components.
    #[must_use]
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Extract the version from a Plotly.js file name such as
    /// `plotly-2.35.2.min.js` or a URL ending in one.
    #[must_use]
    pub fn from_script_name(src: &str) -> Option<Self> {
        let file = src.rsplit(['/', '\\']).next()?;
        let rest = file.strip_prefix("plotly-")?;
        let version = rest
            .strip_suffix(".min.js")
            .or_else(|| rest.strip_suffix(".js"))?;
        version.parse().ok()
    }
}

impl FromStr for PlotlyVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let release = s.trim().trim_start_matches('v');
        let release = release.split(['-', '+']).next().unwrap_or_default();
        let mut parts = [0_u32; 3];
        let mut n = 0;
        for piece in release.split('.') {
            if n == parts.len() {
                return Err(Error::InvalidVersion(s.to_owned()));
            }
            parts[n] = piece
                .parse()
                .map_err(|_| Error::InvalidVersion(s.to_owned()))?;
            n += 1;
        }
        Ok(Self::new(parts[0], parts[1], parts[2]))
    }
}

impl PartialOrd for PlotlyVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PlotlyVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch).cmp(&(other.major, other.minor, other.patch))
    }
}

impl fmt::Display for PlotlyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// What a backend reports about its charting library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Capability {
    /// The library is present at the given version.
    Available(PlotlyVersion),
    /// The library cannot be used; the string says why.
    Missing(String),
}

/// Trait for pluggable figure renderers.
///
/// The trait requires `Send + Sync` so a backend can be shared between
/// threads that plot concurrently.
///
/// # Implementing a custom backend
///
/// ```
/// use optimizer_viz::{Backend, Capability, Figure, PlotlyVersion};
///
/// struct Stdout;
///
/// impl Backend for Stdout {
///     fn name(&self) -> &str {
///         "stdout"
///     }
///
///     fn capability(&self) -> Capability {
///         Capability::Available(PlotlyVersion::new(2, 35, 2))
///     }
///
///     fn show(&self, figure: &Figure) -> optimizer_viz::Result<()> {
///         println!("{}", figure.to_json()?);
///         Ok(())
///     }
/// }
/// ```
pub trait Backend: Send + Sync {
    /// Human-readable backend name used in error messages.
    fn name(&self) -> &str;

    /// Report whether the charting library is usable, and at which version.
    fn capability(&self) -> Capability;

    /// Display a figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure cannot be rendered.
    fn show(&self, figure: &Figure) -> Result<()>;
}

/// Verify that `backend` is present and at least [`MIN_PLOTLY_VERSION`].
///
/// # Errors
///
/// Returns [`Error::BackendUnavailable`] if the backend reports itself
/// missing, and [`Error::BackendOutdated`] if its version is too old.
pub fn check_availability(backend: &dyn Backend) -> Result<PlotlyVersion> {
    match backend.capability() {
        Capability::Missing(reason) => Err(Error::BackendUnavailable {
            backend: backend.name().to_owned(),
            reason,
        }),
        Capability::Available(version) if version < MIN_PLOTLY_VERSION => {
            Err(Error::BackendOutdated {
                found: version.to_string(),
                required: MIN_PLOTLY_VERSION.to_string(),
            })
        }
        Capability::Available(version) => Ok(version),
    }
}

/// Writes each figure to a standalone HTML page.
///
/// Pages are named `<prefix>-<title>.html` with the title lowercased and
/// non-alphanumeric runs collapsed to `-`. Showing two figures with the
/// same title overwrites the earlier page.
///
/// # Examples
///
/// ```
/// use optimizer_viz::HtmlBackend;
///
/// let backend = HtmlBackend::builder()
///     .output_dir(std::env::temp_dir())
///     .file_prefix("study")
///     .build();
/// assert_eq!(backend.plotly_src(), optimizer_viz::DEFAULT_PLOTLY_SRC);
/// ```
#[derive(Clone, Debug)]
pub struct HtmlBackend {
    output_dir: PathBuf,
    plotly_src: String,
    plotly_version: Option<PlotlyVersion>,
    file_prefix: String,
}

impl HtmlBackend {
    /// Creates a backend writing into `output_dir` with default settings.
    #[must_use]
    pub fn new(output_dir: impl AsRef<Path>) -> Self {
        Self::builder().output_dir(output_dir).build()
    }

    /// Return an [`HtmlBackendBuilder`] for configuring the backend.
    #[must_use]
    pub fn builder() -> HtmlBackendBuilder {
        HtmlBackendBuilder::new()
    }

    /// Directory pages are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Location of the Plotly.js script referenced by each page.
    #[must_use]
    pub fn plotly_src(&self) -> &str {
        &self.plotly_src
    }

    /// Path of the page [`show`](Backend::show) writes for `figure`.
    #[must_use]
    pub fn page_path(&self, figure: &Figure) -> PathBuf {
        let slug = slugify(figure.title().unwrap_or("figure"));
        self.output_dir.join(format!("{}-{slug}.html", self.file_prefix))
    }

    fn is_remote(&self) -> bool {
        self.plotly_src.starts_with("http://")
            || self.plotly_src.starts_with("https://")
            || self.plotly_src.starts_with("//")
    }
}

impl Default for HtmlBackend {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Backend for HtmlBackend {
    fn name(&self) -> &str {
        "Plotly.js"
    }

    fn capability(&self) -> Capability {
        if !self.is_remote() && !Path::new(&self.plotly_src).is_file() {
            return Capability::Missing(format!(
                "no Plotly.js script found at '{}'",
                self.plotly_src
            ));
        }
        match self
            .plotly_version
            .or_else(|| PlotlyVersion::from_script_name(&self.plotly_src))
        {
            Some(version) => Capability::Available(version),
            None => Capability::Missing(format!(
                "cannot determine the Plotly.js version of '{}'; set it explicitly",
                self.plotly_src
            )),
        }
    }

    fn show(&self, figure: &Figure) -> Result<()> {
        let path = self.page_path(figure);
        let html = figure.to_html(&self.plotly_src)?;
        std::fs::create_dir_all(&self.output_dir)?;
        std::fs::write(&path, html)?;
        trace_info!(path = %path.display(), traces = figure.data.len(), "figure written");
        Ok(())
    }
}

/// A builder for [`HtmlBackend`].
///
/// # Defaults
///
/// - Output directory: [`std::env::temp_dir()`]
/// - Plotly.js source: [`DEFAULT_PLOTLY_SRC`]
/// - Plotly.js version: parsed from the source's file name
/// - File prefix: `"plot"`
#[derive(Clone, Debug)]
pub struct HtmlBackendBuilder {
    output_dir: Option<PathBuf>,
    plotly_src: String,
    plotly_version: Option<PlotlyVersion>,
    file_prefix: String,
}

impl HtmlBackendBuilder {
    fn new() -> Self {
        Self {
            output_dir: None,
            plotly_src: DEFAULT_PLOTLY_SRC.to_owned(),
            plotly_version: None,
            file_prefix: "plot".to_owned(),
        }
    }

    /// Set the directory pages are written to.
    #[must_use]
    pub fn output_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Load Plotly.js from a URL or a local file path.
    #[must_use]
    pub fn plotly_src(mut self, src: impl Into<String>) -> Self {
        self.plotly_src = src.into();
        self
    }

    /// Declare the Plotly.js version instead of parsing it from the source name.
    #[must_use]
    pub fn plotly_version(mut self, version: PlotlyVersion) -> Self {
        self.plotly_version = Some(version);
        self
    }

    /// Set the file name prefix of written pages.
    #[must_use]
    pub fn file_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.file_prefix = prefix.into();
        self
    }

    /// Build the backend.
    #[must_use]
    pub fn build(self) -> HtmlBackend {
        HtmlBackend {
            output_dir: self.output_dir.unwrap_or_else(std::env::temp_dir),
            plotly_src: self.plotly_src,
            plotly_version: self.plotly_version,
            file_prefix: self.file_prefix,
        }
    }
}

fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    for c in title.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    if slug.is_empty() {
        slug.push_str("figure");
    }
    slug
}
