//! Plotly chart object model.
//!
//! [`Figure`] mirrors the `{"data": [...], "layout": {...}}` document that
//! [Plotly.js](https://plotly.com/javascript/) consumes. Only the attributes
//! the study plots need are modelled; unset attributes are left out of the
//! JSON so Plotly applies its own defaults.

use core::fmt::Write as _;

use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::error::Result;

/// A text title, serialized as `{"text": ...}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Title {
    /// The title text.
    pub text: String,
}

impl Title {
    /// Creates a title from any string-like value.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Drawing mode of a scatter trace.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Mode {
    /// Markers only.
    #[serde(rename = "markers")]
    Markers,
    /// A connecting line only.
    #[serde(rename = "lines")]
    Lines,
    /// A line with markers on each point.
    #[serde(rename = "lines+markers")]
    LinesMarkers,
}

/// Color bar attached to a color-scaled marker.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ColorBar {
    /// Title shown next to the bar.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
}

/// Marker styling of a scatter trace.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Marker {
    /// Upper bound on the number of markers drawn per trace.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maxdisplayed: Option<u32>,
    /// Per-point values mapped onto `colorscale`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec<f64>>,
    /// Named Plotly color scale, e.g. `"Blues"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorscale: Option<String>,
    /// Color bar settings.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub colorbar: Option<ColorBar>,
    /// Whether the color bar is drawn. Plotly's default is `true`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showscale: Option<bool>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
enum TraceType {
    #[default]
    #[serde(rename = "scatter")]
    Scatter,
}

/// A scatter trace: one series of x/y points plus styling.
///
/// `x` holds JSON values because slice plots put categorical labels on
/// the x-axis next to numeric parameters.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Scatter {
    #[serde(rename = "type")]
    trace_type: TraceType,
    /// X coordinates.
    pub x: Vec<serde_json::Value>,
    /// Y coordinates.
    pub y: Vec<f64>,
    /// Drawing mode; Plotly picks one from the point count when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    /// Legend label.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Marker styling.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    /// Whether the trace is listed in the legend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showlegend: Option<bool>,
    /// X axis reference (`"x"`, `"x2"`, ...) for subplot grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xaxis: Option<String>,
    /// Y axis reference (`"y"`, `"y2"`, ...) for subplot grids.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub yaxis: Option<String>,
}

impl Scatter {
    /// Creates a trace from x and y coordinates.
    #[must_use]
    pub fn new<X>(x: impl IntoIterator<Item = X>, y: impl IntoIterator<Item = f64>) -> Self
    where
        X: Into<serde_json::Value>,
    {
        Self {
            x: x.into_iter().map(Into::into).collect(),
            y: y.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Sets the drawing mode.
    #[must_use]
    pub fn mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Sets the legend label.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the marker styling.
    #[must_use]
    pub fn marker(mut self, marker: Marker) -> Self {
        self.marker = Some(marker);
        self
    }

    /// Sets legend visibility.
    #[must_use]
    pub fn show_legend(mut self, show: bool) -> Self {
        self.showlegend = Some(show);
        self
    }

    /// Number of points in the trace.
    #[must_use]
    pub fn len(&self) -> usize {
        self.y.len()
    }

    /// Returns `true` if the trace has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }
}

/// One x or y axis of the layout.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Axis {
    /// Axis title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<Title>,
    /// Fraction of the plot area the axis spans, `[start, end]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<[f64; 2]>,
    /// The axis this one is anchored to, e.g. `"y2"`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anchor: Option<String>,
    /// Axis whose range this one follows, used for shared axes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matches: Option<String>,
    /// Whether tick labels are drawn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub showticklabels: Option<bool>,
}

impl Axis {
    /// Creates an axis with a title and no other settings.
    #[must_use]
    pub fn titled(text: impl Into<String>) -> Self {
        Self {
            title: Some(Title::new(text)),
            ..Self::default()
        }
    }
}

/// Figure layout: title, legend switch and the axes of every panel.
///
/// Axis `i` (0-based) is serialized as `xaxis` / `yaxis` for `i == 0`
/// and `xaxis{i+1}` / `yaxis{i+1}` otherwise.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Layout {
    /// Figure title.
    pub title: Option<Title>,
    /// Global legend switch.
    pub showlegend: Option<bool>,
    /// X axes, one per panel.
    pub x_axes: Vec<Axis>,
    /// Y axes, one per panel.
    pub y_axes: Vec<Axis>,
}

impl Layout {
    /// Creates a single-panel layout with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(Title::new(title)),
            showlegend: None,
            x_axes: vec![Axis::default()],
            y_axes: vec![Axis::default()],
        }
    }

    /// Sets the x-axis title of the first panel.
    #[must_use]
    pub fn x_title(mut self, text: impl Into<String>) -> Self {
        set_axis_title(&mut self.x_axes, 1, text.into());
        self
    }

    /// Sets the y-axis title of the first panel.
    #[must_use]
    pub fn y_title(mut self, text: impl Into<String>) -> Self {
        set_axis_title(&mut self.y_axes, 1, text.into());
        self
    }

    /// Sets the legend switch.
    #[must_use]
    pub fn show_legend(mut self, show: bool) -> Self {
        self.showlegend = Some(show);
        self
    }
}

impl Serialize for Layout {
    fn serialize<S: Serializer>(&self, serializer: S) -> core::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        if let Some(title) = &self.title {
            map.serialize_entry("title", title)?;
        }
        if let Some(show) = self.showlegend {
            map.serialize_entry("showlegend", &show)?;
        }
        for (i, axis) in self.x_axes.iter().enumerate() {
            map.serialize_entry(&axis_key("xaxis", i + 1), axis)?;
        }
        for (i, axis) in self.y_axes.iter().enumerate() {
            map.serialize_entry(&axis_key("yaxis", i + 1), axis)?;
        }
        map.end()
    }
}

/// A chart: traces plus layout, ready to hand to a rendering backend.
///
/// # Examples
///
/// ```
/// use optimizer_viz::figure::{Figure, Layout, Mode, Scatter};
///
/// let mut figure = Figure::new(Layout::new("Demo").x_title("Step"));
/// figure.add_trace(Scatter::new([0, 1, 2], [1.0, 0.5, 0.25]).mode(Mode::Lines));
///
/// let json = figure.to_json().unwrap();
/// assert!(json.contains("\"xaxis\""));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Figure {
    /// Traces in drawing order.
    pub data: Vec<Scatter>,
    /// Figure layout.
    pub layout: Layout,
}

impl Figure {
    /// Creates a figure with no traces.
    #[must_use]
    pub fn new(layout: Layout) -> Self {
        Self {
            data: Vec::new(),
            layout,
        }
    }

    /// Creates a figure with a single row of `cols` side-by-side panels.
    ///
    /// Panels are separated by a horizontal spacing of `0.2 / cols` of the
    /// plot width. With `shared_yaxes`, every y-axis after the first
    /// follows the range of `y` and hides its tick labels.
    #[must_use]
    pub fn make_subplots(layout: Layout, cols: usize, shared_yaxes: bool) -> Self {
        let cols = cols.max(1);
        let mut x_axes = Vec::with_capacity(cols);
        let mut y_axes = Vec::with_capacity(cols);
        for (i, domain) in column_domains(cols).into_iter().enumerate() {
            let col = i + 1;
            x_axes.push(Axis {
                domain: Some(domain),
                anchor: Some(axis_ref("y", col)),
                ..Axis::default()
            });
            let shared = shared_yaxes && col > 1;
            y_axes.push(Axis {
                anchor: Some(axis_ref("x", col)),
                matches: shared.then(|| "y".to_owned()),
                showticklabels: shared.then_some(false),
                ..Axis::default()
            });
        }
        Self::new(Layout {
            x_axes,
            y_axes,
            ..layout
        })
    }

    /// Appends a trace to the first panel.
    pub fn add_trace(&mut self, trace: Scatter) {
        self.data.push(trace);
    }

    /// Appends a trace bound to the axes of panel `col` (1-based).
    pub fn add_trace_at(&mut self, mut trace: Scatter, col: usize) {
        trace.xaxis = Some(axis_ref("x", col));
        trace.yaxis = Some(axis_ref("y", col));
        self.data.push(trace);
    }

    /// Sets the x-axis title of panel `col` (1-based). Unknown panels are ignored.
    pub fn update_xaxis_title(&mut self, col: usize, text: impl Into<String>) {
        set_axis_title(&mut self.layout.x_axes, col, text.into());
    }

    /// Sets the y-axis title of panel `col` (1-based). Unknown panels are ignored.
    pub fn update_yaxis_title(&mut self, col: usize, text: impl Into<String>) {
        set_axis_title(&mut self.layout.y_axes, col, text.into());
    }

    /// Returns the x-axis of panel `col` (1-based).
    #[must_use]
    pub fn x_axis(&self, col: usize) -> Option<&Axis> {
        col.checked_sub(1).and_then(|i| self.layout.x_axes.get(i))
    }

    /// Returns the y-axis of panel `col` (1-based).
    #[must_use]
    pub fn y_axis(&self, col: usize) -> Option<&Axis> {
        col.checked_sub(1).and_then(|i| self.layout.y_axes.get(i))
    }

    /// Returns `true` if the figure has no traces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the figure title text, if any.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.layout.title.as_ref().map(|t| t.text.as_str())
    }

    /// Serialize to the Plotly.js JSON figure format.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the figure cannot be encoded.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Render a standalone HTML page that draws the figure with the
    /// Plotly.js build at `plotly_src`.
    ///
    /// # Errors
    ///
    /// Returns a serialization error if the figure cannot be encoded.
    pub fn to_html(&self, plotly_src: &str) -> Result<String> {
        let title = self.title().unwrap_or("Plot");
        let mut html = page_header(title, plotly_src);
        write_plot(&mut html, "figure", self)?;
        html.push_str(PAGE_FOOTER);
        Ok(html)
    }
}

pub(crate) const PAGE_FOOTER: &str = "</body>\n</html>\n";

/// Opening of an HTML page up to and including `<body>`.
pub(crate) fn page_header(title: &str, plotly_src: &str) -> String {
    let mut html = String::with_capacity(4096);
    let _ = write!(
        html,
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<script src="{src}"></script>
<style>
  * {{ margin: 0; padding: 0; box-sizing: border-box; }}
  body {{ font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif;
         background: #f5f6fa; color: #2c3e50; padding: 24px; }}
  h1 {{ text-align: center; margin-bottom: 8px; font-size: 1.8em; }}
  .subtitle {{ text-align: center; color: #7f8c8d; margin-bottom: 24px; }}
  .chart {{ background: #fff; border-radius: 8px; box-shadow: 0 2px 8px rgba(0,0,0,0.08);
            margin-bottom: 24px; padding: 16px; }}
</style>
</head>
<body>
"#,
        title = escape_html(title),
        src = escape_html(plotly_src),
    );
    html
}

/// Append a chart container and the script drawing `figure` into it.
pub(crate) fn write_plot(html: &mut String, div_id: &str, figure: &Figure) -> Result<()> {
    // "</" inside a JSON string would close the script element early.
    let json = serde_json::to_string(figure)?.replace("</", "<\\/");
    let _ = write!(
        html,
        r#"<div class="chart"><div id="{div_id}"></div></div>
<script>
(function () {{
  var fig = {json};
  Plotly.newPlot("{div_id}", fig.data, fig.layout, {{ responsive: true }});
}})();
</script>
"#,
    );
    Ok(())
}

pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn axis_key(prefix: &str, col: usize) -> String {
    if col == 1 {
        prefix.to_owned()
    } else {
        format!("{prefix}{col}")
    }
}

fn axis_ref(prefix: &str, col: usize) -> String {
    axis_key(prefix, col)
}

fn set_axis_title(axes: &mut [Axis], col: usize, text: String) {
    if let Some(axis) = col.checked_sub(1).and_then(|i| axes.get_mut(i)) {
        axis.title = Some(Title { text });
    }
}

/// `[start, end]` domains of `cols` equally wide columns.
#[allow(clippy::cast_precision_loss)]
fn column_domains(cols: usize) -> Vec<[f64; 2]> {
    let n = cols as f64;
    let spacing = if cols > 1 { 0.2 / n } else { 0.0 };
    let width = (1.0 - spacing * (n - 1.0)) / n;
    (0..cols)
        .map(|i| {
            let start = i as f64 * (width + spacing);
            [start, (start + width).min(1.0)]
        })
        .collect()
}
