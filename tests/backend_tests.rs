mod common;

use common::RecordingBackend;
use optimizer_viz::{
    Backend, Capability, Direction, Error, FrozenTrial, HtmlBackend, PlotlyVersion, Study,
    check_availability, plot_intermediate_values, plot_optimization_history, plot_slice,
};

fn sample_study() -> Study {
    Study::with_trials(
        Direction::Minimize,
        vec![
            FrozenTrial::complete(0, 0.5).with_param("x", 1.0).report(0, 0.9),
            FrozenTrial::complete(1, 0.2).with_param("x", 2.0).report(0, 0.4),
        ],
    )
}

#[test]
fn missing_backend_fails_before_plotting() {
    let backend = RecordingBackend::with_capability(Capability::Missing("not installed".into()));
    let study = sample_study();

    for result in [
        plot_intermediate_values(&study, &backend),
        plot_optimization_history(&study, &backend),
        plot_slice(&study, &[], &backend),
    ] {
        let err = result.unwrap_err();
        assert!(matches!(err, Error::BackendUnavailable { .. }));
        assert!(err.to_string().contains("not installed"));
    }
    assert_eq!(backend.shown_count(), 0);
}

#[test]
fn outdated_backend_fails_with_remediation() {
    let backend =
        RecordingBackend::with_capability(Capability::Available(PlotlyVersion::new(1, 58, 5)));

    let err = plot_optimization_history(&sample_study(), &backend).unwrap_err();
    match &err {
        Error::BackendOutdated { found, required } => {
            assert_eq!(found, "1.58.5");
            assert_eq!(required, "2.0.0");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("plotly-2.0.0.min.js"));
    assert_eq!(backend.shown_count(), 0);
}

#[test]
fn availability_is_checked_before_reading_data() {
    let backend = RecordingBackend::with_capability(Capability::Missing("gone".into()));
    let study = Study::with_trials(
        Direction::Minimize,
        vec![FrozenTrial::complete(0, 1.0).with_value(None)],
    );

    let err = plot_optimization_history(&study, &backend).unwrap_err();
    assert!(matches!(err, Error::BackendUnavailable { .. }));
}

#[test]
fn minimum_version_is_accepted() {
    let backend =
        RecordingBackend::with_capability(Capability::Available(PlotlyVersion::new(2, 0, 0)));
    assert_eq!(
        check_availability(&backend).unwrap(),
        PlotlyVersion::new(2, 0, 0)
    );
}

#[test]
fn display_operations_show_built_figures() {
    common::init_tracing();
    let backend = RecordingBackend::available();
    let study = sample_study();

    plot_intermediate_values(&study, &backend).unwrap();
    plot_optimization_history(&study, &backend).unwrap();
    plot_slice(&study, &["x"], &backend).unwrap();

    let shown = backend.shown.lock().unwrap();
    let titles: Vec<_> = shown.iter().map(|f| f.title().unwrap().to_owned()).collect();
    assert_eq!(
        titles,
        vec!["Intermediate Values Plot", "Optimization History Plot", "Slice Plot"]
    );
    assert!(shown.iter().all(|f| !f.is_empty()));
}

#[test]
fn empty_study_is_still_shown() {
    let backend = RecordingBackend::available();
    plot_slice(&Study::new(Direction::Minimize), &[], &backend).unwrap();
    assert_eq!(backend.shown_count(), 1);
}

#[test]
fn data_error_propagates_from_display() {
    let backend = RecordingBackend::available();
    let study = Study::with_trials(
        Direction::Maximize,
        vec![FrozenTrial::complete(7, 1.0).with_value(None)],
    );

    let err = plot_optimization_history(&study, &backend).unwrap_err();
    assert!(matches!(err, Error::NonNumericValue { number: 7 }));
    assert_eq!(backend.shown_count(), 0);
}

#[test]
fn html_backend_default_cdn_is_available() {
    let backend = HtmlBackend::default();
    assert_eq!(
        backend.capability(),
        Capability::Available(PlotlyVersion::new(2, 35, 2))
    );
}

#[test]
fn html_backend_missing_local_script() {
    let backend = HtmlBackend::builder()
        .plotly_src("/nonexistent/dir/plotly-2.35.2.min.js")
        .build();
    assert!(matches!(backend.capability(), Capability::Missing(_)));
    assert!(matches!(
        check_availability(&backend),
        Err(Error::BackendUnavailable { .. })
    ));
}

#[test]
fn html_backend_unknown_version_needs_explicit_version() {
    let unknown = HtmlBackend::builder()
        .plotly_src("https://example.com/plotly.min.js")
        .build();
    assert!(matches!(unknown.capability(), Capability::Missing(_)));

    let declared = HtmlBackend::builder()
        .plotly_src("https://example.com/plotly.min.js")
        .plotly_version(PlotlyVersion::new(2, 12, 1))
        .build();
    assert_eq!(
        declared.capability(),
        Capability::Available(PlotlyVersion::new(2, 12, 1))
    );
}

#[test]
fn html_backend_local_script_is_found() {
    let dir = std::env::temp_dir().join("optimizer_viz_local_script");
    std::fs::create_dir_all(&dir).unwrap();
    let script = dir.join("plotly-2.30.0.min.js");
    std::fs::write(&script, "// stub").unwrap();

    let backend = HtmlBackend::builder()
        .plotly_src(script.to_string_lossy())
        .build();
    assert_eq!(
        backend.capability(),
        Capability::Available(PlotlyVersion::new(2, 30, 0))
    );

    std::fs::remove_dir_all(&dir).ok();
}

#[test]
fn html_backend_writes_page() {
    let dir = std::env::temp_dir().join("optimizer_viz_html_backend_writes_page");
    let backend = HtmlBackend::builder()
        .output_dir(&dir)
        .file_prefix("study")
        .build();

    plot_optimization_history(&sample_study(), &backend).unwrap();

    let path = dir.join("study-optimization-history-plot.html");
    let content = std::fs::read_to_string(&path).unwrap();
    assert!(content.contains("<!DOCTYPE html>"));
    assert!(content.contains("cdn.plot.ly/plotly-2.35.2.min.js"));
    assert!(content.contains("Plotly.newPlot"));
    assert!(content.contains("Best Value"));

    std::fs::remove_dir_all(&dir).ok();
}
