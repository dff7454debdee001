mod common;

use optimizer_viz::figure::Mode;
use optimizer_viz::{Direction, FrozenTrial, Study, slice_figure};

fn two_param_study() -> Study {
    Study::with_trials(
        Direction::Minimize,
        vec![
            FrozenTrial::complete(0, 1.0).with_param("x", 0.5).with_param("y", 3_i64),
            FrozenTrial::complete(1, 0.3).with_param("x", 0.1),
            FrozenTrial::pruned(2).with_param("x", 0.9).with_param("y", 1_i64),
            FrozenTrial::complete(3, 0.7).with_param("x", 0.2).with_param("y", 2_i64),
        ],
    )
}

#[test]
fn empty_study_returns_shell() {
    common::init_tracing();
    let study = Study::new(Direction::Minimize);

    let figure = slice_figure(&study, &[]);
    assert!(figure.is_empty());
    assert_eq!(figure.title(), Some("Slice Plot"));
}

#[test]
fn no_completed_trials_returns_shell() {
    let study = Study::with_trials(
        Direction::Minimize,
        vec![FrozenTrial::pruned(0).with_param("x", 1.0)],
    );

    assert!(slice_figure(&study, &[]).is_empty());
}

#[test]
fn unknown_param_returns_shell() {
    let study = Study::with_trials(
        Direction::Minimize,
        vec![FrozenTrial::complete(0, 1.0).with_param("y", 1.0)],
    );

    let figure = slice_figure(&study, &["x"]);
    assert!(figure.is_empty());
}

#[test]
fn one_unknown_param_aborts_whole_request() {
    let figure = slice_figure(&two_param_study(), &["x", "missing", "y"]);
    assert!(figure.is_empty());
}

#[test]
fn param_only_set_in_pruned_trial_is_unknown() {
    let study = Study::with_trials(
        Direction::Minimize,
        vec![
            FrozenTrial::complete(0, 1.0).with_param("x", 1.0),
            FrozenTrial::pruned(1).with_param("z", 1.0),
        ],
    );

    assert!(slice_figure(&study, &["z"]).is_empty());
}

#[test]
fn single_param_single_panel() {
    let figure = slice_figure(&two_param_study(), &["x"]);

    assert_eq!(figure.data.len(), 1);
    let trace = &figure.data[0];
    assert_eq!(trace.mode, Some(Mode::Markers));
    assert_eq!(trace.showlegend, Some(false));
    assert_eq!(trace.y, vec![1.0, 0.3, 0.7]);
    assert_eq!(
        trace.x,
        vec![
            serde_json::json!(0.5),
            serde_json::json!(0.1),
            serde_json::json!(0.2)
        ]
    );

    let marker = trace.marker.as_ref().unwrap();
    assert_eq!(marker.color, Some(vec![0.0, 1.0, 3.0]));
    assert_eq!(marker.colorscale.as_deref(), Some("Blues"));
    let bar_title = marker.colorbar.as_ref().unwrap().title.as_ref().unwrap();
    assert_eq!(bar_title.text, "#Trials");

    assert_eq!(figure.x_axis(1).unwrap().title.as_ref().unwrap().text, "x");
    assert_eq!(
        figure.y_axis(1).unwrap().title.as_ref().unwrap().text,
        "Objective Value"
    );
    assert!(figure.x_axis(2).is_none());
}

#[test]
fn two_params_two_panels() {
    let figure = slice_figure(&two_param_study(), &["y", "x"]);

    assert_eq!(figure.data.len(), 2);
    assert_eq!(figure.layout.x_axes.len(), 2);

    // Panels are sorted by name.
    assert_eq!(figure.x_axis(1).unwrap().title.as_ref().unwrap().text, "x");
    assert_eq!(figure.x_axis(2).unwrap().title.as_ref().unwrap().text, "y");

    let first = figure.data[0].marker.as_ref().unwrap();
    let second = figure.data[1].marker.as_ref().unwrap();
    assert_eq!(first.showscale, Some(true));
    assert_eq!(second.showscale, Some(false));

    assert!(figure.y_axis(1).unwrap().title.is_some());
    assert!(figure.y_axis(2).unwrap().title.is_none());
    assert_eq!(figure.y_axis(2).unwrap().matches.as_deref(), Some("y"));

    assert_eq!(figure.data[1].xaxis.as_deref(), Some("x2"));
    assert_eq!(figure.data[1].yaxis.as_deref(), Some("y2"));
}

#[test]
fn trials_missing_a_param_are_skipped_per_panel() {
    let figure = slice_figure(&two_param_study(), &[]);

    assert_eq!(figure.data.len(), 2);
    // Trial 1 never set "y": it shows up in the x panel only.
    assert_eq!(figure.data[0].len(), 3);
    assert_eq!(figure.data[1].len(), 2);
    assert_eq!(figure.data[1].y, vec![1.0, 0.7]);
    assert_eq!(
        figure.data[1].x,
        vec![serde_json::json!(3), serde_json::json!(2)]
    );
}

#[test]
fn duplicate_params_are_merged() {
    let figure = slice_figure(&two_param_study(), &["x", "x"]);
    assert_eq!(figure.data.len(), 1);
    assert!(figure.data[0].xaxis.is_none());
}

#[test]
fn empty_params_selects_all_sorted() {
    let study = Study::with_trials(
        Direction::Maximize,
        vec![
            FrozenTrial::complete(0, 1.0)
                .with_param("momentum", 0.9)
                .with_param("batch_size", 64_i64),
            FrozenTrial::complete(1, 2.0).with_param("activation", "relu"),
        ],
    );

    let figure = slice_figure(&study, &[]);
    let titles: Vec<_> = (1..=3)
        .map(|col| figure.x_axis(col).unwrap().title.as_ref().unwrap().text.clone())
        .collect();
    assert_eq!(titles, vec!["activation", "batch_size", "momentum"]);
    assert_eq!(figure.data[0].x, vec![serde_json::json!("relu")]);
}

#[test]
fn completed_trials_without_params_return_shell() {
    let study = Study::with_trials(Direction::Minimize, vec![FrozenTrial::complete(0, 1.0)]);
    assert!(slice_figure(&study, &[]).is_empty());
}

#[cfg(feature = "tracing")]
#[test]
fn no_completed_trials_warns() {
    let study = Study::with_trials(Direction::Minimize, vec![FrozenTrial::running(0)]);

    let (figure, logs) = common::capture_warnings(|| slice_figure(&study, &[]));
    assert!(figure.is_empty());
    assert!(logs.contains("Your study does not have any completed trials."));
}

#[cfg(feature = "tracing")]
#[test]
fn unknown_param_warns_with_its_name() {
    let study = Study::with_trials(
        Direction::Minimize,
        vec![FrozenTrial::complete(0, 1.0).with_param("y", 1.0)],
    );

    let (figure, logs) = common::capture_warnings(|| slice_figure(&study, &["x"]));
    assert!(figure.is_empty());
    assert!(logs.contains("Parameter x does not exist in your study."));
}

#[cfg(feature = "tracing")]
#[test]
fn known_params_do_not_warn() {
    let (figure, logs) = common::capture_warnings(|| slice_figure(&two_param_study(), &["x", "y"]));
    assert_eq!(figure.data.len(), 2);
    assert!(logs.is_empty());
}
