use optimizer_viz::prelude::*;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter("optimizer_viz=debug")
        .init();

    // Simulated tuning run with intermediate reporting and median-style pruning.
    let mut rng = fastrand::Rng::with_seed(42);
    let study = Study::new(Direction::Minimize);
    let optimizers = ["adam", "sgd", "rmsprop"];
    let mut finals: Vec<f64> = Vec::new();

    for number in 0..80_u64 {
        let lr = 10f64.powf(-5.0 + 4.0 * rng.f64());
        let n_layers = rng.i64(1..=5);
        let dropout = (rng.f64() * 10.0).round() * 0.05;
        let optimizer = optimizers[rng.usize(..optimizers.len())];

        let mut trial = FrozenTrial::running(number)
            .with_param("learning_rate", lr)
            .with_param("n_layers", n_layers)
            .with_param("dropout", dropout)
            .with_param("optimizer", optimizer);

        let mut loss = 1.0;
        let mut pruned = false;
        for epoch in 0..10 {
            loss *= 0.7 + 0.3 * lr.ln().abs() / 12.0;
            loss += dropout * 0.05;
            loss -= n_layers as f64 * 0.02;
            trial = trial.report(epoch, loss);

            if epoch == 4 && finals.len() >= 5 {
                let mut sorted = finals.clone();
                sorted.sort_by(f64::total_cmp);
                if loss > sorted[sorted.len() / 2] {
                    pruned = true;
                    break;
                }
            }
        }

        if pruned {
            trial.state = TrialState::Pruned;
        } else {
            trial.state = TrialState::Complete;
            trial.value = Some(loss);
            finals.push(loss);
        }
        study.push(trial);
    }

    if let Some(best) = study.best_trial() {
        println!("best trial: #{} value={:?}", best.number, best.value);
    }

    let backend = HtmlBackend::new("plots");
    plot_intermediate_values(&study, &backend).unwrap();
    plot_optimization_history(&study, &backend).unwrap();
    plot_slice(&study, &["learning_rate", "n_layers"], &backend).unwrap();

    let path = "optimization_report.html";
    generate_html_report(&study, path).unwrap();
    println!("\nPlots saved to plots/, report saved to {path}");
}
