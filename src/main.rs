use clap::Parser;
use tracing_subscriber::EnvFilter;

use autofeedback::cli::Args;
use autofeedback::config;
use autofeedback::generator::OllamaRunner;
use autofeedback::pipeline::{self, RunOutcome};

fn main() {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Status 1 on a missing identifier, like the rest of the course tooling.
    let Some(student_repo) = args.student_repo.clone().filter(|s| !s.is_empty()) else {
        eprintln!("Error: No repository name provided.");
        std::process::exit(1);
    };

    let config = args.to_config();
    tracing::info!(version = config::APP_VERSION, "{} starting", config::APP_NAME);

    let model = OllamaRunner::new(&config.model);

    let outcome = match pipeline::run(&config, &student_repo, &model) {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!(error = %e, "Run aborted");
            std::process::exit(1);
        }
    };

    // Failures after input loading were already logged; the run ends
    // without a crash.
    if let RunOutcome::Completed { persisted: false, .. } = outcome {
        tracing::warn!("Feedback written but not recorded in the database");
    }
}
