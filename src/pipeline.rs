//! Run orchestration: corpus → prompt → model → feedback file → store.
//!
//! Straight-line sequence that stops at the first failure. Failures after
//! the inputs are loaded do not crash the process; they come back as
//! inspectable [`RunOutcome`] variants after being logged.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::config::Config;
use crate::corpus::{self, CorpusError};
use crate::db::{self, DatabaseError, PersistSummary, RunRecord};
use crate::generator::{self, FeedbackModel};
use crate::writer;

/// Fatal errors: the run cannot even assemble its inputs.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("cannot load submission inputs: {0}")]
    Corpus(#[from] CorpusError),
}

/// How a run ended.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Feedback was generated and written. `persisted` is false when the
    /// store rejected the run; that failure is logged and swallowed.
    Completed {
        feedback_path: PathBuf,
        persisted: bool,
        file_rows: usize,
    },
    /// The model failed; nothing was written and nothing was persisted.
    GenerationFailed { message: String },
    /// Feedback could not be written; persistence was not attempted.
    WriteFailed { message: String },
}

pub fn run(
    config: &Config,
    student_repo: &str,
    model: &dyn FeedbackModel,
) -> Result<RunOutcome, PipelineError> {
    tracing::info!(student_repo, "Repository or directory name accepted");

    let corpus = corpus::load_corpus(&config.student_code_dir)?;
    let autograder_output = corpus::read_aux_file(&config.autograder_output_file)?;
    let instructions = corpus::read_aux_file(&config.instructions_file)?;
    tracing::info!(files = corpus.len(), "Submission corpus loaded");

    let prompt = generator::build_prompt(&corpus.concatenated(), &autograder_output, &instructions);

    let feedback = match model.generate(&prompt) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(error = %e, "Error in generating feedback");
            return Ok(RunOutcome::GenerationFailed {
                message: e.to_string(),
            });
        }
    };

    let feedback_path = match writer::write_feedback(
        &config.feedback_file,
        student_repo,
        config.assignment_id,
        &feedback,
    ) {
        Ok(path) => {
            tracing::info!(path = %path.display(), "Feedback saved");
            path
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to write feedback file");
            return Ok(RunOutcome::WriteFailed {
                message: e.to_string(),
            });
        }
    };

    let record = RunRecord {
        student_repo,
        assignment_id: config.assignment_id,
        corpus: &corpus,
        autograder_output: &autograder_output,
        feedback: &feedback,
    };

    let (persisted, file_rows) = match persist(&config.database_file, &record) {
        Ok(summary) => {
            tracing::info!(
                rows = summary.file_rows,
                anchor = summary.anchor_row_id,
                recorded_at = %summary.recorded_at,
                "Data successfully inserted into the database"
            );
            (true, summary.file_rows)
        }
        Err(e) => {
            tracing::error!(error = %e, "SQLite error");
            (false, 0)
        }
    };

    Ok(RunOutcome::Completed {
        feedback_path,
        persisted,
        file_rows,
    })
}

/// Connection lives exactly as long as the unit of work.
fn persist(db_path: &Path, record: &RunRecord<'_>) -> Result<PersistSummary, DatabaseError> {
    let mut conn = db::open_database(db_path)?;
    db::persist_run(&mut conn, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::sqlite::install_schema;
    use crate::generator::GenerateError;
    use std::fs;
    use tempfile::TempDir;

    struct StubModel {
        reply: Result<&'static str, &'static str>,
    }

    impl FeedbackModel for StubModel {
        fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
            match self.reply {
                Ok(text) => Ok(text.to_string()),
                Err(stderr) => Err(GenerateError::Model {
                    stderr: stderr.to_string(),
                }),
            }
        }
    }

    /// Records the prompt it was handed, then answers.
    struct CapturingModel {
        seen: std::sync::Mutex<String>,
    }

    impl FeedbackModel for CapturingModel {
        fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
            *self.seen.lock().unwrap() = prompt.to_string();
            Ok("ok".to_string())
        }
    }

    fn fixture(files: &[(&str, &str)]) -> (TempDir, Config) {
        let dir = TempDir::new().unwrap();
        let code_dir = dir.path().join("studentcode");
        fs::create_dir(&code_dir).unwrap();
        for (name, text) in files {
            fs::write(code_dir.join(name), text).unwrap();
        }
        fs::write(dir.path().join("autograder_output.txt"), "2/4 passed\n").unwrap();
        fs::write(dir.path().join("README.md"), "Grade gently.\n").unwrap();

        let database_file = dir.path().join("agllmdatabase.db");
        {
            let conn = rusqlite::Connection::open(&database_file).unwrap();
            install_schema(&conn).unwrap();
        }

        let config = Config {
            student_code_dir: code_dir,
            autograder_output_file: dir.path().join("autograder_output.txt"),
            instructions_file: dir.path().join("README.md"),
            feedback_file: dir.path().join("feedback.md"),
            database_file,
            assignment_id: 101,
            model: "ux1".to_string(),
        };
        (dir, config)
    }

    fn row_counts(config: &Config) -> (i64, i64, i64) {
        let conn = rusqlite::Connection::open(&config.database_file).unwrap();
        let q = |sql: &str| conn.query_row(sql, [], |r| r.get(0)).unwrap();
        (
            q("SELECT COUNT(*) FROM submissions"),
            q("SELECT COUNT(*) FROM autograder_outputs"),
            q("SELECT COUNT(*) FROM feedback"),
        )
    }

    #[test]
    fn full_run_writes_feedback_and_persists() {
        let (_dir, config) = fixture(&[("a.py", "x = 1\n"), ("b.py", "y = 2\n")]);
        let model = StubModel {
            reply: Ok("Why does b.py shadow x?"),
        };

        let outcome = run(&config, "alice-hw3", &model).unwrap();
        match outcome {
            RunOutcome::Completed {
                feedback_path,
                persisted,
                file_rows,
            } => {
                assert!(persisted);
                assert_eq!(file_rows, 2);
                let content = fs::read_to_string(feedback_path).unwrap();
                assert_eq!(
                    content,
                    "# Feedback for alice-hw3\n\nWhy does b.py shadow x?"
                );
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert_eq!(row_counts(&config), (2, 1, 1));
    }

    #[test]
    fn model_sees_all_three_sections() {
        let (_dir, config) = fixture(&[("a.py", "x = 1\n")]);
        let model = CapturingModel {
            seen: std::sync::Mutex::new(String::new()),
        };

        run(&config, "alice-hw3", &model).unwrap();

        let prompt = model.seen.lock().unwrap().clone();
        assert!(prompt.contains("File: a.py\nx = 1\n"));
        assert!(prompt.contains("**Autograder Output:**\n2/4 passed\n"));
        assert!(prompt.contains("**Professor Instructions:**\nGrade gently.\n"));
    }

    #[test]
    fn generation_failure_stops_before_write_and_persist() {
        let (_dir, config) = fixture(&[("a.py", "x = 1\n")]);
        let model = StubModel {
            reply: Err("model not found"),
        };

        let outcome = run(&config, "alice-hw3", &model).unwrap();
        match outcome {
            RunOutcome::GenerationFailed { message } => {
                assert_eq!(message, "model not found");
            }
            other => panic!("expected generation failure, got {other:?}"),
        }
        assert!(!config.feedback_file.exists());
        assert_eq!(row_counts(&config), (0, 0, 0));
    }

    #[test]
    fn write_failure_stops_before_persist() {
        let (_dir, mut config) = fixture(&[("a.py", "x = 1\n")]);
        config.feedback_file = PathBuf::from("/nonexistent/dir/feedback.md");
        let model = StubModel { reply: Ok("fine") };

        let outcome = run(&config, "alice-hw3", &model).unwrap();
        assert!(matches!(outcome, RunOutcome::WriteFailed { .. }));
        assert_eq!(row_counts(&config), (0, 0, 0));
    }

    #[test]
    fn database_failure_is_swallowed_after_logging() {
        let (_dir, mut config) = fixture(&[("a.py", "x = 1\n")]);
        // A store without the schema: every insert fails.
        let bare = config.database_file.with_file_name("bare.db");
        rusqlite::Connection::open(&bare).unwrap();
        config.database_file = bare;
        let model = StubModel { reply: Ok("fine") };

        let outcome = run(&config, "alice-hw3", &model).unwrap();
        match outcome {
            RunOutcome::Completed {
                persisted,
                file_rows,
                ..
            } => {
                assert!(!persisted);
                assert_eq!(file_rows, 0);
            }
            other => panic!("expected completion, got {other:?}"),
        }
        // Feedback file still written before the store failed
        assert!(config.feedback_file.exists());
    }

    #[test]
    fn empty_submission_directory_completes_without_persisting() {
        let (_dir, config) = fixture(&[]);
        let model = StubModel { reply: Ok("fine") };

        let outcome = run(&config, "alice-hw3", &model).unwrap();
        match outcome {
            RunOutcome::Completed {
                persisted,
                file_rows,
                ..
            } => {
                assert!(!persisted);
                assert_eq!(file_rows, 0);
            }
            other => panic!("expected completion, got {other:?}"),
        }
        assert!(config.feedback_file.exists());
        assert_eq!(row_counts(&config), (0, 0, 0));
    }

    #[test]
    fn missing_submission_directory_is_fatal() {
        let (_dir, mut config) = fixture(&[]);
        config.student_code_dir = PathBuf::from("/nonexistent/studentcode");
        let model = StubModel { reply: Ok("fine") };

        let err = run(&config, "alice-hw3", &model).unwrap_err();
        assert!(matches!(err, PipelineError::Corpus(_)));
    }

    #[test]
    fn missing_aux_file_is_fatal() {
        let (_dir, mut config) = fixture(&[("a.py", "x = 1\n")]);
        config.instructions_file = config.instructions_file.with_file_name("gone.md");
        let model = StubModel { reply: Ok("fine") };

        assert!(run(&config, "alice-hw3", &model).is_err());
    }

    #[test]
    fn outcome_serializes_with_status_tag() {
        let outcome = RunOutcome::GenerationFailed {
            message: "boom".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "generation_failed");
        assert_eq!(json["message"], "boom");
    }
}
