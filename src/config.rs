use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "autofeedback";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Assignment the pipeline records rows against unless told otherwise.
pub const DEFAULT_ASSIGNMENT_ID: i64 = 101;

/// Model profile handed to the local generation executable.
pub const DEFAULT_MODEL: &str = "ux1";

/// Resolved run configuration. Built once from the CLI surface and injected
/// into every component; nothing below `main` reads the environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the student's submitted files.
    pub student_code_dir: PathBuf,
    /// Autograder's textual output for this submission.
    pub autograder_output_file: PathBuf,
    /// Professor instructions shared across submissions.
    pub instructions_file: PathBuf,
    /// Where the generated feedback Markdown lands.
    pub feedback_file: PathBuf,
    /// SQLite store with the pre-provisioned schema.
    pub database_file: PathBuf,
    pub assignment_id: i64,
    pub model: String,
}

fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("."))
}

/// Get the default inputs directory: ~/logs
pub fn default_logs_dir() -> PathBuf {
    home_dir().join("logs")
}

pub fn default_student_code_dir() -> PathBuf {
    default_logs_dir().join("studentcode")
}

pub fn default_autograder_output_file() -> PathBuf {
    default_logs_dir().join("autograder_output.txt")
}

pub fn default_instructions_file() -> PathBuf {
    default_logs_dir().join("README.md")
}

/// Get the default feedback output path: ~/feedback.md
pub fn default_feedback_file() -> PathBuf {
    home_dir().join("feedback.md")
}

/// Get the default store path: ~/agllmdatabase.db
pub fn default_database_file() -> PathBuf {
    home_dir().join("agllmdatabase.db")
}
