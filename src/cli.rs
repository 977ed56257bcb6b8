use std::path::PathBuf;

use clap::Parser;

use crate::config::{self, Config};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Student repository or directory name identifying this submission.
    // Optional at the clap level; main checks it by hand and exits 1.
    pub student_repo: Option<String>,

    /// Directory containing the submitted source files.
    /// Can also be set using the AF_STUDENT_CODE_DIR environment variable.
    /// Default value: ~/logs/studentcode
    #[arg(long, env = "AF_STUDENT_CODE_DIR")]
    pub student_code_dir: Option<PathBuf>,

    /// Autograder output text file for this submission.
    /// Can also be set using the AF_AUTOGRADER_OUTPUT environment variable.
    /// Default value: ~/logs/autograder_output.txt
    #[arg(long, env = "AF_AUTOGRADER_OUTPUT")]
    pub autograder_output_file: Option<PathBuf>,

    /// Professor instructions file (shared context for the model).
    /// Can also be set using the AF_INSTRUCTIONS environment variable.
    /// Default value: ~/logs/README.md
    #[arg(long, env = "AF_INSTRUCTIONS")]
    pub instructions_file: Option<PathBuf>,

    /// Where to write the generated feedback Markdown.
    /// Can also be set using the AF_FEEDBACK_FILE environment variable.
    /// Default value: ~/feedback.md
    #[arg(long, env = "AF_FEEDBACK_FILE")]
    pub feedback_file: Option<PathBuf>,

    /// SQLite database file (schema must already exist).
    /// Can also be set using the AF_DATABASE environment variable.
    /// Default value: ~/agllmdatabase.db
    #[arg(long, env = "AF_DATABASE")]
    pub database_file: Option<PathBuf>,

    /// Assignment id recorded with every submission row.
    /// Can also be set using the AF_ASSIGNMENT_ID environment variable.
    #[arg(long, env = "AF_ASSIGNMENT_ID", default_value_t = config::DEFAULT_ASSIGNMENT_ID)]
    pub assignment_id: i64,

    /// Model profile passed to `ollama run`.
    /// Can also be set using the AF_MODEL environment variable.
    #[arg(long, env = "AF_MODEL", default_value = config::DEFAULT_MODEL)]
    pub model: String,
}

impl Args {
    /// Resolve the configuration, filling unset paths with home-derived
    /// defaults.
    pub fn to_config(&self) -> Config {
        Config {
            student_code_dir: self
                .student_code_dir
                .clone()
                .unwrap_or_else(config::default_student_code_dir),
            autograder_output_file: self
                .autograder_output_file
                .clone()
                .unwrap_or_else(config::default_autograder_output_file),
            instructions_file: self
                .instructions_file
                .clone()
                .unwrap_or_else(config::default_instructions_file),
            feedback_file: self
                .feedback_file
                .clone()
                .unwrap_or_else(config::default_feedback_file),
            database_file: self
                .database_file
                .clone()
                .unwrap_or_else(config::default_database_file),
            assignment_id: self.assignment_id,
            model: self.model.clone(),
        }
    }
}
