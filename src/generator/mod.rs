//! Feedback generation: prompt assembly plus the model seam.

pub mod ollama;

pub use ollama::OllamaRunner;

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    /// The generation process could not be started at all (not installed,
    /// not executable, ...).
    #[error("failed to launch generation process: {0}")]
    Launch(String),

    /// The process ran but exited non-zero; carries its stderr text.
    #[error("{stderr}")]
    Model { stderr: String },
}

/// One-operation capability: prompt text in, generated feedback out.
///
/// Production uses [`OllamaRunner`]; tests substitute a deterministic stub
/// so the pipeline never has to shell out.
pub trait FeedbackModel {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError>;
}

/// Assemble the guided-feedback prompt. The wording and layout are part of
/// the model profile's tuning; do not reflow.
pub fn build_prompt(student_code: &str, autograder_output: &str, instructions: &str) -> String {
    format!(
        "DO NOT CORRECT THE CODE!!! ONLY PROVIDE Question-based guided FEEDBACK BASED ON THIS:\n\
         **Student Code:**\n{student_code}\n\n\
         **Autograder Output:**\n{autograder_output}\n\n\
         **Professor Instructions:**\n{instructions}\n\n"
    )
}
