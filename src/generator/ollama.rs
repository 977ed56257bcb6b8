//! Synchronous wrapper around the local `ollama run <model>` executable.
//!
//! Contract: prompt on stdin, exit 0 with feedback on stdout, any other
//! exit status with a message on stderr. No timeout and no retries — a
//! hung model hangs the run.

use std::io::Write;
use std::process::{Command, Stdio};

use super::{FeedbackModel, GenerateError};

/// Default generation executable on PATH.
pub const OLLAMA_PROGRAM: &str = "ollama";

pub struct OllamaRunner {
    program: String,
    model: String,
}

impl OllamaRunner {
    pub fn new(model: &str) -> Self {
        Self::with_program(OLLAMA_PROGRAM, model)
    }

    /// Point at a different executable. Tests use this with a stub script
    /// that mimics the exit-status contract.
    pub fn with_program(program: &str, model: &str) -> Self {
        Self {
            program: program.to_string(),
            model: model.to_string(),
        }
    }
}

impl FeedbackModel for OllamaRunner {
    fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let mut child = Command::new(&self.program)
            .arg("run")
            .arg(&self.model)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| GenerateError::Launch(e.to_string()))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| GenerateError::Launch("stdin not captured".to_string()))?;

        // Feed the prompt from a helper thread so a large prompt cannot
        // deadlock against a filling stdout pipe. Closing stdin signals
        // end-of-prompt; EPIPE just means the child stopped reading.
        let prompt_bytes = prompt.as_bytes().to_vec();
        let writer = std::thread::spawn(move || {
            let _ = stdin.write_all(&prompt_bytes);
        });

        let output = child
            .wait_with_output()
            .map_err(|e| GenerateError::Launch(e.to_string()))?;
        let _ = writer.join();

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            Err(GenerateError::Model {
                stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            })
        }
    }
}
