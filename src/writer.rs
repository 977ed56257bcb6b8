//! Feedback file output.

use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
#[error("cannot write feedback to {path}: {source}")]
pub struct WriteError {
    pub path: PathBuf,
    #[source]
    pub source: std::io::Error,
}

/// Write the feedback Markdown, replacing whatever was there.
///
/// The assignment id is accepted for call-site symmetry with the store but
/// does not appear in the output; there is one feedback file per user,
/// not per assignment.
pub fn write_feedback(
    path: &Path,
    student_repo: &str,
    _assignment_id: i64,
    feedback: &str,
) -> Result<PathBuf, WriteError> {
    let rendered = format!("# Feedback for {student_repo}\n\n{feedback}");
    std::fs::write(path, rendered).map_err(|source| WriteError {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(path.to_path_buf())
}
