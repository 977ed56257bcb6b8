//! Row inserts for one pipeline run.
//!
//! All rows land inside a single transaction committed at the end; a
//! failure anywhere leaves the store untouched. Timestamps are assigned
//! server-side with `datetime('now')` (UTC).

use rusqlite::{params, Connection};

use super::DatabaseError;
use crate::corpus::Corpus;

/// Everything one run wants to record.
#[derive(Debug)]
pub struct RunRecord<'a> {
    pub student_repo: &'a str,
    pub assignment_id: i64,
    pub corpus: &'a Corpus,
    pub autograder_output: &'a str,
    pub feedback: &'a str,
}

/// What got written, for logging and assertions.
#[derive(Debug, Clone)]
pub struct PersistSummary {
    /// Rows inserted into `submissions` — one per corpus file.
    pub file_rows: usize,
    /// Row id the autograder-output and feedback rows reference. The store
    /// schema has no submission-level row, so the id of the last file row
    /// inserted for this run anchors both children.
    pub anchor_row_id: i64,
    /// Client-side record of when the run was committed (ISO 8601).
    pub recorded_at: String,
}

pub fn persist_run(
    conn: &mut Connection,
    record: &RunRecord<'_>,
) -> Result<PersistSummary, DatabaseError> {
    // Without file rows there is no anchor for the child inserts.
    if record.corpus.is_empty() {
        return Err(DatabaseError::EmptyCorpus);
    }

    let tx = conn.transaction()?;

    let mut anchor_row_id = 0i64;
    for file in &record.corpus.files {
        tx.execute(
            "INSERT INTO submissions (student_repo, assignment_id, code, submitted_at)
             VALUES (?1, ?2, ?3, datetime('now'))",
            params![record.student_repo, record.assignment_id, file.text],
        )?;
        anchor_row_id = tx.last_insert_rowid();
    }

    tx.execute(
        "INSERT INTO autograder_outputs (submission_id, output, generated_at)
         VALUES (?1, ?2, datetime('now'))",
        params![anchor_row_id, record.autograder_output],
    )?;

    tx.execute(
        "INSERT INTO feedback (submission_id, feedback_text, generated_at)
         VALUES (?1, ?2, datetime('now'))",
        params![anchor_row_id, record.feedback],
    )?;

    tx.commit()?;

    Ok(PersistSummary {
        file_rows: record.corpus.files.len(),
        anchor_row_id,
        recorded_at: chrono::Utc::now().to_rfc3339(),
    })
}
