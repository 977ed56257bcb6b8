use std::path::Path;

use rusqlite::Connection;

use super::DatabaseError;

/// Open a SQLite connection to the given path.
///
/// The store's schema is provisioned by the course infrastructure; this
/// tool never creates or migrates tables. Opening only sets pragmas.
pub fn open_database(path: &Path) -> Result<Connection, DatabaseError> {
    let conn = Connection::open(path)?;
    configure_pragmas(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch("PRAGMA foreign_keys=ON;")?;
    Ok(())
}

/// Open an in-memory database (for testing)
#[cfg(test)]
pub fn open_memory_database() -> Result<Connection, DatabaseError> {
    let conn = Connection::open_in_memory()?;
    configure_pragmas(&conn)?;
    Ok(conn)
}

/// Install the course schema. Test-only: production assumes it exists.
#[cfg(test)]
pub fn install_schema(conn: &Connection) -> Result<(), DatabaseError> {
    conn.execute_batch(
        "CREATE TABLE submissions (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             student_repo TEXT NOT NULL,
             assignment_id INTEGER NOT NULL,
             code TEXT NOT NULL,
             submitted_at TEXT NOT NULL
         );
         CREATE TABLE autograder_outputs (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             submission_id INTEGER NOT NULL REFERENCES submissions(id),
             output TEXT NOT NULL,
             generated_at TEXT NOT NULL
         );
         CREATE TABLE feedback (
             id INTEGER PRIMARY KEY AUTOINCREMENT,
             submission_id INTEGER NOT NULL REFERENCES submissions(id),
             feedback_text TEXT NOT NULL,
             generated_at TEXT NOT NULL
         );",
    )?;
    Ok(())
}
