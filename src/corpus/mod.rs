//! Submission corpus loading.
//!
//! Two decode-failure policies, kept deliberately asymmetric:
//! - submission files use best-effort skip — a file neither encoding
//!   accepts is dropped with a warning and the load continues;
//! - the two auxiliary files (autograder output, instructions) fail fast —
//!   a decode failure there aborts the run.

pub mod decode;

use std::path::{Path, PathBuf};

use decode::{decode_text, DecodeError, TextEncoding};

/// One decoded file from the submission directory.
#[derive(Debug, Clone)]
pub struct SourceFile {
    pub name: String,
    pub text: String,
}

/// Every decodable file directly inside the submission directory, in
/// directory-listing order (OS-dependent, stable within one run).
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub files: Vec<SourceFile>,
}

impl Corpus {
    /// Render the corpus as one prompt-ready blob: a `File:` header line
    /// per file, then its content, then a blank-line separator.
    pub fn concatenated(&self) -> String {
        let mut out = String::new();
        for file in &self.files {
            out.push_str("File: ");
            out.push_str(&file.name);
            out.push('\n');
            out.push_str(&file.text);
            out.push_str("\n\n");
        }
        out
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CorpusError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: DecodeError,
    },
}

fn io_err(path: &Path, source: std::io::Error) -> CorpusError {
    CorpusError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Load every regular file directly inside `dir` (non-recursive).
///
/// Best-effort skip policy: decode failures are warnings, not errors.
/// A missing or unreadable directory is still fatal.
pub fn load_corpus(dir: &Path) -> Result<Corpus, CorpusError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        let bytes = std::fs::read(&path).map_err(|e| io_err(&path, e))?;

        match decode_text(&bytes) {
            Ok((text, encoding)) => {
                if encoding == TextEncoding::Windows1252 {
                    tracing::debug!(
                        file = %name,
                        encoding = encoding.as_str(),
                        "Decoded with single-byte fallback"
                    );
                }
                files.push(SourceFile { name, text });
            }
            Err(_) => {
                tracing::warn!(file = %name, "Could not read file due to encoding issues, skipping");
            }
        }
    }

    Ok(Corpus { files })
}

/// Read one auxiliary file under the fail-fast policy: both I/O and decode
/// failures propagate.
pub fn read_aux_file(path: &Path) -> Result<String, CorpusError> {
    let bytes = std::fs::read(path).map_err(|e| io_err(path, e))?;
    let (text, _) = decode_text(&bytes).map_err(|source| CorpusError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(text)
}
