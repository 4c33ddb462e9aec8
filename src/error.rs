use std::path::PathBuf;
use thiserror::Error;

/// Result type of the per-file pipeline.
pub type Result<T> = std::result::Result<T, Struct2SeqError>;

/// Failure to turn a file into a structure.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Neither the PDB nor the mmCIF reader accepted the file.
    #[error("File {} is not a proper/supported protein structure file.", path.display())]
    UnsupportedFormat {
        /// The rejected input
        path: PathBuf,
    },
}

/// Errors raised while processing one input file.
#[derive(Debug, Error)]
pub enum Struct2SeqError {
    /// The input could not be read as a structure
    #[error(transparent)]
    Load(#[from] LoadError),

    /// An output file could not be created or written
    #[error("Failed to write '{}': {source}", path.display())]
    Write {
        /// The output file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl Struct2SeqError {
    /// Whether the batch can move on to the next input file.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Struct2SeqError::Load(_))
    }
}
