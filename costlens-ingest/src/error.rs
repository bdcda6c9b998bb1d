use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error reading {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Error parsing CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Please upload a CSV file (.csv), got: {0}")]
    UnsupportedFileType(String),

    #[error("No valid data found in the file. Please check your CSV format.")]
    NoValidData,
}

pub type Result<T> = std::result::Result<T, IngestError>;
