use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenError {
    #[error("CSV Error")]
    CsvError(#[from] csv::Error),
    #[error("I/O Error")]
    IoError(#[from] io::Error),
    #[error("Unable to write output file {}: {source}", .path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("Unable to read profile {}: {source}", .path.display())]
    ProfileRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Malformed profile")]
    ProfileParse(#[from] serde_json::Error),
    #[error("Invalid profile: {0}")]
    InvalidProfile(String),
    #[error("Status weights must contain at least one positive weight")]
    InvalidStatusWeights,
}
