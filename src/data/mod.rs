use std::path::PathBuf;

pub use book::{BookRecord, ClassYear, Genre, Year, YearField, YearKey};
use book::RecordData;
pub use catalog::Catalog;
pub use source::{parse_records, Source};

/// Book records and the values they carry.
pub mod book;

/// The loaded, indexed dataset.
pub mod catalog;

/// Reading the dataset from disk or over HTTP.
pub mod source;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    /// Wraps the path of a dataset file that could not be read.
    #[error("could not read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The dataset URL could not be fetched.
    #[error("could not fetch dataset: {0}")]
    Http(#[from] reqwest::Error),

    /// The dataset text is not JSON.
    #[error("dataset is not valid json: {0}")]
    Json(#[from] serde_json::Error),

    /// Wraps the kind of JSON value found where the array of books belongs.
    #[error("dataset must be an array of books, found {0}")]
    NotAnArray(&'static str),
}

pub type DataResult<T> = Result<T, DataError>;
