use thiserror::Error;

use crate::domain::EntryError;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Entry rejected: {0}")]
    InvalidEntry(#[from] EntryError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
