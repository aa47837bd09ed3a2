use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid concurrency limit: {0}")]
    InvalidConcurrencyLimit(usize),

    #[error("No batch registered")]
    NoBatchRegistered,

    #[error("Batch already registered")]
    BatchAlreadyRegistered,

    #[error("Worker thread panicked")]
    WorkerPanicked,

    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
