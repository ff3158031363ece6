use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No records were produced; nothing to write")]
    NoRecords,
}
