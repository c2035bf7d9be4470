use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("Could not determine the file encoding (tried {tried}). Please convert the file to UTF-8 manually and try again")]
    NoMatchingEncoding { tried: String },
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("No header row found after skipping {preamble_lines} preamble lines")]
    MissingHeader { preamble_lines: usize },
}
