//! Error types for the credit card processor.

use thiserror::Error;

/// Result type alias for processor operations
pub type Result<T> = std::result::Result<T, ProcessorError>;

/// Errors that can occur while processing a batch.
#[derive(Error, Debug)]
pub enum ProcessorError {
    /// Failed to open or read the input file
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A line could not be parsed into a card definition or transaction
    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    /// A card number contains something other than decimal digits
    #[error("Invalid card number {number:?}: non-digit character {found:?}")]
    InvalidCardNumber { number: String, found: char },

    /// Missing input file argument
    #[error("Missing input file argument. Usage: credit-card-processor <input.txt>")]
    MissingArgument,
}

impl ProcessorError {
    /// Shorthand for building a [`ProcessorError::MalformedRecord`].
    pub(crate) fn malformed(line: usize, message: impl Into<String>) -> Self {
        ProcessorError::MalformedRecord {
            line,
            message: message.into(),
        }
    }
}
