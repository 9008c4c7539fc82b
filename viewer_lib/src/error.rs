use thiserror::Error;

/// Fatal errors while ingesting a raw volume stream.
///
/// A failed load never produces a partial store; the caller keeps
/// whatever volume was loaded before.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("volume stream too short for a header")]
    TruncatedHeader,
    #[error("volume dimensions must be positive, got {0}x{1}x{2}")]
    BadDimensions(i16, i16, i16),
    #[error("volume stream has {got} samples, expected {expected}")]
    TruncatedData { expected: usize, got: usize },
    #[error("cannot read volume file")]
    Io(#[from] std::io::Error),
    #[error("path does not lead to a file")]
    NotAFile,
}
