use crypto_hash::HashError;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ShsError {
    #[error("The path {0} not exist")]
    PathNotExist(String),

    #[error("The path {0} is not a file")]
    NotAFile(String),

    #[error("The input `{input}` has at least {size} bytes, exceeding the limit of {limit} bytes")]
    InputTooLarge { input: String, size: u64, limit: usize },

    #[error("Read `{path}` failed: {err}")]
    ReadFailed { path: String, err: String },

    #[error("{0}")]
    Hash(#[from] HashError),

    #[error("{0}")]
    Config(String),
}
