use thiserror::Error;

pub type AbiResult<T> = Result<T, AbiError>;

/// Errors raised when boundary values are assembled from untrusted parts.
///
/// Values produced by the core runtime itself never go through these checks.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AbiError {
    #[error("slice view of {len} elements has a null start pointer")]
    NullSlice { len: usize },

    #[error("text view is not valid UTF-8 (valid up to byte {valid_up_to})")]
    InvalidUtf8 { valid_up_to: usize },

    #[error("unknown primitive type name: {0}")]
    UnknownPrimitive(String),
}

impl From<std::str::Utf8Error> for AbiError {
    fn from(err: std::str::Utf8Error) -> Self {
        AbiError::InvalidUtf8 {
            valid_up_to: err.valid_up_to(),
        }
    }
}
