use core::tokens::TokenIdx;
use thiserror::Error;

/// A bytecode-generation error, attached to the token whose emission
/// triggered it.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct GenError {
    pub message: String,
    pub token: TokenIdx,
}

impl GenError {
    pub fn new(message: impl Into<String>, token: TokenIdx) -> Self {
        GenError {
            message: message.into(),
            token,
        }
    }
}
