use core::tokens::TokenIdx;
use thiserror::Error;

/// A parse-time error, attached to the token that triggered it (the current
/// token for most cases, the previous one for "unterminated" errors raised
/// after running off the end of a list).
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct ParseError {
    pub message: String,
    pub token: TokenIdx,
}

impl ParseError {
    pub fn new(message: impl Into<String>, token: TokenIdx) -> Self {
        ParseError {
            message: message.into(),
            token,
        }
    }
}
