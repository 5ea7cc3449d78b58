use thiserror::Error;

/// A lex-time error: an unexpected character or an unterminated string.
/// Unlike the later pipeline stages, a lex error has no token to reference
/// yet — it carries its own line/column directly.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct LexError {
    pub message: String,
    pub line: u32,
    pub column: u32,
}

impl LexError {
    pub fn new(message: impl Into<String>, line: u32, column: u32) -> Self {
        LexError {
            message: message.into(),
            line,
            column,
        }
    }
}
