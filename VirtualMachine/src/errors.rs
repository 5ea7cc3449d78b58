use thiserror::Error;

/// A runtime error. Unlike the earlier pipeline stages' errors, this
/// carries no token back-reference — by the time bytecode is executing,
/// the byte-to-token side table belongs to the `Chunk` that produced it,
/// not to the VM.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("{message}")]
pub struct RuntimeError {
    pub message: String,
}

impl RuntimeError {
    pub fn new(message: impl Into<String>) -> Self {
        RuntimeError {
            message: message.into(),
        }
    }
}
