use thiserror::Error;

#[derive(Debug, Error)]
pub enum WireError {
    #[error("{kind} must be {expected} bytes, got {got}")]
    UnexpectedLength {
        kind: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{kind} value must be non-zero")]
    ZeroValue { kind: &'static str },
}
