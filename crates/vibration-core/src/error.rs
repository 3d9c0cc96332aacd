use alloc::string::String;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VibrationError {
    #[error("missing argument `{0}`")]
    MissingArgument(&'static str),

    #[error("argument `{name}` must be {expected}")]
    InvalidArgument {
        name: &'static str,
        expected: &'static str,
    },

    #[error("repeat index {index} is outside a pattern of length {len}")]
    RepeatOutOfRange { index: i32, len: usize },

    #[error("vibrator service failed: {0}")]
    Service(String),
}

impl VibrationError {
    /// Error code reported back over the method channel.
    pub fn code(&self) -> &'static str {
        match self {
            VibrationError::MissingArgument(_)
            | VibrationError::InvalidArgument { .. }
            | VibrationError::RepeatOutOfRange { .. } => "invalid_argument",
            VibrationError::Service(_) => "vibrator_failed",
        }
    }
}
