//! Error types for the Android bridge

use thiserror::Error;
use vibration_core::VibrationError;

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("JNI error: {0}")]
    Jni(#[from] jni::errors::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Vibrator service unavailable")]
    NoVibratorService,

    #[error("Invalid handle")]
    InvalidHandle,
}

impl From<BridgeError> for VibrationError {
    fn from(e: BridgeError) -> Self {
        VibrationError::Service(e.to_string())
    }
}
