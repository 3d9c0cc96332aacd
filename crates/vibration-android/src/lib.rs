//! Android side of the vibration bridge.
//!
//! Implements the core's vibrator service on top of `android.os.Vibrator`
//! through JNI and exposes the dispatcher to Kotlin/Java callers.

mod bridge;
mod error;
mod service;

pub use bridge::handle_json;
pub use error::BridgeError;
pub use service::{api_level, AndroidVibrator};

// JNI entry points - only compile on Android targets
#[cfg(target_os = "android")]
mod jni_bindings;
