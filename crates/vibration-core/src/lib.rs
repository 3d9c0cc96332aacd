#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod consts;
pub mod dispatcher;
pub mod error;
pub mod haptics;
pub mod method;
pub mod pattern;
pub mod recording;
pub mod request;
pub mod vibrator;

pub use dispatcher::Dispatcher;
pub use error::VibrationError;
pub use haptics::{ApiLevel, Haptics, Vibrator};
pub use method::{MethodCall, MethodResponse};
pub use vibrator::{Amplitude, AudioAttributes, VibrationEffect, VibratorService};
