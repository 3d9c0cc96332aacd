use alloc::vec::Vec;

use serde_json::Value;

use crate::{error::VibrationError, method::MethodCall};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VibrationRequest {
    HasVibrator,
    HasAmplitudeControl,
    HasCustomVibrationsSupport,
    VibrateDuration {
        duration: Option<i32>,
        intensity: Option<i32>,
    },
    Vibrate(VibrateArgs),
    Cancel,
}

/// Arguments of the `vibrate` command, exactly as the caller sent them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VibrateArgs {
    pub duration: i32,
    pub pattern: Vec<i32>,
    pub repeat: i32,
    pub intensities: Vec<i32>,
    pub amplitude: i32,
}

impl VibrationRequest {
    /// Parse a method call. `Ok(None)` means the method is not one of ours.
    pub fn from_call(call: &MethodCall) -> Result<Option<Self>, VibrationError> {
        let args = &call.arguments;
        let request = match call.method.as_str() {
            "hasVibrator" => VibrationRequest::HasVibrator,
            "hasAmplitudeControl" => VibrationRequest::HasAmplitudeControl,
            "hasCustomVibrationsSupport" => VibrationRequest::HasCustomVibrationsSupport,
            "vibrate_duration" => VibrationRequest::VibrateDuration {
                duration: optional_int(args, "duration")?,
                intensity: optional_int(args, "intensity")?,
            },
            "vibrate" => VibrationRequest::Vibrate(VibrateArgs {
                duration: required_int(args, "duration")?,
                pattern: required_int_list(args, "pattern")?,
                repeat: required_int(args, "repeat")?,
                intensities: required_int_list(args, "intensities")?,
                amplitude: required_int(args, "amplitude")?,
            }),
            "cancel" => VibrationRequest::Cancel,
            _ => return Ok(None),
        };
        Ok(Some(request))
    }
}

fn int_value(value: &Value, name: &'static str) -> Result<i32, VibrationError> {
    value
        .as_i64()
        .and_then(|v| i32::try_from(v).ok())
        .ok_or(VibrationError::InvalidArgument {
            name,
            expected: "a 32-bit integer",
        })
}

fn optional_int(args: &Value, name: &'static str) -> Result<Option<i32>, VibrationError> {
    match args.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => int_value(value, name).map(Some),
    }
}

fn required_int(args: &Value, name: &'static str) -> Result<i32, VibrationError> {
    optional_int(args, name)?.ok_or(VibrationError::MissingArgument(name))
}

fn required_int_list(args: &Value, name: &'static str) -> Result<Vec<i32>, VibrationError> {
    match args.get(name) {
        None | Some(Value::Null) => Err(VibrationError::MissingArgument(name)),
        Some(Value::Array(items)) => items.iter().map(|item| int_value(item, name)).collect(),
        Some(_) => Err(VibrationError::InvalidArgument {
            name,
            expected: "a list of integers",
        }),
    }
}
