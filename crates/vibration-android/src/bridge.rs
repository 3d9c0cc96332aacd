//! JSON framing between the Java side and the dispatcher.

use serde_json::Value;
use vibration_core::{Dispatcher, MethodCall};

use crate::error::BridgeError;

/// Dispatch `method` with JSON-encoded arguments and return the JSON reply.
///
/// `None` or an empty string stands for "no arguments".
pub fn handle_json(
    dispatcher: &Dispatcher,
    method: &str,
    arguments: Option<&str>,
) -> Result<String, BridgeError> {
    let arguments = match arguments.map(str::trim) {
        None | Some("") => Value::Null,
        Some(raw) => serde_json::from_str(raw)?,
    };
    let response = dispatcher.handle(&MethodCall::new(method, arguments));
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibration_core::recording::{RecordingVibrator, ServiceCall};
    use vibration_core::{Amplitude, ApiLevel, AudioAttributes, VibrationEffect, Vibrator};

    fn dispatcher(level: u32, service: &RecordingVibrator) -> Dispatcher {
        Dispatcher::new(Vibrator::for_api_level(ApiLevel(level), Box::new(service.clone())))
    }

    #[test]
    fn test_round_trip_through_json() {
        let service = RecordingVibrator::new();
        let reply = handle_json(
            &dispatcher(33, &service),
            "vibrate_duration",
            Some(r#"{"duration": 120, "intensity": 64}"#),
        )
        .unwrap();
        assert_eq!(reply, r#"{"success":null}"#);
        assert_eq!(
            service.playback_calls(),
            vec![ServiceCall::Vibrate(
                VibrationEffect::OneShot {
                    duration_ms: 120,
                    amplitude: Amplitude::Level(64)
                },
                AudioAttributes::ALARM
            )]
        );
    }

    #[test]
    fn test_queries_without_arguments() {
        let service = RecordingVibrator::new();
        let dispatcher = dispatcher(23, &service);
        assert_eq!(
            handle_json(&dispatcher, "hasAmplitudeControl", None).unwrap(),
            r#"{"success":false}"#
        );
        assert_eq!(
            handle_json(&dispatcher, "hasVibrator", Some("")).unwrap(),
            r#"{"success":true}"#
        );
        assert_eq!(
            handle_json(&dispatcher, "startHaptics", None).unwrap(),
            r#"{"notImplemented":true}"#
        );
    }

    #[test]
    fn test_bad_json_is_an_error() {
        let service = RecordingVibrator::new();
        assert!(matches!(
            handle_json(&dispatcher(33, &service), "vibrate", Some("{duration")),
            Err(BridgeError::Json(_))
        ));
    }
}
