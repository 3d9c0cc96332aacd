use std::io::{self, BufRead as _, Write as _};

use anyhow::Context as _;
use vibration_core::{consts, Dispatcher, MethodCall, MethodResponse, Vibrator};

use crate::config::HostConfig;
use crate::motor::AudioVibrator;

mod config;
mod log_capture;
mod motor;

fn main() -> anyhow::Result<()> {
    let config = HostConfig::from_env().context("invalid VIBRATION_* configuration")?;
    log_capture::init(config.log_level);
    log::info!("serving `{}` channel, simulating {:?}", consts::CHANNEL, config);

    let vibrator = Vibrator::for_api_level(config.api_level, Box::new(AudioVibrator::new(&config)));
    let dispatcher = Dispatcher::new(vibrator);

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = line.context("failed to read method call")?;
        let response = respond(&dispatcher, &line);
        let Some(response) = response else {
            continue;
        };
        serde_json::to_writer(&mut stdout, &response).context("failed to encode reply")?;
        writeln!(stdout).context("failed to write reply")?;
        stdout.flush()?;
    }

    Ok(())
}

/// One JSON method call per line; blank lines get no reply.
fn respond(dispatcher: &Dispatcher, line: &str) -> Option<MethodResponse> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }
    let response = match serde_json::from_str::<MethodCall>(line) {
        Ok(call) => dispatcher.handle(&call),
        Err(e) => {
            log::warn!("malformed call {:?}: {}", line, e);
            MethodResponse::error("malformed_call", &e.to_string())
        }
    };
    Some(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use vibration_core::ApiLevel;
    use vibration_core::recording::{RecordingVibrator, ServiceCall};

    fn dispatcher(service: &RecordingVibrator) -> Dispatcher {
        Dispatcher::new(Vibrator::for_api_level(ApiLevel(34), Box::new(service.clone())))
    }

    #[test]
    fn test_lines() {
        let service = RecordingVibrator::new();
        let dispatcher = dispatcher(&service);

        assert_eq!(respond(&dispatcher, "   "), None);
        assert_eq!(
            respond(&dispatcher, r#"{"method":"hasCustomVibrationsSupport"}"#),
            Some(MethodResponse::Success(serde_json::Value::Bool(true)))
        );
        assert_eq!(
            respond(&dispatcher, r#"{"method":"cancel","arguments":null}"#),
            Some(MethodResponse::Success(serde_json::Value::Null))
        );
        assert_eq!(service.playback_calls(), vec![ServiceCall::Cancel]);
    }

    #[test]
    fn test_malformed_line() {
        let service = RecordingVibrator::new();
        let response = respond(&dispatcher(&service), "vibrate please");
        assert!(matches!(
            response,
            Some(MethodResponse::Error { ref code, .. }) if code == "malformed_call"
        ));
    }
}
