use alloc::vec::Vec;

use serde_json::Value;

use crate::{
    consts,
    error::VibrationError,
    haptics::{Haptics as _, Vibrator},
    method::{MethodCall, MethodResponse},
    pattern,
    request::{VibrateArgs, VibrationRequest},
    vibrator::Amplitude,
};

/// Turns method-channel commands into vibrator primitives.
///
/// Owns the platform vibrator for the lifetime of the plugin; nothing else is
/// kept between calls.
pub struct Dispatcher {
    vibrator: Vibrator,
}

impl Dispatcher {
    pub fn new(vibrator: Vibrator) -> Self {
        Self { vibrator }
    }

    pub fn handle(&self, call: &MethodCall) -> MethodResponse {
        let request = match VibrationRequest::from_call(call) {
            Ok(Some(request)) => request,
            Ok(None) => {
                log::debug!("method `{}` not implemented", call.method);
                return MethodResponse::NotImplemented;
            }
            Err(e) => {
                log::warn!("rejected `{}`: {}", call.method, e);
                return e.into();
            }
        };

        match self.execute(request) {
            Ok(value) => MethodResponse::Success(value),
            Err(e) => {
                log::warn!("`{}` failed: {}", call.method, e);
                e.into()
            }
        }
    }

    pub fn execute(&self, request: VibrationRequest) -> Result<Value, VibrationError> {
        match request {
            VibrationRequest::HasVibrator => self.has_vibrator().map(Value::Bool),
            VibrationRequest::HasAmplitudeControl => {
                self.has_amplitude_control().map(Value::Bool)
            }
            VibrationRequest::HasCustomVibrationsSupport => {
                Ok(Value::Bool(self.has_custom_vibrations_support()))
            }
            VibrationRequest::VibrateDuration {
                duration,
                intensity,
            } => self
                .vibrate_for_duration(duration, intensity)
                .map(|_| Value::Null),
            VibrationRequest::Vibrate(args) => self.vibrate(&args).map(|_| Value::Null),
            VibrationRequest::Cancel => self.cancel().map(|_| Value::Null),
        }
    }

    pub fn has_vibrator(&self) -> Result<bool, VibrationError> {
        self.vibrator.has_vibrator()
    }

    /// `false` on platforms without the concept.
    pub fn has_amplitude_control(&self) -> Result<bool, VibrationError> {
        self.vibrator.has_amplitude_control()
    }

    pub fn has_custom_vibrations_support(&self) -> bool {
        true
    }

    pub fn vibrate_for_duration(
        &self,
        duration: Option<i32>,
        intensity: Option<i32>,
    ) -> Result<(), VibrationError> {
        let duration_ms = pattern::duration_or_default(duration);
        let intensity = pattern::intensity_or_default(intensity);

        if pattern::is_whole_seconds(duration_ms) {
            let waveform = pattern::pulsed(duration_ms, intensity);
            log::info!(
                "vibrating {}s as pulses at intensity {}",
                duration_ms / 1000,
                intensity
            );
            self.vibrator.waveform_with_intensities(
                &waveform.timings,
                consts::NO_REPEAT,
                &waveform.intensities,
            )
        } else {
            log::info!("vibrating {}ms at intensity {}", duration_ms, intensity);
            self.vibrator
                .one_shot(duration_ms, Amplitude::Level(intensity))
        }
    }

    /// Picks the primitive from the shape of the arguments: pattern with
    /// intensities, then pattern alone, then a one-shot.
    ///
    /// Without a vibrator nothing is played and the arguments are not checked.
    pub fn vibrate(&self, args: &VibrateArgs) -> Result<(), VibrationError> {
        if !self.vibrator.has_vibrator()? {
            log::debug!("no vibrator, ignoring vibrate");
            return Ok(());
        }

        if !args.pattern.is_empty() && !args.intensities.is_empty() {
            let timings = timings(&args.pattern)?;
            let repeat = repeat_index(args.repeat, timings.len())?;
            let intensities = intensities(&args.intensities)?;
            log::info!("vibrating pattern of {} steps with intensities", timings.len());
            self.vibrator
                .waveform_with_intensities(&timings, repeat, &intensities)
        } else if !args.pattern.is_empty() {
            let timings = timings(&args.pattern)?;
            let repeat = repeat_index(args.repeat, timings.len())?;
            log::info!("vibrating pattern of {} steps", timings.len());
            self.vibrator.waveform(&timings, repeat)
        } else {
            let duration_ms = one_shot_duration(args.duration)?;
            let amplitude = amplitude(args.amplitude)?;
            log::info!("vibrating {}ms at {:?}", duration_ms, amplitude);
            self.vibrator.one_shot(duration_ms, amplitude)
        }
    }

    pub fn cancel(&self) -> Result<(), VibrationError> {
        log::info!("cancelling vibration");
        self.vibrator.cancel()
    }
}

fn timings(pattern: &[i32]) -> Result<Vec<u64>, VibrationError> {
    pattern
        .iter()
        .map(|step| {
            u64::try_from(*step).map_err(|_| VibrationError::InvalidArgument {
                name: "pattern",
                expected: "a list of non-negative integers",
            })
        })
        .collect()
}

/// Valid loop indices are `-1..len`.
fn repeat_index(repeat: i32, len: usize) -> Result<i32, VibrationError> {
    let in_range = repeat == consts::NO_REPEAT
        || usize::try_from(repeat).map(|index| index < len).unwrap_or(false);
    if in_range {
        Ok(repeat)
    } else {
        Err(VibrationError::RepeatOutOfRange { index: repeat, len })
    }
}

/// One-shots need a positive duration.
fn one_shot_duration(raw: i32) -> Result<u64, VibrationError> {
    match u64::try_from(raw) {
        Ok(duration_ms) if duration_ms > 0 => Ok(duration_ms),
        _ => Err(VibrationError::InvalidArgument {
            name: "duration",
            expected: "a positive integer",
        }),
    }
}

/// `-1` for the device default, otherwise `1..=255`.
fn amplitude(raw: i32) -> Result<Amplitude, VibrationError> {
    if raw == consts::DEFAULT_AMPLITUDE {
        return Ok(Amplitude::Default);
    }
    if (consts::MIN_INTENSITY..=consts::MAX_INTENSITY).contains(&raw) {
        Ok(Amplitude::Level(raw as u8))
    } else {
        Err(VibrationError::InvalidArgument {
            name: "amplitude",
            expected: "-1 or an integer in 1..=255",
        })
    }
}

/// Per-step strengths in `0..=255`; 0 keeps the motor off for that step.
fn intensities(raw: &[i32]) -> Result<Vec<u8>, VibrationError> {
    raw.iter()
        .map(|intensity| {
            u8::try_from(*intensity).map_err(|_| VibrationError::InvalidArgument {
                name: "intensities",
                expected: "a list of integers in 0..=255",
            })
        })
        .collect()
}
