use alloc::vec::Vec;

use crate::error::VibrationError;

/// Platform vibrator service.
///
/// This is the OS-owned object the bridge talks to. Implementations are
/// expected to serialize their own internal state, so every method takes
/// `&self`. The legacy entry points are the ones available before
/// `VibrationEffect` existed; callers never mix the two families on one
/// platform.
pub trait VibratorService {
    fn has_vibrator(&self) -> Result<bool, VibrationError>;

    /// Only meaningful on platforms with amplitude control.
    fn has_amplitude_control(&self) -> Result<bool, VibrationError>;

    fn vibrate(
        &self,
        effect: &VibrationEffect,
        attributes: AudioAttributes,
    ) -> Result<(), VibrationError>;

    fn vibrate_legacy(&self, duration_ms: u64) -> Result<(), VibrationError>;

    fn vibrate_legacy_pattern(&self, timings: &[u64], repeat: i32) -> Result<(), VibrationError>;

    fn cancel(&self) -> Result<(), VibrationError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Amplitude {
    /// Device default strength.
    Default,
    Level(u8),
}

impl Amplitude {
    /// Raw value as the platform expects it (`-1` for the default).
    pub fn as_raw(&self) -> i32 {
        match self {
            Amplitude::Default => crate::consts::DEFAULT_AMPLITUDE,
            Amplitude::Level(level) => *level as i32,
        }
    }
}

/// Timings alternate off/on, starting with an off step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VibrationEffect {
    OneShot {
        duration_ms: u64,
        amplitude: Amplitude,
    },
    Waveform {
        timings: Vec<u64>,
        repeat: i32,
    },
    WaveformWithAmplitudes {
        timings: Vec<u64>,
        amplitudes: Vec<u8>,
        repeat: i32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    Sonification = 4,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Usage {
    Alarm = 4,
}

/// Playback classification attached to every effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioAttributes {
    pub content_type: ContentType,
    pub usage: Usage,
}

impl AudioAttributes {
    /// Alarm-priority haptics, routed like an alarm sound.
    pub const ALARM: AudioAttributes = AudioAttributes {
        content_type: ContentType::Sonification,
        usage: Usage::Alarm,
    };
}
