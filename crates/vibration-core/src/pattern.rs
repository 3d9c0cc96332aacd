//! Waveform synthesis and argument normalization for the duration mode.
//!
//! One-shot calls misbehave on some devices for multi-second durations, so a
//! whole number of seconds is played as a train of short pulses instead: a
//! leading no-op step, then 100ms on / 900ms off per second.

use alloc::vec::Vec;

use crate::consts;

/// Pattern and per-step intensities of equal length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulsedWaveform {
    pub timings: Vec<u64>,
    pub intensities: Vec<u8>,
}

/// `max(1, duration)`, defaulting to 500ms.
pub fn duration_or_default(duration: Option<i32>) -> u64 {
    duration.unwrap_or(consts::DEFAULT_DURATION_MS).max(1) as u64
}

/// Clamp into `1..=255`, defaulting to full strength.
pub fn intensity_or_default(intensity: Option<i32>) -> u8 {
    intensity
        .unwrap_or(consts::DEFAULT_INTENSITY)
        .clamp(consts::MIN_INTENSITY, consts::MAX_INTENSITY) as u8
}

/// Whether `duration_ms` should be played as a pulse train.
pub fn is_whole_seconds(duration_ms: u64) -> bool {
    let threshold = consts::PULSE_THRESHOLD_MS as u64;
    duration_ms > threshold && duration_ms % threshold == 0
}

pub fn pulsed(duration_ms: u64, intensity: u8) -> PulsedWaveform {
    let seconds = (duration_ms / consts::PULSE_THRESHOLD_MS as u64) as usize;

    let mut timings = Vec::with_capacity(1 + seconds * 2);
    let mut intensities = Vec::with_capacity(1 + seconds * 2);
    timings.push(0);
    intensities.push(0);
    for _ in 0..seconds {
        timings.push(consts::PULSE_ON_MS);
        intensities.push(intensity);
        timings.push(consts::PULSE_OFF_MS);
        intensities.push(0);
    }

    PulsedWaveform {
        timings,
        intensities,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_seconds() {
        let waveform = pulsed(3000, 200);
        assert_eq!(waveform.timings, vec![0, 100, 900, 100, 900, 100, 900]);
        assert_eq!(waveform.intensities, vec![0, 200, 0, 200, 0, 200, 0]);
    }

    #[test]
    fn test_whole_seconds_threshold() {
        assert!(!is_whole_seconds(1));
        assert!(!is_whole_seconds(999));
        assert!(!is_whole_seconds(1000));
        assert!(!is_whole_seconds(1500));
        assert!(is_whole_seconds(2000));
        assert!(is_whole_seconds(60_000));
    }

    #[test]
    fn test_defaults_and_clamping() {
        assert_eq!(duration_or_default(None), 500);
        assert_eq!(duration_or_default(Some(0)), 1);
        assert_eq!(duration_or_default(Some(-20)), 1);
        assert_eq!(intensity_or_default(None), 255);
        assert_eq!(intensity_or_default(Some(0)), 1);
        assert_eq!(intensity_or_default(Some(9999)), 255);
        assert_eq!(intensity_or_default(Some(-5)), 1);
        assert_eq!(intensity_or_default(Some(42)), 42);
    }
}
