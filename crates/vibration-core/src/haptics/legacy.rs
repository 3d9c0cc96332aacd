use alloc::boxed::Box;

use crate::{
    error::VibrationError,
    haptics::Haptics,
    vibrator::{Amplitude, VibratorService},
};

/// Vibrator on platforms that predate amplitude control.
///
/// Only the fixed-strength entry points exist here, so amplitudes and
/// per-step intensities are dropped.
pub struct LegacyVibrator {
    service: Box<dyn VibratorService>,
}

impl LegacyVibrator {
    pub fn new(service: Box<dyn VibratorService>) -> Self {
        Self { service }
    }
}

impl Haptics for LegacyVibrator {
    fn has_vibrator(&self) -> Result<bool, VibrationError> {
        self.service.has_vibrator()
    }

    // The query itself does not exist on these platforms.
    fn has_amplitude_control(&self) -> Result<bool, VibrationError> {
        Ok(false)
    }

    fn one_shot(&self, duration_ms: u64, _amplitude: Amplitude) -> Result<(), VibrationError> {
        if !self.service.has_vibrator()? {
            return Ok(());
        }
        log::debug!("legacy one-shot {}ms", duration_ms);
        self.service.vibrate_legacy(duration_ms)
    }

    fn waveform(&self, timings: &[u64], repeat: i32) -> Result<(), VibrationError> {
        if !self.service.has_vibrator()? {
            return Ok(());
        }
        log::debug!("legacy waveform of {} steps, repeat {}", timings.len(), repeat);
        self.service.vibrate_legacy_pattern(timings, repeat)
    }

    fn waveform_with_intensities(
        &self,
        timings: &[u64],
        repeat: i32,
        _intensities: &[u8],
    ) -> Result<(), VibrationError> {
        self.waveform(timings, repeat)
    }

    fn cancel(&self) -> Result<(), VibrationError> {
        self.service.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordingVibrator, ServiceCall};

    fn legacy(service: &RecordingVibrator) -> LegacyVibrator {
        LegacyVibrator::new(Box::new(service.clone()))
    }

    #[test]
    fn test_amplitude_query_never_reaches_service() {
        let service = RecordingVibrator::new();
        assert_eq!(legacy(&service).has_amplitude_control(), Ok(false));
        assert!(service.calls().is_empty());
    }

    #[test]
    fn test_one_shot_ignores_amplitude() {
        let service = RecordingVibrator::new();
        legacy(&service).one_shot(250, Amplitude::Level(17)).unwrap();
        assert_eq!(service.playback_calls(), vec![ServiceCall::VibrateLegacy(250)]);
    }

    #[test]
    fn test_intensities_fall_back_to_plain_pattern() {
        let service = RecordingVibrator::new();
        legacy(&service)
            .waveform_with_intensities(&[0, 100, 900], -1, &[0, 200, 0])
            .unwrap();
        assert_eq!(
            service.playback_calls(),
            vec![ServiceCall::VibrateLegacyPattern(vec![0, 100, 900], -1)]
        );
    }

    #[test]
    fn test_no_vibrator_is_a_no_op() {
        let service = RecordingVibrator::new().without_vibrator();
        let vibrator = legacy(&service);
        vibrator.one_shot(100, Amplitude::Level(255)).unwrap();
        vibrator.waveform(&[0, 100], 0).unwrap();
        assert!(service.playback_calls().is_empty());
    }
}
