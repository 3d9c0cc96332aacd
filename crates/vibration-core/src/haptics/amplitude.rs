use alloc::boxed::Box;

use crate::{
    error::VibrationError,
    haptics::Haptics,
    vibrator::{Amplitude, AudioAttributes, VibrationEffect, VibratorService},
};

/// Vibrator on platforms with `VibrationEffect` support.
///
/// Whether the requested strength is honoured still depends on the
/// hardware, which is asked on every call.
pub struct AmplitudeCapableVibrator {
    service: Box<dyn VibratorService>,
}

impl AmplitudeCapableVibrator {
    pub fn new(service: Box<dyn VibratorService>) -> Self {
        Self { service }
    }

    fn play(&self, effect: VibrationEffect) -> Result<(), VibrationError> {
        log::debug!("playing {:?}", effect);
        self.service.vibrate(&effect, AudioAttributes::ALARM)
    }
}

impl Haptics for AmplitudeCapableVibrator {
    fn has_vibrator(&self) -> Result<bool, VibrationError> {
        self.service.has_vibrator()
    }

    fn has_amplitude_control(&self) -> Result<bool, VibrationError> {
        self.service.has_amplitude_control()
    }

    fn one_shot(&self, duration_ms: u64, amplitude: Amplitude) -> Result<(), VibrationError> {
        if !self.service.has_vibrator()? {
            return Ok(());
        }
        let amplitude = if self.service.has_amplitude_control()? {
            amplitude
        } else {
            Amplitude::Default
        };
        self.play(VibrationEffect::OneShot {
            duration_ms,
            amplitude,
        })
    }

    fn waveform(&self, timings: &[u64], repeat: i32) -> Result<(), VibrationError> {
        if !self.service.has_vibrator()? {
            return Ok(());
        }
        self.play(VibrationEffect::Waveform {
            timings: timings.to_vec(),
            repeat,
        })
    }

    fn waveform_with_intensities(
        &self,
        timings: &[u64],
        repeat: i32,
        intensities: &[u8],
    ) -> Result<(), VibrationError> {
        if !self.service.has_vibrator()? {
            return Ok(());
        }
        if !self.service.has_amplitude_control()? {
            return self.waveform(timings, repeat);
        }
        if intensities.len() != timings.len() {
            log::warn!(
                "{} intensities for {} pattern steps, playing without intensities",
                intensities.len(),
                timings.len()
            );
            return self.waveform(timings, repeat);
        }
        self.play(VibrationEffect::WaveformWithAmplitudes {
            timings: timings.to_vec(),
            amplitudes: intensities.to_vec(),
            repeat,
        })
    }

    fn cancel(&self) -> Result<(), VibrationError> {
        self.service.cancel()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{RecordingVibrator, ServiceCall};

    fn capable(service: &RecordingVibrator) -> AmplitudeCapableVibrator {
        AmplitudeCapableVibrator::new(Box::new(service.clone()))
    }

    #[test]
    fn test_one_shot_uses_requested_amplitude() {
        let service = RecordingVibrator::new();
        capable(&service).one_shot(300, Amplitude::Level(128)).unwrap();
        assert_eq!(
            service.playback_calls(),
            vec![ServiceCall::Vibrate(
                VibrationEffect::OneShot {
                    duration_ms: 300,
                    amplitude: Amplitude::Level(128)
                },
                AudioAttributes::ALARM
            )]
        );
    }

    #[test]
    fn test_one_shot_without_hardware_control_uses_default() {
        let service = RecordingVibrator::new().without_amplitude_control();
        capable(&service).one_shot(300, Amplitude::Level(128)).unwrap();
        assert_eq!(
            service.playback_calls(),
            vec![ServiceCall::Vibrate(
                VibrationEffect::OneShot {
                    duration_ms: 300,
                    amplitude: Amplitude::Default
                },
                AudioAttributes::ALARM
            )]
        );
    }

    #[test]
    fn test_intensities_dropped_without_hardware_control() {
        let service = RecordingVibrator::new().without_amplitude_control();
        capable(&service)
            .waveform_with_intensities(&[0, 100], 0, &[0, 255])
            .unwrap();
        assert_eq!(
            service.playback_calls(),
            vec![ServiceCall::Vibrate(
                VibrationEffect::Waveform {
                    timings: vec![0, 100],
                    repeat: 0
                },
                AudioAttributes::ALARM
            )]
        );
    }

    #[test]
    fn test_length_mismatch_degrades_to_plain_waveform() {
        let service = RecordingVibrator::new();
        capable(&service)
            .waveform_with_intensities(&[0, 100, 200], -1, &[0, 255])
            .unwrap();
        assert_eq!(
            service.playback_calls(),
            vec![ServiceCall::Vibrate(
                VibrationEffect::Waveform {
                    timings: vec![0, 100, 200],
                    repeat: -1
                },
                AudioAttributes::ALARM
            )]
        );
    }

    #[test]
    fn test_no_vibrator_is_a_no_op() {
        let service = RecordingVibrator::new().without_vibrator();
        let vibrator = capable(&service);
        vibrator.one_shot(100, Amplitude::Level(255)).unwrap();
        vibrator.waveform(&[0, 100], -1).unwrap();
        vibrator
            .waveform_with_intensities(&[0, 100], -1, &[0, 255])
            .unwrap();
        assert!(service.playback_calls().is_empty());
    }

    #[test]
    fn test_service_failure_propagates() {
        let service = RecordingVibrator::new().failing("binder died");
        assert_eq!(
            capable(&service).one_shot(100, Amplitude::Level(255)),
            Err(VibrationError::Service("binder died".into()))
        );
    }
}
