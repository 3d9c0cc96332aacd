use alloc::boxed::Box;
use enum_dispatch::enum_dispatch;

use crate::{
    consts,
    error::VibrationError,
    haptics::{amplitude::AmplitudeCapableVibrator, legacy::LegacyVibrator},
    vibrator::{Amplitude, VibratorService},
};

pub mod amplitude;
pub mod legacy;

/// The playback primitives every platform variant offers.
///
/// All of them are best effort: without a vibrator they do nothing, and
/// missing amplitude support degrades to whatever the platform can play.
#[enum_dispatch]
pub trait Haptics {
    fn has_vibrator(&self) -> Result<bool, VibrationError>;
    fn has_amplitude_control(&self) -> Result<bool, VibrationError>;
    fn one_shot(&self, duration_ms: u64, amplitude: Amplitude) -> Result<(), VibrationError>;
    fn waveform(&self, timings: &[u64], repeat: i32) -> Result<(), VibrationError>;
    fn waveform_with_intensities(
        &self,
        timings: &[u64],
        repeat: i32,
        intensities: &[u8],
    ) -> Result<(), VibrationError>;
    fn cancel(&self) -> Result<(), VibrationError>;
}

#[enum_dispatch(Haptics)]
pub enum Vibrator {
    LegacyVibrator,
    AmplitudeCapableVibrator,
}

/// Platform API level, probed once at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ApiLevel(pub u32);

impl ApiLevel {
    pub fn supports_amplitude(&self) -> bool {
        self.0 >= consts::AMPLITUDE_API_LEVEL
    }
}

impl Vibrator {
    /// Pick the variant matching the platform the service runs on.
    pub fn for_api_level(level: ApiLevel, service: Box<dyn VibratorService>) -> Self {
        if level.supports_amplitude() {
            log::debug!("API level {}: amplitude-capable vibrator", level.0);
            AmplitudeCapableVibrator::new(service).into()
        } else {
            log::debug!("API level {}: legacy vibrator", level.0);
            LegacyVibrator::new(service).into()
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, Vibrator::LegacyVibrator(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingVibrator;

    #[test]
    fn test_variant_selection() {
        let service = RecordingVibrator::new();
        assert!(Vibrator::for_api_level(ApiLevel(25), Box::new(service.clone())).is_legacy());
        assert!(!Vibrator::for_api_level(ApiLevel(26), Box::new(service.clone())).is_legacy());
        assert!(!Vibrator::for_api_level(ApiLevel(34), Box::new(service)).is_legacy());
    }
}
