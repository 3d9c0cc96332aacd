//! In-memory vibrator service
//!
//! Records every call it receives instead of driving hardware. Clones share
//! the same call log, so a test can hand one clone to the dispatcher and keep
//! the other to inspect what happened.

use alloc::rc::Rc;
use alloc::string::String;
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::error::VibrationError;
use crate::vibrator::{AudioAttributes, VibrationEffect, VibratorService};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCall {
    HasVibrator,
    HasAmplitudeControl,
    Vibrate(VibrationEffect, AudioAttributes),
    VibrateLegacy(u64),
    VibrateLegacyPattern(Vec<u64>, i32),
    Cancel,
}

impl ServiceCall {
    fn is_query(&self) -> bool {
        matches!(self, ServiceCall::HasVibrator | ServiceCall::HasAmplitudeControl)
    }
}

#[derive(Clone)]
pub struct RecordingVibrator {
    has_vibrator: bool,
    has_amplitude_control: bool,
    failure: Option<String>,
    calls: Rc<RefCell<Vec<ServiceCall>>>,
}

impl Default for RecordingVibrator {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingVibrator {
    /// A device with a vibrator and amplitude control.
    pub fn new() -> Self {
        Self {
            has_vibrator: true,
            has_amplitude_control: true,
            failure: None,
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn without_vibrator(mut self) -> Self {
        self.has_vibrator = false;
        self
    }

    pub fn without_amplitude_control(mut self) -> Self {
        self.has_amplitude_control = false;
        self
    }

    /// Make every playback call fail with `message`.
    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(String::from(message));
        self
    }

    /// Every call received so far, oldest first.
    pub fn calls(&self) -> Vec<ServiceCall> {
        self.calls.borrow().clone()
    }

    /// Calls that play or stop something, skipping capability queries.
    pub fn playback_calls(&self) -> Vec<ServiceCall> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| !call.is_query())
            .cloned()
            .collect()
    }

    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }

    fn record(&self, call: ServiceCall) -> Result<(), VibrationError> {
        let is_query = call.is_query();
        self.calls.borrow_mut().push(call);
        match &self.failure {
            Some(message) if !is_query => Err(VibrationError::Service(message.clone())),
            _ => Ok(()),
        }
    }
}

impl VibratorService for RecordingVibrator {
    fn has_vibrator(&self) -> Result<bool, VibrationError> {
        self.record(ServiceCall::HasVibrator)?;
        Ok(self.has_vibrator)
    }

    fn has_amplitude_control(&self) -> Result<bool, VibrationError> {
        self.record(ServiceCall::HasAmplitudeControl)?;
        Ok(self.has_amplitude_control)
    }

    fn vibrate(
        &self,
        effect: &VibrationEffect,
        attributes: AudioAttributes,
    ) -> Result<(), VibrationError> {
        self.record(ServiceCall::Vibrate(effect.clone(), attributes))
    }

    fn vibrate_legacy(&self, duration_ms: u64) -> Result<(), VibrationError> {
        self.record(ServiceCall::VibrateLegacy(duration_ms))
    }

    fn vibrate_legacy_pattern(&self, timings: &[u64], repeat: i32) -> Result<(), VibrationError> {
        self.record(ServiceCall::VibrateLegacyPattern(timings.to_vec(), repeat))
    }

    fn cancel(&self) -> Result<(), VibrationError> {
        self.record(ServiceCall::Cancel)
    }
}
