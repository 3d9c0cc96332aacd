use std::sync::mpsc::{Receiver, Sender, channel};
use std::thread;
use std::time::Duration;

use rodio::{OutputStream, Sink, Source};
use vibration_core::{
    Amplitude, AudioAttributes, VibrationEffect, VibratorService, VibrationError,
};

use crate::config::HostConfig;

const SAMPLE_RATE: u32 = 48000;
// Resonant frequency of a typical linear resonant actuator.
const MOTOR_FREQUENCY_HZ: u32 = 175;
const MAX_VOLUME: f32 = 0.2;
// Strength used for `Amplitude::Default` and the legacy calls.
const DEFAULT_LEVEL: f32 = 0.75;

/// One step of a waveform, already converted to samples.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Step {
    samples: usize,
    level: f32,
}

impl Step {
    fn new(duration_ms: u64, level: f32) -> Self {
        Self {
            samples: (duration_ms as u128 * SAMPLE_RATE as u128 / 1000) as usize,
            level,
        }
    }
}

fn level(amplitude: Amplitude) -> f32 {
    match amplitude {
        Amplitude::Default => DEFAULT_LEVEL,
        Amplitude::Level(level) => level as f32 / 255.0,
    }
}

/// Alternating off/on timings at a fixed strength.
fn timing_steps(timings: &[u64], on_level: f32) -> Vec<Step> {
    timings
        .iter()
        .enumerate()
        .map(|(i, ms)| Step::new(*ms, if i % 2 == 1 { on_level } else { 0.0 }))
        .collect()
}

/// Square wave at the motor frequency, shaped by a list of steps.
pub struct WaveSource {
    steps: Vec<Step>,
    loop_from: Option<usize>,
    step: usize,
    sample_in_step: usize,
    clock: usize,
}

impl WaveSource {
    /// `repeat` follows the platform convention: `-1` plays once.
    fn new(steps: Vec<Step>, repeat: i32) -> Self {
        // A loop made only of empty steps would never yield a sample.
        let loop_from = usize::try_from(repeat)
            .ok()
            .filter(|&i| i < steps.len() && steps[i..].iter().any(|step| step.samples > 0));
        Self {
            steps,
            loop_from,
            step: 0,
            sample_in_step: 0,
            clock: 0,
        }
    }
}

impl Iterator for WaveSource {
    type Item = f32;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.step >= self.steps.len() {
                self.step = self.loop_from?;
            }

            let step = self.steps[self.step];
            if self.sample_in_step < step.samples {
                self.sample_in_step += 1;

                let period = (SAMPLE_RATE / MOTOR_FREQUENCY_HZ) as usize;
                let high = self.clock % period < period / 2;
                self.clock += 1;

                let sample = step.level * MAX_VOLUME;
                return Some(if high { sample } else { -sample });
            }

            self.step += 1;
            self.sample_in_step = 0;
        }
    }
}

impl Source for WaveSource {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        if self.loop_from.is_some() {
            return None;
        }
        let samples: usize = self.steps.iter().map(|step| step.samples).sum();
        Some(Duration::from_nanos(
            (samples as u128 * 1_000_000_000 / SAMPLE_RATE as u128) as u64,
        ))
    }
}

enum MotorCommand {
    Play(WaveSource),
    Stop,
}

/// Simulated vibrator that buzzes through the sound card.
///
/// Playback happens on a dedicated thread; every call returns as soon as the
/// command is queued. A new effect replaces the one playing.
pub struct AudioVibrator {
    has_vibrator: bool,
    has_amplitude_control: bool,
    command_tx: Option<Sender<MotorCommand>>,
}

impl AudioVibrator {
    pub fn new(config: &HostConfig) -> Self {
        let command_tx = config.audio.then(|| {
            let (tx, rx) = channel::<MotorCommand>();
            thread::spawn(move || motor_thread(rx));
            tx
        });

        Self {
            has_vibrator: config.has_vibrator,
            has_amplitude_control: config.has_amplitude_control,
            command_tx,
        }
    }

    fn send(&self, command: MotorCommand) -> Result<(), VibrationError> {
        let Some(tx) = &self.command_tx else {
            return Ok(());
        };
        tx.send(command).map_err(|_| {
            VibrationError::Service("audio output unavailable, set VIBRATION_AUDIO=0".into())
        })
    }

    fn play(&self, steps: Vec<Step>, repeat: i32) -> Result<(), VibrationError> {
        self.send(MotorCommand::Play(WaveSource::new(steps, repeat)))
    }
}

impl VibratorService for AudioVibrator {
    fn has_vibrator(&self) -> Result<bool, VibrationError> {
        Ok(self.has_vibrator)
    }

    fn has_amplitude_control(&self) -> Result<bool, VibrationError> {
        Ok(self.has_amplitude_control)
    }

    fn vibrate(
        &self,
        effect: &VibrationEffect,
        attributes: AudioAttributes,
    ) -> Result<(), VibrationError> {
        log::info!("motor: {:?} ({:?})", effect, attributes.usage);
        match effect {
            VibrationEffect::OneShot {
                duration_ms,
                amplitude,
            } => self.play(vec![Step::new(*duration_ms, level(*amplitude))], -1),
            VibrationEffect::Waveform { timings, repeat } => {
                self.play(timing_steps(timings, DEFAULT_LEVEL), *repeat)
            }
            VibrationEffect::WaveformWithAmplitudes {
                timings,
                amplitudes,
                repeat,
            } => {
                let steps = timings
                    .iter()
                    .zip(amplitudes)
                    .map(|(ms, amplitude)| Step::new(*ms, level(Amplitude::Level(*amplitude))))
                    .collect();
                self.play(steps, *repeat)
            }
        }
    }

    fn vibrate_legacy(&self, duration_ms: u64) -> Result<(), VibrationError> {
        log::info!("motor: legacy {}ms", duration_ms);
        self.play(vec![Step::new(duration_ms, DEFAULT_LEVEL)], -1)
    }

    fn vibrate_legacy_pattern(&self, timings: &[u64], repeat: i32) -> Result<(), VibrationError> {
        log::info!("motor: legacy pattern {:?}, repeat {}", timings, repeat);
        self.play(timing_steps(timings, DEFAULT_LEVEL), repeat)
    }

    fn cancel(&self) -> Result<(), VibrationError> {
        log::info!("motor: cancel");
        self.send(MotorCommand::Stop)
    }
}

fn motor_thread(rx: Receiver<MotorCommand>) {
    // Initialize audio output once for the thread
    let Ok((_stream, stream_handle)) = OutputStream::try_default() else {
        log::error!("failed to initialize audio output for the motor");
        return;
    };

    let mut current: Option<Sink> = None;
    while let Ok(command) = rx.recv() {
        if let Some(sink) = current.take() {
            sink.stop();
        }
        if let MotorCommand::Play(source) = command {
            match Sink::try_new(&stream_handle) {
                Ok(sink) => {
                    sink.append(source);
                    current = Some(sink);
                }
                Err(e) => log::error!("failed to open motor sink: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(samples: usize) -> u64 {
        (samples as u64 * 1000) / SAMPLE_RATE as u64
    }

    #[test]
    fn test_one_pass_terminates() {
        let source = WaveSource::new(timing_steps(&[10, 20, 30], DEFAULT_LEVEL), -1);
        assert_eq!(source.total_duration(), Some(Duration::from_millis(60)));
        assert_eq!(ms(source.count()), 60);
    }

    #[test]
    fn test_off_steps_are_silent() {
        let samples: Vec<f32> = WaveSource::new(timing_steps(&[10, 10], 1.0), -1).collect();
        let split = samples.len() / 2;
        assert!(samples[..split].iter().all(|s| *s == 0.0));
        assert!(samples[split..].iter().all(|s| s.abs() == MAX_VOLUME));
    }

    #[test]
    fn test_loops_from_repeat_index() {
        let steps = vec![Step::new(100, 0.0), Step::new(10, 1.0), Step::new(10, 0.0)];
        let source = WaveSource::new(steps, 1);
        assert_eq!(source.total_duration(), None);

        // 100ms of silence, then the 20ms loop over and over.
        let samples: Vec<f32> = source.take(Step::new(300, 0.0).samples).collect();
        let lead = Step::new(100, 0.0).samples;
        let on = Step::new(10, 0.0).samples;
        assert!(samples[..lead].iter().all(|s| *s == 0.0));
        assert!(samples[lead..lead + on].iter().all(|s| *s != 0.0));
        assert!(samples[lead + on..lead + 2 * on].iter().all(|s| *s == 0.0));
        assert!(samples[lead + 2 * on..lead + 3 * on].iter().all(|s| *s != 0.0));
    }

    #[test]
    fn test_empty_loop_plays_once() {
        let steps = vec![Step::new(5, 1.0), Step::new(0, 0.0)];
        let source = WaveSource::new(steps, 1);
        assert_eq!(source.count(), Step::new(5, 0.0).samples);
    }

    #[test]
    fn test_amplitude_scales_volume() {
        let quiet: f32 = WaveSource::new(vec![Step::new(1, level(Amplitude::Level(51)))], -1)
            .map(f32::abs)
            .fold(0.0, f32::max);
        assert!((quiet - 0.2 * MAX_VOLUME).abs() < 1e-6);
    }

    #[test]
    fn test_silent_host_accepts_everything() {
        let config = HostConfig {
            audio: false,
            ..HostConfig::default()
        };
        let vibrator = AudioVibrator::new(&config);
        assert_eq!(vibrator.has_vibrator(), Ok(true));
        assert!(vibrator.vibrate_legacy(100).is_ok());
        assert!(vibrator.cancel().is_ok());
    }
}
