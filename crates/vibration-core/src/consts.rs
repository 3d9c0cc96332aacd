/// Name of the method channel the host framework talks to.
pub const CHANNEL: &str = "vibration";

pub const DEFAULT_DURATION_MS: i32 = 500;
pub const DEFAULT_INTENSITY: i32 = 255;

pub const MIN_INTENSITY: i32 = 1;
pub const MAX_INTENSITY: i32 = 255;

/// `repeat` value that plays a waveform once without looping.
pub const NO_REPEAT: i32 = -1;

/// Amplitude sentinel meaning "let the device pick".
pub const DEFAULT_AMPLITUDE: i32 = -1;

/// Whole-second durations above this are played as a pulse train.
pub const PULSE_THRESHOLD_MS: i32 = 1000;
pub const PULSE_ON_MS: u64 = 100;
pub const PULSE_OFF_MS: u64 = 900;

/// First platform API level with `VibrationEffect` and amplitude control (Android O).
pub const AMPLITUDE_API_LEVEL: u32 = 26;
