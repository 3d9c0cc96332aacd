use std::str::FromStr;

use anyhow::{Context, bail};
use log::LevelFilter;
use vibration_core::ApiLevel;

/// Simulated device, read from `VIBRATION_*` environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub api_level: ApiLevel,
    pub has_vibrator: bool,
    pub has_amplitude_control: bool,
    /// Render effects through the sound card.
    pub audio: bool,
    pub log_level: LevelFilter,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            api_level: ApiLevel(34),
            has_vibrator: true,
            has_amplitude_control: true,
            audio: true,
            log_level: LevelFilter::Info,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            api_level: match lookup("VIBRATION_API_LEVEL") {
                Some(raw) => ApiLevel(
                    raw.trim()
                        .parse()
                        .with_context(|| format!("VIBRATION_API_LEVEL={raw:?}"))?,
                ),
                None => defaults.api_level,
            },
            has_vibrator: flag(&lookup, "VIBRATION_HAS_VIBRATOR", defaults.has_vibrator)?,
            has_amplitude_control: flag(
                &lookup,
                "VIBRATION_AMPLITUDE_CONTROL",
                defaults.has_amplitude_control,
            )?,
            audio: flag(&lookup, "VIBRATION_AUDIO", defaults.audio)?,
            log_level: match lookup("VIBRATION_LOG") {
                Some(raw) => LevelFilter::from_str(raw.trim())
                    .with_context(|| format!("VIBRATION_LOG={raw:?}"))?,
                None => defaults.log_level,
            },
        })
    }
}

fn flag<F>(lookup: &F, key: &str, default: bool) -> anyhow::Result<bool>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(key) else {
        return Ok(default);
    };
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{key}={raw:?} is not a boolean"),
    }
}
