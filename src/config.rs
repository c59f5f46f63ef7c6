//! Application configuration
//!
//! Read from environment variables on desktop (with `.env` support) and
//! baked in at compile time for the web build.

use std::sync::OnceLock;
use std::time::Duration;

use anyhow::{bail, Context};

use crate::call::CallSettings;
use crate::models::{AudioMode, AudioOutput, RoomOptions};

pub const DEFAULT_BACKEND_URL: &str = "https://bigfoot.giant.org";
pub const DEFAULT_RINGTONE_URL: &str = "/assets/ringing.m4a";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Base URL of the token backend
    pub backend_url: String,

    /// Play a ringtone while the call is being set up
    pub ringing_enabled: bool,

    /// Extra ringing after credentials arrive
    pub ringtone_grace: Duration,

    /// Ringtone file (web build only)
    pub ringtone_url: String,

    /// Preferred output route for call audio
    pub audio_output: AudioOutput,

    /// Token request timeout (ignored by the browser fetch)
    pub http_timeout: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            ringing_enabled: true,
            ringtone_grace: Duration::ZERO,
            ringtone_url: DEFAULT_RINGTONE_URL.to_string(),
            audio_output: AudioOutput::Speaker,
            http_timeout: Duration::from_secs(30),
        }
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("{} must be a boolean, got {:?}", key, other),
    }
}

fn parse_u64(key: &str, value: &str) -> anyhow::Result<u64> {
    value
        .trim()
        .parse()
        .with_context(|| format!("{} must be a non-negative integer, got {:?}", key, value))
}

impl AppConfig {
    /// Build from a key lookup, falling back to defaults for missing keys.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let backend_url = lookup("BACKEND_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or(defaults.backend_url);
        if !backend_url.starts_with("http://") && !backend_url.starts_with("https://") {
            bail!("BACKEND_URL must be an http(s) URL, got {:?}", backend_url);
        }

        let ringing_enabled = match lookup("RINGING_ENABLED") {
            Some(v) => parse_bool("RINGING_ENABLED", &v)?,
            None => defaults.ringing_enabled,
        };

        let ringtone_grace = match lookup("RINGTONE_GRACE_MS") {
            Some(v) => Duration::from_millis(parse_u64("RINGTONE_GRACE_MS", &v)?),
            None => defaults.ringtone_grace,
        };

        let audio_output = match lookup("AUDIO_OUTPUT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "" | "speaker" => AudioOutput::Speaker,
            "earpiece" => AudioOutput::Earpiece,
            other => bail!("AUDIO_OUTPUT must be speaker or earpiece, got {:?}", other),
        };

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(parse_u64("HTTP_TIMEOUT_SECS", &v)?),
            None => defaults.http_timeout,
        };

        Ok(Self {
            backend_url,
            ringing_enabled,
            ringtone_grace,
            ringtone_url: lookup("RINGTONE_URL").unwrap_or(defaults.ringtone_url),
            audio_output,
            http_timeout,
        })
    }

    /// Create config from environment variables
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create config from values baked in at build time
    #[cfg(target_arch = "wasm32")]
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| {
            let value = match key {
                "BACKEND_URL" => option_env!("BACKEND_URL"),
                "RINGING_ENABLED" => option_env!("RINGING_ENABLED"),
                "RINGTONE_GRACE_MS" => option_env!("RINGTONE_GRACE_MS"),
                "RINGTONE_URL" => option_env!("RINGTONE_URL"),
                "AUDIO_OUTPUT" => option_env!("AUDIO_OUTPUT"),
                _ => None,
            };
            value.map(str::to_string)
        })
    }

    pub fn call_settings(&self) -> CallSettings {
        CallSettings {
            ringing_enabled: self.ringing_enabled,
            ringtone_grace: self.ringtone_grace,
            audio_output: self.audio_output,
            audio_mode: AudioMode::default(),
            room_options: RoomOptions::default(),
        }
    }
}

// Global configuration, set once at startup
static APP_CONFIG: OnceLock<AppConfig> = OnceLock::new();

pub fn init_config(config: AppConfig) {
    let _ = APP_CONFIG.set(config);
}

pub fn app_config() -> &'static AppConfig {
    APP_CONFIG.get_or_init(AppConfig::default)
}
