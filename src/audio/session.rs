use std::cell::Cell;

use async_trait::async_trait;

use crate::call::{AudioSession, RoomError};
use crate::models::AudioOutput;

/// Audio session for desktop and browser targets.
///
/// Device routing is left to the platform default; this tracks the
/// requested output and whether the session is held.
#[derive(Default)]
pub struct PlatformAudioSession {
    output: Cell<Option<AudioOutput>>,
    active: Cell<bool>,
}

impl PlatformAudioSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    pub fn output(&self) -> Option<AudioOutput> {
        self.output.get()
    }
}

#[async_trait(?Send)]
impl AudioSession for PlatformAudioSession {
    async fn configure(&self, output: AudioOutput) -> Result<(), RoomError> {
        self.output.set(Some(output));
        Ok(())
    }

    async fn start(&self) -> Result<(), RoomError> {
        if self.is_active() {
            tracing::debug!("Audio session already active");
            return Ok(());
        }
        self.active.set(true);
        tracing::info!("Audio session started (output: {})", self.output().unwrap_or_default());
        Ok(())
    }

    fn stop(&self) {
        if !self.is_active() {
            return;
        }
        self.active.set(false);
        tracing::info!("Audio session stopped");
    }
}
