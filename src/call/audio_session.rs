use std::rc::Rc;

use super::{AudioSession, RoomError};
use crate::models::AudioOutput;

/// Scoped ownership of a started audio session.
///
/// The session is stopped exactly once, when the guard is dropped.
pub struct AudioSessionGuard {
    session: Rc<dyn AudioSession>,
}

impl AudioSessionGuard {
    pub async fn acquire(session: Rc<dyn AudioSession>, output: AudioOutput) -> Result<Self, RoomError> {
        tracing::debug!("Starting audio session (output: {})", output);
        session.configure(output).await?;
        session.start().await?;
        Ok(Self { session })
    }
}

impl Drop for AudioSessionGuard {
    fn drop(&mut self) {
        tracing::debug!("Stopping audio session");
        self.session.stop();
    }
}
