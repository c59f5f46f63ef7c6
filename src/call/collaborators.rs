//! Contracts the call controller consumes from its external collaborators.

use async_trait::async_trait;
use futures::channel::mpsc;

use super::{CredentialError, RoomError};
use crate::models::{AudioMode, AudioOutput, Credentials, RoomEvent, RoomOptions};

/// Issues short-lived room credentials.
#[async_trait(?Send)]
pub trait CredentialProvider {
    async fn fetch(&self) -> Result<Credentials, CredentialError>;
}

/// Local looping playback used while waiting for the call to connect.
pub trait RingtonePlayer {
    fn set_audio_mode(&self, mode: AudioMode);
    fn set_loop(&self, looping: bool);
    fn play(&self);
    fn pause(&self);
}

/// Platform audio session (routing, microphone access).
#[async_trait(?Send)]
pub trait AudioSession {
    async fn configure(&self, output: AudioOutput) -> Result<(), RoomError>;
    async fn start(&self) -> Result<(), RoomError>;
    fn stop(&self);
}

/// Opens authenticated, audio-only room sessions.
#[async_trait(?Send)]
pub trait RoomConnector {
    async fn connect(&self, credentials: &Credentials, options: RoomOptions) -> Result<RoomConnection, RoomError>;

    /// Abandon a `connect` that is still in flight. The pending call may
    /// still resolve; the caller disconnects whatever it returns.
    fn cancel(&self) {}
}

/// A live room session. Dropping it does not disconnect; call `disconnect`.
pub trait RoomSession {
    fn disconnect(&self);
}

pub struct RoomConnection {
    pub session: Box<dyn RoomSession>,
    pub events: mpsc::UnboundedReceiver<RoomEvent>,
}
