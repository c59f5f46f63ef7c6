use serde::{Deserialize, Serialize};

/// Room client connection state, as reported by the SDK.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Reconnecting,
    SignalReconnecting,
}

impl std::fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectionState::Disconnected => write!(f, "disconnected"),
            ConnectionState::Connecting => write!(f, "connecting"),
            ConnectionState::Connected => write!(f, "connected"),
            ConnectionState::Reconnecting => write!(f, "reconnecting"),
            ConnectionState::SignalReconnecting => write!(f, "signalReconnecting"),
        }
    }
}

/// Voice assistant (agent participant) state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AgentState {
    Disconnected,
    Connecting,
    Initializing,
    Listening,
    Thinking,
    Speaking,
}

impl std::fmt::Display for AgentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentState::Disconnected => write!(f, "disconnected"),
            AgentState::Connecting => write!(f, "connecting"),
            AgentState::Initializing => write!(f, "initializing"),
            AgentState::Listening => write!(f, "listening"),
            AgentState::Thinking => write!(f, "thinking"),
            AgentState::Speaking => write!(f, "speaking"),
        }
    }
}

/// One agent transcription segment. Interim results reuse the same id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranscriptionSegment {
    pub id: String,
    pub text: String,
    #[serde(rename = "final", default)]
    pub is_final: bool,
}

/// Options passed to `connect`. Calls are audio only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomOptions {
    pub audio: bool,
    pub video: bool,
}

impl Default for RoomOptions {
    fn default() -> Self {
        Self { audio: true, video: false }
    }
}

/// Preferred output route for the call audio session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioOutput {
    #[default]
    Speaker,
    Earpiece,
}

impl std::fmt::Display for AudioOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudioOutput::Speaker => write!(f, "speaker"),
            AudioOutput::Earpiece => write!(f, "earpiece"),
        }
    }
}

/// Global playback mode applied once per call attempt before ringing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMode {
    pub plays_in_silent_mode: bool,
    /// Share the output with other apps instead of interrupting them
    pub mix_with_others: bool,
}

impl Default for AudioMode {
    fn default() -> Self {
        Self {
            plays_in_silent_mode: true,
            mix_with_others: true,
        }
    }
}

/// Event emitted by a connected room client.
///
/// The web bridge serializes these as JSON objects tagged by `type`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RoomEvent {
    ConnectionStateChanged { state: ConnectionState },
    AgentStateChanged { state: AgentState },
    Transcription(TranscriptionSegment),
    Error { message: String },
    MediaDeviceFailure { message: String },
    EncryptionError { message: String },
}
