use thiserror::Error;

use crate::api::ApiError;
use crate::models::{CallState, CredentialsIncomplete};

/// Failure to obtain usable room credentials.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CredentialError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("Incomplete credentials: {0}")]
    Incomplete(#[from] CredentialsIncomplete),
}

/// Errors reported by the room client or the audio session.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RoomError {
    #[error("Connection failed: {0}")]
    Connection(String),
    #[error("Media device failure: {0}")]
    MediaDevice(String),
    #[error("Encryption error: {0}")]
    Encryption(String),
    #[error("Room transport unavailable: {0}")]
    Unsupported(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CallError {
    #[error("Call already in progress ({0})")]
    Busy(CallState),
    #[error("Call attempt was cancelled")]
    Cancelled,
    #[error("No credentials: {0}")]
    CredentialFetch(#[from] CredentialError),
    #[error("Room connection failed: {0}")]
    RoomConnection(String),
    #[error("Media device failure: {0}")]
    MediaDevice(String),
    #[error("Encryption error: {0}")]
    Encryption(String),
}

impl From<RoomError> for CallError {
    fn from(err: RoomError) -> Self {
        match err {
            RoomError::Connection(msg) => CallError::RoomConnection(msg),
            RoomError::Unsupported(msg) => CallError::RoomConnection(msg),
            RoomError::MediaDevice(msg) => CallError::MediaDevice(msg),
            RoomError::Encryption(msg) => CallError::Encryption(msg),
        }
    }
}

impl CallError {
    /// Whether this error ends the current session.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, CallError::MediaDevice(_) | CallError::Busy(_))
    }
}
