//! Desktop builds have no LiveKit transport.

use async_trait::async_trait;

use crate::call::{RoomConnection, RoomConnector, RoomError};
use crate::models::{Credentials, RoomOptions};

pub struct NativeRoomConnector;

#[async_trait(?Send)]
impl RoomConnector for NativeRoomConnector {
    async fn connect(&self, credentials: &Credentials, _options: RoomOptions) -> Result<RoomConnection, RoomError> {
        tracing::error!("Cannot join {}: room transport needs the web build", credentials.server_url());
        Err(RoomError::Unsupported(
            "LiveKit rooms are only available in the web build".to_string(),
        ))
    }
}
