//! Decoding of room events forwarded by the JavaScript bridge.

use serde::Deserialize;

use crate::models::RoomEvent;

/// Name of the `CustomEvent` the bridge dispatches on `window`.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub const ROOM_EVENT_NAME: &str = "livekitRoomEvent";

/// Identifies which bridge connection produced an event.
#[derive(Deserialize)]
struct RoomTag {
    room: u32,
}

/// Parse one event `detail` payload (a JSON string) into the handle of the
/// originating room and the event itself.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn decode_event(detail: &str) -> Result<(u32, RoomEvent), serde_json::Error> {
    let RoomTag { room } = serde_json::from_str(detail)?;
    let event = serde_json::from_str(detail)?;
    Ok((room, event))
}
