//! LiveKit integration for the web build
//!
//! Rust bindings for `assets/livekit-bridge.js`, which wraps the LiveKit
//! browser SDK and re-dispatches room callbacks as `window` events. Every
//! connection gets a handle so a late or stale room can only close itself.

use std::cell::Cell;

use async_trait::async_trait;
use futures::channel::mpsc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, JsValue};

use super::events::{decode_event, ROOM_EVENT_NAME};
use crate::call::{RoomConnection, RoomConnector, RoomError, RoomSession};
use crate::models::{Credentials, RoomOptions};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = connectLiveKitRoom, catch)]
    async fn connect_livekit_room(
        handle: u32,
        server_url: &str,
        token: &str,
        audio: bool,
        video: bool,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = disconnectLiveKitRoom)]
    fn disconnect_livekit_room(handle: u32);
}

type EventListener = Closure<dyn FnMut(web_sys::CustomEvent)>;

fn js_error_message(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| {
            js_sys::Reflect::get(err, &"message".into())
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_else(|| format!("{:?}", err))
}

fn remove_listener(listener: &EventListener) {
    if let Some(win) = web_sys::window() {
        let _ = win.remove_event_listener_with_callback(ROOM_EVENT_NAME, listener.as_ref().unchecked_ref());
    }
}

/// Opens one bridge room per call attempt, each under its own handle.
#[derive(Default)]
pub struct LiveKitConnector {
    next_handle: Cell<u32>,
    pending: Cell<Option<u32>>,
}

impl LiveKitConnector {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait(?Send)]
impl RoomConnector for LiveKitConnector {
    async fn connect(&self, credentials: &Credentials, options: RoomOptions) -> Result<RoomConnection, RoomError> {
        let win = web_sys::window().ok_or_else(|| RoomError::Connection("no window".to_string()))?;
        let handle = self.next_handle.get().wrapping_add(1);
        self.next_handle.set(handle);
        let (tx, rx) = mpsc::unbounded();

        let listener: EventListener = Closure::wrap(Box::new(move |event: web_sys::CustomEvent| {
            let Some(detail) = event.detail().as_string() else {
                tracing::warn!("Room event without a JSON payload");
                return;
            };
            match decode_event(&detail) {
                Ok((room, room_event)) if room == handle => {
                    let _ = tx.unbounded_send(room_event);
                }
                Ok(_) => {}
                Err(e) => tracing::debug!("Skipping room event {}: {}", detail, e),
            }
        }) as Box<dyn FnMut(_)>);

        win.add_event_listener_with_callback(ROOM_EVENT_NAME, listener.as_ref().unchecked_ref())
            .map_err(|e| RoomError::Connection(js_error_message(&e)))?;

        self.pending.set(Some(handle));
        let connected = connect_livekit_room(
            handle,
            credentials.server_url(),
            credentials.token(),
            options.audio,
            options.video,
        )
        .await;
        if self.pending.get() == Some(handle) {
            self.pending.set(None);
        }

        match connected {
            Ok(_) => Ok(RoomConnection {
                session: Box::new(LiveKitSession { handle, listener }),
                events: rx,
            }),
            Err(e) => {
                remove_listener(&listener);
                Err(RoomError::Connection(js_error_message(&e)))
            }
        }
    }

    fn cancel(&self) {
        if let Some(handle) = self.pending.take() {
            tracing::debug!(handle, "Cancelling room connect");
            disconnect_livekit_room(handle);
        }
    }
}

struct LiveKitSession {
    handle: u32,
    listener: EventListener,
}

impl RoomSession for LiveKitSession {
    fn disconnect(&self) {
        remove_listener(&self.listener);
        disconnect_livekit_room(self.handle);
    }
}
