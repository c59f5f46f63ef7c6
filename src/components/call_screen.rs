use std::rc::Rc;

use dioxus::prelude::*;

use crate::api::{ApiClient, ApiError, HttpCredentialProvider};
use crate::call::{CallController, CallError};
use crate::config::{app_config, AppConfig};
use crate::models::{CallState, CallView};
use crate::state::{publish, CALL_VIEW};
use crate::{audio, room};

fn build_controller(config: &AppConfig) -> Result<Rc<CallController>, ApiError> {
    let client = ApiClient::new(&config.backend_url, config.http_timeout)?;
    let controller = CallController::new(
        config.call_settings(),
        Rc::new(HttpCredentialProvider::new(client)),
        audio::platform_ringtone(config),
        audio::platform_audio_session(),
        room::platform_connector(),
    );
    controller.set_observer(publish);
    Ok(Rc::new(controller))
}

#[component]
pub fn CallScreen() -> Element {
    let controller = use_hook(|| build_controller(app_config()).map_err(|e| e.to_string()));

    // Leaving the screen releases the ringtone, room and audio session
    {
        let controller = controller.clone();
        use_drop(move || {
            if let Ok(controller) = controller {
                controller.end_call();
            }
        });
    }

    let controller = match controller {
        Ok(controller) => controller,
        Err(e) => {
            return rsx! {
                div { class: "call-screen",
                    p { class: "status error", "Call setup failed: {e}" }
                }
            };
        }
    };

    let view = CALL_VIEW.read().clone();
    let status = view.status_text();
    let is_active = view.state.is_active();
    let show_room = matches!(view.state, CallState::Ringing | CallState::Connected);

    let start_call = {
        let controller = controller.clone();
        move |_: MouseEvent| {
            let controller = controller.clone();
            spawn(async move {
                match controller.start_call().await {
                    Ok(events) => controller.relay(events).await,
                    Err(CallError::Cancelled) => {}
                    Err(e) => tracing::warn!("Call did not start: {}", e),
                }
            });
        }
    };

    let end_call = move |_: MouseEvent| {
        controller.end_call();
    };

    rsx! {
        div { class: "call-screen",
            if view.state == CallState::Connected {
                RoomView { view: view.clone() }
            } else if show_room {
                p { class: "status calling", "{status}" }
                RoomView { view: view.clone() }
            } else {
                p { class: "status", "{status}" }
            }

            if is_active {
                button { class: "end", onclick: end_call, "End Call" }
            } else {
                button { class: "start", onclick: start_call, "Start Call" }
            }
        }
    }
}

/// Live transcription and room status for a connected call
#[component]
fn RoomView(view: CallView) -> Element {
    let agent = view.agent_label();
    let connection = view.connection_label();
    let notice = view.notice.clone().unwrap_or_default();

    rsx! {
        div { class: "room",
            for (index, message) in view.transcriptions.iter().enumerate() {
                p { key: "{index}", class: "transcript", "{message}" }
            }
            if !notice.is_empty() {
                p { class: "notice", "{notice}" }
            }
            p { class: "room-state", "State: {agent}" }
            p { class: "room-state", "Connection State: {connection}" }
        }
    }
}
