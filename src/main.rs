//! Voice Call - Dioxus call screen for a voice agent
//!
//! Fetches a room token from the backend, rings while the call is being set
//! up, joins an audio-only LiveKit room and shows the agent's live
//! transcription until the user hangs up.

mod api;
mod audio;
mod call;
mod components;
mod config;
mod models;
mod room;
mod setup;
mod state;

use dioxus::prelude::*;
use components::CallScreen;

const LIVEKIT_BRIDGE: Asset = asset!("/assets/livekit-bridge.js");

fn main() {
    // Load environment variables
    #[cfg(not(target_arch = "wasm32"))]
    dotenvy::dotenv().ok();

    setup::init_globals();

    match config::AppConfig::from_env() {
        Ok(config) => {
            tracing::info!("Using token backend {}", config.backend_url);
            config::init_config(config);
        }
        Err(e) => {
            tracing::error!("Invalid configuration: {:#}", e);
            return;
        }
    }

    // Launch the Dioxus app
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    rsx! {
        // Global styles
        style { {include_str!("../assets/styles.css")} }

        // LiveKit browser SDK bridge
        script { r#type: "module", src: LIVEKIT_BRIDGE }

        CallScreen {}
    }
}
