//! Call session: the controller and the contracts it drives.

mod audio_session;
mod collaborators;
mod controller;
mod error;

pub use audio_session::AudioSessionGuard;
pub use collaborators::*;
pub use controller::{CallController, CallSettings};
pub use error::*;

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
async fn sleep(duration: Duration) {
    gloo_timers::future::sleep(duration).await;
}
