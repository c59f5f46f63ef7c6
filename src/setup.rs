//! Process-wide one-time initialization.

use std::sync::Once;

static INIT: Once = Once::new();

/// Install logging. Safe to call more than once; only the first call acts.
///
/// The web build's LiveKit globals (`setLogLevel`) are registered by
/// `assets/livekit-bridge.js` when the module loads.
pub fn init_globals() {
    INIT.call_once(|| {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

            let filter = EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("voice_call=info"));
            let _ = tracing_subscriber::registry()
                .with(tracing_subscriber::fmt::layer())
                .with(filter)
                .try_init();
        }

        tracing::debug!("Globals initialized");
    });
}
