mod ringtone;
mod session;

pub use ringtone::*;
pub use session::PlatformAudioSession;

use std::rc::Rc;

use crate::call::{AudioSession, RingtonePlayer};
use crate::config::AppConfig;

/// Ringtone player for the current build target.
#[cfg_attr(not(target_arch = "wasm32"), allow(unused_variables))]
pub fn platform_ringtone(config: &AppConfig) -> Rc<dyn RingtonePlayer> {
    #[cfg(target_arch = "wasm32")]
    {
        Rc::new(HtmlAudioRingtone::new(&config.ringtone_url))
    }

    #[cfg(all(not(target_arch = "wasm32"), feature = "tinyaudio"))]
    {
        Rc::new(ToneRingtone::new())
    }

    #[cfg(all(not(target_arch = "wasm32"), not(feature = "tinyaudio")))]
    {
        Rc::new(SilentRingtone)
    }
}

pub fn platform_audio_session() -> Rc<dyn AudioSession> {
    Rc::new(PlatformAudioSession::new())
}
