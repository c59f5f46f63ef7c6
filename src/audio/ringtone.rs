//! Ringtone players
//!
//! The web build streams the configured ringtone file through an
//! `HtmlAudioElement`. Desktop builds with `desktop-audio` synthesize a US
//! ring cadence with tinyaudio; other desktop builds stay silent.

#[cfg(not(target_arch = "wasm32"))]
use crate::call::RingtonePlayer;
#[cfg(not(target_arch = "wasm32"))]
use crate::models::AudioMode;

/// Sample rate used by the synthesized ringtone.
pub const SAMPLE_RATE: usize = 44100;

const RING_ON_SECS: f32 = 2.0;
const RING_CYCLE_SECS: f32 = 6.0;
const RING_VOLUME: f32 = 0.15;

/// US ring tone: 440Hz + 480Hz, on for 2s, off for 4s.
///
/// Without looping only the first cycle is audible.
#[cfg_attr(not(feature = "tinyaudio"), allow(dead_code))]
pub fn ring_sample(index: usize, sample_rate: usize, looping: bool) -> f32 {
    let t = index as f32 / sample_rate as f32;
    if !looping && t >= RING_CYCLE_SECS {
        return 0.0;
    }
    if t % RING_CYCLE_SECS >= RING_ON_SECS {
        return 0.0;
    }
    let low = (2.0 * std::f32::consts::PI * 440.0 * t).sin();
    let high = (2.0 * std::f32::consts::PI * 480.0 * t).sin();
    (low + high) * RING_VOLUME
}

// Desktop with audio support (requires alsa-lib-devel)
#[cfg(all(not(target_arch = "wasm32"), feature = "tinyaudio"))]
pub struct ToneRingtone {
    device: std::cell::RefCell<Option<tinyaudio::prelude::OutputDevice>>,
    looping: std::cell::Cell<bool>,
}

#[cfg(all(not(target_arch = "wasm32"), feature = "tinyaudio"))]
impl ToneRingtone {
    pub fn new() -> Self {
        Self {
            device: std::cell::RefCell::new(None),
            looping: std::cell::Cell::new(true),
        }
    }
}

#[cfg(all(not(target_arch = "wasm32"), feature = "tinyaudio"))]
impl RingtonePlayer for ToneRingtone {
    fn set_audio_mode(&self, mode: AudioMode) {
        // Desktop output always mixes with other applications
        tracing::debug!("Ringtone audio mode: {:?}", mode);
    }

    fn set_loop(&self, looping: bool) {
        self.looping.set(looping);
    }

    fn play(&self) {
        use tinyaudio::prelude::*;

        if self.device.borrow().is_some() {
            return;
        }

        let looping = self.looping.get();
        let params = OutputDeviceParameters {
            channels_count: 1,
            sample_rate: SAMPLE_RATE,
            channel_sample_count: 1024,
        };

        let mut position = 0usize;
        match run_output_device(params, move |data| {
            for sample in data.iter_mut() {
                *sample = ring_sample(position, SAMPLE_RATE, looping);
                position += 1;
            }
        }) {
            Ok(device) => {
                tracing::debug!("Ringtone playing");
                *self.device.borrow_mut() = Some(device);
            }
            Err(e) => tracing::warn!("Ringtone output unavailable: {}", e),
        }
    }

    fn pause(&self) {
        if self.device.borrow_mut().take().is_some() {
            tracing::debug!("Ringtone stopped");
        }
    }
}

// Desktop without audio (no-op)
#[cfg(not(target_arch = "wasm32"))]
#[cfg_attr(feature = "tinyaudio", allow(dead_code))]
pub struct SilentRingtone;

#[cfg(not(target_arch = "wasm32"))]
impl RingtonePlayer for SilentRingtone {
    fn set_audio_mode(&self, _mode: AudioMode) {}

    fn set_loop(&self, _looping: bool) {}

    fn play(&self) {
        // Audio disabled - install alsa-lib-devel and build with --features desktop-audio
        tracing::debug!("Ringing (silent build)");
    }

    fn pause(&self) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::HtmlAudioRingtone;

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlAudioElement;

    use crate::call::RingtonePlayer;
    use crate::models::AudioMode;

    pub struct HtmlAudioRingtone {
        element: Option<HtmlAudioElement>,
    }

    impl HtmlAudioRingtone {
        pub fn new(url: &str) -> Self {
            let element = match HtmlAudioElement::new_with_src(url) {
                Ok(element) => Some(element),
                Err(e) => {
                    tracing::warn!("Cannot load ringtone {}: {:?}", url, e);
                    None
                }
            };
            Self { element }
        }
    }

    impl RingtonePlayer for HtmlAudioRingtone {
        fn set_audio_mode(&self, mode: AudioMode) {
            // Browsers ignore the silent switch and always mix
            tracing::debug!("Ringtone audio mode: {:?}", mode);
        }

        fn set_loop(&self, looping: bool) {
            if let Some(element) = &self.element {
                element.set_loop(looping);
            }
        }

        fn play(&self) {
            let Some(element) = &self.element else {
                return;
            };
            match element.play() {
                Ok(promise) => wasm_bindgen_futures::spawn_local(async move {
                    if let Err(e) = JsFuture::from(promise).await {
                        tracing::warn!("Ringtone playback blocked: {:?}", e);
                    }
                }),
                Err(e) => tracing::warn!("Ringtone playback failed: {:?}", e),
            }
        }

        fn pause(&self) {
            if let Some(element) = &self.element {
                let _ = element.pause();
                element.set_current_time(0.0);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_cadence_on_then_off() {
        // Audible somewhere in the first 10ms
        assert!((0..441).any(|i| ring_sample(i, SAMPLE_RATE, true).abs() > 0.01));
        // Silent during the off part of the cycle
        let off = (3.0 * SAMPLE_RATE as f32) as usize;
        assert!((off..off + 441).all(|i| ring_sample(i, SAMPLE_RATE, true) == 0.0));
        // Second cycle rings again when looping
        let second = 6 * SAMPLE_RATE;
        assert!((second..second + 441).any(|i| ring_sample(i, SAMPLE_RATE, true).abs() > 0.01));
    }

    #[test]
    fn test_ring_stops_after_one_cycle_without_loop() {
        let second = 6 * SAMPLE_RATE;
        assert!((second..second + 441).all(|i| ring_sample(i, SAMPLE_RATE, false) == 0.0));
    }

    #[test]
    fn test_ring_volume_bounded() {
        assert!((0..SAMPLE_RATE).all(|i| ring_sample(i, SAMPLE_RATE, true).abs() <= 2.0 * RING_VOLUME));
    }
}
