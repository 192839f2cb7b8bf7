//! Sound playback
//!
//! The game only needs one thing from audio: restart a loaded sound from the
//! beginning. In the browser this is an `HtmlAudioElement`; headless runs use
//! `SilentSound`.

/// A loaded, playable sound
pub trait Sound {
    /// Stop any playback in flight and play again from the start
    fn restart(&self);
}

/// Sound that does nothing (headless runs, tests)
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSound;

impl Sound for SilentSound {
    fn restart(&self) {}
}

#[cfg(target_arch = "wasm32")]
pub use web::{WebSound, load_sound};

#[cfg(target_arch = "wasm32")]
mod web {
    use wasm_bindgen_futures::{JsFuture, spawn_local};
    use web_sys::HtmlAudioElement;

    use super::Sound;
    use crate::error::StartupError;

    /// Sound backed by an audio element
    pub struct WebSound {
        element: HtmlAudioElement,
    }

    impl Sound for WebSound {
        fn restart(&self) {
            self.element.set_current_time(0.0);
            // Autoplay may be refused before the first user gesture; the
            // refusal arrives as a rejected promise
            match self.element.play() {
                Ok(playing) => spawn_local(async move {
                    if let Err(e) = JsFuture::from(playing).await {
                        log::warn!("Sound playback refused: {:?}", e);
                    }
                }),
                Err(e) => log::warn!("Sound playback failed: {:?}", e),
            }
        }
    }

    /// Load a sound and resolve once it can play through
    pub async fn load_sound(url: &str, volume: f32) -> Result<WebSound, StartupError> {
        let load_error = |reason: String| StartupError::SoundLoad {
            url: url.to_string(),
            reason,
        };

        let element =
            HtmlAudioElement::new_with_src(url).map_err(|e| load_error(format!("{e:?}")))?;
        element.set_volume(volume as f64);
        element.set_preload("auto");

        // The executor runs synchronously inside `Promise::new`
        let mut settle = None;
        let ready = js_sys::Promise::new(&mut |resolve, reject| settle = Some((resolve, reject)));
        let (resolve, reject) =
            settle.ok_or_else(|| load_error("promise executor did not run".into()))?;

        element
            .add_event_listener_with_callback("canplaythrough", &resolve)
            .map_err(|e| load_error(format!("{e:?}")))?;
        element
            .add_event_listener_with_callback("error", &reject)
            .map_err(|e| load_error(format!("{e:?}")))?;
        element.load();

        JsFuture::from(ready)
            .await
            .map_err(|e| load_error(format!("{e:?}")))?;

        log::info!("Loaded sound {url}");
        Ok(WebSound { element })
    }
}
