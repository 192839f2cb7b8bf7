//! Startup errors
//!
//! The simulation itself cannot fail; only bringing up the host can.

#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    /// No browser window or document available
    #[error("no browser window available")]
    NoWindow,
    /// A required page element is missing
    #[error("missing page element #{id}")]
    MissingElement { id: String },
    /// The stage element exists but is not a canvas
    #[error("element #{id} is not a canvas")]
    NotACanvas { id: String },
    /// Surface, adapter or device creation failed
    #[error("graphics initialization failed: {0}")]
    Graphics(String),
    /// The settings attribute held invalid JSON
    #[error("invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
    /// The shoot sound could not be loaded
    #[error("failed to load sound {url}: {reason}")]
    SoundLoad { url: String, reason: String },
}

#[cfg(target_arch = "wasm32")]
impl From<StartupError> for wasm_bindgen::JsValue {
    fn from(err: StartupError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}
