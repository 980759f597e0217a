//! Loop and window configuration

use ember_core::Result;
use serde::Deserialize;
use std::path::Path;

/// Window and loop configuration, fixed for the duration of a run except
/// `width`/`height`, which the runner updates on window resize.
///
/// Loadable from a TOML file; absent fields take their defaults.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub fullscreen: bool,
    pub decorated: bool,
    pub resizable: bool,
    /// Carried for the surface the app creates; the framework never draws
    pub vsync: bool,
    /// Fixed-update rate in Hz; 0 disables fixed updates
    pub fixed_hz: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Ember Application".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
            decorated: true,
            resizable: true,
            vsync: true,
            fixed_hz: 60.0,
        }
    }
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    pub fn with_title(mut self, title: &str) -> Self {
        self.title = title.to_string();
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    pub fn with_decorations(mut self, decorated: bool) -> Self {
        self.decorated = decorated;
        self
    }

    pub fn with_resizable(mut self, resizable: bool) -> Self {
        self.resizable = resizable;
        self
    }

    pub fn with_vsync(mut self, vsync: bool) -> Self {
        self.vsync = vsync;
        self
    }

    pub fn with_fixed_hz(mut self, hz: f64) -> Self {
        self.fixed_hz = hz.max(0.0);
        self
    }
}
