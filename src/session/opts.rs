use crate::render::{organic::RenderOptions, raster::DEFAULT_EXPORT_SIZE, surface::TransitionTiming};

/// Session configuration. Every field is optional when loaded from JSON.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SessionOpts {
    /// Quiet period after the last live edit before regenerating.
    pub debounce_ms: f64,
    /// Pacing for "generate now" and first renders.
    pub cold: RenderOptions,
    /// Pacing for debounced live edits.
    pub live: RenderOptions,
    pub transitions: TransitionTiming,
    pub default_export_size: u32,
}

impl Default for SessionOpts {
    fn default() -> Self {
        Self {
            debounce_ms: 160.0,
            cold: RenderOptions::default(),
            live: RenderOptions::live(),
            transitions: TransitionTiming::default(),
            default_export_size: DEFAULT_EXPORT_SIZE,
        }
    }
}

impl SessionOpts {
    pub fn from_json(json: &str) -> crate::GlyphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
