//! JSON render configuration: per-scene overrides, background and pipeline options.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::foundation::core::{Canvas, Fps};
use crate::foundation::error::{FrameloomError, FrameloomResult};
use crate::render::pipeline::RenderOpts;
use crate::scene::SceneSpec;
use crate::scene::graph::Color;
use crate::scenes::registry::SceneRegistry;

/// Replacement registration values for one scene. Unset fields keep the registered value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneOverride {
    /// Whole frames per second.
    pub fps: Option<u32>,
    /// Canvas width in pixels.
    pub width: Option<u32>,
    /// Canvas height in pixels.
    pub height: Option<u32>,
    /// Length in frames.
    pub duration_frames: Option<u64>,
}

impl SceneOverride {
    /// `true` when nothing is overridden.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply onto `spec` and validate the result.
    pub fn apply(&self, mut spec: SceneSpec) -> FrameloomResult<SceneSpec> {
        if let Some(fps) = self.fps {
            spec.fps = Fps::new(fps, 1)?;
        }
        if self.width.is_some() || self.height.is_some() {
            spec.canvas = Canvas::new(
                self.width.unwrap_or(spec.canvas.width),
                self.height.unwrap_or(spec.canvas.height),
            )?;
        }
        if let Some(d) = self.duration_frames {
            spec.duration_frames = d;
        }
        spec.validate()?;
        Ok(spec)
    }
}

/// Top-level configuration file.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Overrides keyed by scene id.
    pub scenes: BTreeMap<String, SceneOverride>,
    /// `#RRGGBB` color frames are flattened onto before MP4 encoding. Defaults to black.
    pub background: Option<String>,
    /// Range rendering options.
    pub render: RenderOpts,
}

impl RenderConfig {
    /// Parse a configuration from a JSON reader.
    pub fn from_reader<R: std::io::Read>(r: R) -> FrameloomResult<Self> {
        serde_json::from_reader(r)
            .map_err(|e| FrameloomError::serde(format!("parse render config JSON: {e}")))
    }

    /// Parse a configuration from a JSON file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> FrameloomResult<Self> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            FrameloomError::validation(format!("open render config '{}': {e}", path.display()))
        })?;
        Self::from_reader(BufReader::new(f))
    }

    /// Check every override against `registry`, the background color and the render options.
    pub fn validate(&self, registry: &SceneRegistry) -> FrameloomResult<()> {
        for (id, o) in &self.scenes {
            let spec = registry.default_spec(id)?;
            o.apply(spec)
                .map_err(|e| FrameloomError::validation(format!("scene override '{id}': {e}")))?;
        }
        self.background_rgba()?;
        if self.render.threads == Some(0) {
            return Err(FrameloomError::validation("render.threads must be >= 1 when set"));
        }
        if self.render.chunk_size == 0 {
            return Err(FrameloomError::validation("render.chunk_size must be >= 1"));
        }
        if self.render.channel_capacity == 0 {
            return Err(FrameloomError::validation(
                "render.channel_capacity must be >= 1",
            ));
        }
        Ok(())
    }

    /// Override for `id`, empty when none is configured.
    pub fn override_for(&self, id: &str) -> SceneOverride {
        self.scenes.get(id).copied().unwrap_or_default()
    }

    /// Opaque background as RGBA8.
    pub fn background_rgba(&self) -> FrameloomResult<[u8; 4]> {
        match &self.background {
            None => Ok([0, 0, 0, 255]),
            Some(s) => {
                let [r, g, b, _] = Color::parse_hex(s)?.to_rgba8();
                Ok([r, g, b, 255])
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
