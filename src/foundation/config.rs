use std::path::Path;

use anyhow::Context;

use crate::foundation::error::{KeystageError, KeystageResult};
use crate::keying::chroma::ChromaKey;

/// Tunables for an [`crate::Editor`] session.
///
/// Every field has a default, so a JSON document only needs the keys it
/// overrides.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EditorConfig {
    /// Keying parameters applied to every loaded overlay.
    pub chroma_key: ChromaKey,
    /// Half edge of the square corner handles, in background pixels.
    pub handle_half_size: f64,
    /// Lower bound for the overlay scale.
    pub min_scale: f64,
    /// Offset of a freshly loaded overlay from the background's top-left.
    pub initial_margin: f64,
    /// Maximum undo depth; 0 keeps every entry.
    pub history_limit: usize,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            chroma_key: ChromaKey::default(),
            handle_half_size: 10.0,
            min_scale: 0.05,
            initial_margin: 20.0,
            history_limit: 100,
        }
    }
}

impl EditorConfig {
    pub fn from_json_str(json: &str) -> KeystageResult<Self> {
        let cfg: Self = serde_json::from_str(json).context("parse editor config JSON")?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn from_path(path: &Path) -> KeystageResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read editor config '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> KeystageResult<()> {
        if !(self.handle_half_size.is_finite() && self.handle_half_size > 0.0) {
            return Err(KeystageError::validation(
                "handle_half_size must be finite and > 0",
            ));
        }
        if !(self.min_scale.is_finite() && self.min_scale > 0.0) {
            return Err(KeystageError::validation("min_scale must be finite and > 0"));
        }
        if !(self.initial_margin.is_finite() && self.initial_margin >= 0.0) {
            return Err(KeystageError::validation(
                "initial_margin must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/config.rs"]
mod tests;
