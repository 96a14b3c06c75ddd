//! Deck manifest loading.
//!
//! A manifest describes the page location and its containers, and may carry
//! a `[config]` table that overrides the discovered configuration:
//!
//! ```toml
//! url = "https://example.org/deck/index.html#intro"
//!
//! [config]
//! density = 32
//!
//! [[container]]
//! id = "slide-1"
//! classes = ["slide"]
//! width = 1280
//! height = 720
//! font_size = 20
//! ```

use std::{fs, path::Path};

use log::{info, warn};
use serde::Deserialize;

use backdrop::{BackdropError, config::PartialConfig, document::Deck};

use crate::config::validate_config;

/// A parsed deck manifest.
#[derive(Debug, Deserialize)]
pub struct Manifest {
    #[serde(flatten)]
    deck: Deck,

    #[serde(default)]
    config: Option<PartialConfig>,
}

impl Manifest {
    /// Splits the manifest into the deck and its configuration override.
    pub fn into_parts(self) -> (Deck, Option<PartialConfig>) {
        (self.deck, self.config)
    }
}

/// Parse a manifest from TOML source.
///
/// # Errors
///
/// Returns [`BackdropError::Parse`] pointing at the offending span, or
/// [`BackdropError::Config`] if a container has an unusable size or the
/// `[config]` table fails validation.
pub fn parse_manifest(content: &str) -> Result<Manifest, BackdropError> {
    let manifest: Manifest = toml::from_str(content).map_err(|err| {
        BackdropError::new_parse_error(
            format!("Failed to parse deck manifest: {}", err.message()),
            err.span(),
            content,
        )
    })?;

    for (index, container) in manifest.deck.containers().iter().enumerate() {
        let (width, height) = (container.width(), container.height());
        if !width.is_finite() || !height.is_finite() || width < 0.0 || height < 0.0 {
            return Err(BackdropError::Config(format!(
                "container {index} has an invalid size {width}x{height}"
            )));
        }
    }

    if let Some(config) = &manifest.config {
        validate_config(config)?;
    }

    if manifest.deck.containers().is_empty() {
        warn!("Deck manifest declares no containers");
    }

    Ok(manifest)
}

/// Load a manifest from a TOML file.
///
/// # Errors
///
/// Returns error if the file cannot be read or parsed.
pub fn load_manifest(path: impl AsRef<Path>) -> Result<Manifest, BackdropError> {
    let path = path.as_ref();
    info!(path = path.display().to_string(); "Loading deck manifest");

    let content = fs::read_to_string(path)?;
    parse_manifest(&content)
}
