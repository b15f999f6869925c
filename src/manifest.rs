// ABOUTME: Manifest parsing for the showoff slide server
// ABOUTME: Reads showoff.json to find the deck title, section order and viewport

use crate::errors::{DeckError, Result};
use crate::utils;
use log::debug;
use serde::Deserialize;
use std::fs;
use std::path::Path;

pub const DEFAULT_HEIGHT: u32 = 768;
pub const DEFAULT_WIDTH: u32 = 1024;

/// Parsed contents of `showoff.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Manifest {
    pub name: String,
    pub sections: Vec<Section>,
    pub view: Viewport,
}

/// One section directory, relative to the slide root
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Section {
    pub section: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Viewport {
    #[serde(alias = "Height")]
    pub height: u32,
    #[serde(alias = "Width")]
    pub width: u32,
}

impl Viewport {
    /// The manifest viewport when both dimensions are set, else 1024x768
    pub fn effective(self) -> Viewport {
        if self.height != 0 && self.width != 0 {
            self
        } else {
            Viewport {
                height: DEFAULT_HEIGHT,
                width: DEFAULT_WIDTH,
            }
        }
    }

    pub fn height_half(&self) -> u32 {
        self.height / 2
    }

    pub fn width_half(&self) -> u32 {
        self.width / 2
    }
}

impl Manifest {
    /// Parse manifest JSON, naming `path` in any error
    pub fn parse(json: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| DeckError::ManifestError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}

/// Read and parse the manifest at `path`
pub fn load_manifest(path: &Path) -> Result<Manifest> {
    utils::validate_file_exists(path)?;
    let json = fs::read_to_string(path).map_err(DeckError::FileReadError)?;
    let manifest = Manifest::parse(&json, path)?;
    debug!(
        "Loaded manifest {:?}: {} sections",
        path,
        manifest.sections.len()
    );
    Ok(manifest)
}
