// ABOUTME: Configuration module for the showoff slide server
// ABOUTME: Provides settings for the slide root, HTTP port and highlighter assets

use crate::errors::{DeckError, Result};
use crate::resources::AssetSource;
use std::env;
use std::path::PathBuf;

/// Name of the manifest file expected at the root of a slide directory
pub const MANIFEST_FILE: &str = "showoff.json";

/// Public location of the SHJS highlighter bundle
pub const DEFAULT_SHJS_URL: &str = "https://shjs.sourceforge.net/";

/// Configuration handed to the deck loader and the server at startup
#[derive(Debug, Clone)]
pub struct Config {
    pub slides_root: PathBuf,
    pub port: u16,
    pub assets: AssetSource,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            slides_root: PathBuf::from("."),
            port: 8080,
            assets: AssetSource::new(DEFAULT_SHJS_URL),
        }
    }
}

impl Config {
    /// Create a new configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let slides_root = env::var("SLIDES_ROOT")
            .ok()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));
        let port = env::var("SHOWOFF_PORT")
            .ok()
            .and_then(|s| s.parse::<u16>().ok())
            .unwrap_or(8080);
        let assets = AssetSource::new(
            &env::var("SHJS_ASSETS").unwrap_or_else(|_| DEFAULT_SHJS_URL.to_string()),
        );

        Self {
            slides_root,
            port,
            assets,
        }
    }

    /// Apply command line overrides on top of this config
    pub fn with_overrides(
        mut self,
        slides_root: Option<PathBuf>,
        port: Option<u16>,
        assets: Option<String>,
    ) -> Self {
        if let Some(root) = slides_root {
            self.slides_root = root;
        }
        if let Some(port) = port {
            self.port = port;
        }
        if let Some(assets) = assets {
            self.assets = AssetSource::new(&assets);
        }
        self
    }

    /// Path of the manifest inside the slide root
    pub fn manifest_path(&self) -> PathBuf {
        self.slides_root.join(MANIFEST_FILE)
    }

    /// Check that the slide root holds a manifest file
    pub fn validate(&self) -> Result<()> {
        let manifest = self.manifest_path();
        if !manifest.is_file() {
            return Err(DeckError::ConfigError(format!(
                "Invalid slide dir {:?}: missing {}",
                self.slides_root, MANIFEST_FILE
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_overrides_replace_defaults() {
        let config = Config::new().with_overrides(
            Some(PathBuf::from("/tmp/talk")),
            Some(9000),
            Some("/opt/shjs".to_string()),
        );
        assert_eq!(config.slides_root, PathBuf::from("/tmp/talk"));
        assert_eq!(config.port, 9000);
        assert_eq!(config.assets, AssetSource::Local(PathBuf::from("/opt/shjs")));
        assert_eq!(config.manifest_path(), PathBuf::from("/tmp/talk/showoff.json"));
    }

    #[test]
    fn test_validate_requires_manifest() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let config = Config::new().with_overrides(Some(dir.path().to_path_buf()), None, None);
        assert!(matches!(config.validate(), Err(DeckError::ConfigError(_))));

        std::fs::create_dir(dir.path().join(MANIFEST_FILE)).expect("Failed to create dir");
        assert!(config.validate().is_err(), "a directory is not a manifest");
    }

    #[test]
    fn test_validate_accepts_manifest_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        std::fs::write(dir.path().join(MANIFEST_FILE), "{}").expect("Failed to write manifest");
        let config = Config::new().with_overrides(Some(dir.path().to_path_buf()), None, None);
        assert!(config.validate().is_ok());
    }
}
