// ABOUTME: Syntax highlighter asset handling for the showoff slide server
// ABOUTME: Serves the SHJS bundle from a local directory or a remote base URL

use crate::errors::{DeckError, Result};
use log::{debug, info};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Where the highlighter bundle (`sh_main.min.js`, `css/`, `lang/`) lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetSource {
    Local(PathBuf),
    Remote(String),
}

impl AssetSource {
    /// Create an asset source from a path string.
    /// Anything starting with http:// or https:// is treated as a remote base URL.
    pub fn new(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            AssetSource::Remote(location.to_string())
        } else {
            AssetSource::Local(PathBuf::from(location))
        }
    }

    /// Fetch a file of the bundle, addressed relative to the bundle root.
    pub fn fetch(&self, relative: &str) -> Result<Vec<u8>> {
        let relative = relative.trim_start_matches('/');
        validate_relative(relative)?;

        match self {
            AssetSource::Local(dir) => read_local(dir, relative),
            AssetSource::Remote(base) => fetch_remote(base, relative),
        }
    }
}

/// Content type to announce for a bundle file, if it needs one.
pub fn content_type(path: &str) -> Option<&'static str> {
    if path.ends_with(".css") {
        Some("text/css")
    } else if path.ends_with(".js") {
        Some("application/javascript")
    } else {
        None
    }
}

fn validate_relative(relative: &str) -> Result<()> {
    if relative.is_empty() {
        return Err(DeckError::AssetNotFound(relative.to_string()));
    }
    let escapes = Path::new(relative)
        .components()
        .any(|c| !matches!(c, Component::Normal(_)));
    if escapes {
        return Err(DeckError::ValidationError(format!(
            "Invalid asset path: {}",
            relative
        )));
    }
    Ok(())
}

fn read_local(dir: &Path, relative: &str) -> Result<Vec<u8>> {
    let path = dir.join(relative);
    debug!("Reading local asset: {:?}", path);
    if !path.is_file() {
        return Err(DeckError::AssetNotFound(relative.to_string()));
    }
    fs::read(&path).map_err(DeckError::FileReadError)
}

/// Fetch content from the remote bundle with retry capability
fn fetch_remote(base: &str, relative: &str) -> Result<Vec<u8>> {
    let url = join_url(base, relative)?;
    info!("Fetching remote asset: {}", url);

    let client = Client::builder().timeout(Duration::from_secs(10)).build()?;

    // Try up to 3 times with increasing backoff
    let mut retry_delay = 1000;
    let mut last_error = None;

    for attempt in 1..=3 {
        match client.get(url.clone()).send() {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response.bytes()?.to_vec());
                }
                if status == StatusCode::NOT_FOUND {
                    return Err(DeckError::AssetNotFound(relative.to_string()));
                }
                last_error = Some(DeckError::ServerError(format!("HTTP error: {}", status)));
            }
            Err(e) => {
                last_error = Some(DeckError::FetchError(e));
            }
        }

        info!(
            "Fetch attempt {} failed, retrying in {} ms",
            attempt, retry_delay
        );
        std::thread::sleep(Duration::from_millis(retry_delay));
        retry_delay *= 2;
    }

    Err(last_error.unwrap_or_else(|| {
        DeckError::ValidationError("Unknown error fetching asset".to_string())
    }))
}

fn join_url(base: &str, relative: &str) -> Result<Url> {
    let mut base = base.to_string();
    if !base.ends_with('/') {
        base.push('/');
    }
    Url::parse(&base)
        .and_then(|u| u.join(relative))
        .map_err(|e| DeckError::ConfigError(format!("Invalid asset URL {}: {}", base, e)))
}
