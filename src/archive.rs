// ABOUTME: Archive export for the showoff slide server
// ABOUTME: Packages the rendered deck page and its images into a zip file

use crate::config::Config;
use crate::deck::{self, Deck};
use crate::errors::{DeckError, Result};
use crate::html;
use crate::utils;
use log::info;
use std::fs;
use std::io::{Cursor, Seek, Write};
use std::path::Path;
use zip::{write::FileOptions, ZipWriter};

/// Write `index.html` and `images/<name>` for every image into a zip
pub fn write_archive<W: Write + Seek>(deck: &Deck, writer: W) -> Result<W> {
    let mut zip = ZipWriter::new(writer);

    info!("Adding index.html to archive");
    zip.start_file("index.html", FileOptions::default())?;
    zip.write_all(html::render_deck(deck).as_bytes())?;

    for (name, path) in &deck.images {
        info!("Adding image {} from {:?}", name, path);
        let data = fs::read(path).map_err(|source| DeckError::SlideFileError {
            path: path.clone(),
            source,
        })?;
        zip.start_file(format!("images/{}", name), FileOptions::default())?;
        zip.write_all(&data)?;
    }

    Ok(zip.finish()?)
}

/// Build the archive in memory, for serving over HTTP
pub fn archive_bytes(deck: &Deck) -> Result<Vec<u8>> {
    Ok(write_archive(deck, Cursor::new(Vec::new()))?.into_inner())
}

/// Load the deck under `config` and export it to `output`
pub fn export_archive(config: &Config, output: &Path) -> Result<()> {
    let deck = deck::load_deck(config)?;

    let parent = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    utils::validate_directory_writable(parent)?;
    let file = fs::File::create(output).map_err(DeckError::FileReadError)?;
    write_archive(&deck, file)?;

    info!(
        "Archive with {} slides and {} images written to {:?}",
        deck.slides.len(),
        deck.images.len(),
        output
    );
    Ok(())
}

/// Download name for a deck archive: `<title>.zip`
pub fn archive_file_name(title: &str) -> String {
    let cleaned: String = title
        .chars()
        .filter(|c| !matches!(c, '"' | '/' | '\\') && !c.is_control())
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        "slides.zip".to_string()
    } else {
        format!("{}.zip", cleaned)
    }
}
