// ABOUTME: Deck assembly for the showoff slide server
// ABOUTME: Walks the manifest sections, gathers markdown and images, and compiles the slides

use crate::compiler::{self, Slide};
use crate::config::Config;
use crate::errors::{DeckError, Result};
use crate::manifest::{self, Manifest, Viewport};
use crate::splitter;
use log::{debug, info};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Separator written after every markdown file
const FILE_SEPARATOR: &str = "\n\n";

/// A fully compiled presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deck {
    pub title: String,
    pub slides: Vec<Slide>,
    pub view: Viewport,
    /// Basename to filesystem path of every non-markdown file in the sections
    pub images: BTreeMap<String, PathBuf>,
    /// Inline stylesheet sized to the viewport
    pub css: String,
}

impl Deck {
    /// Look up an image asset by basename
    pub fn image_path(&self, name: &str) -> Option<&Path> {
        self.images.get(name).map(PathBuf::as_path)
    }
}

/// Concatenated markdown of every section plus the images found beside it
#[derive(Debug, Default)]
pub struct RawDeck {
    pub markdown: String,
    pub images: BTreeMap<String, PathBuf>,
}

/// Load the manifest under the configured slide root and compile the whole deck
pub fn load_deck(config: &Config) -> Result<Deck> {
    let manifest_path = config.manifest_path();
    info!("Loading slides from {:?}", config.slides_root);

    let manifest = manifest::load_manifest(&manifest_path)?;
    let raw = read_sections(&config.slides_root, &manifest)?;
    build_deck(&manifest, raw)
}

/// Read every section directory in manifest order.
///
/// Files are taken in file name order. Files ending in `.md` are appended to
/// the markdown blob, everything else is recorded as an image by basename; a
/// later file with the same basename replaces an earlier one.
pub fn read_sections(root: &Path, manifest: &Manifest) -> Result<RawDeck> {
    let mut raw = RawDeck::default();

    for section in &manifest.sections {
        let section_dir = root.join(&section.section);
        debug!("Reading section {:?}", section_dir);

        let mut entries = fs::read_dir(&section_dir)
            .and_then(|dir| dir.collect::<std::io::Result<Vec<_>>>())
            .map_err(|source| DeckError::SectionError {
                path: section_dir.clone(),
                source,
            })?;
        entries.sort_by_key(|entry| entry.file_name());

        for entry in entries {
            let path = entry.path();
            let file_type = entry.file_type().map_err(|source| DeckError::SectionError {
                path: section_dir.clone(),
                source,
            })?;
            if file_type.is_dir() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();

            if !name.ends_with(".md") {
                if let Some(previous) = raw.images.insert(name.clone(), path.clone()) {
                    debug!("Image {} at {:?} replaces {:?}", name, path, previous);
                }
                continue;
            }

            let data = fs::read(&path).map_err(|source| DeckError::SlideFileError {
                path: path.clone(),
                source,
            })?;
            raw.markdown.push_str(&String::from_utf8_lossy(&data));
            raw.markdown.push_str(FILE_SEPARATOR);
        }
    }

    Ok(raw)
}

/// Split and compile a raw deck. Any bad slide fails the whole build.
pub fn build_deck(manifest: &Manifest, raw: RawDeck) -> Result<Deck> {
    let segments = splitter::split_slides(&raw.markdown);
    let slides = compiler::compile_slides(&segments)?;
    let view = manifest.view.effective();

    info!(
        "Compiled {} slides and {} images for {:?}",
        slides.len(),
        raw.images.len(),
        manifest.name
    );

    Ok(Deck {
        title: manifest.name.clone(),
        slides,
        view,
        images: raw.images,
        css: deck_css(view),
    })
}

/// Stylesheet for slide layouts, sized to the viewport
pub fn deck_css(view: Viewport) -> String {
    format!(
        r#"
.bullets > ul {{
	list-style: none;
}}
.bullets > ul > li {{
	text-align: center;
}}

.innerContent ul ul {{
	list-style: disc;
	text-align: left;
}}

.bullets ul ul > li {{ font-size: 80%; }}

li {{
	font-size: 150%;
	margin-left: 0.5em;
}}

h1 {{
	margin-top: 0px;
}}
section > div {{
	vertical-align: middle;
	display: table-cell;
	height: {height}px;
	width: {width}px;
}}
"#,
        height = view.height,
        width = view.width
    )
}
