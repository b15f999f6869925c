// ABOUTME: Library module for the showoff slide server.
// ABOUTME: Compiles directories of markdown fragments into HTML slide decks with speaker notes.

// Reexport modules
pub mod archive;
pub mod compiler;
pub mod config;
pub mod deck;
pub mod errors;
pub mod html;
pub mod manifest;
pub mod resources;
pub mod server;
pub mod splitter;
pub mod utils;

// Reexport common types and functions
pub use archive::{export_archive, write_archive};
pub use compiler::{compile_slide, compile_slides, Slide, SlideType};
pub use config::Config;
pub use deck::{load_deck, Deck};
pub use errors::{DeckError, Result};
pub use html::{render_deck, render_presenter, write_html_to_file};
pub use manifest::{load_manifest, Manifest, Viewport};
pub use resources::AssetSource;
pub use server::serve;
pub use splitter::split_slides;
