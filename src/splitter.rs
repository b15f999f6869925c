// ABOUTME: Slide splitting for the showoff slide server
// ABOUTME: Cuts the concatenated markdown of a deck into one segment per slide

/// Marks the start of every slide
pub const SLIDE_DELIMITER: &str = "!SLIDE";

/// Split a raw deck into slide segments.
///
/// The blob is trimmed of spaces, tabs, CR and LF, then cut on every
/// `!SLIDE`. Whatever precedes the first delimiter is preamble and is
/// dropped, so a deck with no delimiter has no slides. Segments are
/// returned untrimmed.
pub fn split_slides(raw: &str) -> Vec<&str> {
    let trimmed = raw.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n'));
    trimmed.split(SLIDE_DELIMITER).skip(1).collect()
}
