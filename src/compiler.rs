// ABOUTME: Slide compilation for the showoff slide server
// ABOUTME: Turns one slide segment into wrapped HTML content and plain speaker notes

use crate::errors::{DeckError, Result};
use comrak::{markdown_to_html, ComrakOptions};
use log::debug;
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Separates the slide body from its speaker notes
pub const NOTES_TOKEN: &str = ".notes";

/// An indented code block whose first line is `@@@` asks for highlighter classes
const CODE_TAG_MARKER: &str = "    @@@";

/// Indented code as rendered: `<pre><code>@@@lang\n`
static RENDERED_CODE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("<pre><code>@@@( *[^\n]*)\n").unwrap());

/// A compiled slide
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Slide {
    /// Rendered HTML, ready to embed
    pub content: String,
    /// Trimmed speaker notes, never rendered
    pub notes: String,
}

/// Layout of a slide, named on the line after `!SLIDE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideType {
    Default,
    Center,
    Bullets,
}

impl SlideType {
    /// Decode an already trimmed type line. Anything but the three keywords is rejected.
    pub fn parse(keyword: &str) -> Option<Self> {
        match keyword {
            "" => Some(SlideType::Default),
            "center" => Some(SlideType::Center),
            "bullets" => Some(SlideType::Bullets),
            _ => None,
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            SlideType::Default => "default",
            SlideType::Center => "center",
            SlideType::Bullets => "bullets",
        }
    }

    pub fn style(self) -> &'static str {
        match self {
            SlideType::Default => " padding: 2em; ",
            SlideType::Center => "text-align: center; ",
            SlideType::Bullets => "",
        }
    }
}

/// Compile every segment in order. The first bad segment aborts the whole deck.
pub fn compile_slides(segments: &[&str]) -> Result<Vec<Slide>> {
    segments
        .iter()
        .enumerate()
        .map(|(i, segment)| compile_slide(segment, i + 1))
        .collect()
}

/// Compile one segment. `slide` is the 1-based position used in error messages.
pub fn compile_slide(segment: &str, slide: usize) -> Result<Slide> {
    let (type_line, rest) = segment
        .split_once('\n')
        .ok_or(DeckError::MalformedSegment { slide })?;

    let keyword = type_line.trim_matches(|c| c == ' ' || c == '\t');
    let slide_type = SlideType::parse(keyword).ok_or_else(|| DeckError::InvalidSlideType {
        slide,
        slide_type: keyword.to_string(),
    })?;

    let (body, notes) = match rest.split_once(NOTES_TOKEN) {
        Some((body, notes)) => (
            body,
            notes.trim_matches(|c| matches!(c, ' ' | '\t' | '\r' | '\n')),
        ),
        None => (rest, ""),
    };

    let tag_code = body.contains(CODE_TAG_MARKER);

    let rendered = rewrite_image_paths(&render_markdown(body));
    let mut content = format!(
        r#"<div class="{} innerContent" style="{}">{}</div>"#,
        slide_type.class(),
        slide_type.style(),
        rendered
    );
    if tag_code {
        content = tag_code_blocks(&content);
    }

    debug!("Compiled slide {} as {:?}", slide, slide_type);

    Ok(Slide {
        content,
        notes: notes.to_string(),
    })
}

/// Render a markdown fragment. Raw HTML is dropped and no document wrapper is emitted.
pub fn render_markdown(body: &str) -> String {
    let mut options = ComrakOptions::default();
    options.render.unsafe_ = false;
    options.extension.strikethrough = true;
    markdown_to_html(body, &options)
}

/// Point every image at `images/`. Plain substring replacement, so applying it twice
/// yields `images/images/`.
pub fn rewrite_image_paths(html: &str) -> String {
    html.replace(r#"<img src=""#, r#"<img src="images/"#)
}

/// Give `@@@`-tagged indented code blocks their highlighter classes
pub fn tag_code_blocks(html: &str) -> String {
    RENDERED_CODE_BLOCK
        .replace_all(html, |caps: &Captures| {
            let lang = caps[1].trim();
            if lang.is_empty() {
                "<pre class=\"sh_sourceCode\"><code>\n".to_string()
            } else {
                format!("<pre class=\"sh_{} sh_sourceCode\"><code>\n", lang)
            }
        })
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_slide() {
        let slide = compile_slide("\nHello **world**\n", 1).unwrap();
        assert!(slide.content.starts_with(r#"<div class="default innerContent""#));
        assert!(slide.content.contains("padding: 2em;"));
        assert!(slide.content.contains("<strong>world</strong>"));
        assert!(slide.content.ends_with("</div>"));
        assert_eq!(slide.notes, "");
    }

    #[test]
    fn test_center_slide_with_notes() {
        let slide = compile_slide("center\nTitle\n.notes\nSpeaker reminder\n", 1).unwrap();
        assert!(slide.content.contains(r#"class="center innerContent""#));
        assert!(slide.content.contains(r#"style="text-align: center; ""#));
        assert!(slide.content.contains("<p>Title</p>"));
        assert!(!slide.content.contains("Speaker reminder"));
        assert!(!slide.content.contains(".notes"));
        assert_eq!(slide.notes, "Speaker reminder");
    }

    #[test]
    fn test_bullets_slide_has_no_style() {
        let slide = compile_slide(" bullets \t\n* one\n* two\n", 1).unwrap();
        assert!(slide
            .content
            .starts_with(r#"<div class="bullets innerContent" style="">"#));
        assert!(slide.content.contains("<li>one</li>"));
    }

    #[test]
    fn test_invalid_slide_type() {
        let err = compile_slide("bogus\nContent\n", 3).unwrap_err();
        match err {
            DeckError::InvalidSlideType { slide, slide_type } => {
                assert_eq!(slide, 3);
                assert_eq!(slide_type, "bogus");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_segment_without_body() {
        assert!(matches!(
            compile_slide(" center", 2),
            Err(DeckError::MalformedSegment { slide: 2 })
        ));
    }

    #[test]
    fn test_compile_slides_fails_whole_deck() {
        let result = compile_slides(&["\none\n", "bogus\ntwo\n", "\nthree\n"]);
        assert!(matches!(
            result,
            Err(DeckError::InvalidSlideType { slide: 2, .. })
        ));

        let slides = compile_slides(&["\none\n", "center\ntwo\n"]).unwrap();
        assert_eq!(slides.len(), 2);
        assert!(slides[1].content.contains("<p>two</p>"));
    }

    #[test]
    fn test_only_first_notes_token_splits() {
        let slide = compile_slide("\nbody\n.notes first\n.notes second\n", 1).unwrap();
        assert_eq!(slide.notes, "first\n.notes second");
    }

    #[test]
    fn test_notes_are_not_rendered() {
        let slide = compile_slide("\nbody\n.notes\n**raw** <b>\n", 1).unwrap();
        assert_eq!(slide.notes, "**raw** <b>");
    }

    #[test]
    fn test_images_point_at_images_dir() {
        let slide = compile_slide("\n![logo](logo.png)\n", 1).unwrap();
        assert!(slide.content.contains(r#"<img src="images/logo.png""#));
    }

    #[test]
    fn test_image_rewrite_is_not_idempotent() {
        let once = rewrite_image_paths(r#"<img src="foo.png">"#);
        assert_eq!(once, r#"<img src="images/foo.png">"#);
        assert_eq!(
            rewrite_image_paths(&once),
            r#"<img src="images/images/foo.png">"#
        );
    }

    #[test]
    fn test_raw_html_is_suppressed() {
        let slide = compile_slide("\n<script>alert(1)</script>\n\ntext\n", 1).unwrap();
        assert!(!slide.content.contains("<script>"));
        assert!(slide.content.contains("<p>text</p>"));
    }

    #[test]
    fn test_tagged_code_block() {
        let slide =
            compile_slide("\nIntro\n\n    @@@python\n    print(1)\n", 1).unwrap();
        assert!(slide
            .content
            .contains("<pre class=\"sh_python sh_sourceCode\"><code>\nprint(1)\n</code></pre>"));
        assert!(!slide.content.contains("@@@"));
    }

    #[test]
    fn test_tagged_code_block_without_language() {
        let html = tag_code_blocks("<pre><code>@@@\nx = 1\n</code></pre>");
        assert_eq!(html, "<pre class=\"sh_sourceCode\"><code>\nx = 1\n</code></pre>");
    }

    #[test]
    fn test_language_is_trimmed() {
        let html = tag_code_blocks("<pre><code>@@@  ruby \nputs 1\n</code></pre>");
        assert!(html.starts_with("<pre class=\"sh_ruby sh_sourceCode\"><code>\n"));
    }

    #[test]
    fn test_code_tags_need_indented_marker() {
        let slide = compile_slide("\n```\n@@@ruby\nputs 1\n```\n", 1).unwrap();
        assert!(slide.content.contains("<pre><code>@@@ruby\n"));
    }

    #[test]
    fn test_slide_type_parse() {
        assert_eq!(SlideType::parse(""), Some(SlideType::Default));
        assert_eq!(SlideType::parse("center"), Some(SlideType::Center));
        assert_eq!(SlideType::parse("bullets"), Some(SlideType::Bullets));
        assert_eq!(SlideType::parse("Center"), None);
    }
}
