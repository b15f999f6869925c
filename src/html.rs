// ABOUTME: HTML page generation for the showoff slide server
// ABOUTME: Wraps compiled slides in the deck page and provides the presenter view

use crate::deck::Deck;
use crate::errors::{DeckError, Result};
use crate::manifest::Viewport;
use crate::utils;
use log::info;
use std::fs;
use std::path::Path;

/// Highlighter script and theme, served from the `/shjs/` bundle
pub const EXTRA_HEAD: &str = r#"<script type="text/javascript" src="shjs/sh_main.min.js"></script>
<link type="text/css" rel="stylesheet" href="shjs/css/sh_emacs.min.css">"#;

/// Runs once the page has loaded
pub const ONLOAD: &str = "sh_highlightDocument('shjs/lang/', '.min.js');";

const NAVIGATION_JS: &str = r#"(function() {
    var slides = document.querySelectorAll('body > section');
    function current() {
        var n = parseInt(location.hash.replace(/^#\/?/, ''), 10);
        if (isNaN(n) || n < 1) return 1;
        return Math.min(n, slides.length);
    }
    function show() {
        var c = current();
        for (var i = 0; i < slides.length; i++) {
            slides[i].setAttribute('aria-selected', i + 1 === c ? 'true' : 'false');
        }
    }
    function go(n) {
        if (n >= 1 && n <= slides.length) location.hash = '#' + n;
    }
    document.addEventListener('keydown', function(e) {
        if (e.key === 'ArrowRight' || e.key === 'PageDown' || e.key === ' ') go(current() + 1);
        else if (e.key === 'ArrowLeft' || e.key === 'PageUp') go(current() - 1);
        else if (e.key === 'Home') go(1);
        else if (e.key === 'End') go(slides.length);
    });
    window.addEventListener('hashchange', show);
    show();
})();"#;

const PRESENTER_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<title>Presenter</title>
<style>
body { margin: 0; font-family: sans-serif; background: #222; color: #eee; }
iframe { border: 0; background: white; }
#current { position: absolute; top: 2%; left: 2%; width: 60%; height: 60%; }
#next { position: absolute; top: 2%; left: 64%; width: 34%; height: 34%; opacity: 0.6; }
#notes { position: absolute; top: 66%; left: 2%; right: 2%; bottom: 2%; overflow: auto; white-space: pre-wrap; font-size: 140%; }
#position { position: absolute; top: 38%; left: 64%; font-size: 200%; }
</style>
</head>
<body>
<iframe id="current" src="/#1"></iframe>
<iframe id="next" src="/#2"></iframe>
<div id="position"></div>
<div id="notes"></div>
<script>
(function() {
    var current = document.getElementById('current');
    var next = document.getElementById('next');
    var n = parseInt(location.hash.replace(/^#\/?/, ''), 10) || 1;
    function slideCount() {
        var doc = current.contentDocument;
        return doc ? doc.querySelectorAll('body > section').length : 0;
    }
    function showNotes() {
        var doc = current.contentDocument;
        if (!doc) return;
        var section = doc.querySelectorAll('body > section')[n - 1];
        var details = section ? section.querySelector('details') : null;
        document.getElementById('notes').textContent = details ? details.textContent : '';
        document.getElementById('position').textContent = n + ' / ' + slideCount();
    }
    function update() {
        current.src = '/#' + n;
        next.src = '/#' + (n + 1);
        location.hash = '#/' + n;
        showNotes();
    }
    document.addEventListener('keydown', function(e) {
        var total = slideCount();
        if ((e.key === 'ArrowRight' || e.key === 'PageDown' || e.key === ' ') && n < total) n++;
        else if ((e.key === 'ArrowLeft' || e.key === 'PageUp') && n > 1) n--;
        else return;
        update();
    });
    current.addEventListener('load', update);
})();
</script>
</body>
</html>"#;

/// Render the complete deck page
pub fn render_deck(deck: &Deck) -> String {
    info!("Rendering deck page with {} slides", deck.slides.len());

    let mut html_doc = String::from("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html_doc.push_str("<meta charset=\"UTF-8\">\n");
    html_doc.push_str(&format!("<title>{}</title>\n", html_escape(&deck.title)));
    html_doc.push_str("<style>\n");
    html_doc.push_str(&layout_css(deck.view));
    html_doc.push_str(&deck.css);
    html_doc.push_str("</style>\n");
    html_doc.push_str(EXTRA_HEAD);
    html_doc.push_str("\n</head>\n<body>\n");

    for slide in &deck.slides {
        html_doc.push_str("<section>");
        html_doc.push_str(&slide.content);
        html_doc.push_str("<details>");
        html_doc.push_str(&html_escape(&slide.notes));
        html_doc.push_str("</details>");
        html_doc.push_str("</section>\n");
    }

    html_doc.push_str("<script>\n");
    html_doc.push_str(NAVIGATION_JS);
    html_doc.push_str("\n</script>\n");
    html_doc.push_str(&format!(
        "<script>\nwindow.addEventListener('load', function() {{ {} }});\n</script>\n",
        ONLOAD
    ));
    html_doc.push_str("</body>\n</html>");

    html_doc
}

/// The speaker view: current slide, next slide and notes
pub fn render_presenter() -> &'static str {
    PRESENTER_HTML
}

/// Positioning for slides, centered in the window at the deck's size
fn layout_css(view: Viewport) -> String {
    format!(
        r#"
html, body {{ margin: 0; height: 100%; background: #000; }}
body > section {{
	display: none;
	position: absolute;
	top: 50%;
	left: 50%;
	height: {height}px;
	width: {width}px;
	margin-top: -{height_half}px;
	margin-left: -{width_half}px;
	background: #fff;
	overflow: hidden;
}}
body > section[aria-selected="true"] {{ display: block; }}
section > details {{ display: none; }}
"#,
        height = view.height,
        width = view.width,
        height_half = view.height_half(),
        width_half = view.width_half()
    )
}

/// Escape text for use in HTML content or attributes
pub fn html_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Utility function to write HTML content to a file
pub fn write_html_to_file(html_content: &str, output_path: &Path) -> Result<()> {
    info!("Writing HTML to file: {:?}", output_path);

    utils::ensure_parent_directory_exists(output_path)?;
    fs::write(output_path, html_content).map_err(DeckError::FileReadError)?;

    Ok(())
}
