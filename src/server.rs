// ABOUTME: HTTP server for the showoff slide server
// ABOUTME: Serves the deck, presenter view, images, highlighter assets and archive downloads

use log::{debug, error, info, warn};
use percent_encoding::percent_decode_str;
use std::fs;
use tiny_http::{Header, Request, Response, Server, StatusCode};
use url::Url;

use crate::archive;
use crate::config::Config;
use crate::deck;
use crate::errors::{DeckError, Result};
use crate::html;
use crate::resources;

/// A response before it is handed to tiny_http
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl Reply {
    fn ok(content_type: Option<&str>, body: impl Into<Vec<u8>>) -> Self {
        let headers = content_type
            .map(|ct| vec![("Content-Type".to_string(), ct.to_string())])
            .unwrap_or_default();
        Self {
            status: 200,
            headers,
            body: body.into(),
        }
    }

    fn status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    /// Value of the first header called `name`
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Serve the deck until the process is stopped
pub fn serve(config: &Config) -> Result<()> {
    let server = Server::http(format!("0.0.0.0:{}", config.port))
        .map_err(|e| DeckError::ServerError(format!("Failed to start HTTP server: {}", e)))?;

    info!("Starting webserver on http://localhost:{}", config.port);
    info!("Presenter display on http://localhost:{}/p", config.port);
    info!("Archive available from http://localhost:{}/archive", config.port);

    for request in server.incoming_requests() {
        let reply = handle(config, request.url());
        debug!("{} {} -> {}", request.method(), request.url(), reply.status);
        respond(request, reply);
    }

    Ok(())
}

/// Route one request path. The deck is reloaded from disk on every request.
pub fn handle(config: &Config, raw_url: &str) -> Reply {
    let path = match request_path(raw_url) {
        Some(path) => path,
        None => return Reply::status(400, "Bad request"),
    };

    match path.as_str() {
        "/p" => Reply::status(302, "").with_header("Location", "/presenter/#/"),
        "/presenter" | "/presenter/" => {
            Reply::ok(Some("text/html; charset=utf-8"), html::render_presenter())
        }
        "/archive" | "/archive/" => serve_archive(config),
        p if p.starts_with("/images/") => serve_image(config, p),
        p if p.starts_with("/shjs/") => serve_asset(config, &p["/shjs/".len()..]),
        _ => serve_deck(config),
    }
}

/// Decoded path of a request URL, query and fragment dropped
fn request_path(raw_url: &str) -> Option<String> {
    let base = Url::parse("http://localhost/").ok()?;
    let url = base.join(raw_url).ok()?;
    Some(percent_decode_str(url.path()).decode_utf8_lossy().into_owned())
}

fn serve_deck(config: &Config) -> Reply {
    match deck::load_deck(config) {
        Ok(deck) => Reply::ok(Some("text/html; charset=utf-8"), html::render_deck(&deck)),
        Err(e) => {
            error!("Error rendering slides: {}", e);
            Reply::status(500, format!("Error rendering slides: {}", e))
        }
    }
}

fn serve_image(config: &Config, path: &str) -> Reply {
    let deck = match deck::load_deck(config) {
        Ok(deck) => deck,
        Err(e) => {
            error!("Error loading slides: {}", e);
            return Reply::status(500, format!("Error loading slides: {}", e));
        }
    };

    let basename = path.trim_end_matches('/').rsplit('/').next().unwrap_or("");
    let Some(image_path) = deck.image_path(basename) else {
        return Reply::status(404, "404 Not Found");
    };

    match fs::read(image_path) {
        Ok(data) => {
            let content_type = basename.ends_with(".svg").then_some("image/svg+xml");
            Reply::ok(content_type, data)
        }
        Err(e) => {
            error!("Failed to read image {:?}: {}", image_path, e);
            Reply::status(500, format!("Failed to read image: {}", e))
        }
    }
}

fn serve_asset(config: &Config, relative: &str) -> Reply {
    match config.assets.fetch(relative) {
        Ok(data) => Reply::ok(resources::content_type(relative), data),
        Err(DeckError::AssetNotFound(_)) | Err(DeckError::ValidationError(_)) => {
            Reply::status(404, "404 Not Found")
        }
        Err(e) => {
            warn!("Failed to load highlighter asset {}: {}", relative, e);
            Reply::status(502, format!("Failed to load asset: {}", e))
        }
    }
}

fn serve_archive(config: &Config) -> Reply {
    let result = deck::load_deck(config).and_then(|deck| {
        let bytes = archive::archive_bytes(&deck)?;
        Ok((archive::archive_file_name(&deck.title), bytes))
    });

    match result {
        Ok((file_name, bytes)) => Reply::ok(Some("application/zip"), bytes).with_header(
            "Content-Disposition",
            &format!("attachment; filename=\"{}\"", file_name),
        ),
        Err(e) => {
            error!("Error building archive: {}", e);
            Reply::status(500, format!("Error building archive: {}", e))
        }
    }
}

fn respond(request: Request, reply: Reply) {
    let mut response = Response::from_data(reply.body).with_status_code(StatusCode(reply.status));
    for (name, value) in &reply.headers {
        match Header::from_bytes(name.as_bytes(), value.as_bytes()) {
            Ok(header) => response.add_header(header),
            Err(()) => warn!("Dropping invalid header {}: {}", name, value),
        }
    }
    if let Err(e) = request.respond(response) {
        error!("Failed to send response: {}", e);
    }
}
