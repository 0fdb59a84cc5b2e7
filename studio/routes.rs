use std::io::Cursor;
use tiny_http::{Header, Method, Request, Response, StatusCode};
use tracing::debug;

use crate::state::SharedState;
use crate::handlers;

// ---------------------------------------------------------------------------
// Response helpers
// ---------------------------------------------------------------------------

fn header(name: &[u8], value: &[u8]) -> Option<Header> {
    Header::from_bytes(name, value).ok()
}

fn response(status: u16, headers: Vec<Option<Header>>, body: Vec<u8>) -> Response<Cursor<Vec<u8>>> {
    let len = body.len();
    Response::new(
        StatusCode(status),
        headers.into_iter().flatten().collect(),
        Cursor::new(body),
        Some(len),
        None,
    )
}

pub fn html_response(body: String) -> Response<Cursor<Vec<u8>>> {
    response(200, vec![header(b"Content-Type", b"text/html; charset=utf-8")], body.into_bytes())
}

pub fn redirect(location: &str) -> Response<Cursor<Vec<u8>>> {
    response(303, vec![header(b"Location", location.as_bytes())], Vec::new())
}

pub fn json_download_response(body: String, filename: &str) -> Response<Cursor<Vec<u8>>> {
    let disposition = format!("attachment; filename=\"{}\"", filename);
    response(
        200,
        vec![
            header(b"Content-Type", b"application/json"),
            header(b"Content-Disposition", disposition.as_bytes()),
        ],
        body.into_bytes(),
    )
}

pub fn not_found() -> Response<Cursor<Vec<u8>>> {
    response(404, vec![header(b"Content-Type", b"text/plain")], b"404 Not Found".to_vec())
}

// ---------------------------------------------------------------------------
// Request dispatcher
// ---------------------------------------------------------------------------

/// Dispatches incoming requests to the appropriate handler.
///
/// Handlers receive a `&mut Request` so that the dispatcher retains ownership
/// and can call `request.respond(response)` at the end.
pub fn dispatch(mut request: Request, state: SharedState) {
    let method = request.method().clone();
    let url    = request.url().to_owned();
    let path   = url.split('?').next().unwrap_or("").to_owned();

    debug!(method = ?request.method(), path = path.as_str(), "request");

    let response = match (method, path.as_str()) {
        (Method::Get,  "/")                  => handlers::perceptron::handle_get(state),
        (Method::Post, "/run")               => handlers::perceptron::handle_run(&mut request, state),
        (Method::Post, "/weights/randomize") => handlers::perceptron::handle_randomize(&mut request, state),
        (Method::Post, "/vectors/clear")     => handlers::perceptron::handle_clear(&mut request, state),
        (Method::Post, "/vectors/upload")    => handlers::vectors::handle_upload(&mut request, state),
        (Method::Post, "/config/reload")     => handlers::config::handle_reload(state),
        (Method::Get,  "/config/export")     => handlers::config::handle_export(state),
        _ => not_found(),
    };

    let _ = request.respond(response);
}
