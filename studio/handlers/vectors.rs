use std::io::{Cursor, Read};
use tiny_http::{Request, Response};
use tracing::info;

use perceptron_studio::io::parse_vectors;

use crate::handlers::perceptron::format_row;
use crate::state::{FlashMessage, SharedState};
use crate::util::multipart::{extract_boundary, file_field};

const MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024; // 5 MB

// ---------------------------------------------------------------------------
// POST /vectors/upload
// ---------------------------------------------------------------------------

/// Replaces the vectors field with the contents of an uploaded text file.
///
/// The whole file must parse; on the first bad line nothing is replaced.
pub fn handle_upload(request: &mut Request, state: SharedState) -> Response<Cursor<Vec<u8>>> {
    let content_type = request.headers().iter()
        .find(|h| h.field.equiv("Content-Type"))
        .map(|h| h.value.as_str().to_owned())
        .unwrap_or_default();

    let boundary = match extract_boundary(&content_type) {
        Some(b) => b,
        None    => return show_error(&state, "Invalid multipart request."),
    };

    let declared = request.body_length();
    let body = match read_body_limited(request.as_reader(), declared, MAX_UPLOAD_BYTES) {
        Some(b) => b,
        None    => return show_error(&state, "File exceeds 5 MB limit."),
    };

    let text = match file_field(&body, &boundary, "vectors_file") {
        Some(bytes) if !bytes.is_empty() => match std::str::from_utf8(bytes) {
            Ok(t)  => t.to_owned(),
            Err(_) => return show_error(&state, "Uploaded file is not valid UTF-8 text."),
        },
        _ => return show_error(&state, "No vector file was uploaded."),
    };

    let vectors = match parse_vectors(&text) {
        Ok(v)  => v,
        Err(e) => return show_error(&state, &format!("Invalid format in {}", e)),
    };

    info!(count = vectors.len(), "vectors uploaded");

    let mut st = state.lock().unwrap();
    st.form.vectors = vectors.iter().map(|v| format_row(v)).collect::<Vec<_>>().join("\n");
    st.last_run     = None;
    st.flash        = Some(FlashMessage::success(format!("Loaded {} vectors.", vectors.len())));
    drop(st);

    crate::routes::redirect("/")
}

/// Reads at most `limit` bytes of a request body.
///
/// A declared length over the limit is refused before anything is read; a
/// body without a declared length (chunked) is cut off one byte past the limit.
fn read_body_limited<R: Read>(reader: R, declared: Option<usize>, limit: usize) -> Option<Vec<u8>> {
    if declared.map_or(false, |len| len > limit) {
        return None;
    }
    let mut body = Vec::new();
    let _ = reader.take(limit as u64 + 1).read_to_end(&mut body);
    if body.len() > limit {
        return None;
    }
    Some(body)
}

fn show_error(state: &SharedState, text: &str) -> Response<Cursor<Vec<u8>>> {
    let mut st = state.lock().unwrap();
    st.flash = Some(FlashMessage::error(text));
    drop(st);
    crate::routes::redirect("/")
}
