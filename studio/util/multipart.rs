//! Minimal `multipart/form-data` reader, enough for a single text-file upload.

/// One part of a multipart body.
#[derive(Debug)]
pub struct Part<'a> {
    pub name:     Option<String>,
    pub filename: Option<String>,
    pub data:     &'a [u8],
}

/// Returns the index of the first occurrence of `needle` in `haystack`.
pub fn find_subsequence(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Extracts the boundary token from a Content-Type header value like
/// `multipart/form-data; boundary=----WebKitFormBoundaryXXX`.
pub fn extract_boundary(content_type: &str) -> Option<String> {
    content_type
        .split(';')
        .map(|s| s.trim())
        .find_map(|s| s.strip_prefix("boundary="))
        .map(|b| b.trim_matches('"').to_owned())
        .filter(|b| !b.is_empty())
}

/// Splits a body into its parts.  The preamble and the closing `--` marker
/// are dropped, as is any part without a header block.
pub fn parse_parts<'a>(body: &'a [u8], boundary: &str) -> Vec<Part<'a>> {
    let delimiter = format!("--{}", boundary);
    let delim = delimiter.as_bytes();
    let sep: &[u8] = b"\r\n\r\n";

    let mut parts = Vec::new();
    let mut rest = match find_subsequence(body, delim) {
        Some(pos) => &body[pos + delim.len()..],
        None => return parts,
    };

    while let Some(end) = find_subsequence(rest, delim) {
        let chunk = &rest[..end];
        rest = &rest[end + delim.len()..];

        if let Some(sep_pos) = find_subsequence(chunk, sep) {
            let headers = String::from_utf8_lossy(&chunk[..sep_pos]);
            let raw = &chunk[sep_pos + sep.len()..];
            parts.push(Part {
                name:     header_param(&headers, "name"),
                filename: header_param(&headers, "filename"),
                data:     raw.strip_suffix(b"\r\n").unwrap_or(raw),
            });
        }
    }
    parts
}

/// Raw bytes of the file uploaded under `field_name`.
pub fn file_field<'a>(body: &'a [u8], boundary: &str, field_name: &str) -> Option<&'a [u8]> {
    parse_parts(body, boundary)
        .into_iter()
        .find(|p| p.filename.is_some() && p.name.as_deref() == Some(field_name))
        .map(|p| p.data)
}

/// Reads `key="value"` from a Content-Disposition header, matching the key
/// as a whole word so `name` does not match inside `filename`.
fn header_param(headers: &str, key: &str) -> Option<String> {
    headers
        .split(';')
        .map(|s| s.trim())
        .find_map(|s| s.strip_prefix(key).and_then(|r| r.strip_prefix("=\"")))
        .and_then(|r| r.find('"').map(|end| r[..end].to_owned()))
}
