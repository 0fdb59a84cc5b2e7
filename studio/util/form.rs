/// Decodes an `application/x-www-form-urlencoded` component.
///
/// Bytes are collected first and decoded as UTF-8 at the end so multi-byte
/// characters survive; a malformed escape is kept literally.
pub fn url_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out: Vec<u8> = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len() => {
                let hex = std::str::from_utf8(&bytes[i + 1..i + 3]).ok()
                    .and_then(|h| u8::from_str_radix(h, 16).ok());
                match hex {
                    Some(b) => {
                        out.push(b);
                        i += 3;
                        continue;
                    }
                    None => out.push(b'%'),
                }
            }
            b => out.push(b),
        }
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

/// Parses `key=value&key2=value2` into a `Vec` of `(key, value)` pairs.
pub fn parse_form(body: &str) -> Vec<(String, String)> {
    body.split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (url_decode(k), url_decode(v))
        })
        .collect()
}

/// Looks up a key in parsed form pairs, returning the value if found.
pub fn form_get<'a>(pairs: &'a [(String, String)], key: &str) -> Option<&'a str> {
    pairs.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_escapes_and_plus() {
        assert_eq!(url_decode("1.0%2C+2.0%0D%0A3"), "1.0, 2.0\r\n3");
        assert_eq!(url_decode("caf%C3%A9"), "café");
        assert_eq!(url_decode("100%"), "100%");
        assert_eq!(url_decode("%zz"), "%zz");
    }

    #[test]
    fn parses_pairs() {
        let pairs = parse_form("activation=heaviside&bias=-0.5&weights=1%2C1&empty=");
        assert_eq!(form_get(&pairs, "activation"), Some("heaviside"));
        assert_eq!(form_get(&pairs, "bias"), Some("-0.5"));
        assert_eq!(form_get(&pairs, "weights"), Some("1,1"));
        assert_eq!(form_get(&pairs, "empty"), Some(""));
        assert_eq!(form_get(&pairs, "missing"), None);
    }
}
