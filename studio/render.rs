//! Central template renderer for the perceptron studio.
//!
//! The studio is a single page (`studio/assets/studio.html`) with placeholder
//! tokens like `{{TOKEN}}`.  The template is embedded at compile time;
//! `render_page` resolves the flash banner and hands the rest to a closure.
//! Tokens the closure did not replace are blanked so raw `{{TOKEN}}` strings
//! never reach the browser.

use crate::state::{FlashKind, FlashMessage};

const TEMPLATE: &str = include_str!("assets/studio.html");

pub fn render_page<F>(flash: Option<FlashMessage>, fill: F) -> String
where
    F: FnOnce(String) -> String,
{
    let mut html = TEMPLATE.to_owned();
    html = html.replace("{{FLASH}}", &render_flash_html(flash));
    html = fill(html);
    blank_remaining(html)
}

pub fn render_flash_html(flash: Option<FlashMessage>) -> String {
    match flash {
        Some(FlashMessage { kind: FlashKind::Success, text }) =>
            format!("<div class=\"flash flash-success\">{}</div>", html_escape(&text)),
        Some(FlashMessage { kind: FlashKind::Error, text }) =>
            format!("<div class=\"flash flash-error\">{}</div>", html_escape(&text)),
        None => String::new(),
    }
}

/// Escapes text for HTML.  Braces are escaped too so user text can never
/// form a `{{TOKEN}}` that a later substitution would expand or blank.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
     .replace('<', "&lt;")
     .replace('>', "&gt;")
     .replace('"', "&quot;")
     .replace('{', "&#123;")
     .replace('}', "&#125;")
}

/// Replaces any `{{TOKEN}}` left in the page with an empty string.
fn blank_remaining(mut html: String) -> String {
    while let Some(start) = html.find("{{") {
        if let Some(end) = html[start..].find("}}") {
            let abs_end = start + end + 2;
            html.replace_range(start..abs_end, "");
        } else {
            break;
        }
    }
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unfilled_tokens_are_blanked() {
        assert_eq!(blank_remaining("a{{X}}b{{Y_Z}}c".into()), "abc");
        assert_eq!(blank_remaining("open {{ only".into()), "open {{ only");
    }

    #[test]
    fn flash_text_is_escaped() {
        let html = render_flash_html(Some(FlashMessage::error("line 1: <bad>")));
        assert!(html.contains("flash-error"));
        assert!(html.contains("&lt;bad&gt;"));
    }

    #[test]
    fn braces_in_user_text_survive_rendering() {
        let bias = html_escape("{{WEIGHTS}}");
        assert!(!bias.contains('{'));

        let page = render_page(
            Some(FlashMessage::error("line 1: '{{x}}' is not a valid number")),
            |t| t.replace("{{BIAS}}", &bias).replace("{{WEIGHTS}}", "1, 2"),
        );
        assert!(page.contains("value=\"&#123;&#123;WEIGHTS&#125;&#125;\""));
        assert!(page.contains("'&#123;&#123;x&#125;&#125;'"));
    }

    #[test]
    fn page_has_no_leftover_tokens() {
        let page = render_page(None, |t| t.replace("{{BIAS}}", "0.5"));
        assert!(!page.contains("{{"));
        assert!(page.contains("value=\"0.5\""));
    }
}
