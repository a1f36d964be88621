use convo_types::ErrorDetail;

/// Escape HTML to prevent XSS
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// The server's `detail` from an error body, or `fallback`
pub fn error_message(body: &str, fallback: &str) -> String {
    ErrorDetail::from_body(body).unwrap_or_else(|| fallback.to_string())
}

/// Percent-encode a conversation id for use as one path segment
pub fn encode_segment(segment: &str) -> String {
    String::from(js_sys::encode_uri_component(segment))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b onclick="x">Tom & 'Jerry'</b>"#),
            "&lt;b onclick=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_error_message_prefers_detail() {
        assert_eq!(
            error_message(r#"{"detail":"Tipo de modelo no válido"}"#, "Failed to upload the model"),
            "Tipo de modelo no válido"
        );
        assert_eq!(
            error_message("Internal Server Error", "Failed to upload the model"),
            "Failed to upload the model"
        );
    }
}
