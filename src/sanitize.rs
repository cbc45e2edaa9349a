//! Cleanup applied to URL values before they reach the index.

/// Field name whose values receive URL cleanup before submission.
pub const URL_FIELD: &str = "url";

/// Strip literal `amp;` sequences left behind by HTML entity escaping, so an
/// escaped `&amp;` collapses back to a bare `&`. Values for any field other
/// than [`URL_FIELD`] pass through untouched.
pub fn sanitize(field_name: &str, value: &str) -> String {
    if field_name == URL_FIELD {
        value.replace("amp;", "")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_escaped_ampersands_from_url_values() {
        assert_eq!(
            sanitize("url", "http://x/?a=1&amp;b=2"),
            "http://x/?a=1&b=2"
        );
    }

    #[test]
    fn strips_every_occurrence_in_order() {
        assert_eq!(
            sanitize("url", "http://x/?a=1&amp;b=2&amp;c=3"),
            "http://x/?a=1&b=2&c=3"
        );
    }

    #[test]
    fn leaves_clean_urls_alone() {
        assert_eq!(sanitize("url", "http://example.org/b"), "http://example.org/b");
    }

    #[test]
    fn ignores_non_url_fields() {
        assert_eq!(
            sanitize("id", "http://x/?a=1&amp;b=2"),
            "http://x/?a=1&amp;b=2"
        );
    }
}
