//! Input sanitization and attack-pattern detection.

use std::sync::LazyLock;

use regex::Regex;

/// SQL keywords stripped from search queries, word-boundary matched.
static SQL_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(SELECT|INSERT|UPDATE|DELETE|DROP|CREATE|ALTER|EXEC|EXECUTE)\b")
        .expect("Invalid regex")
});

/// Patterns that indicate an XSS attempt.
static XSS_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?is)<script\b[^>]*>.*?</script>",
        r"(?i)javascript:",
        r"(?i)\bon\w+\s*=",
        r"(?i)<iframe",
        r"(?i)<object",
        r"(?i)<embed",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("Invalid regex"))
    .collect()
});

/// HTML-escape free-text input before it reaches the page.
///
/// Replaces `& < > " ' /` with entity forms. Ampersand goes first so
/// the other replacements are not double-escaped.
#[must_use]
pub fn sanitize_input(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
        .replace('/', "&#x2F;")
}

/// Strip quote/semicolon characters and SQL keywords from a search query.
///
/// Advisory hygiene only; queries sent to any real database must still
/// be parameterized.
#[must_use]
pub fn sanitize_search_query(query: &str) -> String {
    let without_quotes: String = query
        .chars()
        .filter(|c| !matches!(c, '\'' | '"' | ';'))
        .collect();
    SQL_KEYWORDS
        .replace_all(&without_quotes, "")
        .trim()
        .to_owned()
}

/// Returns true if `input` matches any known dangerous pattern:
/// script tags, the `javascript:` scheme, inline event-handler
/// attributes, or iframe/object/embed tags.
#[must_use]
pub fn detect_xss_attempt(input: &str) -> bool {
    XSS_PATTERNS.iter().any(|pattern| pattern.is_match(input))
}
