//! Display width helpers for breadcrumb text.
//!
//! Labels may arrive carrying terminal styling; everything here measures and
//! compares the plain text only.

/// Compute the display width of a string after stripping ANSI escapes.
pub fn display_width(text: &str) -> usize {
    unicode_width::UnicodeWidthStr::width(plain_text(text).as_str())
}

/// Strip ANSI escape sequences, leaving the visible text.
pub fn plain_text(text: &str) -> String {
    let clean = strip_ansi_escapes::strip(text);
    String::from_utf8_lossy(&clean).into_owned()
}
