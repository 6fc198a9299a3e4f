//! Common utilities shared across the harness

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

/// Truncate `text` to at most `max_bytes`, cutting on a char boundary and
/// noting how much was dropped.
pub fn truncate_text(text: String, max_bytes: usize) -> String {
    if text.len() <= max_bytes {
        return text;
    }
    let mut cut = max_bytes;
    while !text.is_char_boundary(cut) {
        cut -= 1;
    }
    let dropped = text.len() - cut;
    let mut out = text;
    out.truncate(cut);
    out.push_str(&format!("\n... (truncated {} bytes)", dropped));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text_untouched() {
        assert_eq!(truncate_text("hello".to_string(), 10), "hello");
    }

    #[test]
    fn test_truncate_on_char_boundary() {
        // "é" is two bytes; cutting at 2 would split it
        let out = truncate_text("aéb".to_string(), 2);
        assert!(out.starts_with("a\n"));
        assert!(out.ends_with("(truncated 3 bytes)"));
    }
}
