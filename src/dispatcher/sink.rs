//! Single-slot result sink

use crate::common::truncate_text;

/// Holds the last rendered outcome; every `set` replaces it
#[derive(Debug, Clone)]
pub struct ResultSink {
    text: String,
    max_bytes: usize,
}

impl ResultSink {
    pub fn new(max_bytes: usize) -> Self {
        Self {
            text: String::new(),
            max_bytes,
        }
    }

    /// Replace the stored text, truncating it to the byte budget
    pub fn set(&mut self, text: String) {
        self.text = truncate_text(text, self.max_bytes);
    }

    pub fn get(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_overwrites() {
        let mut sink = ResultSink::new(1024);
        assert!(sink.is_empty());
        sink.set("first".to_string());
        sink.set("second".to_string());
        assert_eq!(sink.get(), "second");
    }

    #[test]
    fn test_large_result_is_truncated() {
        let mut sink = ResultSink::new(16);
        sink.set("x".repeat(10_000));
        assert!(sink.get().starts_with(&"x".repeat(16)));
        assert!(sink.get().contains("truncated 9984 bytes"));
    }
}
