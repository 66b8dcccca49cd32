//! Edited document backed by ropey (rope data structure)
//! Appends and deletes at the end are O(log n).

use ropey::Rope;

#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    pub fn new() -> Self {
        Self { rope: Rope::new() }
    }

    pub fn from_str(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    pub fn content(&self) -> String {
        self.rope.to_string()
    }

    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    /// Line `index` without its trailing line break
    pub fn line(&self, index: usize) -> String {
        if index >= self.rope.len_lines() {
            return String::new();
        }
        let line = self.rope.line(index).to_string();
        line.trim_end_matches(['\n', '\r']).to_string()
    }

    pub fn last_char(&self) -> Option<char> {
        let len = self.rope.len_chars();
        (len > 0).then(|| self.rope.char(len - 1))
    }

    pub fn push(&mut self, ch: char) {
        self.rope.insert_char(self.rope.len_chars(), ch);
    }

    pub fn push_str(&mut self, text: &str) {
        self.rope.insert(self.rope.len_chars(), text);
    }

    /// Remove the last character; empty buffers stay empty
    pub fn backspace(&mut self) -> Option<char> {
        let removed = self.last_char()?;
        let len = self.rope.len_chars();
        self.rope.remove(len - 1..len);
        Some(removed)
    }

    pub fn replace_last(&mut self, ch: char) -> bool {
        if self.backspace().is_none() {
            return false;
        }
        self.push(ch);
        true
    }

    pub fn clear(&mut self) {
        self.rope = Rope::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer() {
        let buf = TextBuffer::new();
        assert!(buf.is_empty());
        assert_eq!(buf.content(), "");
        assert_eq!(buf.last_char(), None);
    }

    #[test]
    fn test_push_multiple() {
        let mut buf = TextBuffer::new();
        buf.push('こ');
        buf.push('ん');
        buf.push_str("にちは");
        assert_eq!(buf.content(), "こんにちは");
        assert_eq!(buf.len(), 5);
    }

    #[test]
    fn test_backspace() {
        let mut buf = TextBuffer::from_str("Hello");
        assert_eq!(buf.backspace(), Some('o'));
        assert_eq!(buf.content(), "Hell");
    }

    #[test]
    fn test_backspace_on_empty() {
        let mut buf = TextBuffer::new();
        assert_eq!(buf.backspace(), None);
        assert_eq!(buf.backspace(), None);
        assert!(buf.is_empty());
    }

    #[test]
    fn test_push_then_backspace_restores() {
        let mut buf = TextBuffer::from_str("かな");
        let before = buf.content();
        buf.push('あ');
        buf.backspace();
        assert_eq!(buf.content(), before);
    }

    #[test]
    fn test_replace_last() {
        let mut buf = TextBuffer::from_str("はな");
        assert!(buf.replace_last('に'));
        assert_eq!(buf.content(), "はに");
        let mut empty = TextBuffer::new();
        assert!(!empty.replace_last('が'));
        assert!(empty.is_empty());
    }

    #[test]
    fn test_lines() {
        let mut buf = TextBuffer::from_str("あい\nう");
        assert_eq!(buf.len_lines(), 2);
        assert_eq!(buf.line(0), "あい");
        assert_eq!(buf.line(1), "う");
        buf.push('\n');
        assert_eq!(buf.len_lines(), 3);
        assert_eq!(buf.line(2), "");
        assert_eq!(buf.line(9), "");
    }

    #[test]
    fn test_clear() {
        let mut buf = TextBuffer::from_str("line one\nline two");
        buf.clear();
        assert!(buf.is_empty());
        assert_eq!(buf.len_lines(), 1);
    }

    #[test]
    fn test_large_content_round_trip() {
        let text = "あいうえお\n".repeat(5_000);
        let buf = TextBuffer::from_str(&text);
        assert_eq!(buf.content(), text);
    }
}
