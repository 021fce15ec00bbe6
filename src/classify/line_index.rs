/// Byte-offset to line mapping for a single document.
///
/// Rows are zero-based. Offsets at a `'\n'` belong to the line the
/// newline terminates; the offset one past it starts the next line.
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
}

impl LineIndex {
    /// Single pass over the text recording every line start.
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        for (i, b) in text.bytes().enumerate() {
            if b == b'\n' {
                line_starts.push(i + 1);
            }
        }
        Self { line_starts }
    }

    /// Zero-based row containing the byte offset.
    /// Offsets past the end map to the last line.
    pub fn row_of(&self, offset: usize) -> usize {
        match self.line_starts.binary_search(&offset) {
            Ok(row) => row,
            Err(next) => next - 1,
        }
    }
}
