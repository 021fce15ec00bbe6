use std::path::Path;

use super::span::{ClassSpan, Span, SpanCategory};

/// The classifier seam the engine resolves against.
///
/// Production documents implement this over tree-sitter; tests implement
/// it with fixed span lists. Queries are read-only and a category with no
/// matches returns an empty vec, which is normal rather than an error.
pub trait SpanOracle {
    /// Spans matching one category, in document order.
    fn find_spans(&self, category: SpanCategory) -> Vec<Span>;

    /// Class-name spans, in document order.
    fn class_spans(&self) -> Vec<ClassSpan>;

    /// Zero-based line of a byte offset.
    fn row_of(&self, offset: usize) -> usize;

    /// Human-readable syntax name, e.g. "TypeScript" or "C++".
    fn syntax_name(&self) -> &str;

    /// Path of the underlying file, if the view has one.
    fn file_path(&self) -> Option<&Path>;
}
