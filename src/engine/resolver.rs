use super::span::{ClassSpan, Span};

/// Raw resolution result: candidate texts straight from the spans, before
/// normalization. Empty text with a false flag means nothing qualified.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeResolution {
    pub class_text: String,
    pub had_class: bool,
    pub function_text: String,
    pub had_function: bool,
}

/// Find the tightest enclosing class and function spans for a target row.
///
/// "Tightest" is the declaration with the greatest start offset whose
/// start row does not exceed the target row — a textual-order proxy for
/// lexical nesting, since the classifier supplies no parent/child
/// relation. Among spans sharing a start offset, the higher-priority
/// category wins, which makes resolution independent of the order the
/// collector merged the pool in.
///
/// Known limitation: with nested functions the flat pool can pick a
/// later sibling over the true parent. The function pool is deliberately
/// not a tree.
pub fn resolve(
    target_row: usize,
    class_spans: &[ClassSpan],
    function_spans: &[Span],
) -> ScopeResolution {
    let class = class_spans
        .iter()
        .filter(|c| c.start_row <= target_row)
        .max_by_key(|c| c.start);

    let function = function_spans
        .iter()
        .filter(|s| s.start_row <= target_row)
        .max_by_key(|s| (s.start, s.category.priority()));

    ScopeResolution {
        class_text: class.map(|c| c.text.clone()).unwrap_or_default(),
        had_class: class.is_some(),
        function_text: function.map(|s| s.text.clone()).unwrap_or_default(),
        had_function: function.is_some(),
    }
}
