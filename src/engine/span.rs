/// Syntax category of a function-like span, as reported by the classifier.
///
/// Variants are listed in tie-break priority order: when two spans share
/// the same start offset, the earlier variant wins resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpanCategory {
    /// `class Klass { doWork() { .. } }`
    DeclaredMethod,
    /// `class Klass { doWork = () => { .. } }`
    BoundMethod,
    /// `function doWork() { .. }` or a named arrow binding at file level.
    StandaloneFunction,
    /// `class Klass { events: { onClick: () => { .. } } }`
    ObjectLiteralMethod,
    /// `class Klass { doWork = debounce(() => { .. }) }`
    WrappedBoundMethod,
}

impl SpanCategory {
    /// All categories, in collection (and priority) order.
    pub const ALL: [SpanCategory; 5] = [
        SpanCategory::DeclaredMethod,
        SpanCategory::BoundMethod,
        SpanCategory::StandaloneFunction,
        SpanCategory::ObjectLiteralMethod,
        SpanCategory::WrappedBoundMethod,
    ];

    /// Tie-break weight for spans sharing a start offset; higher wins.
    pub fn priority(&self) -> u8 {
        match self {
            SpanCategory::DeclaredMethod => 4,
            SpanCategory::BoundMethod => 3,
            SpanCategory::StandaloneFunction => 2,
            SpanCategory::ObjectLiteralMethod => 1,
            SpanCategory::WrappedBoundMethod => 0,
        }
    }
}

/// A function-like region of the document, tagged with its category.
///
/// `start`/`end` are byte offsets (half-open); `start_row` is the
/// zero-based line of `start`, precomputed by the classifier so the
/// resolver is a pure function of the span pool. `text` is the raw first
/// line of the declaration, still carrying modifiers and parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub start_row: usize,
    pub category: SpanCategory,
    pub text: String,
}

/// A class-name region. Only the identifier text and position matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSpan {
    pub start: usize,
    pub start_row: usize,
    pub text: String,
}

/// The composed scope text for a cursor position.
///
/// An empty `text` with `resolved == false` is a valid output meaning
/// "no enclosing scope found", not a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeLabel {
    pub text: String,
    pub resolved: bool,
}
