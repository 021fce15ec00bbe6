use std::collections::HashSet;

use super::oracle::SpanOracle;
use super::span::{Span, SpanCategory};

/// Gather candidate function spans across every category.
///
/// The same physical declaration can match more than one category (a
/// property-style method also matches the generic bound-property shape),
/// so exact `(start, end)` duplicates are dropped. Categories are queried
/// in priority order, so the surviving copy of a duplicate carries the
/// higher-priority category. No ordering guarantee on the output; the
/// resolver imposes its own.
pub fn collect_function_spans(oracle: &dyn SpanOracle) -> Vec<Span> {
    let mut seen: HashSet<(usize, usize)> = HashSet::new();
    let mut spans = Vec::new();

    for category in SpanCategory::ALL {
        for span in oracle.find_spans(category) {
            if seen.insert((span.start, span.end)) {
                spans.push(span);
            }
        }
    }

    spans
}
