pub mod collector;
pub mod format;
pub mod normalize;
pub mod oracle;
pub mod resolver;
pub mod span;
pub mod state;

pub use oracle::SpanOracle;
pub use span::{ClassSpan, ScopeLabel, Span, SpanCategory};

use crate::config::DisplayConfig;
use normalize::NormalizeMode;

/// How many characters the host should move the caret back after
/// inserting a log statement, landing inside the backticks before `` `); ``.
pub const LOG_CURSOR_BACK: usize = 3;

/// Resolve the scope label for a target row.
///
/// The full pipeline: collect spans from the oracle, pick the tightest
/// enclosing class and function, normalize the function text, format.
/// Lookups gated off by the config are skipped entirely, as is the class
/// lookup's contribution to `resolved`.
pub fn resolve_scope(
    oracle: &dyn SpanOracle,
    target_row: usize,
    config: &DisplayConfig,
) -> ScopeLabel {
    let class_spans = if config.display_class {
        oracle.class_spans()
    } else {
        Vec::new()
    };
    let function_spans = if config.display_function {
        collector::collect_function_spans(oracle)
    } else {
        Vec::new()
    };

    let resolution = resolver::resolve(target_row, &class_spans, &function_spans);

    let function_text = if resolution.had_function {
        normalize::normalize(
            &resolution.function_text,
            NormalizeMode::new(config, oracle.syntax_name()),
        )
    } else {
        String::new()
    };

    let file_name = oracle.file_path().map(|p| p.display().to_string());
    let text = format::format_scope(
        file_name.as_deref(),
        &resolution.class_text,
        resolution.had_class,
        &function_text,
        config,
    );

    ScopeLabel {
        text,
        resolved: resolution.had_class || resolution.had_function,
    }
}

/// Build the log statement for insertion at the cursor.
///
/// `` console.log(`Klass#method :: `); `` for a resolved scope, or
/// `` console.log(``); `` when the label is empty.
pub fn build_log_statement(log_function: &str, label: &ScopeLabel, divider: &str) -> String {
    if label.text.is_empty() {
        format!("{}(``);", log_function)
    } else {
        format!("{}(`{}{}`);", log_function, label.text, divider)
    }
}
