use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DisplayConfig;

/// Leading access/storage modifiers and declaration keywords, possibly
/// stacked (`public static`), matched case-insensitively at the start.
static CLEAN_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^\s*(?:(?:public|private|protected|static|function|def)\s+)+")
        .expect("modifier pattern is valid")
});

/// How a raw span text should be reduced to a display name.
#[derive(Debug, Clone, Copy)]
pub struct NormalizeMode {
    /// Keep the parameter list (full signature).
    pub show_arguments: bool,
    /// The class is displayed separately, so qualified names keep their
    /// qualifier instead of being reduced to the member segment.
    pub show_class: bool,
    /// The document's syntax uses `::`-qualified declarations.
    pub namespace_qualified: bool,
}

impl NormalizeMode {
    pub fn new(config: &DisplayConfig, syntax_name: &str) -> Self {
        Self {
            show_arguments: config.display_arguments,
            show_class: config.display_class,
            namespace_qualified: syntax_name.contains("C++"),
        }
    }
}

/// Reduce the raw first line of a declaration to a display name.
///
/// Never fails on malformed input; the worst case is an empty or
/// partially-cleaned string. The result carries no surrounding
/// whitespace.
pub fn normalize(raw_first_line: &str, mode: NormalizeMode) -> String {
    let name = CLEAN_NAME.replace(raw_first_line, "");
    let name = name.as_ref();

    if mode.show_arguments {
        return name.trim().to_string();
    }

    let head = name.split('(').next().unwrap_or(name);

    if mode.namespace_qualified {
        let segments: Vec<&str> = head.split("::").collect();
        if mode.show_class || segments.len() < 2 {
            head.trim().to_string()
        } else {
            // The class is not shown separately, so drop the qualifier.
            segments[1].trim().to_string()
        }
    } else {
        // The `:` cut handles trailing type annotations and `def f(a):`.
        head.split(':').next().unwrap_or(head).trim().to_string()
    }
}
