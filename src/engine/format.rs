use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::DisplayConfig;

/// Trailing assignment artifact left by arrow-function bindings
/// (`handler = (e) => {` normalizes to `handler =`).
static TRAILING_ASSIGN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r" *= *$").expect("suffix pattern is valid"));

/// Compose the final scope label.
///
/// Field order is fixed: file prefix, class text, divider, function text.
/// The divider appears only when a class was actually resolved for this
/// row and both texts are non-empty — `display_class` alone is not
/// enough. An empty result is a valid label meaning "no enclosing scope".
pub fn format_scope(
    file_name: Option<&str>,
    class_text: &str,
    had_class: bool,
    function_text: &str,
    config: &DisplayConfig,
) -> String {
    let mut out = String::new();

    if config.display_file {
        if let Some(name) = file_name {
            out.push_str(name);
            out.push(' ');
        }
    }

    if config.display_class {
        out.push_str(class_text);
    }

    if config.display_function {
        if had_class && !class_text.is_empty() && !function_text.is_empty() {
            out.push_str(config.scope_divider());
        }
        out.push_str(function_text);
    }

    // Suffix cleanup only; everything else is the normalizer's job.
    TRAILING_ASSIGN.replace(&out, "").into_owned()
}
