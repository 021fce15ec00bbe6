use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Display configuration for scope labels.
///
/// Loaded once at startup and replaced wholesale on reload; resolution
/// code only ever sees an immutable snapshot, so a reload mid-burst
/// cannot tear a label between two settings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Prefix the label with the file path.
    pub display_file: bool,
    /// Include the enclosing class name.
    pub display_class: bool,
    /// Include the enclosing function name.
    pub display_function: bool,
    /// Keep the full signature instead of the bare identifier.
    pub display_arguments: bool,
    /// Log call used by `insert_log`, e.g. `console.log`.
    pub log_function: String,
    /// Divider between the scope text and the log payload.
    pub func_data_div: String,
    /// `" # "` between class and function when true, `"#"` when false.
    pub space_around_class_and_func_divider: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            display_file: false,
            display_class: false,
            display_function: true,
            display_arguments: false,
            log_function: "console.log".to_string(),
            func_data_div: " :: ".to_string(),
            space_around_class_and_func_divider: true,
        }
    }
}

impl DisplayConfig {
    /// Load config from a JSON file.
    ///
    /// A missing file yields the defaults; a file that exists but does not
    /// parse is an error, never a silent fallback.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(ConfigError::Io {
                    path: path.display().to_string(),
                    source: e,
                })
            }
        };

        serde_json::from_str(&content).map_err(|e| ConfigError::Malformed {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Divider inserted between class and function text.
    pub fn scope_divider(&self) -> &'static str {
        if self.space_around_class_and_func_divider {
            " # "
        } else {
            "#"
        }
    }
}
