use serde::{Deserialize, Serialize};

/// Persisted shell settings. Missing keys (or a missing file) fall back
/// field by field to the defaults.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShellSettings {
    #[serde(default = "default_theme")]
    pub theme: String,
    #[serde(default, rename = "webDarkMode")]
    pub web_dark_mode: bool,
}

impl Default for ShellSettings {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            web_dark_mode: false,
        }
    }
}

fn default_theme() -> String {
    "light".to_string()
}
