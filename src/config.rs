// ── Shell configuration ───────────────────────────────────────────────────────
//
// Defaults reproduce the tutorial window exactly.  An optional override can be
// supplied as an inline JSON object in `HELLO_WINDOW_CONFIG`; nothing is read
// from disk.  No `unsafe` here.

use serde::{Deserialize, Serialize};

use crate::shell::Point;

/// Environment variable holding an optional JSON override.
pub(crate) const CONFIG_ENV_VAR: &str = "HELLO_WINDOW_CONFIG";

/// Everything about the window that is a constant of the program rather than
/// of the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct ShellConfig {
    /// Name the window class is registered under.
    pub(crate) class_name: String,
    /// Title bar text.
    pub(crate) title: String,
    /// Initial outer width in device pixels.
    pub(crate) width: i32,
    /// Initial outer height in device pixels.
    pub(crate) height: i32,
    /// Text painted into the client area.
    pub(crate) greeting: String,
    /// Offset of the greeting from the client-area origin.
    pub(crate) text_origin: Point,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            class_name: "DesktopApp".to_owned(),
            title: "Windows Tutorial".to_owned(),
            width: 500,
            height: 100,
            greeting: "Hello World!".to_owned(),
            text_origin: Point { x: 5, y: 5 },
        }
    }
}

impl ShellConfig {
    /// Load the configuration from the environment, falling back to defaults.
    pub(crate) fn from_env() -> Self {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(json) => Self::from_json_or_default(&json),
            Err(_) => Self::default(),
        }
    }

    /// Parse `json`; a malformed override is logged and ignored.
    pub(crate) fn from_json_or_default(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring malformed {CONFIG_ENV_VAR}: {e}");
                Self::default()
            }
        }
    }
}
