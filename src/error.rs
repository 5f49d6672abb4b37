// ── Central error type ────────────────────────────────────────────────────────
//
// All fallible shell operations return `error::Result<T>`.  Every variant is
// fatal: `Shell::launch` reports it through the host's modal notification and
// the process exits with status 1.

use thiserror::Error;

/// Every error the window shell can produce.
#[derive(Debug, Error)]
pub(crate) enum ShellError {
    /// The host rejected the window class (e.g. the name is already taken).
    #[error("RegisterClassEx failed! (class {class:?}, error {code:#010x})")]
    Registration {
        /// Name of the class that could not be registered.
        class: String,
        /// Raw host error code (`GetLastError()` value).
        code: u32,
    },

    /// The host could not create the main window.
    #[error("call to CreateWindowEx failed (class {class:?}, error {code:#010x})")]
    WindowCreation {
        /// Class the window was to be an instance of.
        class: String,
        /// Raw host error code or HRESULT bits.
        code: u32,
    },

    /// Any other host call that returned a failure code.
    #[error("{function} failed (error {code:#010x})")]
    Win32 {
        /// The name of the failing function, for display purposes.
        function: &'static str,
        /// The raw error code (`GetLastError()` value) or HRESULT.
        code: u32,
    },
}

// Lets `?` work on `windows::core::Result<T>` inside the Win32 backend.
#[cfg(windows)]
impl From<windows::core::Error> for ShellError {
    fn from(e: windows::core::Error) -> Self {
        // HRESULT.0 is i32; reinterpret bits as u32 for display purposes.
        Self::Win32 {
            function: "windows",
            code: e.code().0 as u32,
        }
    }
}

/// Convenience alias used throughout the crate.
pub(crate) type Result<T> = std::result::Result<T, ShellError>;
