// ── Platform backends ─────────────────────────────────────────────────────────
//
// Each backend implements `shell::Host`.  Only Win32 exists; other targets
// build the shell without a backend.

#[cfg(windows)]
pub(crate) mod win32;
