// ── Win32 platform implementation ─────────────────────────────────────────────
//
// The only module in the codebase where `unsafe` code is permitted.  Every
// `unsafe` block MUST carry a `// SAFETY:` comment that states which invariant
// makes the operation sound.

#![allow(unsafe_code)]

pub(crate) mod launch; // instance handle + initial show state
pub(crate) mod window; // Win32Host, WndProc trampoline, error dialog
