// ── Launch arguments ──────────────────────────────────────────────────────────
//
// What a `WinMain` would be handed: the module instance and the initial show
// state.  The command line is not used.

#![allow(unsafe_code)]

use windows::Win32::{
    Foundation::HINSTANCE,
    System::{
        LibraryLoader::GetModuleHandleW,
        Threading::{GetStartupInfoW, STARTF_USESHOWWINDOW, STARTUPINFOW},
    },
};

use crate::{error::Result, shell::ShowCommand};

/// Process launch arguments relevant to the window shell.
pub(crate) struct LaunchArgs {
    pub(crate) instance: HINSTANCE,
    pub(crate) show: ShowCommand,
}

/// Collect the instance handle and the show state the process was started with.
pub(crate) fn capture() -> Result<LaunchArgs> {
    // SAFETY: GetModuleHandleW(None) returns the .exe's own HMODULE, which is
    // valid for the process lifetime.
    let module = unsafe { GetModuleHandleW(None) }?;

    let mut startup = STARTUPINFOW {
        // STARTUPINFOW is ~100 bytes; the cast to u32 is always lossless.
        cb: std::mem::size_of::<STARTUPINFOW>() as u32,
        ..Default::default()
    };
    // SAFETY: startup is a valid, writable STARTUPINFOW with cb set.
    unsafe { GetStartupInfoW(&mut startup) };

    let use_show_window = startup.dwFlags.0 & STARTF_USESHOWWINDOW.0 != 0;

    Ok(LaunchArgs {
        // HINSTANCE and HMODULE are the same value on Windows.
        instance: HINSTANCE(module.0),
        show: ShowCommand::from_startup(use_show_window, startup.wShowWindow),
    })
}
