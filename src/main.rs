// ── Safety policy ────────────────────────────────────────────────────────────
// Unsafe code is forbidden everywhere except `platform::win32` (Win32 FFI).
// Each unsafe block in that module MUST carry a `// SAFETY:` comment.
#![deny(unsafe_code)]
// Release builds run as a GUI application (no console window).
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
// Without a backend the shell is only exercised by its tests.
#![cfg_attr(not(windows), allow(dead_code))]

mod config;
mod error;
mod platform;
mod shell;

use config::ShellConfig;
use shell::runner::FAILURE_EXIT_CODE;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let config = ShellConfig::from_env();
    std::process::exit(run(config));
}

#[cfg(windows)]
fn run(config: ShellConfig) -> i32 {
    use platform::win32::{launch, window};

    let args = match launch::capture() {
        Ok(args) => args,
        Err(e) => {
            // Startup failed before the shell existed; same policy as the shell.
            log::error!("{e}");
            window::show_error_dialog(&e.to_string());
            return FAILURE_EXIT_CODE;
        }
    };

    let shell = shell::runner::Shell::new(window::Win32Host::new(args.instance), config);
    shell.launch(args.show)
}

#[cfg(not(windows))]
fn run(config: ShellConfig) -> i32 {
    log::error!(
        "no windowing backend for this platform; cannot open {:?}",
        config.title
    );
    FAILURE_EXIT_CODE
}
