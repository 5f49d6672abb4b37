/// hello-window build script.
///
/// The window itself only exists on Windows. Other targets still build so the
/// platform-neutral shell and its tests can run, but the resulting binary has
/// no windowing backend; say so at build time instead of at first launch.
fn main() {
    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" {
        println!(
            "cargo:warning=hello-window has no windowing backend for \
             {target_os:?}; the binary will exit with status 1"
        );
    }

    println!("cargo:rerun-if-changed=build.rs");
}
