use std::env;

fn main() {
    println!("cargo:rerun-if-env-changed=FFMPEG_DIR");
    println!("cargo:rerun-if-env-changed=VCPKG_ROOT");

    // ffmpeg-sys-next finds FFmpeg via pkg-config everywhere except
    // Windows, where FFMPEG_DIR must point at an installed tree.
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    if target_os != "windows" || env::var_os("FFMPEG_DIR").is_some() {
        return;
    }

    println!(
        "cargo:warning=FFMPEG_DIR is not set. On Windows, install FFmpeg (e.g. via vcpkg) and set FFMPEG_DIR so ffmpeg-sys-next can locate it."
    );
}
