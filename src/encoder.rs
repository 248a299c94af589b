//! Sheet encoding.
//!
//! Writes a composed canvas to disk as JPEG and owns the output naming
//! convention: `clip.mp4` → `clip.preview.jpg`.

use std::{
    fs::File,
    io::BufWriter,
    path::{Path, PathBuf},
};

use image::{DynamicImage, RgbaImage, codecs::jpeg::JpegEncoder};

use crate::error::SheetError;

/// Suffix appended to the extension-stripped input path.
const PREVIEW_SUFFIX: &str = "preview.jpg";

/// Derive the preview output path for `input`.
///
/// The input's extension is replaced with `preview.jpg`; extensionless
/// inputs get the suffix appended.
///
/// # Example
///
/// ```
/// use std::path::Path;
///
/// let out = contactsheet::preview_path(Path::new("videos/clip.mp4"));
/// assert_eq!(out, Path::new("videos/clip.preview.jpg"));
/// ```
pub fn preview_path(input: &Path) -> PathBuf {
    input.with_extension(PREVIEW_SUFFIX)
}

/// Encode `canvas` as JPEG at `path` with the given quality (1 – 100).
///
/// The RGBA canvas is flattened to RGB first; composed canvases are fully
/// opaque.
///
/// # Errors
///
/// Returns [`SheetError::IoError`] if the file cannot be created and
/// [`SheetError::ImageError`] if encoding fails.
pub fn encode_jpeg(canvas: &RgbaImage, path: &Path, quality: u8) -> Result<(), SheetError> {
    log::debug!(
        "Encoding {}x{} sheet to {} (quality={})",
        canvas.width(),
        canvas.height(),
        path.display(),
        quality,
    );

    let rgb = DynamicImage::ImageRgba8(canvas.clone()).to_rgb8();

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    let encoder = JpegEncoder::new_with_quality(&mut writer, quality.clamp(1, 100));
    rgb.write_with_encoder(encoder)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::preview_path;

    #[test]
    fn preview_path_replaces_extension() {
        assert_eq!(
            preview_path(Path::new("clip.mp4")),
            Path::new("clip.preview.jpg"),
        );
        assert_eq!(
            preview_path(Path::new("/videos/holiday.mkv")),
            Path::new("/videos/holiday.preview.jpg"),
        );
    }

    #[test]
    fn preview_path_handles_extensionless_input() {
        assert_eq!(
            preview_path(Path::new("raw_capture")),
            Path::new("raw_capture.preview.jpg"),
        );
    }

    #[test]
    fn preview_path_keeps_only_final_extension() {
        assert_eq!(
            preview_path(Path::new("archive.tar.mp4")),
            Path::new("archive.tar.preview.jpg"),
        );
    }
}
