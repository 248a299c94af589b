//! Per-file sheet generation pipeline.
//!
//! Composes the three stages — sample, compose, encode — for one input
//! file. The stages hand off exactly once each: the sampler produces an
//! ordered [`SampleSet`](crate::SampleSet), the compositor consumes it into
//! a canvas, and the encoder persists the canvas. No stage reaches into
//! another's internals, and no state survives across input files.

use std::path::{Path, PathBuf};

use crate::{
    encoder,
    error::SheetError,
    grid,
    options::{SampleOptions, SheetOptions},
    sampler,
    source::VideoSource,
};

/// Summary of one generated contact sheet.
///
/// Returned by [`generate`] for display or machine-readable reporting.
#[derive(Debug, Clone)]
#[must_use]
pub struct SheetReport {
    /// The input video path.
    pub input: PathBuf,
    /// Where the sheet was written.
    pub output: PathBuf,
    /// Estimated total frames in the source stream.
    pub frame_count: u64,
    /// How many frames were actually sampled.
    pub sampled: usize,
    /// `true` if the stream ended before the requested sample count.
    pub truncated: bool,
    /// Final canvas width in pixels.
    pub canvas_width: u32,
    /// Final canvas height in pixels.
    pub canvas_height: u32,
}

/// Generate a contact sheet for the video at `input`.
///
/// Samples frames per `sheet`, composites them into a grid, and writes the
/// result next to the input as `<input stem>.preview.jpg`, overwriting any
/// previous sheet.
///
/// # Errors
///
/// Any error from the sampler ([`crate::sample`]), the compositor
/// ([`crate::compose`]) — including [`SheetError::EmptySampleSet`] when not
/// a single frame could be decoded — or the JPEG encoder.
///
/// # Example
///
/// ```no_run
/// use contactsheet::{SampleOptions, SheetError, SheetOptions};
///
/// let report = contactsheet::generate(
///     "holiday.mp4",
///     &SheetOptions::new(),
///     &SampleOptions::new(),
/// )?;
/// println!("wrote {}", report.output.display());
/// # Ok::<(), SheetError>(())
/// ```
pub fn generate<P: AsRef<Path>>(
    input: P,
    sheet: &SheetOptions,
    sampling: &SampleOptions,
) -> Result<SheetReport, SheetError> {
    let source = VideoSource::open(input)?;
    generate_from_source(source, sheet, sampling)
}

/// Generate a contact sheet from an already-opened [`VideoSource`].
///
/// Like [`generate`], but lets the caller inspect the source's metadata
/// (frame count, dimensions) before sampling starts — the CLI uses this to
/// print its per-file header. The source is consumed: its seek position
/// belongs to the sampling worker from here on.
///
/// # Errors
///
/// Same as [`generate`], minus the open errors.
pub fn generate_from_source(
    source: VideoSource,
    sheet: &SheetOptions,
    sampling: &SampleOptions,
) -> Result<SheetReport, SheetError> {
    let input = source.path().to_path_buf();
    let output = encoder::preview_path(&input);
    let frame_count = source.frame_count();

    let set = sampler::sample_source(source, sheet, sampling)?;
    let sampled = set.len();
    let truncated = set.truncated();

    let canvas = grid::compose_with_options(&set, sheet, sampling)?;
    encoder::encode_jpeg(&canvas, &output, sheet.jpeg_quality)?;

    log::info!(
        "Wrote {} ({} frames, {}x{})",
        output.display(),
        sampled,
        canvas.width(),
        canvas.height(),
    );

    Ok(SheetReport {
        input,
        output,
        frame_count,
        sampled,
        truncated,
        canvas_width: canvas.width(),
        canvas_height: canvas.height(),
    })
}
