//! Grid layout and compositing.
//!
//! Turns an ordered [`SampleSet`] into a single canvas: a fixed maximum
//! column count, rows derived from the frame count, uniform padding, white
//! background, and one source-over blit per frame. Layout is a pure
//! function of the frame count and cell size, so composition is fully
//! deterministic.

use image::{Rgba, RgbaImage, imageops};

use crate::{
    error::SheetError,
    options::{SampleOptions, SheetOptions},
    progress::{OperationType, ProgressTracker},
    sampler::SampleSet,
};

/// Opaque white, the sheet background.
const BACKGROUND: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// A derived grid geometry.
///
/// Computed from the number of frames and the per-cell dimensions; never
/// stored. `columns` is capped by the frame count so a short sample set
/// produces a single compact row instead of trailing empty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub struct GridLayout {
    /// Number of grid columns.
    pub columns: u32,
    /// Number of grid rows.
    pub rows: u32,
    /// Width of one cell (one thumbnail) in pixels.
    pub cell_width: u32,
    /// Height of one cell in pixels.
    pub cell_height: u32,
    /// Padding between cells and around the edge, in pixels.
    pub padding: u32,
}

impl GridLayout {
    /// Derive the layout for `count` cells of `cell_width` × `cell_height`
    /// with at most `max_columns` columns.
    ///
    /// `columns = min(count, max_columns)`, `rows = ceil(count / max_columns)`.
    pub fn derive(
        count: usize,
        max_columns: u32,
        cell_width: u32,
        cell_height: u32,
        padding: u32,
    ) -> Self {
        let max_columns = max_columns.max(1);
        let count = count as u32;
        let columns = count.min(max_columns).max(1);
        let rows = count.div_ceil(max_columns).max(1);
        Self {
            columns,
            rows,
            cell_width,
            cell_height,
            padding,
        }
    }

    /// Total canvas width: `columns × (cell + padding) + padding`.
    pub fn canvas_width(&self) -> u32 {
        self.columns * (self.cell_width + self.padding) + self.padding
    }

    /// Total canvas height: `rows × (cell + padding) + padding`.
    pub fn canvas_height(&self) -> u32 {
        self.rows * (self.cell_height + self.padding) + self.padding
    }

    /// Pixel offset of the cell for sequence index `index`.
    pub fn cell_origin(&self, index: usize) -> (u32, u32) {
        let index = index as u32;
        let column = index % self.columns;
        let row = index / self.columns;
        (
            column * (self.cell_width + self.padding) + self.padding,
            row * (self.cell_height + self.padding) + self.padding,
        )
    }
}

/// Composite a [`SampleSet`] into a contact-sheet canvas.
///
/// Derives the layout from the set's frame count and the first frame's
/// dimensions, allocates an RGBA canvas, fills it with opaque white, and
/// blits each frame source-over into its grid cell. Frames are placed
/// positionally: sequence index `i` lands in cell `i`.
///
/// Composition is idempotent: the same sample set always yields a
/// byte-identical canvas.
///
/// # Errors
///
/// - [`SheetError::EmptySampleSet`] if `set` holds no frames.
/// - [`SheetError::DimensionMismatch`] if any frame's dimensions differ
///   from the first frame's. Silent misrendering is deliberately not an
///   option here.
///
/// # Example
///
/// ```no_run
/// use contactsheet::{SampleOptions, SheetError, SheetOptions};
///
/// let options = SheetOptions::new();
/// let set = contactsheet::sample("input.mp4", &options, &SampleOptions::new())?;
/// let canvas = contactsheet::compose(&set, &options)?;
/// # Ok::<(), SheetError>(())
/// ```
pub fn compose(set: &SampleSet, options: &SheetOptions) -> Result<RgbaImage, SheetError> {
    compose_with_options(set, options, &SampleOptions::new())
}

/// Composite a [`SampleSet`] with progress/cancellation support.
///
/// Like [`compose`] but drives the progress callback in `sampling` once per
/// blitted frame and stops with
/// [`SheetError::Cancelled`] if the cancellation token fires between blits.
pub fn compose_with_options(
    set: &SampleSet,
    options: &SheetOptions,
    sampling: &SampleOptions,
) -> Result<RgbaImage, SheetError> {
    let (cell_width, cell_height) = set.frame_dimensions().ok_or(SheetError::EmptySampleSet)?;

    // Enforce uniformity up front; a mismatched frame would garble the grid.
    for (index, frame) in set.frames().iter().enumerate() {
        let (width, height) = (frame.image.width(), frame.image.height());
        if (width, height) != (cell_width, cell_height) {
            return Err(SheetError::DimensionMismatch {
                index,
                expected_width: cell_width,
                expected_height: cell_height,
                actual_width: width,
                actual_height: height,
            });
        }
    }

    let layout = GridLayout::derive(
        set.len(),
        options.columns,
        cell_width,
        cell_height,
        options.padding,
    );

    log::debug!(
        "Composing {} frames into a {}x{} grid ({}x{} canvas)",
        set.len(),
        layout.columns,
        layout.rows,
        layout.canvas_width(),
        layout.canvas_height(),
    );

    let mut canvas = RgbaImage::from_pixel(
        layout.canvas_width(),
        layout.canvas_height(),
        BACKGROUND,
    );

    let mut tracker = ProgressTracker::new(
        sampling.progress.clone(),
        OperationType::GridComposition,
        Some(set.len() as u64),
    );

    for (index, frame) in set.frames().iter().enumerate() {
        if sampling.is_cancelled() {
            return Err(SheetError::Cancelled);
        }
        let (x, y) = layout.cell_origin(index);
        imageops::overlay(&mut canvas, &frame.image, i64::from(x), i64::from(y));
        tracker.advance(Some(frame.source_frame));
    }
    tracker.finish();

    Ok(canvas)
}
