//! Frame sampling.
//!
//! The sampler opens a [`VideoSource`], computes a sampling stride from the
//! total frame count and the requested sample count, then seeks, decodes and
//! downsizes one frame per sample position. Decoding runs on a dedicated
//! worker thread that owns the source exclusively; completed frames flow
//! through a bounded channel to the collector, which appends them to the
//! [`SampleSet`] in receipt order. Receipt order equals production order
//! because the worker is sequential and the channel is FIFO.

use std::{path::Path, sync::mpsc, thread};

use image::DynamicImage;

use crate::{
    error::SheetError,
    options::{SampleOptions, SheetOptions},
    progress::{CancellationToken, OperationType, ProgressTracker},
    source::VideoSource,
    utilities,
};

/// A decoded, downsized frame plus its position in the sample sequence.
///
/// Ephemeral: produced by the sampler, consumed once by the compositor.
#[derive(Debug, Clone)]
pub struct SampleFrame {
    /// Position in the sample sequence (grid cell `index`).
    pub index: usize,
    /// Index of the originating frame in the source stream.
    pub source_frame: u64,
    /// The decoded, downsized image.
    pub image: DynamicImage,
}

/// An ordered collection of sampled frames.
///
/// May hold fewer frames than requested when the source stream ends early
/// or individual frames fail to decode; [`truncated`](SampleSet::truncated)
/// records the early-end case. All frames in a non-empty set share
/// identical pixel dimensions.
#[derive(Debug, Clone, Default)]
#[must_use]
pub struct SampleSet {
    frames: Vec<SampleFrame>,
    truncated: bool,
}

impl SampleSet {
    /// Build a set from already-collected frames.
    ///
    /// Primarily useful for composing grids from frames obtained outside
    /// the sampling pipeline (e.g. in tests).
    pub fn from_frames(frames: Vec<SampleFrame>) -> Self {
        Self {
            frames,
            truncated: false,
        }
    }

    /// Number of frames collected.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// `true` if no frames were collected.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// `true` if sampling stopped early because the stream ended.
    pub fn truncated(&self) -> bool {
        self.truncated
    }

    /// The collected frames, in sample order.
    pub fn frames(&self) -> &[SampleFrame] {
        &self.frames
    }

    /// Pixel dimensions shared by the frames, from the first frame.
    ///
    /// Returns `None` for an empty set.
    pub fn frame_dimensions(&self) -> Option<(u32, u32)> {
        self.frames
            .first()
            .map(|frame| (frame.image.width(), frame.image.height()))
    }
}

/// Sample `sheet.sample_count` frames evenly across the video at `path`.
///
/// Convenience wrapper that opens the [`VideoSource`] and delegates to
/// [`sample_source`].
///
/// # Errors
///
/// [`SheetError::SourceOpen`] / [`SheetError::NoVideoStream`] if the file
/// cannot be opened, plus anything [`sample_source`] returns.
///
/// # Example
///
/// ```no_run
/// use contactsheet::{SampleOptions, SheetError, SheetOptions};
///
/// let set = contactsheet::sample("input.mp4", &SheetOptions::new(), &SampleOptions::new())?;
/// println!("collected {} frames", set.len());
/// # Ok::<(), SheetError>(())
/// ```
pub fn sample<P: AsRef<Path>>(
    path: P,
    sheet: &SheetOptions,
    sampling: &SampleOptions,
) -> Result<SampleSet, SheetError> {
    if sheet.sample_count == 0 {
        return Err(SheetError::InvalidSampleCount);
    }
    let source = VideoSource::open(path)?;
    sample_source(source, sheet, sampling)
}

/// Sample `sheet.sample_count` frames evenly across an opened source.
///
/// Frames are seeked at a constant stride of
/// `max(1, frame_count / sample_count)` source frames and downsized by the
/// integer divisor `max(1, width / target_width)`, preserving aspect ratio
/// exactly. Decoding happens on a dedicated worker thread that takes
/// ownership of `source`; the calling thread collects frames and drives
/// the progress callback from `sampling`.
///
/// A stream that ends before all samples are taken yields a shorter,
/// [`truncated`](SampleSet::truncated) set — a valid, non-fatal outcome. A
/// single frame that fails to decode or convert is skipped with a warning.
///
/// # Errors
///
/// - [`SheetError::InvalidFrameCount`] if the source reports zero frames.
/// - [`SheetError::InvalidSampleCount`] if `sheet.sample_count` is zero.
/// - [`SheetError::Cancelled`] if the token in `sampling` fires.
/// - [`SheetError::WorkerPanic`] if the decode worker panics.
pub fn sample_source(
    source: VideoSource,
    sheet: &SheetOptions,
    sampling: &SampleOptions,
) -> Result<SampleSet, SheetError> {
    if sheet.sample_count == 0 {
        return Err(SheetError::InvalidSampleCount);
    }

    let frame_count = source.frame_count();
    if frame_count == 0 {
        return Err(SheetError::InvalidFrameCount {
            path: source.path().to_path_buf(),
        });
    }

    let sample_count = sheet.sample_count as u64;
    let stride = utilities::sample_stride(frame_count, sample_count);
    let divisor = utilities::downscale_divisor(source.width(), sheet.target_width);
    let (target_width, target_height) =
        utilities::scaled_dimensions(source.width(), source.height(), divisor);

    log::debug!(
        "Sampling {} of {} frames (stride={}, thumbnails {}x{})",
        sample_count,
        frame_count,
        stride,
        target_width,
        target_height,
    );

    let (sender, receiver) = mpsc::sync_channel::<SampleFrame>(sampling.channel_capacity);
    let cancellation = sampling.cancellation.clone();

    // The worker owns the source exclusively; seeks are never concurrent.
    let worker = thread::Builder::new()
        .name("contactsheet-sampler".to_string())
        .spawn(move || {
            sample_worker(
                source,
                sample_count,
                stride,
                target_width,
                target_height,
                &sender,
                cancellation.as_ref(),
            )
        })?;

    // Collect in receipt order, which equals production order.
    let mut tracker = ProgressTracker::new(
        sampling.progress.clone(),
        OperationType::FrameSampling,
        Some(sample_count),
    );
    let mut frames = Vec::with_capacity(sheet.sample_count as usize);
    for frame in receiver.iter() {
        tracker.advance(Some(frame.source_frame));
        frames.push(frame);
    }
    tracker.finish();

    let truncated = worker.join().map_err(|_| SheetError::WorkerPanic)??;

    if truncated {
        log::warn!(
            "Stream ended early: collected {} of {} requested frames",
            frames.len(),
            sample_count,
        );
    }

    Ok(SampleSet { frames, truncated })
}

/// Decode loop — runs on the worker thread.
///
/// Returns `Ok(true)` when the stream ended before all samples were taken.
fn sample_worker(
    mut source: VideoSource,
    sample_count: u64,
    stride: u64,
    target_width: u32,
    target_height: u32,
    sender: &mpsc::SyncSender<SampleFrame>,
    cancellation: Option<&CancellationToken>,
) -> Result<bool, SheetError> {
    let mut position: u64 = 0;

    for index in 0..sample_count {
        if cancellation.is_some_and(|token| token.is_cancelled()) {
            return Err(SheetError::Cancelled);
        }

        match source.read_frame_at(position, target_width, target_height) {
            Ok(Some(image)) => {
                sender
                    .send(SampleFrame {
                        index: index as usize,
                        source_frame: position,
                        image,
                    })
                    .map_err(|_| SheetError::Cancelled)?;
            }
            Ok(None) => {
                // End of stream: finalize what we have.
                return Ok(true);
            }
            Err(error) => {
                // A single bad frame is skipped; index gaps are acceptable.
                log::warn!("Skipping frame {position}: {error}");
            }
        }

        position += stride;
    }

    Ok(false)
}
