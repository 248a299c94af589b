//! Sheet and sampling configuration.
//!
//! [`SheetOptions`] exposes the layout policy knobs (sample count, column
//! count, padding, thumbnail width, JPEG quality) with the classic
//! contact-sheet defaults. [`SampleOptions`] threads progress callbacks,
//! cancellation tokens, and pipeline tuning through the sampler without
//! polluting every function signature.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use contactsheet::{CancellationToken, ProgressCallback, ProgressInfo, SampleOptions, SheetOptions};
//!
//! struct LogProgress;
//! impl ProgressCallback for LogProgress {
//!     fn on_progress(&self, info: &ProgressInfo) {
//!         println!("{:?}: {} done", info.operation, info.current);
//!     }
//! }
//!
//! let sheet = SheetOptions::new().with_sample_count(16).with_columns(4);
//! let token = CancellationToken::new();
//! let sampling = SampleOptions::new()
//!     .with_progress(Arc::new(LogProgress))
//!     .with_cancellation(token.clone());
//! ```

use std::fmt::{Debug, Formatter, Result as FmtResult};
use std::sync::Arc;

use crate::progress::{CancellationToken, NoOpProgress, ProgressCallback};

/// Layout and encoding policy for a contact sheet.
///
/// The defaults reproduce the classic 25-frame, 5-column sheet with 5 px of
/// white padding, thumbnails downscaled towards 320 px wide, written as
/// JPEG at quality 90. All of these are policy knobs, not protocol
/// requirements.
#[derive(Debug, Clone)]
#[must_use]
pub struct SheetOptions {
    /// How many frames to sample across the video's duration.
    pub sample_count: u32,
    /// Maximum number of grid columns. The actual column count is
    /// `min(sampled frames, columns)`.
    pub columns: u32,
    /// Padding between cells and around the grid edge, in pixels.
    pub padding: u32,
    /// Width the downscale divisor aims for. The divisor is
    /// `max(1, source_width / target_width)`, so thumbnails land at or just
    /// above this width while preserving aspect ratio exactly.
    pub target_width: u32,
    /// JPEG quality (1 – 100) for the encoded sheet.
    pub jpeg_quality: u8,
}

impl SheetOptions {
    /// Create options with the default policy (25 samples, 5 columns,
    /// 5 px padding, 320 px target width, quality 90).
    pub fn new() -> Self {
        Self {
            sample_count: 25,
            columns: 5,
            padding: 5,
            target_width: 320,
            jpeg_quality: 90,
        }
    }

    /// Set how many frames to sample. Clamped to a minimum of 1.
    pub fn with_sample_count(mut self, count: u32) -> Self {
        self.sample_count = count.max(1);
        self
    }

    /// Set the maximum column count. Clamped to a minimum of 1.
    pub fn with_columns(mut self, columns: u32) -> Self {
        self.columns = columns.max(1);
        self
    }

    /// Set the cell padding in pixels.
    pub fn with_padding(mut self, padding: u32) -> Self {
        self.padding = padding;
        self
    }

    /// Set the thumbnail target width. Clamped to a minimum of 1.
    pub fn with_target_width(mut self, width: u32) -> Self {
        self.target_width = width.max(1);
        self
    }

    /// Set the JPEG quality. Clamped to 1 – 100.
    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality.clamp(1, 100);
        self
    }
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self::new()
    }
}

/// Configuration for the sampling pipeline.
///
/// Carries optional progress-, cancellation-, and tuning-related settings.
/// A default-constructed value behaves identically to passing no options.
#[derive(Clone)]
pub struct SampleOptions {
    /// Progress callback. Defaults to a no-op.
    pub(crate) progress: Arc<dyn ProgressCallback>,
    /// Cancellation token. `None` means never cancelled.
    pub(crate) cancellation: Option<CancellationToken>,
    /// Bounded channel capacity between the decode worker and the
    /// collector. Defaults to 8.
    pub(crate) channel_capacity: usize,
}

impl Debug for SampleOptions {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("SampleOptions")
            .field("has_progress", &true)
            .field("has_cancellation", &self.cancellation.is_some())
            .field("channel_capacity", &self.channel_capacity)
            .finish()
    }
}

impl Default for SampleOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl SampleOptions {
    /// Create a new configuration with default settings.
    ///
    /// Defaults: no progress callback, no cancellation, channel capacity 8.
    pub fn new() -> Self {
        Self {
            progress: Arc::new(NoOpProgress),
            cancellation: None,
            channel_capacity: 8,
        }
    }

    /// Attach a progress callback.
    ///
    /// The callback is invoked once per sampled frame as frames arrive at
    /// the collector.
    #[must_use]
    pub fn with_progress(mut self, callback: Arc<dyn ProgressCallback>) -> Self {
        self.progress = callback;
        self
    }

    /// Attach a cancellation token.
    ///
    /// When the token is cancelled, the sampling worker stops at the next
    /// per-frame seek boundary and the pipeline returns
    /// [`SheetError::Cancelled`](crate::SheetError::Cancelled).
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Set the bounded channel capacity between decode worker and collector.
    ///
    /// Kept small by default to avoid buffering many decoded frames in
    /// memory. Clamped to a minimum of 1.
    #[must_use]
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Returns `true` if cancellation has been requested.
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancellation
            .as_ref()
            .is_some_and(|token| token.is_cancelled())
    }
}
