//! # contactsheet
//!
//! Generate contact-sheet preview grids from video files.
//!
//! `contactsheet` samples a fixed number of frames evenly across a video's
//! duration, downsizes each frame by an integer divisor (preserving aspect
//! ratio exactly), composites the set into a padded grid on a white canvas,
//! and writes the result as a JPEG next to the input
//! (`clip.mp4` → `clip.preview.jpg`). Decoding is powered by FFmpeg via the
//! [`ffmpeg-next`](https://crates.io/crates/ffmpeg-next) crate; compositing
//! and encoding use [`image`].
//!
//! ## Quick Start
//!
//! ```no_run
//! use contactsheet::{SampleOptions, SheetOptions};
//!
//! let report = contactsheet::generate(
//!     "input.mp4",
//!     &SheetOptions::new(),
//!     &SampleOptions::new(),
//! ).unwrap();
//! println!("wrote {}", report.output.display());
//! ```
//!
//! ## Pipeline
//!
//! The per-file pipeline is three stages with a single ordered handoff
//! between each:
//!
//! 1. **Sampling** ([`sample`]) — a dedicated worker thread owns the
//!    [`VideoSource`], seeks to evenly-strided frame indices, decodes and
//!    downsizes each frame, and pushes it through a bounded channel. The
//!    collector appends frames in receipt order, which equals production
//!    order. A truncated stream yields a shorter, still-valid
//!    [`SampleSet`].
//! 2. **Compositing** ([`compose`]) — derives a [`GridLayout`] from the
//!    frame count (at most 5 columns by default, rows as needed), paints a
//!    white canvas, and blits each frame source-over into its cell.
//! 3. **Encoding** ([`encode_jpeg`]) — persists the canvas as JPEG at the
//!    configured quality.
//!
//! ## Customization
//!
//! Sampling density, grid shape, padding, thumbnail width and JPEG quality
//! are policy knobs on [`SheetOptions`]; progress callbacks and cooperative
//! cancellation thread through [`SampleOptions`]:
//!
//! ```no_run
//! use contactsheet::{CancellationToken, SampleOptions, SheetOptions};
//!
//! let sheet = SheetOptions::new()
//!     .with_sample_count(16)
//!     .with_columns(4)
//!     .with_target_width(480);
//!
//! let token = CancellationToken::new();
//! let sampling = SampleOptions::new().with_cancellation(token.clone());
//!
//! // token.cancel() from another thread stops sampling at the next seek.
//! let report = contactsheet::generate("input.mp4", &sheet, &sampling).unwrap();
//! ```
//!
//! ## Requirements
//!
//! FFmpeg development libraries must be installed on your system.

pub mod encoder;
pub mod error;
pub mod ffmpeg;
pub mod grid;
pub mod options;
pub mod progress;
pub mod sampler;
pub mod sheet;
pub mod source;
mod utilities;

pub use encoder::{encode_jpeg, preview_path};
pub use error::SheetError;
pub use ffmpeg::{FfmpegLogLevel, get_ffmpeg_log_level, set_ffmpeg_log_level};
pub use grid::{GridLayout, compose, compose_with_options};
pub use options::{SampleOptions, SheetOptions};
pub use progress::{CancellationToken, OperationType, ProgressCallback, ProgressInfo};
pub use sampler::{SampleFrame, SampleSet, sample, sample_source};
pub use sheet::{SheetReport, generate, generate_from_source};
pub use source::VideoSource;
pub use utilities::{downscale_divisor, sample_stride, scaled_dimensions};
