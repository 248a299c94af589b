//! Error types for the `contactsheet` crate.
//!
//! This module defines [`SheetError`], the unified error type returned by all
//! fallible operations in the crate. Variants carry enough context (file
//! paths, frame indices, dimensions) to diagnose a failure without extra
//! logging at the call site.

use std::{io::Error as IoError, path::PathBuf};

use ffmpeg_next::Error as FfmpegError;
use image::ImageError;
use thiserror::Error;

/// The unified error type for all `contactsheet` operations.
///
/// Every public method that can fail returns `Result<T, SheetError>`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SheetError {
    /// The video file could not be opened.
    #[error("Failed to open video file at {path}: {reason}")]
    SourceOpen {
        /// Path that was passed to [`crate::VideoSource::open`].
        path: PathBuf,
        /// Underlying reason the open failed.
        reason: String,
    },

    /// The file does not contain a video stream.
    #[error("No video stream found in file")]
    NoVideoStream,

    /// The source reports a zero or unusable frame count.
    #[error("Video at {path} reports no decodable frames")]
    InvalidFrameCount {
        /// Path of the offending file.
        path: PathBuf,
    },

    /// A sample count of zero was requested.
    #[error("Sample count must be greater than zero")]
    InvalidSampleCount,

    /// A video frame could not be decoded or converted.
    #[error("Failed to decode video frame: {0}")]
    DecodeError(String),

    /// The compositor was handed an empty sample set.
    #[error("Cannot compose a grid from an empty sample set")]
    EmptySampleSet,

    /// A sampled frame's dimensions differ from the first frame's.
    #[error(
        "Frame {index} is {actual_width}x{actual_height}, expected {expected_width}x{expected_height}"
    )]
    DimensionMismatch {
        /// Position of the offending frame in the sample set.
        index: usize,
        /// Width established by the first frame.
        expected_width: u32,
        /// Height established by the first frame.
        expected_height: u32,
        /// Width of the offending frame.
        actual_width: u32,
        /// Height of the offending frame.
        actual_height: u32,
    },

    /// The sampling worker thread panicked.
    #[error("Sampling worker thread panicked")]
    WorkerPanic,

    /// The operation was cancelled via a [`CancellationToken`](crate::CancellationToken).
    #[error("Operation cancelled")]
    Cancelled,

    /// An error originating from the FFmpeg libraries.
    #[error("FFmpeg error: {0}")]
    FfmpegError(String),

    /// An I/O error occurred while reading or writing files.
    #[error("I/O error: {0}")]
    IoError(#[from] IoError),

    /// An error from the `image` crate during compositing or encoding.
    #[error("Image processing error: {0}")]
    ImageError(#[from] ImageError),
}

impl From<FfmpegError> for SheetError {
    fn from(error: FfmpegError) -> Self {
        SheetError::FfmpegError(error.to_string())
    }
}
