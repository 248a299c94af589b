//! Video source access.
//!
//! [`VideoSource`] wraps an FFmpeg demuxer context and exposes exactly the
//! capabilities the sampling pipeline needs: cached stream metadata
//! (frame count, dimensions, frame rate) and seek-by-frame-index decoding
//! with bilinear downscaling. Decoded frames are returned as
//! [`image::DynamicImage`] values in RGB8 format.

use std::{
    fmt::{Debug, Formatter, Result as FmtResult},
    path::{Path, PathBuf},
    time::Duration,
};

use ffmpeg_next::{
    codec::context::Context as CodecContext,
    format::{Pixel, context::Input},
    frame::Video as VideoFrame,
    media::Type,
    software::scaling::{Context as ScalingContext, Flags as ScalingFlags},
};
use image::{DynamicImage, RgbImage};

use crate::error::SheetError;
use crate::utilities;

/// An opened video file, owned exclusively by the sampling pipeline.
///
/// Created via [`VideoSource::open`]. The demuxer's seek position is
/// process-wide mutable state, so a `VideoSource` must never be shared
/// between concurrent readers; the sampler moves it into its single decode
/// worker.
///
/// # Example
///
/// ```no_run
/// use contactsheet::{SheetError, VideoSource};
///
/// let mut source = VideoSource::open("input.mp4")?;
/// println!("{} frames at {}x{}", source.frame_count(), source.width(), source.height());
/// let frame = source.read_frame_at(0, 320, 240)?;
/// # Ok::<(), SheetError>(())
/// ```
pub struct VideoSource {
    /// The opened FFmpeg input (demuxer) context.
    input_context: Input,
    /// Index of the best video stream.
    stream_index: usize,
    /// Estimated total number of frames in the stream.
    frame_count: u64,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Frames per second (may be approximate for variable-frame-rate content).
    frames_per_second: f64,
    /// Codec name (e.g. `"h264"`, `"vp9"`).
    codec: String,
    /// Path to the opened file (kept for error messages).
    path: PathBuf,
}

impl Debug for VideoSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("VideoSource")
            .field("path", &self.path)
            .field("stream_index", &self.stream_index)
            .field("frame_count", &self.frame_count)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("frames_per_second", &self.frames_per_second)
            .field("codec", &self.codec)
            .finish_non_exhaustive()
    }
}

impl VideoSource {
    /// Open a video file for sampling.
    ///
    /// Initializes FFmpeg (idempotent), opens the container, locates the
    /// best video stream, and caches its metadata.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::SourceOpen`] if the file cannot be opened,
    /// [`SheetError::NoVideoStream`] if it has no video stream.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SheetError> {
        let path = path.as_ref().to_path_buf();

        log::debug!("Opening video file: {}", path.display());

        // Initialise ffmpeg (safe to call multiple times).
        ffmpeg_next::init().map_err(|error| SheetError::SourceOpen {
            path: path.clone(),
            reason: format!("FFmpeg initialisation failed: {error}"),
        })?;

        let input_context =
            ffmpeg_next::format::input(&path).map_err(|error| SheetError::SourceOpen {
                path: path.clone(),
                reason: error.to_string(),
            })?;

        let stream = input_context
            .streams()
            .best(Type::Video)
            .ok_or(SheetError::NoVideoStream)?;
        let stream_index = stream.index();

        let codec_parameters = stream.parameters();
        let decoder_context =
            CodecContext::from_parameters(codec_parameters).map_err(|error| {
                SheetError::SourceOpen {
                    path: path.clone(),
                    reason: format!("Failed to read video codec parameters: {error}"),
                }
            })?;
        let decoder = decoder_context
            .decoder()
            .video()
            .map_err(|error| SheetError::SourceOpen {
                path: path.clone(),
                reason: format!("Failed to create video decoder: {error}"),
            })?;

        let width = decoder.width();
        let height = decoder.height();

        // Compute frames per second from the stream's average frame rate,
        // falling back to the raw rate field.
        let frame_rate = stream.avg_frame_rate();
        let frames_per_second = if frame_rate.denominator() != 0 {
            frame_rate.numerator() as f64 / frame_rate.denominator() as f64
        } else {
            let rate = stream.rate();
            if rate.denominator() != 0 {
                rate.numerator() as f64 / rate.denominator() as f64
            } else {
                0.0
            }
        };

        // Prefer the container's frame count; many formats omit it, in
        // which case estimate from duration and frame rate.
        let duration_microseconds = input_context.duration();
        let duration = if duration_microseconds > 0 {
            Duration::from_micros(duration_microseconds as u64)
        } else {
            Duration::ZERO
        };

        let declared_frames = stream.frames();
        let frame_count = if declared_frames > 0 {
            declared_frames as u64
        } else if frames_per_second > 0.0 {
            (duration.as_secs_f64() * frames_per_second) as u64
        } else {
            0
        };

        let codec = decoder
            .codec()
            .map(|codec| codec.name().to_string())
            .unwrap_or_else(|| "unknown".to_string());

        log::info!(
            "Opened video: {} ({}x{}, {:.2} fps, codec={}, ~{} frames)",
            path.display(),
            width,
            height,
            frames_per_second,
            codec,
            frame_count,
        );

        Ok(Self {
            input_context,
            stream_index,
            frame_count,
            width,
            height,
            frames_per_second,
            codec,
            path,
        })
    }

    /// Estimated total number of frames in the video stream.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Frame width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Frame height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Frames per second of the video stream.
    pub fn frames_per_second(&self) -> f64 {
        self.frames_per_second
    }

    /// Codec name of the video stream.
    pub fn codec(&self) -> &str {
        &self.codec
    }

    /// Path this source was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Seek to `frame_number`, decode one frame, and scale it to
    /// `(target_width, target_height)` with bilinear interpolation.
    ///
    /// Seeks to the nearest keyframe before the target and decodes forward
    /// until the requested frame is reached. A frame at or past the target
    /// is accepted, so imprecise seeks on sparse-keyframe streams still
    /// yield the closest available picture.
    ///
    /// Returns `Ok(None)` when the stream ends before the target frame —
    /// the truncated-stream outcome the sampler recovers from.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::FfmpegError`] on seek or decoder failures, and
    /// [`SheetError::DecodeError`] if the scaled frame cannot be converted
    /// to an image buffer.
    pub fn read_frame_at(
        &mut self,
        frame_number: u64,
        target_width: u32,
        target_height: u32,
    ) -> Result<Option<DynamicImage>, SheetError> {
        let frames_per_second = self.frames_per_second;
        let stream_index = self.stream_index;

        let stream = self
            .input_context
            .stream(stream_index)
            .ok_or(SheetError::NoVideoStream)?;
        let time_base = stream.time_base();
        let codec_parameters = stream.parameters();
        let decoder_context = CodecContext::from_parameters(codec_parameters)?;
        let mut decoder = decoder_context.decoder().video()?;

        // Pixel-format converter: source format → RGB24 at thumbnail size.
        let mut scaler = ScalingContext::get(
            decoder.format(),
            decoder.width(),
            decoder.height(),
            Pixel::RGB24,
            target_width,
            target_height,
            ScalingFlags::BILINEAR,
        )?;

        // Seek to the nearest keyframe before the target frame.
        let target_timestamp = utilities::frame_number_to_stream_timestamp(
            frame_number,
            frames_per_second,
            time_base,
        );
        self.input_context.seek(target_timestamp, ..target_timestamp)?;

        let mut decoded_frame = VideoFrame::empty();
        let mut rgb_frame = VideoFrame::empty();

        for (stream, packet) in self.input_context.packets() {
            if stream.index() != stream_index {
                continue;
            }

            decoder.send_packet(&packet)?;

            while decoder.receive_frame(&mut decoded_frame).is_ok() {
                let pts = decoded_frame.pts().unwrap_or(0);
                let current = utilities::pts_to_frame_number(pts, time_base, frames_per_second);

                if current >= frame_number {
                    scaler.run(&decoded_frame, &mut rgb_frame)?;
                    let image =
                        convert_frame_to_image(&rgb_frame, target_width, target_height)?;
                    return Ok(Some(image));
                }
            }
        }

        // Flush the decoder for any buffered pictures.
        decoder.send_eof()?;
        while decoder.receive_frame(&mut decoded_frame).is_ok() {
            let pts = decoded_frame.pts().unwrap_or(0);
            let current = utilities::pts_to_frame_number(pts, time_base, frames_per_second);

            if current >= frame_number {
                scaler.run(&decoded_frame, &mut rgb_frame)?;
                let image = convert_frame_to_image(&rgb_frame, target_width, target_height)?;
                return Ok(Some(image));
            }
        }

        // End of stream before the target frame.
        Ok(None)
    }
}

/// Convert a scaled RGB24 video frame to an [`image::DynamicImage`].
fn convert_frame_to_image(
    rgb_frame: &VideoFrame,
    width: u32,
    height: u32,
) -> Result<DynamicImage, SheetError> {
    let buffer = utilities::frame_to_rgb_buffer(rgb_frame, width, height);
    let rgb_image = RgbImage::from_raw(width, height, buffer).ok_or_else(|| {
        SheetError::DecodeError(
            "Failed to construct RGB image from decoded frame data".to_string(),
        )
    })?;
    Ok(DynamicImage::ImageRgb8(rgb_image))
}
