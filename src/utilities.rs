//! Internal utility functions.
//!
//! Helpers for sampling arithmetic, pixel-data copying, and timestamp
//! conversion that do not belong in any single public module.

use std::time::Duration;

use ffmpeg_next::{Rational, frame::Video as VideoFrame};

/// Compute the sampling stride for `sample_count` evenly-spaced frames.
///
/// Floor division, clamped to a minimum of 1 so that videos with fewer
/// frames than requested samples advance one frame per seek instead of
/// re-reading frame 0 forever.
pub fn sample_stride(frame_count: u64, sample_count: u64) -> u64 {
    (frame_count / sample_count.max(1)).max(1)
}

/// Compute the integer downscale divisor for a source of width `width`
/// targeting thumbnails `target_width` pixels wide.
///
/// Clamped to a minimum of 1 so sources narrower than the target are passed
/// through at their native size rather than dividing by zero.
pub fn downscale_divisor(width: u32, target_width: u32) -> u32 {
    (width / target_width.max(1)).max(1)
}

/// Resolve the scaled dimensions for a frame given the downscale divisor.
///
/// Both dimensions use floor division and stay at least 1 pixel.
pub fn scaled_dimensions(width: u32, height: u32, divisor: u32) -> (u32, u32) {
    let divisor = divisor.max(1);
    ((width / divisor).max(1), (height / divisor).max(1))
}

/// Copy pixel data from an FFmpeg video frame into a tightly-packed RGB buffer.
///
/// FFmpeg frames frequently carry per-row padding (stride > width × 3).
/// This function strips that padding so the result can be passed directly to
/// [`image::RgbImage::from_raw`].
pub(crate) fn frame_to_rgb_buffer(video_frame: &VideoFrame, width: u32, height: u32) -> Vec<u8> {
    let stride = video_frame.stride(0);
    let expected_stride = (width as usize) * 3;
    let data = video_frame.data(0);

    if stride == expected_stride {
        // No padding — fast path: copy the entire plane at once.
        data[..expected_stride * (height as usize)].to_vec()
    } else {
        // Stride includes padding bytes — copy row by row.
        let mut buffer = Vec::with_capacity(expected_stride * (height as usize));
        for row in 0..(height as usize) {
            let row_start = row * stride;
            buffer.extend_from_slice(&data[row_start..row_start + expected_stride]);
        }
        buffer
    }
}

/// Convert a frame number to a timestamp in the stream's time base.
///
/// The result is suitable for passing to FFmpeg seeking functions.
pub(crate) fn frame_number_to_stream_timestamp(
    frame_number: u64,
    frames_per_second: f64,
    time_base: Rational,
) -> i64 {
    let seconds = frame_number as f64 / frames_per_second;
    let duration = Duration::from_secs_f64(seconds);
    let numerator = time_base.numerator() as f64;
    let denominator = time_base.denominator() as f64;
    (duration.as_secs_f64() * denominator / numerator) as i64
}

/// Rescale a PTS value from stream time base to a frame number.
pub(crate) fn pts_to_frame_number(pts: i64, time_base: Rational, frames_per_second: f64) -> u64 {
    let seconds = pts as f64 * time_base.numerator() as f64 / time_base.denominator() as f64;
    (seconds * frames_per_second) as u64
}

#[cfg(test)]
mod tests {
    use super::{downscale_divisor, sample_stride, scaled_dimensions};

    #[test]
    fn stride_floor_division() {
        assert_eq!(sample_stride(100, 25), 4);
        assert_eq!(sample_stride(101, 25), 4);
        assert_eq!(sample_stride(124, 25), 4);
        assert_eq!(sample_stride(125, 25), 5);
    }

    #[test]
    fn stride_clamps_degenerate_inputs() {
        // Fewer frames than samples must not produce a zero stride.
        assert_eq!(sample_stride(10, 25), 1);
        assert_eq!(sample_stride(1, 25), 1);
        assert_eq!(sample_stride(0, 25), 1);
        // A zero sample count must not divide by zero either.
        assert_eq!(sample_stride(100, 0), 100);
    }

    #[test]
    fn divisor_floor_division() {
        assert_eq!(downscale_divisor(640, 320), 2);
        assert_eq!(downscale_divisor(639, 320), 1);
        assert_eq!(downscale_divisor(1920, 320), 6);
    }

    #[test]
    fn divisor_clamps_narrow_sources() {
        assert_eq!(downscale_divisor(319, 320), 1);
        assert_eq!(downscale_divisor(1, 320), 1);
        assert_eq!(downscale_divisor(320, 0), 1);
    }

    #[test]
    fn scaled_dimensions_stay_positive() {
        assert_eq!(scaled_dimensions(640, 480, 2), (320, 240));
        assert_eq!(scaled_dimensions(1, 1, 4), (1, 1));
        assert_eq!(scaled_dimensions(100, 3, 4), (25, 1));
    }
}
