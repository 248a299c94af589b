//! SheetOptions, SampleOptions, and progress/cancellation tests.

use std::path::Path;
use std::sync::Arc;

use contactsheet::{
    CancellationToken, OperationType, ProgressCallback, ProgressInfo, SampleOptions, SheetError,
    SheetOptions,
};

fn sample_video_path() -> &'static str {
    "tests/fixtures/sample_video.mp4"
}

// ── SheetOptions builder ───────────────────────────────────────────

#[test]
fn sheet_defaults_match_reference_policy() {
    let options = SheetOptions::new();
    assert_eq!(options.sample_count, 25);
    assert_eq!(options.columns, 5);
    assert_eq!(options.padding, 5);
    assert_eq!(options.target_width, 320);
    assert_eq!(options.jpeg_quality, 90);
}

#[test]
fn sheet_builders_override_policy() {
    let options = SheetOptions::new()
        .with_sample_count(9)
        .with_columns(3)
        .with_padding(0)
        .with_target_width(160)
        .with_jpeg_quality(75);
    assert_eq!(options.sample_count, 9);
    assert_eq!(options.columns, 3);
    assert_eq!(options.padding, 0);
    assert_eq!(options.target_width, 160);
    assert_eq!(options.jpeg_quality, 75);
}

#[test]
fn sheet_builders_clamp_degenerate_values() {
    let options = SheetOptions::new()
        .with_sample_count(0)
        .with_columns(0)
        .with_target_width(0)
        .with_jpeg_quality(0);
    assert_eq!(options.sample_count, 1);
    assert_eq!(options.columns, 1);
    assert_eq!(options.target_width, 1);
    assert_eq!(options.jpeg_quality, 1);

    let options = SheetOptions::new().with_jpeg_quality(255);
    assert_eq!(options.jpeg_quality, 100);
}

// ── SampleOptions builder ──────────────────────────────────────────

#[test]
fn sample_options_defaults() {
    let options = SampleOptions::new();
    let debug = format!("{options:?}");
    assert!(debug.contains("SampleOptions"));
    assert!(debug.contains("has_cancellation: false"));
    assert!(debug.contains("channel_capacity: 8"));
}

#[test]
fn sample_options_with_cancellation() {
    let options = SampleOptions::new().with_cancellation(CancellationToken::new());
    let debug = format!("{options:?}");
    assert!(debug.contains("has_cancellation: true"));
}

#[test]
fn sample_options_channel_capacity_clamps_zero() {
    let options = SampleOptions::new().with_channel_capacity(0);
    let debug = format!("{options:?}");
    assert!(debug.contains("channel_capacity: 1"));
}

// ── CancellationToken ──────────────────────────────────────────────

#[test]
fn cancellation_token_default_not_cancelled() {
    let token = CancellationToken::new();
    assert!(!token.is_cancelled());
}

#[test]
fn cancellation_token_cancel() {
    let token = CancellationToken::new();
    token.cancel();
    assert!(token.is_cancelled());
}

#[test]
fn cancellation_token_clone_shares_state() {
    let token = CancellationToken::new();
    let clone = token.clone();
    assert!(!clone.is_cancelled());

    token.cancel();
    assert!(clone.is_cancelled());
}

#[test]
fn cancellation_token_default_trait() {
    let token = CancellationToken::default();
    assert!(!token.is_cancelled());
}

// ── OperationType ──────────────────────────────────────────────────

#[test]
fn operation_type_debug() {
    assert_eq!(format!("{:?}", OperationType::FrameSampling), "FrameSampling");
    assert_eq!(
        format!("{:?}", OperationType::GridComposition),
        "GridComposition",
    );
}

// ── fixture-gated progress/cancellation behavior ───────────────────

struct RecordingProgress {
    infos: std::sync::Mutex<Vec<ProgressInfo>>,
}

impl ProgressCallback for RecordingProgress {
    fn on_progress(&self, info: &ProgressInfo) {
        self.infos.lock().unwrap().push(info.clone());
    }
}

#[test]
fn composition_reports_progress_per_frame() {
    use contactsheet::{SampleFrame, SampleSet, compose_with_options};
    use image::{DynamicImage, RgbImage};

    let set = SampleSet::from_frames(
        (0..4)
            .map(|index| SampleFrame {
                index,
                source_frame: index as u64 * 3,
                image: DynamicImage::ImageRgb8(RgbImage::new(32, 24)),
            })
            .collect(),
    );

    let recorder = Arc::new(RecordingProgress {
        infos: std::sync::Mutex::new(Vec::new()),
    });
    let options = SampleOptions::new().with_progress(recorder.clone());

    compose_with_options(&set, &SheetOptions::new(), &options).expect("Failed to compose");

    let infos = recorder.infos.lock().unwrap();
    assert!(!infos.is_empty());
    for info in infos.iter() {
        assert_eq!(info.operation, OperationType::GridComposition);
        assert_eq!(info.total, Some(4));
    }
    // One report per blit plus the final one.
    assert_eq!(infos.last().unwrap().current, 4);
}

#[test]
fn cancelled_composition_returns_error() {
    use contactsheet::{SampleFrame, SampleSet, compose_with_options};
    use image::{DynamicImage, RgbImage};

    let set = SampleSet::from_frames(vec![SampleFrame {
        index: 0,
        source_frame: 0,
        image: DynamicImage::ImageRgb8(RgbImage::new(32, 24)),
    }]);

    let token = CancellationToken::new();
    token.cancel();
    let options = SampleOptions::new().with_cancellation(token);

    let result = compose_with_options(&set, &SheetOptions::new(), &options);
    assert!(matches!(result, Err(SheetError::Cancelled)));
}

#[test]
fn cancelled_sampling_returns_error() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let token = CancellationToken::new();
    token.cancel(); // Cancel immediately.

    let options = SampleOptions::new().with_cancellation(token);
    let result = contactsheet::sample(path, &SheetOptions::new(), &options);

    assert!(matches!(result, Err(SheetError::Cancelled)));
}

#[test]
fn progress_reports_frame_sampling_operation() {
    let path = sample_video_path();
    if !Path::new(path).exists() {
        return;
    }

    let recorder = Arc::new(RecordingProgress {
        infos: std::sync::Mutex::new(Vec::new()),
    });
    let options = SampleOptions::new().with_progress(recorder.clone());

    contactsheet::sample(path, &SheetOptions::new(), &options).expect("Failed to sample fixture");

    let infos = recorder.infos.lock().unwrap();
    assert!(!infos.is_empty(), "Expected progress callbacks");

    for info in infos.iter() {
        assert_eq!(info.operation, OperationType::FrameSampling);
    }

    // `current` is monotonically non-decreasing.
    for window in infos.windows(2) {
        assert!(window[1].current >= window[0].current);
    }
}
