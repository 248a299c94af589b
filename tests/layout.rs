//! Grid layout and compositing tests.
//!
//! These run entirely on synthetic frames — no video fixtures needed.

use contactsheet::{GridLayout, SampleFrame, SampleSet, SheetError, SheetOptions, compose};
use image::{DynamicImage, Rgb, RgbImage, Rgba};

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

fn solid_frame(index: usize, width: u32, height: u32, shade: u8) -> SampleFrame {
    SampleFrame {
        index,
        source_frame: index as u64 * 4,
        image: DynamicImage::ImageRgb8(RgbImage::from_pixel(
            width,
            height,
            Rgb([shade, shade, shade]),
        )),
    }
}

fn frame_set(count: usize, width: u32, height: u32) -> SampleSet {
    SampleSet::from_frames(
        (0..count)
            .map(|i| solid_frame(i, width, height, (i * 10) as u8))
            .collect(),
    )
}

// ── GridLayout ─────────────────────────────────────────────────────

#[test]
fn layout_columns_capped_by_frame_count() {
    for count in 1..=25_usize {
        let layout = GridLayout::derive(count, 5, 320, 240, 5);
        assert_eq!(layout.columns, (count as u32).min(5), "count={count}");
        assert_eq!(layout.rows, (count as u32).div_ceil(5), "count={count}");
    }
}

#[test]
fn layout_canvas_dimensions_formula() {
    for count in 1..=25_usize {
        let layout = GridLayout::derive(count, 5, 320, 240, 5);
        assert_eq!(
            layout.canvas_width(),
            layout.columns * (320 + 5) + 5,
            "count={count}",
        );
        assert_eq!(
            layout.canvas_height(),
            layout.rows * (240 + 5) + 5,
            "count={count}",
        );
    }
}

#[test]
fn layout_reference_geometry() {
    // 25 cells of 320x240 with 5 px padding: the classic 1600x1205 sheet.
    let layout = GridLayout::derive(25, 5, 320, 240, 5);
    assert_eq!(layout.columns, 5);
    assert_eq!(layout.rows, 5);
    assert_eq!(layout.canvas_width(), 1600);
    assert_eq!(layout.canvas_height(), 1205);

    for index in 0..25 {
        let (x, y) = layout.cell_origin(index);
        assert_eq!(x, (index as u32 % 5) * 325 + 5);
        assert_eq!(y, (index as u32 / 5) * 245 + 5);
    }
}

#[test]
fn layout_single_cell() {
    let layout = GridLayout::derive(1, 5, 320, 240, 5);
    assert_eq!(layout.columns, 1);
    assert_eq!(layout.rows, 1);
    assert_eq!(layout.canvas_width(), 330);
    assert_eq!(layout.canvas_height(), 250);
    assert_eq!(layout.cell_origin(0), (5, 5));
}

#[test]
fn layout_partial_last_row() {
    // 7 frames: full first row, two cells in the second.
    let layout = GridLayout::derive(7, 5, 320, 240, 5);
    assert_eq!(layout.columns, 5);
    assert_eq!(layout.rows, 2);
    assert_eq!(layout.cell_origin(5), (5, 250));
    assert_eq!(layout.cell_origin(6), (330, 250));
}

// ── compose ────────────────────────────────────────────────────────

#[test]
fn compose_empty_set_fails() {
    let result = compose(&SampleSet::default(), &SheetOptions::new());
    assert!(matches!(result, Err(SheetError::EmptySampleSet)));
}

#[test]
fn compose_rejects_mismatched_dimensions() {
    let mut frames: Vec<SampleFrame> = (0..3).map(|i| solid_frame(i, 320, 240, 40)).collect();
    frames.push(solid_frame(3, 319, 240, 40));
    let set = SampleSet::from_frames(frames);

    let result = compose(&set, &SheetOptions::new());
    match result {
        Err(SheetError::DimensionMismatch {
            index,
            expected_width,
            actual_width,
            ..
        }) => {
            assert_eq!(index, 3);
            assert_eq!(expected_width, 320);
            assert_eq!(actual_width, 319);
        }
        other => panic!("Expected DimensionMismatch, got: {other:?}"),
    }
}

#[test]
fn compose_reference_canvas_size() {
    // The spec scenario: 25 thumbnails of 320x240 -> 1600x1205 canvas.
    let canvas = compose(&frame_set(25, 320, 240), &SheetOptions::new()).unwrap();
    assert_eq!(canvas.width(), 1600);
    assert_eq!(canvas.height(), 1205);
}

#[test]
fn compose_short_set_still_produces_grid() {
    // Degenerate 10-frame source sampled at 25: two full rows.
    let canvas = compose(&frame_set(10, 320, 240), &SheetOptions::new()).unwrap();
    assert_eq!(canvas.width(), 1600);
    assert_eq!(canvas.height(), 495);
}

#[test]
fn compose_places_frames_positionally() {
    let canvas = compose(&frame_set(7, 320, 240), &SheetOptions::new()).unwrap();

    // Cell 0 top-left corner carries frame 0's shade.
    assert_eq!(canvas.get_pixel(5, 5), &Rgba([0, 0, 0, 255]));
    // Cell 1 sits one stride to the right.
    assert_eq!(canvas.get_pixel(330, 5), &Rgba([10, 10, 10, 255]));
    // Cell 5 wraps to the second row.
    assert_eq!(canvas.get_pixel(5, 250), &Rgba([50, 50, 50, 255]));
    // Bottom-right pixel of cell 6.
    assert_eq!(canvas.get_pixel(330 + 319, 250 + 239), &Rgba([60, 60, 60, 255]));
}

#[test]
fn compose_padding_stays_white() {
    let canvas = compose(&frame_set(7, 320, 240), &SheetOptions::new()).unwrap();

    // Edge padding.
    assert_eq!(canvas.get_pixel(0, 0), &WHITE);
    assert_eq!(canvas.get_pixel(4, 4), &WHITE);
    assert_eq!(canvas.get_pixel(canvas.width() - 1, canvas.height() - 1), &WHITE);
    // Gap between cell 0 and cell 1.
    assert_eq!(canvas.get_pixel(327, 100), &WHITE);
    // Gap between the two rows.
    assert_eq!(canvas.get_pixel(100, 247), &WHITE);
    // The three empty cells of the second row stay background.
    assert_eq!(canvas.get_pixel(1000, 300), &WHITE);
}

#[test]
fn compose_is_deterministic() {
    let set = frame_set(12, 160, 120);
    let options = SheetOptions::new();

    let first = compose(&set, &options).unwrap();
    let second = compose(&set, &options).unwrap();
    assert_eq!(first.as_raw(), second.as_raw());
}

#[test]
fn compose_honors_custom_columns_and_padding() {
    let options = SheetOptions::new().with_columns(4).with_padding(10);
    let canvas = compose(&frame_set(8, 100, 50), &options).unwrap();

    // 4 columns x 2 rows of 100x50 cells with 10 px padding.
    assert_eq!(canvas.width(), 4 * 110 + 10);
    assert_eq!(canvas.height(), 2 * 60 + 10);
    assert_eq!(canvas.get_pixel(10, 10), &Rgba([0, 0, 0, 255]));
    assert_eq!(canvas.get_pixel(120, 10), &Rgba([10, 10, 10, 255]));
    assert_eq!(canvas.get_pixel(10, 70), &Rgba([40, 40, 40, 255]));
}
