//! JPEG encoding tests.

use contactsheet::{SampleFrame, SampleSet, SheetOptions, compose, encode_jpeg};
use image::{DynamicImage, Rgb, RgbImage};

fn small_set(count: usize) -> SampleSet {
    SampleSet::from_frames(
        (0..count)
            .map(|index| SampleFrame {
                index,
                source_frame: index as u64,
                image: DynamicImage::ImageRgb8(RgbImage::from_pixel(
                    64,
                    48,
                    Rgb([200, (index * 30) as u8, 60]),
                )),
            })
            .collect(),
    )
}

#[test]
fn encoded_sheet_roundtrips_through_decoder() {
    let canvas = compose(&small_set(6), &SheetOptions::new()).unwrap();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("sheet.preview.jpg");

    encode_jpeg(&canvas, &path, 90).expect("Failed to encode sheet");

    let metadata = std::fs::metadata(&path).expect("Output file missing");
    assert!(metadata.len() > 0);

    let decoded = image::open(&path).expect("Failed to decode output");
    assert_eq!(decoded.width(), canvas.width());
    assert_eq!(decoded.height(), canvas.height());
}

#[test]
fn encode_overwrites_existing_file() {
    let canvas = compose(&small_set(2), &SheetOptions::new()).unwrap();

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("sheet.preview.jpg");
    std::fs::write(&path, b"stale contents").unwrap();

    encode_jpeg(&canvas, &path, 80).expect("Failed to encode sheet");

    let decoded = image::open(&path).expect("Failed to decode output");
    assert_eq!(decoded.width(), canvas.width());
}

#[test]
fn encode_into_missing_directory_fails() {
    let canvas = compose(&small_set(1), &SheetOptions::new()).unwrap();

    let result = encode_jpeg(
        &canvas,
        std::path::Path::new("tests/no-such-dir/sheet.preview.jpg"),
        90,
    );
    assert!(result.is_err());
}
