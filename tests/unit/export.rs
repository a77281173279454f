use super::*;
use crate::color::Rgb;

fn small_canvas() -> Canvas {
    let mut canvas = Canvas::new(64, 36, Rgb::new(200, 120, 40)).unwrap();
    crate::render::texture::apply_noise(&mut canvas, 9);
    canvas
}

#[test]
fn budget_is_in_mebibytes() {
    assert_eq!(budget_bytes(5.0), 5 * 1024 * 1024);
    assert_eq!(budget_bytes(0.5), 512 * 1024);
    assert_eq!(budget_bytes(0.0), 0);
    assert_eq!(budget_bytes(f64::NAN), 0);
}

#[test]
fn generous_budget_keeps_full_size_png() {
    let canvas = small_canvas();
    let enc = encode_with_budget(&canvas, OutputFormat::Png, 5.0).unwrap();
    assert!(enc.within_budget);
    assert_eq!((enc.width, enc.height), (64, 36));
    assert_eq!(enc.scale, 1.0);

    let decoded = image::load_from_memory(&enc.bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 36));
    assert_eq!(
        decoded.to_rgba8().get_pixel(0, 0).0[3],
        255
    );
}

#[test]
fn impossible_jpeg_budget_walks_quality_then_scale() {
    let canvas = small_canvas();
    let enc = encode_with_budget(&canvas, OutputFormat::Jpeg, 0.0).unwrap();
    assert!(!enc.within_budget);
    assert_eq!(enc.quality, 67);
    assert!(enc.scale <= MIN_SCALE && enc.scale > MIN_SCALE * SCALE_STEP);
    assert_eq!(enc.width, (64.0 * enc.scale) as u32);
    assert_eq!(&enc.bytes[..2], &[0xFF, 0xD8]);
}

#[test]
fn impossible_png_budget_only_downscales() {
    let canvas = small_canvas();
    let enc = encode_with_budget(&canvas, OutputFormat::Png, 0.0).unwrap();
    assert!(!enc.within_budget);
    assert_eq!(enc.quality, START_JPEG_QUALITY);
    assert!(enc.scale <= MIN_SCALE);
    assert_eq!(&enc.bytes[1..4], b"PNG");
}

#[test]
fn save_creates_parent_directories() {
    let tmp = tempfile::tempdir().unwrap();
    let out = tmp.path().join("a").join("b").join("card.jpg");
    let canvas = small_canvas();
    let written = save_image(&canvas, &out, OutputFormat::Jpeg, 5.0).unwrap();
    assert_eq!(written, out);
    let decoded = image::open(&out).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (64, 36));
}
