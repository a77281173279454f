use super::*;
use crate::params::{RawParams, Theme, normalize_params};

/// Built-in face only, so measurements are exact and independent of the host.
fn builtin_options() -> (tempfile::TempDir, RenderOptions) {
    let tmp = tempfile::tempdir().unwrap();
    let options = RenderOptions {
        fonts_dir: tmp.path().to_path_buf(),
        system_fonts: false,
        ..RenderOptions::default()
    };
    (tmp, options)
}

fn params(v: serde_json::Value) -> CardParams {
    let raw: RawParams = serde_json::from_value(v).unwrap();
    normalize_params(&raw, &Theme::default())
}

#[test]
fn canvas_matches_params_and_panel_is_centered() {
    let (_tmp, options) = builtin_options();
    let p = params(serde_json::json!({"title": "Hi"}));
    let (canvas, report) = render_card_with_report(&p, &options).unwrap();

    assert_eq!(canvas.size(), (1920, 1080));
    assert_eq!(report.panel, Rect::new(297.0, 746.0, 1623.0, 1016.0));
    assert_eq!(report.bullet_area, Rect::new(376.0, 778.0, 1544.0, 984.0));
    // panel interior is white
    let px = canvas.pixel(960, 760).unwrap().to_array();
    assert_eq!(px, [255, 255, 255, 255]);
}

#[test]
fn centered_short_title_gets_minimum_underline() {
    let (_tmp, options) = builtin_options();
    let p = params(serde_json::json!({"title": "Hi"}));
    let (_, report) = render_card_with_report(&p, &options).unwrap();

    assert_eq!(report.title_lines, vec!["Hi"]);
    assert_eq!(report.title_size_px, 172.0);
    // max(min(1920 * 0.28, 172 * 0.9), 1920 * 0.18) = 345, centered on 960
    assert_eq!(report.underline, Rect::new(787.0, 362.0, 1132.0, 370.0));
}

#[test]
fn left_aligned_multiline_underline_measures_joined_lines() {
    let (_tmp, options) = builtin_options();
    let p = params(serde_json::json!({
        "title": "Mega Summer Sale Event",
        "title_align": "left",
    }));
    let (_, report) = render_card_with_report(&p, &options).unwrap();

    assert_eq!(report.title_lines, vec!["Mega Summer Sale", "Event"]);
    // "Mega Summer SaleEvent" is 21 cells of 86px; capped at 1920 * 0.30 = 576
    assert_eq!(report.underline, Rect::new(64.0, 468.0, 640.0, 476.0));
}

#[test]
fn brand_pushes_the_title_down() {
    let (_tmp, options) = builtin_options();
    let without = params(serde_json::json!({"title": "Hi"}));
    let with = params(serde_json::json!({"title": "Hi", "brand": "  Acme "}));
    let (_, a) = render_card_with_report(&without, &options).unwrap();
    let (_, b) = render_card_with_report(&with, &options).unwrap();
    assert_eq!(b.underline.y0 - a.underline.y0, 86.0);
}

#[test]
fn empty_bullets_draw_one_placeholder_line() {
    let (_tmp, options) = builtin_options();
    let p = params(serde_json::json!({"title": "Hi", "bullets": []}));
    let (_, report) = render_card_with_report(&p, &options).unwrap();
    assert_eq!(report.bullet_lines, 1);

    let p = params(serde_json::json!({"title": "Hi", "bullets": ["a", "b", "c"]}));
    let (_, report) = render_card_with_report(&p, &options).unwrap();
    assert_eq!(report.bullet_lines, 3);
}

#[test]
fn foreground_contrasts_with_background() {
    let (_tmp, options) = builtin_options();
    let dark = params(serde_json::json!({"title": "Hi", "bg": "#101010"}));
    let light = params(serde_json::json!({"title": "Hi", "bg": "#fafafa"}));
    assert_eq!(
        render_card_with_report(&dark, &options).unwrap().1.foreground,
        Rgb::WHITE
    );
    assert_eq!(
        render_card_with_report(&light, &options).unwrap().1.foreground,
        Rgb::BLACK
    );
}

#[test]
fn watermark_changes_the_bottom_right_corner_only() {
    let (_tmp, options) = builtin_options();
    let plain = params(serde_json::json!({"title": "Hi", "decorations": []}));
    let marked = params(serde_json::json!({"title": "Hi", "decorations": [], "watermark": "demo"}));
    let a = render_card(&plain, &options).unwrap();
    let b = render_card(&marked, &options).unwrap();

    let changed: Vec<usize> = a
        .as_premul_bytes()
        .chunks_exact(4)
        .zip(b.as_premul_bytes().chunks_exact(4))
        .enumerate()
        .filter(|(_, (x, y))| x != y)
        .map(|(i, _)| i)
        .collect();
    assert!(!changed.is_empty());
    for i in changed {
        let (x, y) = (i % 1920, i / 1920);
        assert!(x >= 1700 && y >= 990, "pixel ({x}, {y}) changed");
    }
}

#[test]
fn noise_texture_is_reproducible() {
    let (_tmp, options) = builtin_options();
    let p = params(serde_json::json!({"title": "Hi", "texture": "noise", "width": 640}));
    let a = render_card(&p, &options).unwrap();
    let b = render_card(&p, &options).unwrap();
    assert_eq!(a.as_premul_bytes(), b.as_premul_bytes());

    let other = RenderOptions {
        noise_seed: options.noise_seed + 1,
        ..options.clone()
    };
    let c = render_card(&p, &other).unwrap();
    assert_ne!(a.as_premul_bytes(), c.as_premul_bytes());
}

#[test]
fn default_decorations_are_drawn_in_accent_tint() {
    let (_tmp, options) = builtin_options();
    let p = params(serde_json::json!({"title": "Hi", "bg": "#101010", "accent": "#00ff00"}));
    let canvas = render_card(&p, &options).unwrap();
    // center of the first default diamond
    let (x, y) = ((0.08f64 * 1920.0) as u32, (0.82f64 * 1080.0) as u32);
    let expected = mix(Rgb::new(0, 255, 0), Rgb::WHITE, 0.15);
    assert_eq!(
        canvas.pixel(x, y).unwrap().to_array(),
        [expected.r, expected.g, expected.b, 255]
    );
}

/// `NotoSansSC-{Regular,Bold}.ttf` backed by the DejaVu Sans fixture.
fn dejavu_options() -> (tempfile::TempDir, RenderOptions) {
    let tmp = tempfile::tempdir().unwrap();
    let fixture = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/fonts/DejaVuSans.ttf");
    for style in ["Regular", "Bold"] {
        std::fs::copy(&fixture, tmp.path().join(format!("NotoSansSC-{style}.ttf"))).unwrap();
    }
    let options = RenderOptions {
        fonts_dir: tmp.path().to_path_buf(),
        system_fonts: false,
        ..RenderOptions::default()
    };
    (tmp, options)
}

#[test]
fn bullet_rows_advance_by_ink_height() {
    let (_tmp, options) = dejavu_options();
    let p = params(serde_json::json!({
        "title": "Sale",
        "bullets": ["One", "Two", "Three", "Four", "Five"],
    }));
    let (_, report) = render_card_with_report(&p, &options).unwrap();

    // 37px body: ink height 35, advance 40, so rows at 0..=160 fit the 206px area
    assert_eq!(report.bullet_area.height(), 206.0);
    assert_eq!(report.bullet_lines, 5);
}
