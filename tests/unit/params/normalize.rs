use super::*;
use crate::{
    color::Rgb,
    params::model::{Switch, ThemeColors},
};

fn raw(v: serde_json::Value) -> RawParams {
    serde_json::from_value(v).unwrap()
}

#[test]
fn empty_input_gets_every_default() {
    let p = normalize_params(&RawParams::default(), &Theme::default());
    assert_eq!((p.width, p.height), (1920, 1080));
    assert_eq!(p.title_align, TitleAlign::Center);
    assert_eq!(p.safe_area_pct, 0.06);
    assert_eq!(p.format, OutputFormat::Png);
    assert_eq!(p.max_file_mb, 5.0);
    assert_eq!(p.texture, Texture::None);
    assert_eq!(p.font_family, "NotoSansSC");
    assert!(p.cjk_only);
    assert_eq!(p.bg, Rgb::new(0xEF, 0xEF, 0xEF));
    assert_eq!(p.accent, Rgb::new(0xF0, 0xA0, 0x20));
    assert_eq!(p.bullets, vec!["—".to_string()]);
    assert_eq!(p.out, PathBuf::from("output/card.png"));
    assert!(p.decorations.is_none());
    assert_eq!(p.title, "");
    assert_eq!(p.brand, "");
    assert_eq!(p.watermark, "");
}

#[test]
fn height_follows_width_at_16_9() {
    assert_eq!(canvas_size(Some(1280.0), None), (1280, 720));
    // 1000 * 9 / 16 = 562.5 rounds to even
    assert_eq!(canvas_size(Some(1000.0), None), (1000, 562));
    assert_eq!(canvas_size(None, Some(900.0)), (1920, 900));
}

#[test]
fn tiny_canvas_is_raised_to_minimum() {
    assert_eq!(canvas_size(Some(100.0), Some(100.0)), (853, 480));
    assert_eq!(canvas_size(Some(400.0), None), (853, 480));
    assert_eq!(canvas_size(Some(2000.0), Some(300.0)), (853, 480));
    assert_eq!(canvas_size(Some(2000.0), Some(480.0)), (2000, 480));
}

#[test]
fn zero_or_garbage_sizes_use_defaults() {
    assert_eq!(canvas_size(Some(0.0), None), (1920, 1080));
    assert_eq!(canvas_size(Some(f64::NAN), Some(0.0)), (1920, 1080));
    assert_eq!(canvas_size(Some(-5.0), None), (853, 480));
}

#[test]
fn huge_canvas_is_clamped() {
    let (w, h) = canvas_size(Some(100_000.0), None);
    assert_eq!(w, MAX_SIDE);
    assert_eq!(h, MAX_SIDE);
}

#[test]
fn bullets_are_trimmed_and_blanks_dropped() {
    let p = normalize_params(
        &raw(serde_json::json!({"bullets": ["  one ", "", "   ", null, 42, "two"]})),
        &Theme::default(),
    );
    assert_eq!(p.bullets, vec!["one", "42", "two"]);

    let p = normalize_params(&raw(serde_json::json!({"bullets": []})), &Theme::default());
    assert_eq!(p.bullets, vec![EMPTY_BULLET]);
}

#[test]
fn colors_come_from_params_then_theme() {
    let theme = Theme {
        colors: ThemeColors {
            bg_default: Some("#101010".into()),
            accent_default: None,
        },
    };
    let p = normalize_params(&RawParams::default(), &theme);
    assert_eq!(p.bg, Rgb::new(0x10, 0x10, 0x10));
    assert_eq!(p.accent, Rgb::new(0xF0, 0xA0, 0x20));

    let p = normalize_params(&raw(serde_json::json!({"bg": "#fff", "accent": ""})), &theme);
    assert_eq!(p.bg, Rgb::WHITE);
    assert_eq!(p.accent, Rgb::new(0xF0, 0xA0, 0x20));

    let p = normalize_params(&raw(serde_json::json!({"bg": "nope"})), &theme);
    assert_eq!(p.bg, Rgb::FALLBACK);
}

#[test]
fn enumerations_are_parsed_leniently() {
    let p = normalize_params(
        &raw(serde_json::json!({
            "title_align": "LEFT",
            "format": "jpeg",
            "texture": "noise",
            "cjk_only": "off",
        })),
        &Theme::default(),
    );
    assert_eq!(p.title_align, TitleAlign::Left);
    assert_eq!(p.format, OutputFormat::Jpeg);
    assert_eq!(p.texture, Texture::Noise);
    assert!(!p.cjk_only);

    let p = normalize_params(
        &raw(serde_json::json!({"title_align": "diagonal", "format": "gif", "texture": "wood"})),
        &Theme::default(),
    );
    assert_eq!(p.title_align, TitleAlign::Center);
    assert_eq!(p.format, OutputFormat::Png);
    assert_eq!(p.texture, Texture::None);
}

#[test]
fn out_of_range_numbers_fall_back() {
    let p = normalize_params(
        &raw(serde_json::json!({"safe_area_pct": 0.7, "max_file_mb": -1})),
        &Theme::default(),
    );
    assert_eq!(p.safe_area_pct, DEFAULT_SAFE_AREA_PCT);
    assert_eq!(p.max_file_mb, DEFAULT_MAX_FILE_MB);

    let p = normalize_params(
        &raw(serde_json::json!({"safe_area_pct": 0.1, "max_file_mb": 0.5})),
        &Theme::default(),
    );
    assert_eq!(p.safe_area_pct, 0.1);
    assert_eq!(p.max_file_mb, 0.5);
}

#[test]
fn decorations_keep_order_and_default_missing_fields() {
    let p = normalize_params(
        &raw(serde_json::json!({"decorations": [{"x": 0.5, "y": 2.0}, {"size": 0.05}]})),
        &Theme::default(),
    );
    let decos = p.decorations.unwrap();
    assert_eq!(
        decos,
        vec![
            Decoration {
                x: 0.5,
                y: 1.0,
                size: 0.02
            },
            Decoration {
                x: 0.1,
                y: 0.1,
                size: 0.05
            },
        ]
    );

    let p = normalize_params(&raw(serde_json::json!({"decorations": []})), &Theme::default());
    assert_eq!(p.decorations, Some(vec![]));
}

#[test]
fn cjk_switch_bool_is_respected() {
    let mut r = RawParams::default();
    r.cjk_only = Some(Switch::Bool(false));
    assert!(!normalize_params(&r, &Theme::default()).cjk_only);
}

#[test]
fn loosely_typed_values_are_coerced() {
    let p = normalize_params(
        &raw(serde_json::json!({"cjk_only": 0, "width": "1280", "max_file_mb": "2.5"})),
        &Theme::default(),
    );
    assert!(!p.cjk_only);
    assert_eq!((p.width, p.height), (1280, 720));
    assert_eq!(p.max_file_mb, 2.5);

    let p = normalize_params(
        &raw(serde_json::json!({"cjk_only": 1, "width": "wide", "safe_area_pct": "0.1"})),
        &Theme::default(),
    );
    assert!(p.cjk_only);
    assert_eq!((p.width, p.height), (1920, 1080));
    assert_eq!(p.safe_area_pct, 0.1);
}
