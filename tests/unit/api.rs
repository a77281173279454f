use serde_json::json;

use super::*;
use crate::{color::Rgb, params::OutputFormat};

fn opts_in(dir: &Path) -> GenerateOptions {
    let mut opts = GenerateOptions::with_assets_dir(dir);
    opts.render.system_fonts = false;
    opts
}

#[test]
fn assets_layout_is_derived_from_root() {
    let opts = GenerateOptions::with_assets_dir("/srv/assets");
    assert_eq!(opts.themes_dir(), PathBuf::from("/srv/assets/themes"));
    assert_eq!(opts.presets_dir(), PathBuf::from("/srv/assets/presets"));
    assert_eq!(opts.render.fonts_dir, PathBuf::from("/srv/assets/fonts"));
}

#[test]
fn missing_title_is_a_config_error() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = opts_in(tmp.path());
    for params in [json!({}), json!({"title": "   "}), json!({"title": null})] {
        assert!(matches!(
            prepare_params(&params, &opts),
            Err(CardError::Config(_))
        ));
    }
}

#[test]
fn wrongly_typed_params_are_a_serde_error() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = opts_in(tmp.path());
    assert!(matches!(
        prepare_params(&json!({"title": "x", "width": [1920]}), &opts),
        Err(CardError::Serde(_))
    ));
}

#[test]
fn user_params_override_preset_and_theme_fills_gaps() {
    let tmp = tempfile::tempdir().unwrap();
    std::fs::create_dir_all(tmp.path().join("presets")).unwrap();
    std::fs::create_dir_all(tmp.path().join("themes")).unwrap();
    std::fs::write(
        tmp.path().join("presets/promo.json"),
        r##"{"bg": "#000000", "accent": "#ff0000", "format": "jpg"}"##,
    )
    .unwrap();
    std::fs::write(
        tmp.path().join("themes/default.json"),
        r##"{"colors": {"bg_default": "#123456", "accent_default": "#00ff00"}}"##,
    )
    .unwrap();
    let opts = opts_in(tmp.path());

    let card = prepare_params(
        &json!({"preset": "promo", "title": "T", "accent": "#0000ff"}),
        &opts,
    )
    .unwrap();
    assert_eq!(card.bg, Rgb::BLACK);
    assert_eq!(card.accent, Rgb::new(0, 0, 255));
    assert_eq!(card.format, OutputFormat::Jpeg);

    let card = prepare_params(&json!({"title": "T"}), &opts).unwrap();
    assert_eq!(card.bg, Rgb::new(0x12, 0x34, 0x56));
    assert_eq!(card.accent, Rgb::new(0, 255, 0));
}

#[test]
fn unknown_preset_fails_before_rendering() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = opts_in(tmp.path());
    let err = generate_card(&json!({"title": "T", "preset": "nope"}), &opts).unwrap_err();
    assert!(err.to_string().contains("preset not found"));
}

#[test]
fn generate_writes_the_requested_file() {
    let tmp = tempfile::tempdir().unwrap();
    let opts = opts_in(tmp.path());
    let out = tmp.path().join("out").join("card.png");
    let written = generate_card(
        &json!({"title": "Hello", "width": 640, "out": out.to_string_lossy()}),
        &opts,
    )
    .unwrap();
    assert_eq!(written, out);
    let img = image::open(&out).unwrap();
    assert_eq!((img.width(), img.height()), (853, 480));
}
