use super::*;

#[test]
fn raw_params_ignore_unknown_keys_and_default_missing_ones() {
    let raw: RawParams = serde_json::from_value(serde_json::json!({
        "title": "Hello",
        "bullets": ["a", 5, true],
        "width": 1280,
        "comment": "not a field",
    }))
    .unwrap();
    assert_eq!(raw.title.as_deref(), Some("Hello"));
    assert_eq!(raw.width, Some(Number::Value(1280.0)));
    assert_eq!(raw.bullets.as_ref().map(Vec::len), Some(3));
    assert!(raw.bg.is_none());
    assert!(raw.decorations.is_none());
}

#[test]
fn cjk_switch_accepts_bools_and_words() {
    let on: Switch = serde_json::from_str("true").unwrap();
    let off: Switch = serde_json::from_str("\"off\"").unwrap();
    let word_on: Switch = serde_json::from_str("\"ON\"").unwrap();
    assert!(on.is_on());
    assert!(!off.is_on());
    assert!(word_on.is_on());
    assert!(!Switch::Text("maybe".into()).is_on());
}

#[test]
fn cjk_switch_accepts_numbers() {
    let zero: Switch = serde_json::from_str("0").unwrap();
    let one: Switch = serde_json::from_str("1").unwrap();
    assert_eq!(zero, Switch::Number(0.0));
    assert!(!zero.is_on());
    assert!(one.is_on());
    assert!(!Switch::Text("0".into()).is_on());
}

#[test]
fn numbers_accept_numeric_strings() {
    let raw: RawParams = serde_json::from_value(serde_json::json!({
        "width": "1920",
        "height": " 1080 ",
        "safe_area_pct": 0.1,
        "max_file_mb": "wide",
    }))
    .unwrap();
    assert_eq!(raw.width.as_ref().and_then(Number::value), Some(1920.0));
    assert_eq!(raw.height.as_ref().and_then(Number::value), Some(1080.0));
    assert_eq!(raw.safe_area_pct, Some(Number::from(0.1)));
    assert_eq!(raw.max_file_mb.as_ref().and_then(Number::value), None);
}

#[test]
fn theme_parses_partial_documents() {
    let theme: Theme =
        serde_json::from_str(r##"{"colors": {"bg_default": "#101010"}}"##).unwrap();
    assert_eq!(theme.colors.bg_default.as_deref(), Some("#101010"));
    assert!(theme.colors.accent_default.is_none());

    let empty: Theme = serde_json::from_str("{}").unwrap();
    assert_eq!(empty, Theme::default());
}

#[test]
fn format_extensions() {
    assert_eq!(OutputFormat::Png.extension(), "png");
    assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
}
