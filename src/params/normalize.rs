use std::path::PathBuf;

use crate::{
    color::hex_to_rgb,
    params::model::{
        CardParams, Decoration, Number, OutputFormat, RawDecoration, RawParams, Texture,
        Theme, TitleAlign,
    },
};

pub const DEFAULT_WIDTH: u32 = 1920;
/// Neither side of a card is ever smaller than this.
pub const MIN_SIDE: u32 = 480;
/// Neither side is ever larger than this (the rasterizer addresses sides with 16 bits).
pub const MAX_SIDE: u32 = 16_384;
pub const DEFAULT_SAFE_AREA_PCT: f64 = 0.06;
pub const DEFAULT_MAX_FILE_MB: f64 = 5.0;
pub const DEFAULT_FONT_FAMILY: &str = "NotoSansSC";
pub const DEFAULT_BG: &str = "#EFEFEF";
pub const DEFAULT_ACCENT: &str = "#F0A020";
pub const DEFAULT_OUT: &str = "output/card.png";
/// Stands in for an empty bullet list so the panel is never blank.
pub const EMPTY_BULLET: &str = "—";

/// Fill every default and clamp the canvas. Total: any input produces renderable params.
pub fn normalize_params(raw: &RawParams, theme: &Theme) -> CardParams {
    let (width, height) = canvas_size(number(raw.width.as_ref()), number(raw.height.as_ref()));

    let bg = non_empty(raw.bg.as_deref())
        .or(non_empty(theme.colors.bg_default.as_deref()))
        .unwrap_or(DEFAULT_BG);
    let accent = non_empty(raw.accent.as_deref())
        .or(non_empty(theme.colors.accent_default.as_deref()))
        .unwrap_or(DEFAULT_ACCENT);

    CardParams {
        width,
        height,
        title: raw.title.clone().unwrap_or_default(),
        title_align: title_align(raw.title_align.as_deref()),
        brand: raw.brand.clone().unwrap_or_default(),
        bullets: bullets(raw.bullets.as_deref()),
        bg: hex_to_rgb(bg),
        accent: hex_to_rgb(accent),
        safe_area_pct: number(raw.safe_area_pct.as_ref())
            .filter(|p| *p > 0.0 && *p < 0.5)
            .unwrap_or(DEFAULT_SAFE_AREA_PCT),
        font_family: non_empty(raw.font_family.as_deref())
            .unwrap_or(DEFAULT_FONT_FAMILY)
            .trim()
            .to_string(),
        cjk_only: raw.cjk_only.as_ref().is_none_or(|s| s.is_on()),
        texture: match non_empty(raw.texture.as_deref()).map(str::to_ascii_lowercase) {
            Some(t) if t == "noise" => Texture::Noise,
            _ => Texture::None,
        },
        watermark: raw.watermark.clone().unwrap_or_default(),
        decorations: raw
            .decorations
            .as_ref()
            .map(|items| items.iter().map(decoration).collect()),
        format: output_format(raw.format.as_deref()),
        out: raw
            .out
            .clone()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUT)),
        max_file_mb: number(raw.max_file_mb.as_ref())
            .filter(|mb| mb.is_finite() && *mb > 0.0)
            .unwrap_or(DEFAULT_MAX_FILE_MB),
    }
}

/// Width defaults to 1920 and height to the 16:9 match of the width. A side below the minimum
/// resets the canvas to the 16:9 size whose short side is the minimum.
pub fn canvas_size(width: Option<f64>, height: Option<f64>) -> (u32, u32) {
    let given = |v: Option<f64>| v.filter(|v| v.is_finite() && v.trunc() != 0.0).map(f64::trunc);
    let min = f64::from(MIN_SIDE);

    let mut width = given(width).unwrap_or(f64::from(DEFAULT_WIDTH));
    let mut height = given(height).unwrap_or_else(|| (width * 9.0 / 16.0).round_ties_even());
    if width < min {
        width = min;
        height = (width * 9.0 / 16.0).round_ties_even();
    }
    if height < min {
        height = min;
        width = (height * 16.0 / 9.0).round_ties_even();
    }

    let max = f64::from(MAX_SIDE);
    if width > max || height > max {
        tracing::warn!(width, height, max, "canvas side too large, clamping");
    }
    (width.min(max) as u32, height.min(max) as u32)
}

fn number(n: Option<&Number>) -> Option<f64> {
    n.and_then(Number::value)
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|s| !s.trim().is_empty())
}

fn title_align(s: Option<&str>) -> TitleAlign {
    match non_empty(s).map(|s| s.trim().to_ascii_lowercase()) {
        None => TitleAlign::Center,
        Some(s) if s == "center" => TitleAlign::Center,
        Some(s) if s == "left" => TitleAlign::Left,
        Some(other) => {
            tracing::warn!(title_align = %other, "unknown title alignment, using center");
            TitleAlign::Center
        }
    }
}

fn output_format(s: Option<&str>) -> OutputFormat {
    match non_empty(s).map(|s| s.trim().to_ascii_lowercase()).as_deref() {
        Some("jpg" | "jpeg") => OutputFormat::Jpeg,
        _ => OutputFormat::Png,
    }
}

fn bullets(items: Option<&[serde_json::Value]>) -> Vec<String> {
    let out: Vec<String> = items
        .unwrap_or_default()
        .iter()
        .filter_map(scalar_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    if out.is_empty() {
        vec![EMPTY_BULLET.to_string()]
    } else {
        out
    }
}

fn scalar_text(v: &serde_json::Value) -> Option<String> {
    match v {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn decoration(raw: &RawDecoration) -> Decoration {
    let unit = |v: Option<f32>, default: f32| {
        v.filter(|v| v.is_finite())
            .unwrap_or(default)
            .clamp(0.0, 1.0)
    };
    Decoration {
        x: unit(raw.x, 0.1),
        y: unit(raw.y, 0.1),
        size: unit(raw.size, 0.02),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/normalize.rs"]
mod tests;
