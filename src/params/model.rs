use std::path::PathBuf;

use crate::color::Rgb;

/// Card parameters as they arrive from JSON, presets or the command line.
///
/// Every field is optional; [`crate::params::normalize_params`] fills the gaps. Unknown keys are
/// ignored so preset files may carry extra metadata.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RawParams {
    pub preset: Option<String>,
    pub title: Option<String>,
    pub brand: Option<String>,
    /// Items may be strings or plain scalars; numbers are rendered as written.
    pub bullets: Option<Vec<serde_json::Value>>,
    pub bg: Option<String>,
    pub accent: Option<String>,
    pub title_align: Option<String>,
    pub width: Option<Number>,
    pub height: Option<Number>,
    pub safe_area_pct: Option<Number>,
    pub format: Option<String>,
    pub out: Option<PathBuf>,
    pub max_file_mb: Option<Number>,
    pub texture: Option<String>,
    pub watermark: Option<String>,
    pub font_family: Option<String>,
    pub cjk_only: Option<Switch>,
    pub decorations: Option<Vec<RawDecoration>>,
}

/// A boolean that also accepts numbers (zero is off) and the command-line spellings
/// `"on"` / `"off"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Switch {
    Bool(bool),
    Number(f64),
    Text(String),
}

impl Switch {
    pub fn is_on(&self) -> bool {
        match self {
            Switch::Bool(b) => *b,
            Switch::Number(n) => *n != 0.0,
            Switch::Text(s) => matches!(
                s.trim().to_ascii_lowercase().as_str(),
                "on" | "true" | "yes" | "1"
            ),
        }
    }
}

/// A number that may also be written as a numeric string, e.g. `"1920"`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum Number {
    Value(f64),
    Text(String),
}

impl Number {
    /// `None` when the text does not parse; the field then takes its default.
    pub fn value(&self) -> Option<f64> {
        match self {
            Number::Value(v) => Some(*v),
            Number::Text(s) => s.trim().parse().ok(),
        }
    }
}

impl From<f64> for Number {
    fn from(v: f64) -> Self {
        Number::Value(v)
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RawDecoration {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub size: Option<f32>,
}

/// Fully-defaulted parameters consumed by the renderer and exporter.
#[derive(Clone, Debug, PartialEq)]
pub struct CardParams {
    pub width: u32,
    pub height: u32,
    pub title: String,
    pub title_align: TitleAlign,
    pub brand: String,
    /// Never empty.
    pub bullets: Vec<String>,
    pub bg: Rgb,
    pub accent: Rgb,
    /// Inner margin as a fraction of the smaller canvas side, in `(0, 0.5)`.
    pub safe_area_pct: f64,
    pub font_family: String,
    pub cjk_only: bool,
    pub texture: Texture,
    pub watermark: String,
    /// `None` selects the default pair of diamonds.
    pub decorations: Option<Vec<Decoration>>,
    pub format: OutputFormat,
    pub out: PathBuf,
    pub max_file_mb: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TitleAlign {
    #[default]
    Center,
    Left,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Texture {
    #[default]
    None,
    Noise,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Png,
    Jpeg,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Png => "png",
            OutputFormat::Jpeg => "jpg",
        }
    }
}

/// A diamond placed at a position relative to the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    /// Horizontal center, fraction of the width.
    pub x: f32,
    /// Vertical center, fraction of the height.
    pub y: f32,
    /// Side length, fraction of the smaller canvas side.
    pub size: f32,
}

/// Theme file contents. Only the two default colors are read.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct Theme {
    pub colors: ThemeColors,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ThemeColors {
    pub bg_default: Option<String>,
    pub accent_default: Option<String>,
}

#[cfg(test)]
#[path = "../../tests/unit/params/model.rs"]
mod tests;
