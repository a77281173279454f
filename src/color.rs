//! Color helpers: hex parsing, WCAG contrast and blending.
//!
//! Parsing is total: malformed input maps to [`Rgb::FALLBACK`] so upstream mistakes never abort
//! a render.

use crate::foundation::core::Rgba8Premul;

/// Straight (non-premultiplied) 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Neutral gray returned for unparsable color strings.
    pub const FALLBACK: Rgb = Rgb::new(240, 240, 240);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn mean(self) -> f64 {
        (f64::from(self.r) + f64::from(self.g) + f64::from(self.b)) / 3.0
    }

    /// Mean channel value below 128. Selects the lightened decoration tint.
    pub fn is_dark(self) -> bool {
        self.mean() < 128.0
    }

    /// Mean channel value above 128. Selects the lighter panel shadow.
    ///
    /// A mean of exactly 128 is neither dark nor light.
    pub fn is_light(self) -> bool {
        self.mean() > 128.0
    }

    pub fn to_premul(self, alpha: u8) -> Rgba8Premul {
        Rgba8Premul::from_straight_rgba(self.r, self.g, self.b, alpha)
    }

    pub fn to_cpu_color(self) -> vello_cpu::peniko::Color {
        vello_cpu::peniko::Color::from_rgba8(self.r, self.g, self.b, 255)
    }
}

impl From<[u8; 3]> for Rgb {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

/// Parse `#RGB` / `#RRGGBB` (hash optional). Anything else yields [`Rgb::FALLBACK`].
pub fn hex_to_rgb(s: &str) -> Rgb {
    let s = s.trim().trim_start_matches('#');
    if !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return Rgb::FALLBACK;
    }
    let expanded: String = match s.len() {
        3 => s.chars().flat_map(|c| [c, c]).collect(),
        6 => s.to_string(),
        _ => return Rgb::FALLBACK,
    };

    let channel = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16);
    match (channel(0), channel(2), channel(4)) {
        (Ok(r), Ok(g), Ok(b)) => Rgb::new(r, g, b),
        _ => Rgb::FALLBACK,
    }
}

pub fn rgb_to_hex(c: Rgb) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r, c.g, c.b)
}

fn srgb_to_linear(v: u8) -> f64 {
    let v = f64::from(v) / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

pub fn relative_luminance(c: Rgb) -> f64 {
    0.2126 * srgb_to_linear(c.r) + 0.7152 * srgb_to_linear(c.g) + 0.0722 * srgb_to_linear(c.b)
}

/// WCAG contrast ratio, always `>= 1.0`.
pub fn contrast_ratio(c1: Rgb, c2: Rgb) -> f64 {
    let (l1, l2) = (relative_luminance(c1), relative_luminance(c2));
    let (light, dark) = if l1 >= l2 { (l1, l2) } else { (l2, l1) };
    (light + 0.05) / (dark + 0.05)
}

/// White or black, whichever contrasts more with `bg`. Ties go to white.
pub fn pick_text_color(bg: Rgb) -> Rgb {
    if contrast_ratio(bg, Rgb::WHITE) >= contrast_ratio(bg, Rgb::BLACK) {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}

/// Linear blend from `a` (t = 0) to `b` (t = 1); channels are truncated, not rounded.
pub fn mix(a: Rgb, b: Rgb, t: f64) -> Rgb {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    let lerp = |x: u8, y: u8| -> u8 { (f64::from(x) * (1.0 - t) + f64::from(y) * t) as u8 };
    Rgb::new(lerp(a.r, b.r), lerp(a.g, b.g), lerp(a.b, b.b))
}

#[cfg(test)]
#[path = "../tests/unit/color.rs"]
mod tests;
