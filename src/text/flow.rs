//! Text measurement and line wrapping.
//!
//! Two wrapping policies exist. Text containing whitespace is wrapped greedily by words and a
//! word is never split, even when it alone is wider than the limit. Text without whitespace but
//! with CJK ideographs has no word boundaries, so it is wrapped greedily per character. Anything
//! else falls back to word wrapping (which keeps it whole on one line).

use unicode_width::UnicodeWidthChar as _;

use crate::{
    color::Rgb,
    foundation::{core::Point, error::CardResult},
    render::canvas::Canvas,
    text::{
        engine::{TextBrushRgba8, TextLayoutEngine, layout_advance, layout_ink_height},
        font::{Font, FontFace, FontFile},
    },
};

/// Horizontal advance of one terminal cell for the builtin face, as a fraction of the size.
const BUILTIN_CELL_ADVANCE: f32 = 0.5;

/// A capital and a descender span the full ink height of a line of text.
const INK_SAMPLE_TEXT: &str = "Hg";

const CJK_RANGES: [(u32, u32); 8] = [
    (0x4E00, 0x9FFF),
    (0x3400, 0x4DBF),
    (0x20000, 0x2A6DF),
    (0x2A700, 0x2B73F),
    (0x2B740, 0x2B81F),
    (0x2B820, 0x2CEAF),
    (0xF900, 0xFAFF),
    (0x2F800, 0x2FA1F),
];

pub fn is_cjk(ch: char) -> bool {
    let code = u32::from(ch);
    CJK_RANGES
        .iter()
        .any(|&(lo, hi)| (lo..=hi).contains(&code))
}

pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum WrapMode {
    Words,
    Chars,
}

/// Which policy [`TextFlow::wrap_text`] applies to `text`.
pub fn wrap_mode(text: &str) -> WrapMode {
    if text.chars().any(char::is_whitespace) {
        WrapMode::Words
    } else if contains_cjk(text) {
        WrapMode::Chars
    } else {
        WrapMode::Words
    }
}

/// Measures, wraps and draws text. Owns the shaping contexts for one render.
#[derive(Default)]
pub struct TextFlow {
    engine: TextLayoutEngine,
}

impl TextFlow {
    pub fn new() -> Self {
        Self {
            engine: TextLayoutEngine::new(),
        }
    }

    /// Register a font file with the shaping engine; `None` means the file is unusable.
    pub fn register(&mut self, file: &FontFile) -> Option<String> {
        self.engine.register(file)
    }

    /// Family name the font resolved to, for diagnostics.
    pub fn family_name(&mut self, font: &Font) -> String {
        match font.face() {
            FontFace::File(file) => self
                .engine
                .register(file)
                .unwrap_or_else(|| "unknown".to_string()),
            FontFace::Builtin => "builtin".to_string(),
        }
    }

    /// Shaped advance width of `text` in whole pixels.
    pub fn text_width(&mut self, font: &Font, text: &str) -> f64 {
        if text.is_empty() {
            return 0.0;
        }
        let width = match font.face() {
            FontFace::File(file) => {
                match self
                    .engine
                    .layout_line(text, file, font.size_px(), TextBrushRgba8::default())
                {
                    Ok(layout) => layout_advance(&layout),
                    Err(e) => {
                        tracing::debug!(error = %e, "shaping failed, using builtin metrics");
                        builtin_width(font.size_px(), text)
                    }
                }
            }
            FontFace::Builtin => builtin_width(font.size_px(), text),
        };
        f64::from(width).trunc()
    }

    /// Ink height of `"Hg"` (cap top to descender bottom), rounded to whole pixels, at least 1.
    ///
    /// Faces that cannot be measured use the font size.
    pub fn line_height(&mut self, font: &Font) -> f64 {
        let height = match font.face() {
            FontFace::File(file) => self
                .engine
                .layout_line(INK_SAMPLE_TEXT, file, font.size_px(), TextBrushRgba8::default())
                .ok()
                .and_then(|layout| layout_ink_height(&layout, file))
                .unwrap_or_else(|| font.size_px()),
            FontFace::Builtin => font.size_px(),
        };
        f64::from(height).round().max(1.0)
    }

    /// Break `text` into lines no wider than `max_width` where the policy allows it.
    ///
    /// Always returns at least one line; empty text yields `[""]`.
    pub fn wrap_text(&mut self, font: &Font, text: &str, max_width: f64) -> Vec<String> {
        if text.is_empty() {
            return vec![String::new()];
        }
        match wrap_mode(text) {
            WrapMode::Words => self.wrap_by_word(font, text, max_width),
            WrapMode::Chars => self.wrap_by_char(font, text, max_width),
        }
    }

    fn wrap_by_char(&mut self, font: &Font, text: &str, max_width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line = String::new();
        for ch in text.chars() {
            let mut candidate = line.clone();
            candidate.push(ch);
            if line.is_empty() || self.text_width(font, &candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::take(&mut line));
                line.push(ch);
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
        ensure_one_line(lines)
    }

    fn wrap_by_word(&mut self, font: &Font, text: &str, max_width: f64) -> Vec<String> {
        let mut lines = Vec::new();
        let mut line = String::new();
        for word in text.split_whitespace() {
            let candidate = if line.is_empty() {
                word.to_string()
            } else {
                format!("{line} {word}")
            };
            if line.is_empty() || self.text_width(font, &candidate) <= max_width {
                line = candidate;
            } else {
                lines.push(std::mem::replace(&mut line, word.to_string()));
            }
        }
        if !line.is_empty() {
            lines.push(line);
        }
        ensure_one_line(lines)
    }

    /// Draw one line of text with the top of its line box at `origin`.
    pub fn draw_text(
        &mut self,
        canvas: &mut Canvas,
        font: &Font,
        origin: Point,
        text: &str,
        color: Rgb,
    ) -> CardResult<()> {
        if text.is_empty() {
            return Ok(());
        }
        canvas.draw(|ctx| self.fill_text(ctx, font, origin, text, color))
    }

    /// Record the glyphs of one line into an open render context.
    pub(crate) fn fill_text(
        &mut self,
        ctx: &mut vello_cpu::RenderContext,
        font: &Font,
        origin: Point,
        text: &str,
        color: Rgb,
    ) -> CardResult<()> {
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(color.to_cpu_color());

        let file = match font.face() {
            FontFace::File(file) => file,
            FontFace::Builtin => {
                fill_builtin_glyphs(ctx, font.size_px(), origin, text);
                return Ok(());
            }
        };

        let brush = TextBrushRgba8 {
            r: color.r,
            g: color.g,
            b: color.b,
            a: 255,
        };
        let layout = match self.engine.layout_line(text, file, font.size_px(), brush) {
            Ok(layout) => layout,
            Err(e) => {
                tracing::debug!(error = %e, "shaping failed, drawing builtin glyphs");
                fill_builtin_glyphs(ctx, font.size_px(), origin, text);
                return Ok(());
            }
        };

        ctx.set_transform(vello_cpu::kurbo::Affine::translate((origin.x, origin.y)));
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                ctx.glyph_run(file.cpu_font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        Ok(())
    }
}

fn ensure_one_line(lines: Vec<String>) -> Vec<String> {
    if lines.is_empty() {
        vec![String::new()]
    } else {
        lines
    }
}

fn builtin_advance(size_px: f32, ch: char) -> f32 {
    let cells = ch.width().unwrap_or(0) as f32;
    cells * BUILTIN_CELL_ADVANCE * size_px
}

fn builtin_width(size_px: f32, text: &str) -> f32 {
    text.chars().map(|ch| builtin_advance(size_px, ch)).sum()
}

/// Hollow "tofu" boxes, one per visible character.
fn fill_builtin_glyphs(ctx: &mut vello_cpu::RenderContext, size_px: f32, origin: Point, text: &str) {
    use vello_cpu::kurbo::Rect;

    ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
    let size = f64::from(size_px);
    let stroke = (size * 0.08).max(1.0);
    let mut x = origin.x;
    for ch in text.chars() {
        let advance = f64::from(builtin_advance(size_px, ch));
        if advance > 0.0 && !ch.is_whitespace() {
            let x0 = x + advance * 0.12;
            let x1 = x + advance * 0.88;
            let y0 = origin.y + size * 0.15;
            let y1 = origin.y + size * 0.85;
            ctx.fill_rect(&Rect::new(x0, y0, x1, y0 + stroke));
            ctx.fill_rect(&Rect::new(x0, y1 - stroke, x1, y1));
            ctx.fill_rect(&Rect::new(x0, y0, x0 + stroke, y1));
            ctx.fill_rect(&Rect::new(x1 - stroke, y0, x1, y1));
        }
        x += advance;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/flow.rs"]
mod tests;
