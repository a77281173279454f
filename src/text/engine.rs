use std::collections::HashMap;

use crate::{
    foundation::error::{CardError, CardResult},
    text::font::FontFile,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
/// RGBA8 brush color used by Parley text layout.
pub struct TextBrushRgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

/// Stateful helper for shaping single lines with Parley from in-memory font files.
///
/// Each font file is registered with the font collection once; the resolved family name is
/// remembered per [`FontFile::id`]. Files that do not parse are remembered as unusable.
pub struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<TextBrushRgba8>,
    families: HashMap<u64, Option<String>>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            families: HashMap::new(),
        }
    }

    /// Register `file` (once) and return its primary family name, or `None` when the bytes
    /// hold no usable face.
    pub fn register(&mut self, file: &FontFile) -> Option<String> {
        if let Some(known) = self.families.get(&file.id()) {
            return known.clone();
        }

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(file.bytes().to_vec()), None);
        let family_name = families.first().and_then(|(id, _)| {
            self.font_ctx
                .collection
                .family_name(*id)
                .map(|name| name.to_string())
        });

        self.families.insert(file.id(), family_name.clone());
        family_name
    }

    /// Shape `text` as one unbroken line.
    pub fn layout_line(
        &mut self,
        text: &str,
        file: &FontFile,
        size_px: f32,
        brush: TextBrushRgba8,
    ) -> CardResult<parley::Layout<TextBrushRgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(CardError::raster("text size_px must be finite and > 0"));
        }

        let family_name = self.register(file).ok_or_else(|| {
            CardError::raster(format!(
                "no font families registered from '{}'",
                file.path().display()
            ))
        })?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family_name)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::Brush(brush));

        let mut layout: parley::Layout<TextBrushRgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }
}

/// Widest line advance of a shaped layout.
pub(crate) fn layout_advance(layout: &parley::Layout<TextBrushRgba8>) -> f32 {
    layout
        .lines()
        .map(|line| line.metrics().advance)
        .fold(0.0f32, f32::max)
}

/// Vertical extent of the ink of every glyph in `layout`, in pixels.
///
/// Glyph outline boxes come from `file`; glyphs without an outline (spaces) are ignored.
/// `None` when the face does not parse or nothing has ink.
pub(crate) fn layout_ink_height(
    layout: &parley::Layout<TextBrushRgba8>,
    file: &FontFile,
) -> Option<f32> {
    let face = ttf_parser::Face::parse(file.bytes(), file.index()).ok()?;
    let units_per_em = f32::from(face.units_per_em());
    if units_per_em <= 0.0 {
        return None;
    }

    let mut top = f32::INFINITY;
    let mut bottom = f32::NEG_INFINITY;
    for line in layout.lines() {
        for item in line.items() {
            let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                continue;
            };
            let scale = run.run().font_size() / units_per_em;
            for glyph in run.positioned_glyphs() {
                let Ok(id) = u16::try_from(glyph.id) else {
                    continue;
                };
                let Some(bbox) = face.glyph_bounding_box(ttf_parser::GlyphId(id)) else {
                    continue;
                };
                // font units are y-up, layout coordinates y-down
                top = top.min(glyph.y - f32::from(bbox.y_max) * scale);
                bottom = bottom.max(glyph.y - f32::from(bbox.y_min) * scale);
            }
        }
    }
    (bottom > top).then_some(bottom - top)
}
