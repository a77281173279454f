use std::path::{Path, PathBuf};

use crate::{
    color::{Rgb, mix, pick_text_color},
    foundation::{
        core::{Point, Rect, Vec2},
        error::CardResult,
    },
    layout::fit::{TITLE_AREA_PCT, TitleRequest, fit_title},
    params::{CardParams, Decoration, Texture, TitleAlign},
    render::{
        canvas::Canvas,
        primitives::{
            BulletStyle, ShadowStyle, draw_bullet_list, draw_decorations, draw_underline,
            rounded_rect_with_shadow, underline_rect,
        },
        texture::apply_noise,
    },
    text::{
        flow::TextFlow,
        font::Font,
        resolve::{FontLibrary, log_font_triple, watermark_candidates},
    },
};

/// Diamonds drawn when the params do not list any.
pub const DEFAULT_DECORATIONS: [Decoration; 2] = [
    Decoration {
        x: 0.08,
        y: 0.82,
        size: 0.035,
    },
    Decoration {
        x: 0.93,
        y: 0.18,
        size: 0.028,
    },
];

const BRAND_BAND_PCT: f64 = 0.08;
const TITLE_LINE_ADVANCE: f64 = 1.15;
const LEFT_TITLE_WIDTH_PCT: f64 = 0.86;
const PANEL_WIDTH_PCT: f64 = 0.74;
const PANEL_HEIGHT_PCT: f64 = 0.25;
const WATERMARK_SIZE_PCT: f64 = 0.025;

/// Package directory holding the bundled font files.
pub fn default_fonts_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("assets").join("fonts")
}

/// Environment of a render that is not part of the card itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderOptions {
    /// Directory searched for `{family}-{style}.ttf`.
    pub fonts_dir: PathBuf,
    /// Allow OS font directories and the system font database as fallbacks.
    pub system_fonts: bool,
    /// Report the resolved fonts through `tracing` at info level.
    pub debug_fonts: bool,
    /// Seed of the noise texture; equal seeds give identical images.
    pub noise_seed: u64,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fonts_dir: default_fonts_dir(),
            system_fonts: true,
            debug_fonts: false,
            noise_seed: 0x5EED_CA4D,
        }
    }
}

/// Measurements taken while rendering, for callers that check placement.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderReport {
    pub foreground: Rgb,
    pub title_lines: Vec<String>,
    pub title_size_px: f32,
    pub title_fits_area: bool,
    pub underline: Rect,
    pub panel: Rect,
    pub bullet_area: Rect,
    pub bullet_lines: usize,
}

/// Render the card described by `params`.
pub fn render_card(params: &CardParams, options: &RenderOptions) -> CardResult<Canvas> {
    render_card_with_report(params, options).map(|(canvas, _)| canvas)
}

/// Render the card and report where its parts ended up.
///
/// Fails only when the canvas cannot be allocated by the rasterizer; missing fonts and empty
/// shapes degrade instead.
#[tracing::instrument(skip_all, fields(width = params.width, height = params.height))]
pub fn render_card_with_report(
    params: &CardParams,
    options: &RenderOptions,
) -> CardResult<(Canvas, RenderReport)> {
    let w = f64::from(params.width);
    let h = f64::from(params.height);
    let min_side = w.min(h);
    let fg = pick_text_color(params.bg);

    let mut canvas = Canvas::new(params.width, params.height, params.bg)?;
    if params.texture == Texture::Noise {
        apply_noise(&mut canvas, options.noise_seed);
    }
    let mut flow = TextFlow::new();
    let mut library = FontLibrary::new(&options.fonts_dir, options.system_fonts);

    let safe = (min_side * params.safe_area_pct).trunc();
    let content_w = w - safe * 2.0;

    let brand = params.brand.trim();
    let band = if brand.is_empty() {
        0.0
    } else {
        (h * BRAND_BAND_PCT).trunc()
    };
    let title_top = safe + band;
    let area_h = (h * TITLE_AREA_PCT).trunc();

    let max_width = match params.title_align {
        TitleAlign::Center => content_w,
        TitleAlign::Left => (content_w * LEFT_TITLE_WIDTH_PCT).trunc(),
    };
    let fit = fit_title(
        &mut flow,
        &mut library,
        &TitleRequest {
            title: &params.title,
            family: &params.font_family,
            cjk_only: params.cjk_only,
            max_width,
            canvas_height: h,
        },
    );
    if options.debug_fonts {
        log_font_triple(&mut flow, &fit.fonts);
    }

    if !brand.is_empty() {
        flow.draw_text(
            &mut canvas,
            &fit.fonts.brand,
            Point::new(safe, safe),
            brand,
            fg,
        )?;
    }

    // title block
    let line_h = fit.line_height;
    let n = fit.lines.len() as f64;
    let mut y = match params.title_align {
        TitleAlign::Center => title_top + ((area_h - line_h * n) * 0.35).trunc(),
        TitleAlign::Left => title_top,
    };
    let mut placed = Vec::with_capacity(fit.lines.len());
    for line in &fit.lines {
        let x = match params.title_align {
            TitleAlign::Center => (w / 2.0 - flow.text_width(&fit.fonts.title, line) / 2.0).trunc(),
            TitleAlign::Left => safe,
        };
        placed.push(Point::new(x, y));
        y += (line_h * TITLE_LINE_ADVANCE).trunc();
    }
    canvas.draw(|ctx| {
        for (origin, line) in placed.iter().zip(&fit.lines) {
            flow.fill_text(ctx, &fit.fonts.title, *origin, line, fg)?;
        }
        Ok(())
    })?;

    // underline, measured against the whole title run
    let joined_w = flow.text_width(&fit.fonts.title, &fit.lines.concat());
    let cap_pct = match params.title_align {
        TitleAlign::Center => 0.28,
        TitleAlign::Left => 0.30,
    };
    let underline_len = (w * cap_pct).min(joined_w * 0.9).trunc().max((w * 0.18).trunc());
    let thickness = (h * 0.008).trunc().max(6.0);
    let underline_y = y + (h * 0.01).trunc();
    let underline_cx = match params.title_align {
        TitleAlign::Center => (w / 2.0).floor(),
        TitleAlign::Left => safe + (underline_len / 2.0).floor(),
    };
    draw_underline(
        &mut canvas,
        underline_cx,
        underline_y,
        underline_len,
        thickness,
        params.accent,
    )?;

    // info panel
    let card_h = (h * PANEL_HEIGHT_PCT).trunc();
    let card_w = (content_w * PANEL_WIDTH_PCT).trunc();
    let card_x = (w / 2.0 - card_w / 2.0).trunc();
    let card_y = h - safe - card_h;
    let panel = Rect::new(card_x, card_y, card_x + card_w, card_y + card_h);
    let shadow = ShadowStyle {
        color: mix(params.bg, Rgb::BLACK, 0.7),
        opacity: if params.bg.is_light() { 90 } else { 140 },
        blur_radius: (min_side * 0.02).trunc() as f32,
        offset: Vec2::new(0.0, (h * 0.01).trunc()),
    };
    rounded_rect_with_shadow(
        &mut canvas,
        panel,
        (min_side * 0.03).trunc(),
        Rgb::WHITE,
        &shadow,
    )?;

    let pad_x = (card_w * 0.06).trunc();
    let pad_y = (card_h * 0.12).trunc();
    let bullet_area = Rect::new(
        card_x + pad_x,
        card_y + pad_y,
        card_x + card_w - pad_x,
        card_y + card_h - pad_y,
    );
    let bullet_lines = draw_bullet_list(
        &mut canvas,
        &mut flow,
        &fit.fonts.body,
        &params.bullets,
        bullet_area,
        Rgb::BLACK,
        params.accent,
        &BulletStyle::default(),
    )?;

    let decorations = params
        .decorations
        .as_deref()
        .unwrap_or(&DEFAULT_DECORATIONS);
    draw_decorations(&mut canvas, decorations, params.accent, params.bg)?;

    let watermark = params.watermark.trim();
    if !watermark.is_empty() {
        let candidates = watermark_candidates(&params.font_family, library.fonts_dir());
        let face = library.resolve(&mut flow, &candidates);
        let font = Font::new(face, (h * WATERMARK_SIZE_PCT).trunc() as f32);
        let tw = flow.text_width(&font, watermark);
        let origin = Point::new(w - safe - tw, h - safe - (h * 0.02).trunc());
        flow.draw_text(
            &mut canvas,
            &font,
            origin,
            watermark,
            mix(params.bg, Rgb::BLACK, 0.4),
        )?;
    }

    let report = RenderReport {
        foreground: fg,
        title_lines: fit.lines.clone(),
        title_size_px: fit.fonts.title.size_px(),
        title_fits_area: fit.fits_area,
        underline: underline_rect(underline_cx, underline_y, underline_len, thickness),
        panel,
        bullet_area,
        bullet_lines,
    };
    Ok((canvas, report))
}

#[cfg(test)]
#[path = "../../tests/unit/layout/engine.rs"]
mod tests;
