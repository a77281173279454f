//! The fixed set of shapes a card is built from.
//!
//! Each function takes `&mut Canvas` and applies exactly one layer. Degenerate geometry
//! (empty rects, non-positive sizes) draws nothing rather than failing.

use kurbo::Shape as _;

use crate::{
    color::{Rgb, mix},
    foundation::{
        core::{Point, Rect, Vec2},
        error::CardResult,
        math::mul_div255_u8,
    },
    params::Decoration,
    render::{
        blur::{blur_alpha8, kernel_radius},
        canvas::{Canvas, rasterize_mask},
    },
    text::{flow::TextFlow, font::Font},
};

const PATH_TOLERANCE: f64 = 0.1;

/// Filled rounded rectangle, optionally outlined with `stroke_width` pixels inside the shape.
///
/// A non-finite or non-positive radius draws a plain rectangle.
pub fn rounded_rect(
    canvas: &mut Canvas,
    rect: Rect,
    radius: f64,
    fill: Rgb,
    outline: Option<Rgb>,
    stroke_width: f64,
) -> CardResult<()> {
    if !has_area(rect) {
        return Ok(());
    }
    canvas.draw(|ctx| {
        match outline {
            Some(stroke) if stroke_width > 0.0 => {
                ctx.set_paint(stroke.to_cpu_color());
                ctx.fill_path(&panel_path(rect, radius));
                let inner = rect.inset(-stroke_width);
                if has_area(inner) {
                    ctx.set_paint(fill.to_cpu_color());
                    ctx.fill_path(&panel_path(inner, radius - stroke_width));
                }
            }
            _ => {
                ctx.set_paint(fill.to_cpu_color());
                ctx.fill_path(&panel_path(rect, radius));
            }
        }
        Ok(())
    })
}

/// Soft drop shadow under a panel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadowStyle {
    pub color: Rgb,
    /// Peak shadow alpha.
    pub opacity: u8,
    /// Gaussian sigma in pixels.
    pub blur_radius: f32,
    pub offset: Vec2,
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self {
            color: Rgb::BLACK,
            opacity: 80,
            blur_radius: 16.0,
            offset: Vec2::new(0.0, 8.0),
        }
    }
}

/// Rounded panel over a blurred, tinted copy of its own silhouette.
///
/// The panel is snapped to whole pixels. The shadow mask is padded by the blur support so its
/// soft edge is never cut off.
pub fn rounded_rect_with_shadow(
    canvas: &mut Canvas,
    rect: Rect,
    radius: f64,
    fill: Rgb,
    shadow: &ShadowStyle,
) -> CardResult<()> {
    let w = rect.width().trunc();
    let h = rect.height().trunc();
    if w.is_nan() || h.is_nan() || w <= 0.0 || h <= 0.0 {
        return Ok(());
    }

    let pad = kernel_radius(shadow.blur_radius);
    let padf = f64::from(pad);
    let mask_w = w as u32 + 2 * pad;
    let mask_h = h as u32 + 2 * pad;
    let mask = rasterize_mask(mask_w, mask_h, |ctx| {
        ctx.fill_path(&panel_path(Rect::new(padf, padf, padf + w, padf + h), radius));
    })?;
    let mask = blur_alpha8(&mask, mask_w, mask_h, shadow.blur_radius)?;

    let mut layer = Vec::with_capacity(mask.len() * 4);
    for a in mask {
        let a = mul_div255_u8(u16::from(a), u16::from(shadow.opacity));
        layer.extend_from_slice(&shadow.color.to_premul(a).to_array());
    }

    let x0 = rect.x0.trunc();
    let y0 = rect.y0.trunc();
    let sx = (x0 + shadow.offset.x).trunc() as i64 - i64::from(pad);
    let sy = (y0 + shadow.offset.y).trunc() as i64 - i64::from(pad);
    canvas.composite_premul(&layer, mask_w, mask_h, sx, sy)?;

    rounded_rect(
        canvas,
        Rect::new(x0, y0, x0 + w, y0 + h),
        radius,
        fill,
        None,
        0.0,
    )
}

/// Horizontal pill-shaped bar centered on `center_x`, top edge at `y`.
pub fn draw_underline(
    canvas: &mut Canvas,
    center_x: f64,
    y: f64,
    length: f64,
    thickness: f64,
    color: Rgb,
) -> CardResult<()> {
    let radius = (thickness / 2.0).floor().min(999.0);
    rounded_rect(
        canvas,
        underline_rect(center_x, y, length, thickness),
        radius,
        color,
        None,
        0.0,
    )
}

/// Box covered by [`draw_underline`]; ends are truncated to whole pixels.
pub fn underline_rect(center_x: f64, y: f64, length: f64, thickness: f64) -> Rect {
    let x1 = (center_x - length / 2.0).trunc();
    let x2 = (center_x + length / 2.0).trunc();
    Rect::new(x1, y, x2, y + thickness)
}

/// Solid square of side `size` centered on `center`, rotated counter-clockwise by `angle_deg`.
pub fn draw_rotated_square(
    canvas: &mut Canvas,
    center: Point,
    size: f64,
    color: Rgb,
    angle_deg: f64,
) -> CardResult<()> {
    if size.is_nan() || size <= 0.0 {
        return Ok(());
    }
    let path = rotated_square_path(center, size, angle_deg);
    canvas.draw(|ctx| {
        ctx.set_paint(color.to_cpu_color());
        ctx.fill_path(&path);
        Ok(())
    })
}

/// Accent-tinted diamonds at relative positions. Lighter on dark backgrounds, darker on light.
pub fn draw_decorations(
    canvas: &mut Canvas,
    items: &[Decoration],
    accent: Rgb,
    bg: Rgb,
) -> CardResult<()> {
    let color = decoration_color(accent, bg);
    let (w, h) = canvas.size();
    let (w, h) = (f64::from(w), f64::from(h));
    let min_side = w.min(h);

    let paths: Vec<_> = items
        .iter()
        .filter_map(|it| {
            let center = Point::new(
                (f64::from(it.x) * w).trunc(),
                (f64::from(it.y) * h).trunc(),
            );
            let size = (f64::from(it.size) * min_side).trunc();
            (size > 0.0).then(|| rotated_square_path(center, size, 45.0))
        })
        .collect();
    if paths.is_empty() {
        return Ok(());
    }

    canvas.draw(|ctx| {
        ctx.set_paint(color.to_cpu_color());
        for path in &paths {
            ctx.fill_path(path);
        }
        Ok(())
    })
}

pub(crate) fn decoration_color(accent: Rgb, bg: Rgb) -> Rgb {
    if bg.is_dark() {
        mix(accent, Rgb::WHITE, 0.15)
    } else {
        mix(accent, Rgb::BLACK, 0.15)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BulletStyle {
    /// Line advance as a multiple of the font's line height.
    pub line_spacing: f64,
    /// Dot radius as a fraction of the line height.
    pub bullet_radius_ratio: f64,
}

impl Default for BulletStyle {
    fn default() -> Self {
        Self {
            line_spacing: 1.15,
            bullet_radius_ratio: 0.38,
        }
    }
}

/// Draw `bullets` top-down inside `area`, each item wrapped to the space right of its dot.
///
/// Stops at the first line whose box would cross the bottom of `area`. Returns the number of
/// text lines drawn.
#[allow(clippy::too_many_arguments)]
pub fn draw_bullet_list(
    canvas: &mut Canvas,
    flow: &mut TextFlow,
    font: &Font,
    bullets: &[String],
    area: Rect,
    text_color: Rgb,
    bullet_color: Rgb,
    style: &BulletStyle,
) -> CardResult<usize> {
    let line_h = flow.line_height(font);
    let r = (line_h * style.bullet_radius_ratio).trunc().max(2.0);
    let gap = (r * 2.0).max(8.0);
    let avail = area.width() - (r * 2.0 + gap);
    let text_x = area.x0 + r * 2.0 + gap;
    let advance = (line_h * style.line_spacing).trunc();

    let mut placed: Vec<(Option<Point>, Point, String)> = Vec::new();
    let mut y = area.y0;
    'items: for item in bullets {
        for (i, line) in flow.wrap_text(font, item, avail).into_iter().enumerate() {
            if y + line_h > area.y1 {
                break 'items;
            }
            let dot = (i == 0).then(|| Point::new(area.x0 + r, y + (line_h / 2.0).floor()));
            placed.push((dot, Point::new(text_x, y), line));
            y += advance;
        }
    }
    if placed.is_empty() {
        return Ok(0);
    }

    canvas.draw(|ctx| {
        for (dot, origin, line) in &placed {
            if let Some(center) = dot {
                ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                ctx.set_paint(bullet_color.to_cpu_color());
                ctx.fill_path(&shape_to_cpu(&kurbo::Circle::new(*center, r)));
            }
            flow.fill_text(ctx, font, *origin, line, text_color)?;
        }
        Ok(())
    })?;
    Ok(placed.len())
}

fn has_area(rect: Rect) -> bool {
    rect.width() > 0.0 && rect.height() > 0.0
}

fn panel_path(rect: Rect, radius: f64) -> vello_cpu::kurbo::BezPath {
    if radius.is_finite() && radius > 0.0 {
        shape_to_cpu(&kurbo::RoundedRect::from_rect(rect, radius))
    } else {
        shape_to_cpu(&rect)
    }
}

fn rotated_square_path(center: Point, size: f64, angle_deg: f64) -> vello_cpu::kurbo::BezPath {
    let half = size / 2.0;
    let square = Rect::new(-half, -half, half, half).to_path(PATH_TOLERANCE);
    // y points down, so a counter-clockwise turn is a negative angle
    let affine =
        kurbo::Affine::translate(center.to_vec2()) * kurbo::Affine::rotate(-angle_deg.to_radians());
    shape_to_cpu(&(affine * square))
}

fn point_to_cpu(p: Point) -> vello_cpu::kurbo::Point {
    vello_cpu::kurbo::Point::new(p.x, p.y)
}

fn shape_to_cpu(shape: &impl kurbo::Shape) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in shape.path_elements(PATH_TOLERANCE) {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/primitives.rs"]
mod tests;
