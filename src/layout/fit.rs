//! Title-fit search: the largest title size whose wrapped text stays within two lines and the
//! title area.

use crate::text::{
    flow::{TextFlow, WrapMode, wrap_mode},
    font::FontTriple,
    resolve::FontLibrary,
};

/// Height of the title area as a fraction of the canvas height.
pub const TITLE_AREA_PCT: f64 = 0.40;
pub const MAX_TITLE_LINES: usize = 2;
/// Extra space between title lines, as a fraction of the line height.
pub const TITLE_LINE_GAP: f64 = 0.15;
pub const MIN_TITLE_PX: f64 = 12.0;
pub const BODY_SIZE_PCT: f64 = 0.035;

const MAX_TITLE_PERCENT: u32 = 16;
const MIN_TITLE_PERCENT: u32 = 8;

/// Title sizes tried, as fractions of the canvas height, largest first.
pub fn title_size_candidates() -> impl Iterator<Item = f64> {
    (MIN_TITLE_PERCENT..=MAX_TITLE_PERCENT)
        .rev()
        .map(|pct| f64::from(pct) / 100.0)
}

#[derive(Clone, Copy, Debug)]
pub struct TitleRequest<'a> {
    pub title: &'a str,
    pub family: &'a str,
    pub cjk_only: bool,
    /// Width available to each title line.
    pub max_width: f64,
    pub canvas_height: f64,
}

/// Outcome of [`fit_title`].
#[derive(Clone, Debug)]
pub struct TitleFit {
    pub fonts: FontTriple,
    /// At most [`MAX_TITLE_LINES`] lines.
    pub lines: Vec<String>,
    pub line_height: f64,
    pub size_pct: f64,
    /// Whether the block fits the title area; `false` when only the line limit could be met.
    pub fits_area: bool,
}

/// Pixel height of `n` title lines at `line_height`, gaps included.
pub fn title_block_height(line_height: f64, n: usize) -> f64 {
    let n = n as f64;
    (line_height * (n + TITLE_LINE_GAP * (n - 1.0))).trunc()
}

/// Walk the size candidates from largest to smallest.
///
/// Sizes that wrap to more than two lines are skipped. The first size whose block fits the
/// title area wins; when none fits, the smallest size that met the line limit is used. If no
/// size meets the line limit, the smallest size is used and its overflow folded into the second
/// line.
pub fn fit_title(
    flow: &mut TextFlow,
    library: &mut FontLibrary,
    req: &TitleRequest<'_>,
) -> TitleFit {
    let area_h = (req.canvas_height * TITLE_AREA_PCT).trunc();
    let mut best: Option<TitleFit> = None;

    for pct in title_size_candidates() {
        let fit = evaluate(flow, library, req, pct, area_h);
        if fit.lines.len() > MAX_TITLE_LINES {
            tracing::debug!(pct, lines = fit.lines.len(), "title wraps past the line limit");
            continue;
        }
        let fits_area = fit.fits_area;
        best = Some(fit);
        if fits_area {
            break;
        }
    }

    if let Some(fit) = best {
        tracing::debug!(pct = fit.size_pct, lines = fit.lines.len(), fits_area = fit.fits_area, "title size chosen");
        return fit;
    }

    let mut fit = evaluate(
        flow,
        library,
        req,
        f64::from(MIN_TITLE_PERCENT) / 100.0,
        area_h,
    );
    fit.lines = fold_overflow(fit.lines, wrap_mode(req.title));
    fit.fits_area = title_block_height(fit.line_height, fit.lines.len()) <= area_h;
    tracing::debug!(pct = fit.size_pct, "title folded into two lines at the smallest size");
    fit
}

fn evaluate(
    flow: &mut TextFlow,
    library: &mut FontLibrary,
    req: &TitleRequest<'_>,
    pct: f64,
    area_h: f64,
) -> TitleFit {
    let title_size = (req.canvas_height * pct).trunc().max(MIN_TITLE_PX);
    let body_size = (req.canvas_height * BODY_SIZE_PCT).trunc();
    let fonts = library.load_triple(
        flow,
        req.family,
        req.cjk_only,
        title_size as f32,
        body_size as f32,
    );
    let lines = flow.wrap_text(&fonts.title, req.title, req.max_width);
    let line_height = flow.line_height(&fonts.title);
    let fits_area = title_block_height(line_height, lines.len()) <= area_h;
    TitleFit {
        fonts,
        lines,
        line_height,
        size_pct: pct,
        fits_area,
    }
}

/// Keep the first line and join everything after it into the second.
fn fold_overflow(mut lines: Vec<String>, mode: WrapMode) -> Vec<String> {
    if lines.len() <= MAX_TITLE_LINES {
        return lines;
    }
    let sep = match mode {
        WrapMode::Words => " ",
        WrapMode::Chars => "",
    };
    let rest = lines.split_off(1).join(sep);
    lines.push(rest);
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/layout/fit.rs"]
mod tests;
