//! Encoding the finished card under a file-size budget.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use image::{
    DynamicImage,
    codecs::{
        jpeg::JpegEncoder,
        png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    },
    imageops::FilterType,
};

use crate::{
    foundation::error::{CardError, CardResult},
    params::OutputFormat,
    render::canvas::Canvas,
};

pub const START_JPEG_QUALITY: u8 = 92;
/// JPEG quality is not lowered past this; the image is downscaled instead.
pub const MIN_JPEG_QUALITY: u8 = 70;
pub const QUALITY_STEP: u8 = 5;
pub const SCALE_STEP: f64 = 0.95;
/// Downscaling stops once the scale reaches this.
pub const MIN_SCALE: f64 = 0.7;

/// Result of [`encode_with_budget`].
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    /// JPEG quality used; fixed at the starting value for PNG.
    pub quality: u8,
    pub scale: f64,
    pub within_budget: bool,
}

/// Budget in bytes for a limit given in MiB.
pub fn budget_bytes(max_mb: f64) -> u64 {
    if !max_mb.is_finite() || max_mb <= 0.0 {
        return 0;
    }
    (max_mb * 1024.0 * 1024.0).trunc() as u64
}

/// Encode `canvas`, lowering JPEG quality and then the scale until the output fits `max_mb`.
///
/// The search stops at quality 70 and scale 0.7; the last attempt is returned even if it is
/// still over budget.
#[tracing::instrument(skip(canvas), fields(width = canvas.width(), height = canvas.height()))]
pub fn encode_with_budget(
    canvas: &Canvas,
    format: OutputFormat,
    max_mb: f64,
) -> CardResult<EncodedImage> {
    let max_bytes = budget_bytes(max_mb);
    let rgba = DynamicImage::ImageRgba8(canvas.to_rgba_image()?);
    let base = match format {
        OutputFormat::Png => rgba,
        OutputFormat::Jpeg => DynamicImage::ImageRgb8(rgba.to_rgb8()),
    };

    let mut quality = START_JPEG_QUALITY;
    let mut scale = 1.0f64;
    loop {
        let resized;
        let img = if scale < 1.0 {
            let w = ((f64::from(base.width()) * scale).trunc() as u32).max(1);
            let h = ((f64::from(base.height()) * scale).trunc() as u32).max(1);
            resized = base.resize_exact(w, h, FilterType::Lanczos3);
            &resized
        } else {
            &base
        };

        let bytes = encode(img, format, quality)?;
        let size = bytes.len() as u64;
        let quality_exhausted = format == OutputFormat::Png || quality <= MIN_JPEG_QUALITY;
        let within_budget = size <= max_bytes;
        if within_budget || (quality_exhausted && scale <= MIN_SCALE) {
            if !within_budget {
                tracing::warn!(size, max_bytes, "encoded card is over the size budget");
            }
            tracing::debug!(size, quality, scale, "encoded card");
            return Ok(EncodedImage {
                width: img.width(),
                height: img.height(),
                bytes,
                format,
                quality,
                scale,
                within_budget,
            });
        }

        if !quality_exhausted {
            quality -= QUALITY_STEP;
        } else {
            scale *= SCALE_STEP;
        }
    }
}

fn encode(img: &DynamicImage, format: OutputFormat, quality: u8) -> CardResult<Vec<u8>> {
    let mut buf = Vec::new();
    let res = match format {
        OutputFormat::Png => img.write_with_encoder(PngEncoder::new_with_quality(
            &mut buf,
            CompressionType::Best,
            PngFilterType::Adaptive,
        )),
        OutputFormat::Jpeg => img.write_with_encoder(JpegEncoder::new_with_quality(&mut buf, quality)),
    };
    res.map_err(|e| CardError::export(format!("encode {}: {e}", format.extension())))?;
    Ok(buf)
}

/// Encode `canvas` under the budget and write it to `out`, creating parent directories.
pub fn save_image(
    canvas: &Canvas,
    out: &Path,
    format: OutputFormat,
    max_mb: f64,
) -> CardResult<PathBuf> {
    if let Some(parent) = out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    let encoded = encode_with_budget(canvas, format, max_mb)?;
    std::fs::write(out, &encoded.bytes)
        .with_context(|| format!("write {} '{}'", format.extension(), out.display()))?;
    tracing::info!(path = %out.display(), bytes = encoded.bytes.len(), "card written");
    Ok(out.to_path_buf())
}

#[cfg(test)]
#[path = "../tests/unit/export.rs"]
mod tests;
