use crate::{foundation::math::mix64, render::canvas::Canvas};

/// Largest per-pixel brightness offset applied by [`apply_noise`].
pub const NOISE_AMPLITUDE: i32 = 4;

/// Per-pixel offset in `[-NOISE_AMPLITUDE, NOISE_AMPLITUDE]` for pixel `index`.
pub fn noise_offset(seed: u64, index: u64) -> i32 {
    let span = (2 * NOISE_AMPLITUDE + 1) as u64;
    (mix64(seed ^ mix64(index)) % span) as i32 - NOISE_AMPLITUDE
}

/// Grain: shift every opaque pixel's r, g and b by the same seeded offset, clamped to `0..=255`.
///
/// Identical seeds produce identical output.
pub fn apply_noise(canvas: &mut Canvas, seed: u64) {
    for (i, px) in canvas
        .as_premul_bytes_mut()
        .chunks_exact_mut(4)
        .enumerate()
    {
        if px[3] != 255 {
            continue;
        }
        let d = noise_offset(seed, i as u64);
        for c in &mut px[..3] {
            *c = (i32::from(*c) + d).clamp(0, 255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/texture.rs"]
mod tests;
