use crate::foundation::{
    error::{CardError, CardResult},
    math::mul_div255_u8,
};

pub type PremulRgba8 = [u8; 4];

/// Source-over for one premultiplied pixel, with `src` scaled by `opacity`.
pub fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = sa.saturating_add(mul_div255_u8(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255_u8(u16::from(src[i]), op);
        let dc = mul_div255_u8(u16::from(dst[i]), inv);
        out[i] = sc.saturating_add(dc);
    }
    out
}

pub fn over_in_place(dst: &mut [u8], src: &[u8], opacity: f32) -> CardResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(CardError::raster(
            "over_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        if s[3] == 0 {
            continue;
        }
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]], opacity);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Composite a `src_w x src_h` premultiplied buffer onto `dst` with its top-left corner at
/// `(dx, dy)`. Parts falling outside `dst` are clipped.
pub fn over_at(
    dst: &mut [u8],
    dst_w: u32,
    dst_h: u32,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    (dx, dy): (i64, i64),
) -> CardResult<()> {
    let dst_len = (dst_w as usize)
        .checked_mul(dst_h as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CardError::raster("composite buffer size overflow"))?;
    let src_len = (src_w as usize)
        .checked_mul(src_h as usize)
        .and_then(|v| v.checked_mul(4))
        .ok_or_else(|| CardError::raster("composite buffer size overflow"))?;
    if dst.len() != dst_len || src.len() != src_len {
        return Err(CardError::raster(
            "over_at expects buffers matching width*height*4",
        ));
    }

    let x0 = dx.max(0);
    let y0 = dy.max(0);
    let x1 = (dx + i64::from(src_w)).min(i64::from(dst_w));
    let y1 = (dy + i64::from(src_h)).min(i64::from(dst_h));
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    for y in y0..y1 {
        let sy = (y - dy) as usize;
        for x in x0..x1 {
            let sx = (x - dx) as usize;
            let si = (sy * src_w as usize + sx) * 4;
            if src[si + 3] == 0 {
                continue;
            }
            let di = (y as usize * dst_w as usize + x as usize) * 4;
            let out = over(
                [dst[di], dst[di + 1], dst[di + 2], dst[di + 3]],
                [src[si], src[si + 1], src[si + 2], src[si + 3]],
                1.0,
            );
            dst[di..di + 4].copy_from_slice(&out);
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/render/composite.rs"]
mod tests;
