use crate::{
    color::Rgb,
    foundation::{
        core::Rgba8Premul,
        error::{CardError, CardResult},
    },
    render::composite,
};

/// Premultiplied RGBA8 raster the card is composed on.
///
/// Every drawing operation renders into a transparent layer the size of the canvas and is then
/// composited source-over in one step, so a primitive is never half-applied. The render context
/// and layer pixmap are kept between operations.
pub struct Canvas {
    width: u32,
    height: u32,
    data: Vec<u8>,
    ctx: Option<vello_cpu::RenderContext>,
    layer: Option<vello_cpu::Pixmap>,
}

impl Canvas {
    /// Opaque canvas filled with `bg`.
    pub fn new(width: u32, height: u32, bg: Rgb) -> CardResult<Self> {
        dims_u16(width, height)?;
        let px = bg.to_premul(255).to_array();
        Ok(Self {
            width,
            height,
            data: px.repeat(width as usize * height as usize),
            ctx: None,
            layer: None,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Premultiplied pixel at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8Premul> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        Some(Rgba8Premul::from_array([
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]))
    }

    pub fn as_premul_bytes(&self) -> &[u8] {
        &self.data
    }

    pub(crate) fn as_premul_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Render one layer with `f` and composite it over the canvas.
    ///
    /// Transforms are reset to identity before `f` runs. If `f` fails nothing is composited.
    pub fn draw<F>(&mut self, f: F) -> CardResult<()>
    where
        F: FnOnce(&mut vello_cpu::RenderContext) -> CardResult<()>,
    {
        let (w, h) = dims_u16(self.width, self.height)?;
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == w && ctx.height() == h => ctx,
            _ => vello_cpu::RenderContext::new(w, h),
        };
        ctx.reset();
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);

        let out = f(&mut ctx).and_then(|()| {
            let layer = self
                .layer
                .get_or_insert_with(|| vello_cpu::Pixmap::new(w, h));
            layer.data_as_u8_slice_mut().fill(0);
            ctx.flush();
            ctx.render_to_pixmap(layer);
            composite::over_in_place(&mut self.data, layer.data_as_u8_slice(), 1.0)
        });
        self.ctx = Some(ctx);
        out
    }

    /// Composite a premultiplied `src_w x src_h` buffer with its top-left corner at `(dx, dy)`.
    pub fn composite_premul(
        &mut self,
        src: &[u8],
        src_w: u32,
        src_h: u32,
        dx: i64,
        dy: i64,
    ) -> CardResult<()> {
        composite::over_at(
            &mut self.data,
            self.width,
            self.height,
            src,
            src_w,
            src_h,
            (dx, dy),
        )
    }

    /// Straight-alpha copy suitable for encoding.
    pub fn to_rgba_image(&self) -> CardResult<image::RgbaImage> {
        let mut straight = Vec::with_capacity(self.data.len());
        for px in self.data.chunks_exact(4) {
            straight.extend_from_slice(
                &Rgba8Premul::from_array([px[0], px[1], px[2], px[3]]).to_straight_rgba(),
            );
        }
        image::RgbaImage::from_raw(self.width, self.height, straight)
            .ok_or_else(|| CardError::raster("canvas buffer does not match its dimensions"))
    }
}

impl std::fmt::Debug for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Canvas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Rasterize `f` into a fresh `width x height` context and return its coverage as an alpha mask.
pub(crate) fn rasterize_mask<F>(width: u32, height: u32, f: F) -> CardResult<Vec<u8>>
where
    F: FnOnce(&mut vello_cpu::RenderContext),
{
    let (w, h) = dims_u16(width, height)?;
    let mut ctx = vello_cpu::RenderContext::new(w, h);
    ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(255, 255, 255, 255));
    f(&mut ctx);
    ctx.flush();

    let mut pixmap = vello_cpu::Pixmap::new(w, h);
    ctx.render_to_pixmap(&mut pixmap);
    Ok(pixmap
        .data_as_u8_slice()
        .chunks_exact(4)
        .map(|px| px[3])
        .collect())
}

fn dims_u16(width: u32, height: u32) -> CardResult<(u16, u16)> {
    if width == 0 || height == 0 {
        return Err(CardError::raster(format!(
            "canvas dimensions must be non-zero, got {width}x{height}"
        )));
    }
    let w: u16 = width
        .try_into()
        .map_err(|_| CardError::raster("canvas width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| CardError::raster("canvas height exceeds u16"))?;
    Ok((w, h))
}

#[cfg(test)]
#[path = "../../tests/unit/render/canvas.rs"]
mod tests;
