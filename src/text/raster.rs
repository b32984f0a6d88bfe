use std::sync::Mutex;

use crate::{
    foundation::core::Rgba8,
    foundation::error::{PosterError, PosterResult},
    text::font::LoadedFont,
};

/// Measured size of a single line of text, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct TextExtent {
    pub width: f32,
    pub height: f32,
}

/// Measures and draws single-line text.
///
/// `draw` places the top-left of the text's line box at `(x, y)` in `target`,
/// blends source-over and clips to the target bounds.
pub trait TextRasterizer: Send + Sync {
    fn measure(&self, text: &str, size_px: f32) -> PosterResult<TextExtent>;

    fn draw(
        &self,
        text: &str,
        size_px: f32,
        color: Rgba8,
        target: &mut image::RgbaImage,
        x: i64,
        y: i64,
    ) -> PosterResult<()>;

    /// Height of one line box at `size_px`.
    fn line_height(&self, size_px: f32) -> PosterResult<f32> {
        Ok(self.measure("Hg", size_px)?.height)
    }
}

/// Parley layout + vello_cpu glyph rasterization over one font face.
///
/// The font is registered once; layout contexts are shared behind a mutex so
/// one rasterizer can serve every worker of a parallel build.
pub struct ParleyRasterizer {
    family: String,
    weight: u16,
    index: u32,
    contexts: Mutex<TextContexts>,
}

struct TextContexts {
    font: parley::FontContext,
    layout: parley::LayoutContext<Rgba8>,
}

/// Largest pixmap side rendered in one pass.
const TILE: i64 = 2048;

impl std::fmt::Debug for ParleyRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParleyRasterizer")
            .field("family", &self.family)
            .field("weight", &self.weight)
            .field("index", &self.index)
            .finish()
    }
}

impl ParleyRasterizer {
    /// Register `font` to validate it and capture its family name.
    pub fn new(font: LoadedFont) -> PosterResult<Self> {
        let blob = parley::fontique::Blob::from(font.bytes.as_ref().clone());
        let mut font_ctx = parley::FontContext::default();
        let family = register_family(&mut font_ctx, blob, font.index)?;
        tracing::debug!(family = %family, weight = font.weight, "text rasterizer ready");

        Ok(Self {
            family,
            weight: font.weight,
            index: font.index,
            contexts: Mutex::new(TextContexts {
                font: font_ctx,
                layout: parley::LayoutContext::new(),
            }),
        })
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    fn layout(
        &self,
        text: &str,
        size_px: f32,
        color: Rgba8,
    ) -> PosterResult<parley::Layout<Rgba8>> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(PosterError::config("font size must be finite and > 0"));
        }

        let mut guard = self
            .contexts
            .lock()
            .map_err(|_| PosterError::font("text layout context poisoned"))?;
        let TextContexts { font, layout } = &mut *guard;

        let mut builder = layout.ranged_builder(font, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(self.family.clone())),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));
        builder.push_default(parley::style::StyleProperty::FontWeight(
            parley::style::FontWeight::new(f32::from(self.weight)),
        ));
        builder.push_default(parley::style::StyleProperty::Brush(color));

        let mut layout: parley::Layout<Rgba8> = builder.build(text);
        layout.break_all_lines(None);
        Ok(layout)
    }

    /// Rasterize the `w x h` window of `target` at `(tile_x, tile_y)`, with
    /// the line box origin at `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    fn render_tile(
        layout: &parley::Layout<Rgba8>,
        target: &mut image::RgbaImage,
        x: i64,
        y: i64,
        tile_x: i64,
        tile_y: i64,
        w: u16,
        h: u16,
    ) {
        let mut ctx = vello_cpu::RenderContext::new(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
            (x - tile_x) as f64,
            (y - tile_y) as f64,
        )));

        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };

                let brush = run.style().brush;
                ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));

                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                // Glyph ids index the face parley picked for this run.
                ctx.glyph_run(run.run().font())
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }

        ctx.flush();
        let mut pixmap = vello_cpu::Pixmap::new(w, h);
        ctx.render_to_pixmap(&mut pixmap);
        blit_premul_over(
            target,
            pixmap.data_as_u8_slice(),
            u32::from(w),
            u32::from(h),
            tile_x,
            tile_y,
        );
    }
}

impl TextRasterizer for ParleyRasterizer {
    fn measure(&self, text: &str, size_px: f32) -> PosterResult<TextExtent> {
        let layout = self.layout(text, size_px, Rgba8::BLACK)?;
        Ok(TextExtent {
            width: layout.width(),
            height: layout.height(),
        })
    }

    fn draw(
        &self,
        text: &str,
        size_px: f32,
        color: Rgba8,
        target: &mut image::RgbaImage,
        x: i64,
        y: i64,
    ) -> PosterResult<()> {
        let layout = self.layout(text, size_px, color)?;

        // Glyph ink may overhang the line box (bearings, descenders).
        let pad = (size_px * 0.25).ceil() as i64;
        let ink = PixelRect {
            x: x.saturating_sub(pad),
            y: y.saturating_sub(pad),
            width: (layout.width().ceil() as i64).saturating_add(2 * pad),
            height: (layout.height().ceil() as i64).saturating_add(2 * pad),
        };
        let Some(visible) = ink.clip_to(target.width(), target.height()) else {
            return Ok(());
        };

        let mut tile_y = visible.y;
        while tile_y < visible.bottom() {
            let h = (visible.bottom() - tile_y).min(TILE) as u16;
            let mut tile_x = visible.x;
            while tile_x < visible.right() {
                let w = (visible.right() - tile_x).min(TILE) as u16;
                Self::render_tile(&layout, target, x, y, tile_x, tile_y, w, h);
                tile_x += TILE;
            }
            tile_y += TILE;
        }
        Ok(())
    }
}

/// Signed pixel rectangle in target coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct PixelRect {
    pub x: i64,
    pub y: i64,
    pub width: i64,
    pub height: i64,
}

impl PixelRect {
    fn right(&self) -> i64 {
        self.x.saturating_add(self.width)
    }

    fn bottom(&self) -> i64 {
        self.y.saturating_add(self.height)
    }

    /// Part of `self` inside a `target_w x target_h` image, if any.
    pub(crate) fn clip_to(&self, target_w: u32, target_h: u32) -> Option<Self> {
        let left = self.x.max(0);
        let top = self.y.max(0);
        let right = self.right().min(i64::from(target_w));
        let bottom = self.bottom().min(i64::from(target_h));
        (left < right && top < bottom).then_some(Self {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }
}

fn register_family(
    font_ctx: &mut parley::FontContext,
    blob: parley::fontique::Blob<u8>,
    index: u32,
) -> PosterResult<String> {
    let families = font_ctx.collection.register_fonts(blob, None);
    let family_id = families
        .iter()
        .find(|(_, fonts)| fonts.iter().any(|f| f.index() == index))
        .or_else(|| families.first())
        .map(|(id, _)| *id)
        .ok_or_else(|| PosterError::font("no font families registered from font bytes"))?;

    font_ctx
        .collection
        .family_name(family_id)
        .map(str::to_string)
        .ok_or_else(|| PosterError::font("registered font family has no name"))
}

/// Source-over blend of a premultiplied RGBA8 buffer (`src_w` x `src_h`) onto a
/// straight-alpha target at `(x, y)`, clipped to the target.
pub(crate) fn blit_premul_over(
    target: &mut image::RgbaImage,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    x: i64,
    y: i64,
) {
    let (tw, th) = (i64::from(target.width()), i64::from(target.height()));
    for sy in 0..i64::from(src_h) {
        let ty = y + sy;
        if ty < 0 || ty >= th {
            continue;
        }
        for sx in 0..i64::from(src_w) {
            let tx = x + sx;
            if tx < 0 || tx >= tw {
                continue;
            }
            let i = ((sy * i64::from(src_w) + sx) * 4) as usize;
            let Some(px) = src.get(i..i + 4) else {
                return;
            };
            if px[3] == 0 {
                continue;
            }
            let dst = target.get_pixel_mut(tx as u32, ty as u32);
            dst.0 = premul_over_straight([px[0], px[1], px[2], px[3]], dst.0);
        }
    }
}

fn premul_over_straight(src: [u8; 4], dst: [u8; 4]) -> [u8; 4] {
    let sa = f32::from(src[3]) / 255.0;
    let da = f32::from(dst[3]) / 255.0;
    let out_a = sa + da * (1.0 - sa);
    if out_a <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for c in 0..3 {
        let s = f32::from(src[c]) / 255.0;
        let d = f32::from(dst[c]) / 255.0 * da;
        let premul = s + d * (1.0 - sa);
        out[c] = ((premul / out_a) * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}

#[cfg(test)]
#[path = "../../tests/unit/text/raster.rs"]
mod tests;
