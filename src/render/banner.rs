use std::sync::Arc;

use crate::{
    foundation::core::Rgba8,
    foundation::error::{PosterError, PosterResult},
    text::raster::TextRasterizer,
};

/// Text styling for a full-width title or footer row.
#[derive(Clone)]
pub struct BannerStyle {
    pub height: u32,
    pub font: Arc<dyn TextRasterizer>,
    pub font_size: f32,
    pub text_color: Rgba8,
    pub bg_color: Rgba8,
}

impl BannerStyle {
    fn canvas(&self, width: u32) -> PosterResult<image::RgbaImage> {
        if width == 0 || self.height == 0 {
            return Err(PosterError::config(format!(
                "banner size must be positive, got {width}x{}",
                self.height
            )));
        }
        Ok(image::RgbaImage::from_pixel(
            width,
            self.height,
            self.bg_color.to_pixel(),
        ))
    }
}

/// Title row: `text` centered on both axes.
pub fn render_title(width: u32, text: &str, style: &BannerStyle) -> PosterResult<image::RgbaImage> {
    let mut row = style.canvas(width)?;
    let extent = style.font.measure(text, style.font_size)?;
    let x = (i64::from(width) - extent.width.round() as i64).div_euclid(2);
    let y = (i64::from(style.height) - extent.height.round() as i64).div_euclid(2);
    style
        .font
        .draw(text, style.font_size, style.text_color, &mut row, x, y)?;
    Ok(row)
}

/// Footer row: `text` starting `inset` px from the left, vertically centered.
pub fn render_footer(
    width: u32,
    text: &str,
    style: &BannerStyle,
    inset: u32,
) -> PosterResult<image::RgbaImage> {
    let mut row = style.canvas(width)?;
    let extent = style.font.measure(text, style.font_size)?;
    let y = (i64::from(style.height) - extent.height.round() as i64).div_euclid(2);
    style.font.draw(
        text,
        style.font_size,
        style.text_color,
        &mut row,
        i64::from(inset),
        y,
    )?;
    Ok(row)
}

#[cfg(test)]
#[path = "../../tests/unit/render/banner.rs"]
mod tests;
