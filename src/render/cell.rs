use std::sync::Arc;

use crate::{
    assets::decode::SourceImage,
    foundation::core::{Rgba8, Size},
    foundation::error::{PosterError, PosterResult},
    text::raster::TextRasterizer,
};

/// Immutable per-build settings shared by every cell.
///
/// `cell_height` is the full cell height; when labels are enabled the body
/// gets `cell_height - label_band_height` and the band sits below it.
#[derive(Clone)]
pub struct CellConfig {
    pub cell_width: u32,
    pub cell_height: u32,
    pub add_labels: bool,
    pub label_band_height: u32,
    /// Gap between the top of the band and the top of the label's line box.
    pub label_padding_top: u32,
    pub font: Option<Arc<dyn TextRasterizer>>,
    pub font_size: f32,
    pub text_color: Rgba8,
    pub bg_color: Rgba8,
}

impl std::fmt::Debug for CellConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CellConfig")
            .field("cell_width", &self.cell_width)
            .field("cell_height", &self.cell_height)
            .field("add_labels", &self.add_labels)
            .field("label_band_height", &self.label_band_height)
            .field("label_padding_top", &self.label_padding_top)
            .field("font", &self.font.as_ref().map(|_| "<rasterizer>"))
            .field("font_size", &self.font_size)
            .field("text_color", &self.text_color)
            .field("bg_color", &self.bg_color)
            .finish()
    }
}

impl CellConfig {
    pub fn validate(&self) -> PosterResult<()> {
        if self.cell_width == 0 {
            return Err(PosterError::config("cell_width must be > 0"));
        }
        if self.cell_height == 0 {
            return Err(PosterError::config("cell_height must be > 0"));
        }
        if !self.font_size.is_finite() || self.font_size <= 0.0 {
            return Err(PosterError::config("font_size must be finite and > 0"));
        }
        if self.add_labels {
            if self.label_band_height == 0 {
                return Err(PosterError::config(
                    "label_band_height must be > 0 when labels are enabled",
                ));
            }
            if self.label_band_height >= self.cell_height {
                return Err(PosterError::config(format!(
                    "label_band_height {} leaves no body in a cell of height {}",
                    self.label_band_height, self.cell_height
                )));
            }
            if self.font.is_none() {
                return Err(PosterError::config("add_labels requires a label font"));
            }
        }
        Ok(())
    }

    /// Region the source image is fitted into.
    pub fn body_size(&self) -> Size {
        let band = if self.add_labels {
            self.label_band_height
        } else {
            0
        };
        Size {
            width: self.cell_width,
            height: self.cell_height.saturating_sub(band),
        }
    }
}

/// One fixed-size grid unit: fitted image body plus optional label band.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    image: image::RgbaImage,
}

impl Cell {
    pub fn from_rgba(image: image::RgbaImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn as_rgba(&self) -> &image::RgbaImage {
        &self.image
    }

    pub fn into_rgba(self) -> image::RgbaImage {
        self.image
    }
}

/// Largest size with the source's aspect ratio that fits inside `bound`.
/// One side matches `bound`; neither side is ever zero.
pub fn fit_inside(src: Size, bound: Size) -> Size {
    let ratio_w = f64::from(bound.width) / f64::from(src.width);
    let ratio_h = f64::from(bound.height) / f64::from(src.height);
    if ratio_w <= ratio_h {
        let h = (f64::from(src.height) * ratio_w).round().max(1.0) as u32;
        Size {
            width: bound.width,
            height: h.min(bound.height),
        }
    } else {
        let w = (f64::from(src.width) * ratio_h).round().max(1.0) as u32;
        Size {
            width: w.min(bound.width),
            height: bound.height,
        }
    }
}

/// Band height that fits one label line plus its top and bottom margins.
pub fn label_band_height(
    font: &dyn TextRasterizer,
    font_size: f32,
    padding_top: u32,
    padding_bottom: u32,
) -> PosterResult<u32> {
    let line = font.line_height(font_size)?;
    Ok(line.ceil().max(0.0) as u32 + padding_top + padding_bottom)
}

/// Render `image` (and `label`, when labels are enabled) into a cell of
/// exactly `cell_width x cell_height`.
///
/// The source is scaled to fit the body without cropping and centered on
/// `bg_color`. The label is centered horizontally; text wider than the cell
/// is clipped at the band edges rather than wrapped or shrunk.
pub fn render_cell(
    image: &SourceImage,
    label: Option<&str>,
    config: &CellConfig,
) -> PosterResult<Cell> {
    config.validate()?;

    let body = config.body_size();
    let bg = config.bg_color.to_pixel();
    let mut out = image::RgbaImage::from_pixel(config.cell_width, config.cell_height, bg);

    let src = Size {
        width: image.width(),
        height: image.height(),
    };
    let fitted = fit_inside(src, body);
    let x = i64::from((body.width - fitted.width) / 2);
    let y = i64::from((body.height - fitted.height) / 2);
    if fitted == src {
        image::imageops::overlay(&mut out, image.as_rgba(), x, y);
    } else {
        let scaled = image::imageops::resize(
            image.as_rgba(),
            fitted.width,
            fitted.height,
            image::imageops::FilterType::Lanczos3,
        );
        image::imageops::overlay(&mut out, &scaled, x, y);
    }

    if config.add_labels
        && let Some(text) = label.filter(|t| !t.is_empty())
        && let Some(font) = config.font.as_deref()
    {
        let band = render_label_band(text, font, config)?;
        image::imageops::replace(&mut out, &band, 0, i64::from(body.height));
    }

    Ok(Cell { image: out })
}

fn render_label_band(
    text: &str,
    font: &dyn TextRasterizer,
    config: &CellConfig,
) -> PosterResult<image::RgbaImage> {
    let mut band = image::RgbaImage::from_pixel(
        config.cell_width,
        config.label_band_height,
        config.bg_color.to_pixel(),
    );
    let extent = font.measure(text, config.font_size)?;
    let text_w = extent.width.round() as i64;
    let x = (i64::from(config.cell_width) - text_w).div_euclid(2);
    if text_w > i64::from(config.cell_width) {
        tracing::debug!(label = text, text_w, cell_w = config.cell_width, "label overflows cell");
    }
    font.draw(
        text,
        config.font_size,
        config.text_color,
        &mut band,
        x,
        i64::from(config.label_padding_top),
    )?;
    Ok(band)
}

#[cfg(test)]
#[path = "../../tests/unit/render/cell.rs"]
mod tests;
