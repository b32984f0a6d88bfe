use std::path::Path;

use crate::foundation::error::{PosterError, PosterResult};

/// Decoded source raster in straight RGBA8.
///
/// Width and height are always positive.
#[derive(Clone, Debug, PartialEq)]
pub struct SourceImage {
    image: image::RgbaImage,
}

impl SourceImage {
    /// Wrap an already-decoded raster, rejecting empty images.
    pub fn new(image: image::RgbaImage) -> PosterResult<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(PosterError::config(format!(
                "source image must have positive size, got {}x{}",
                image.width(),
                image.height()
            )));
        }
        Ok(Self { image })
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn as_rgba(&self) -> &image::RgbaImage {
        &self.image
    }

    pub fn into_rgba(self) -> image::RgbaImage {
        self.image
    }
}

/// Decode encoded image bytes; `origin` names the input in error messages.
pub fn decode_image(bytes: &[u8], origin: &Path) -> PosterResult<SourceImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| PosterError::image_load(origin, format!("decode: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(PosterError::image_load(origin, "image has zero width or height"));
    }
    Ok(SourceImage { image: rgba })
}

/// Read and decode the image file at `path`.
pub fn load_image(path: &Path) -> PosterResult<SourceImage> {
    let bytes =
        std::fs::read(path).map_err(|e| PosterError::image_load(path, format!("read: {e}")))?;
    decode_image(&bytes, path)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
