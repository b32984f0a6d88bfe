use serde::{Deserialize, Serialize};

use crate::{
    assets::decode::SourceImage,
    foundation::core::{Insets, Size},
    foundation::error::{PosterError, PosterResult},
};

/// Optional normalization applied to every source before cell rendering:
/// an exact resize followed by an inset crop.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preprocess {
    pub resize_to: Option<Size>,
    pub crop: Insets,
}

impl Preprocess {
    /// Scanned passport covers: normalize to 705x1000, drop the 5 px scanner
    /// bar on every edge and a further 25 px on the right and bottom.
    pub fn passport_cover() -> Self {
        Self {
            resize_to: Some(Size {
                width: 705,
                height: 1000,
            }),
            crop: Insets {
                left: 5,
                top: 5,
                right: 25,
                bottom: 25,
            },
        }
    }

    pub fn is_identity(&self) -> bool {
        self.resize_to.is_none() && self.crop.is_zero()
    }

    /// Size of the output for an input of `src`, or a config error when the
    /// crop would leave nothing.
    pub fn output_size(&self, src: Size) -> PosterResult<Size> {
        let base = self.resize_to.unwrap_or(src);
        let w = u64::from(base.width).checked_sub(self.crop.horizontal());
        let h = u64::from(base.height).checked_sub(self.crop.vertical());
        match (w, h) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Ok(Size {
                width: w as u32,
                height: h as u32,
            }),
            _ => Err(PosterError::config(format!(
                "preprocess.crop {:?} leaves no pixels of a {base} image",
                self.crop
            ))),
        }
    }

    pub fn apply(&self, image: SourceImage) -> PosterResult<SourceImage> {
        if self.is_identity() {
            return Ok(image);
        }
        let src = Size {
            width: image.width(),
            height: image.height(),
        };
        let out = self.output_size(src)?;

        let mut rgba = image.into_rgba();
        if let Some(size) = self.resize_to
            && size != src
        {
            rgba = image::imageops::resize(
                &rgba,
                size.width,
                size.height,
                image::imageops::FilterType::Lanczos3,
            );
        }
        if !self.crop.is_zero() {
            rgba = image::imageops::crop_imm(
                &rgba,
                self.crop.left,
                self.crop.top,
                out.width,
                out.height,
            )
            .to_image();
        }
        SourceImage::new(rgba)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/prep.rs"]
mod tests;
