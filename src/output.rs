use std::{fs::File, io::BufWriter, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::error::{PosterError, PosterResult},
    render::compose::Poster,
};

pub const DEFAULT_JPEG_QUALITY: u8 = 95;

/// Write `poster` to `path`, creating the parent directory when missing.
///
/// `.jpg`/`.jpeg` drops alpha and encodes at `jpeg_quality` (1..=100); any
/// other extension goes through `image`'s format detection as RGBA.
#[tracing::instrument(skip(poster), fields(path = %path.display()))]
pub fn save_poster(poster: &Poster, path: &Path, jpeg_quality: u8) -> PosterResult<()> {
    if !(1..=100).contains(&jpeg_quality) {
        return Err(PosterError::config(format!(
            "jpeg_quality must be in 1..=100, got {jpeg_quality}"
        )));
    }
    ensure_parent_dir(path)?;

    if is_jpeg(path) {
        let rgb = image::DynamicImage::ImageRgba8(poster.image.clone()).into_rgb8();
        let file = File::create(path)
            .with_context(|| format!("create output file '{}'", path.display()))?;
        let mut encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(BufWriter::new(file), jpeg_quality);
        encoder
            .encode_image(&rgb)
            .with_context(|| format!("write jpeg '{}'", path.display()))?;
    } else {
        poster
            .image
            .save(path)
            .with_context(|| format!("write image '{}'", path.display()))?;
    }

    tracing::info!(
        width = poster.width(),
        height = poster.height(),
        "poster saved"
    );
    Ok(())
}

fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
}

fn ensure_parent_dir(path: &Path) -> PosterResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/output.rs"]
mod tests;
