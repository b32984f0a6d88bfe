#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use postergrid::{FixedFont, PosterResult, Rgba8, TextExtent, TextRasterizer};

/// Every char is a `size/2` x `size` box; non-whitespace boxes are filled.
pub struct BlockFont;

impl TextRasterizer for BlockFont {
    fn measure(&self, text: &str, size_px: f32) -> PosterResult<TextExtent> {
        Ok(TextExtent {
            width: text.chars().count() as f32 * (size_px / 2.0).round(),
            height: size_px.round(),
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
        let adv = (size_px / 2.0).round() as i64;
        let h = size_px.round() as i64;
        let (tw, th) = (i64::from(target.width()), i64::from(target.height()));
        for (i, ch) in text.chars().enumerate() {
            if ch.is_whitespace() {
                continue;
            }
            let x0 = x + i as i64 * adv;
            for py in y.max(0)..(y + h).min(th) {
                for px in x0.max(0)..(x0 + adv).min(tw) {
                    target.put_pixel(px as u32, py as u32, color.to_pixel());
                }
            }
        }
        Ok(())
    }
}

pub fn block_fonts() -> FixedFont {
    FixedFont(Arc::new(BlockFont))
}

/// Scratch directory under the system temp dir, removed on drop.
pub struct TempDir {
    pub path: PathBuf,
}

impl TempDir {
    pub fn new(tag: &str) -> Self {
        let path = std::env::temp_dir().join(format!(
            "postergrid-it-{tag}-{}",
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).unwrap();
        Self { path }
    }

    pub fn join(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.path.join(rel)
    }
}

impl Drop for TempDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Write a solid-color PNG, creating parent directories.
pub fn write_png(path: &Path, w: u32, h: u32, rgba: [u8; 4]) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    image::RgbaImage::from_pixel(w, h, image::Rgba(rgba))
        .save(path)
        .unwrap();
    path.to_path_buf()
}
