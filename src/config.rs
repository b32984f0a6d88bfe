use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::{
    assets::prep::Preprocess,
    foundation::core::{Rgba8, Size},
    foundation::error::{PosterError, PosterResult},
    layout::grid::GridSpec,
};

/// Poster background used when none is configured.
pub const DEFAULT_BACKGROUND: Rgba8 = Rgba8::new(250, 250, 250, 255);

/// Everything a poster build needs besides the image list and fonts.
///
/// Deserialized from JSON with every field optional, then checked once by
/// [`PosterConfig::validate`] before any image is decoded.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PosterConfig {
    pub grid: GridSpec,
    /// Full cell size (label band included). `None` derives it from the
    /// first preprocessed image plus the label band.
    pub cell_size: Option<Size>,
    pub preprocess: Preprocess,
    pub labels: LabelConfig,
    pub background: Rgba8,
    /// Cell and label band fill; defaults to `background`.
    pub cell_background: Option<Rgba8>,
    pub margins: Margins,
    pub title: Option<TitleConfig>,
    pub footer: Option<FooterConfig>,
    /// Render cells on a rayon pool before the sequential composite pass.
    pub parallel: bool,
    pub threads: Option<usize>,
}

impl Default for PosterConfig {
    fn default() -> Self {
        Self {
            grid: GridSpec::default(),
            cell_size: None,
            preprocess: Preprocess::default(),
            labels: LabelConfig::default(),
            background: DEFAULT_BACKGROUND,
            cell_background: None,
            margins: Margins::default(),
            title: None,
            footer: None,
            parallel: false,
            threads: None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    pub enabled: bool,
    /// Family name or font file path.
    pub font_family: String,
    pub font_size: f32,
    pub text_color: Rgba8,
    pub padding_top: u32,
    pub padding_bottom: u32,
    /// Fixed band height; `None` uses line height + paddings.
    pub band_height: Option<u32>,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            font_family: "Arial".to_string(),
            font_size: 40.0,
            text_color: Rgba8::BLACK,
            padding_top: 10,
            padding_bottom: 15,
            band_height: None,
        }
    }
}

/// Left/right padding around the whole poster.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Margins {
    pub left: u32,
    pub right: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TitleConfig {
    pub text: String,
    pub height: u32,
    pub font_family: String,
    pub font_size: f32,
    pub text_color: Rgba8,
    pub bg_color: Rgba8,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            height: 200,
            font_family: "Helvetica-Bold".to_string(),
            font_size: 120.0,
            text_color: Rgba8::BLACK,
            bg_color: Rgba8::WHITE,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FooterConfig {
    pub text: String,
    pub height: u32,
    pub font_family: String,
    pub font_size: f32,
    pub text_color: Rgba8,
    pub bg_color: Rgba8,
    /// Distance from the footer's left edge to the text.
    pub inset: u32,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            text: String::new(),
            height: 100,
            font_family: "Arial".to_string(),
            font_size: 30.0,
            text_color: Rgba8::BLACK,
            bg_color: Rgba8::WHITE,
            inset: 40,
        }
    }
}

impl PosterConfig {
    /// Read a JSON config file.
    pub fn from_json_file(path: &Path) -> PosterResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config '{}'", path.display()))?;
        serde_json::from_str(&text).map_err(|e| {
            PosterError::config(format!("invalid config '{}': {e}", path.display()))
        })
    }

    pub fn cell_background(&self) -> Rgba8 {
        self.cell_background.unwrap_or(self.background)
    }

    pub fn validate(&self) -> PosterResult<()> {
        if self.grid.images_per_row == 0 {
            return Err(PosterError::config("grid.images_per_row must be >= 1"));
        }
        if let Some(size) = self.cell_size {
            Size::new(size.width, size.height)
                .map_err(|_| PosterError::config(format!("cell_size must be positive, got {size}")))?;
        }
        if let Some(size) = self.preprocess.resize_to {
            Size::new(size.width, size.height).map_err(|_| {
                PosterError::config(format!("preprocess.resize_to must be positive, got {size}"))
            })?;
            self.preprocess.output_size(size)?;
        }

        if self.labels.enabled {
            check_font("labels", &self.labels.font_family, self.labels.font_size)?;
            if self.labels.band_height == Some(0) {
                return Err(PosterError::config(
                    "labels.band_height must be > 0 when labels are enabled",
                ));
            }
            if let (Some(band), Some(cell)) = (self.labels.band_height, self.cell_size)
                && band >= cell.height
            {
                return Err(PosterError::config(format!(
                    "labels.band_height {band} must be smaller than cell_size.height {}",
                    cell.height
                )));
            }
        }

        if let Some(title) = &self.title {
            check_banner("title", &title.text, title.height)?;
            check_font("title", &title.font_family, title.font_size)?;
        }
        if let Some(footer) = &self.footer {
            check_banner("footer", &footer.text, footer.height)?;
            check_font("footer", &footer.font_family, footer.font_size)?;
        }

        if self.threads == Some(0) {
            return Err(PosterError::config("threads must be >= 1 when set"));
        }
        Ok(())
    }
}

fn check_font(section: &str, family: &str, size: f32) -> PosterResult<()> {
    if family.trim().is_empty() {
        return Err(PosterError::config(format!(
            "{section}.font_family must be non-empty"
        )));
    }
    if !size.is_finite() || size <= 0.0 {
        return Err(PosterError::config(format!(
            "{section}.font_size must be finite and > 0"
        )));
    }
    Ok(())
}

fn check_banner(section: &str, text: &str, height: u32) -> PosterResult<()> {
    if text.trim().is_empty() {
        return Err(PosterError::config(format!("{section}.text must be non-empty")));
    }
    if height == 0 {
        return Err(PosterError::config(format!("{section}.height must be > 0")));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
