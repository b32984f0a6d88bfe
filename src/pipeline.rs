use std::path::{Path, PathBuf};

use rayon::prelude::*;

use crate::{
    assets::{catalog::derive_label, decode::load_image, decode::SourceImage},
    config::PosterConfig,
    foundation::core::Size,
    foundation::error::{PosterError, PosterResult},
    render::banner::{BannerStyle, render_footer, render_title},
    render::cell::{Cell, CellConfig, label_band_height, render_cell},
    render::compose::{Poster, compose_grid},
    text::font::FontProvider,
};

/// Build a poster from `paths` in order.
///
/// Configuration and fonts are checked before any image is decoded. The first
/// failing input aborts the build and is named in the error.
#[tracing::instrument(skip(paths, config, fonts), fields(images = paths.len()))]
pub fn build_poster(
    paths: &[PathBuf],
    config: &PosterConfig,
    fonts: &dyn FontProvider,
) -> PosterResult<Poster> {
    config.validate()?;
    let Some((first_path, rest)) = paths.split_first() else {
        return Err(PosterError::config("a poster needs at least one image path"));
    };

    let label_font = if config.labels.enabled {
        Some(fonts.rasterizer(&config.labels.font_family)?)
    } else {
        None
    };
    let title_font = config
        .title
        .as_ref()
        .map(|t| fonts.rasterizer(&t.font_family))
        .transpose()?;
    let footer_font = config
        .footer
        .as_ref()
        .map(|f| fonts.rasterizer(&f.font_family))
        .transpose()?;

    let band = match (&label_font, config.labels.band_height) {
        (None, _) => 0,
        (Some(_), Some(fixed)) => fixed,
        (Some(font), None) => label_band_height(
            font.as_ref(),
            config.labels.font_size,
            config.labels.padding_top,
            config.labels.padding_bottom,
        )?,
    };

    let first = load_prepared(first_path, config)?;
    let cell_size = match config.cell_size {
        Some(size) => size,
        None => Size {
            width: first.width(),
            height: first.height().saturating_add(band),
        },
    };

    let cell_cfg = CellConfig {
        cell_width: cell_size.width,
        cell_height: cell_size.height,
        add_labels: label_font.is_some(),
        label_band_height: band,
        label_padding_top: config.labels.padding_top,
        font: label_font,
        font_size: config.labels.font_size,
        text_color: config.labels.text_color,
        bg_color: config.cell_background(),
    };
    cell_cfg.validate()?;

    let columns = config.grid.images_per_row as usize;
    tracing::info!(
        columns,
        rows = paths.len().div_ceil(columns),
        cell = %cell_size,
        label_band = band,
        "building poster"
    );

    let mut cells = Vec::with_capacity(paths.len());
    cells.push(render_source(first_path, &first, &cell_cfg)?);
    drop(first);
    cells.extend(render_paths(rest, config, &cell_cfg)?);

    let grid = compose_grid(&cells, config.grid, config.background)?;
    drop(cells);

    let title = match (&config.title, title_font) {
        (Some(t), Some(font)) => {
            tracing::info!(title = %t.text, "adding title");
            let style = BannerStyle {
                height: t.height,
                font,
                font_size: t.font_size,
                text_color: t.text_color,
                bg_color: t.bg_color,
            };
            Some(render_title(grid.width(), &t.text, &style)?)
        }
        _ => None,
    };
    let footer = match (&config.footer, footer_font) {
        (Some(f), Some(font)) => {
            tracing::info!(footer = %f.text, "adding footer");
            let style = BannerStyle {
                height: f.height,
                font,
                font_size: f.font_size,
                text_color: f.text_color,
                bg_color: f.bg_color,
            };
            Some(render_footer(grid.width(), &f.text, &style, f.inset)?)
        }
        _ => None,
    };

    let poster = frame_poster(grid, title, footer, config)?;
    tracing::info!(
        width = poster.width(),
        height = poster.height(),
        "poster created"
    );
    Ok(poster)
}

fn load_prepared(path: &Path, config: &PosterConfig) -> PosterResult<SourceImage> {
    let image = load_image(path)?;
    config.preprocess.apply(image).map_err(|e| match e {
        PosterError::Config(msg) => PosterError::image_load(path, msg),
        other => other,
    })
}

fn render_source(path: &Path, image: &SourceImage, cell_cfg: &CellConfig) -> PosterResult<Cell> {
    let label = if cell_cfg.add_labels {
        Some(derive_label(path)?)
    } else {
        None
    };
    tracing::debug!(path = %path.display(), label = label.as_deref(), "rendering cell");
    render_cell(image, label.as_deref(), cell_cfg)
}

fn render_path(path: &Path, config: &PosterConfig, cell_cfg: &CellConfig) -> PosterResult<Cell> {
    let image = load_prepared(path, config)?;
    render_source(path, &image, cell_cfg)
}

fn render_paths(
    paths: &[PathBuf],
    config: &PosterConfig,
    cell_cfg: &CellConfig,
) -> PosterResult<Vec<Cell>> {
    if !config.parallel || paths.len() < 2 {
        return paths
            .iter()
            .map(|p| render_path(p, config, cell_cfg))
            .collect();
    }

    let pool = build_thread_pool(config.threads)?;
    let rendered = pool.install(|| {
        paths
            .par_iter()
            .map(|p| render_path(p, config, cell_cfg))
            .collect::<Vec<_>>()
    });

    // Report the first failure in input order, not completion order.
    rendered.into_iter().collect()
}

fn build_thread_pool(threads: Option<usize>) -> PosterResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(PosterError::config("threads must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PosterError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

/// Stack title / grid / footer and pad the left and right margins.
fn frame_poster(
    grid: Poster,
    title: Option<image::RgbaImage>,
    footer: Option<image::RgbaImage>,
    config: &PosterConfig,
) -> PosterResult<Poster> {
    let margins = config.margins;
    if title.is_none() && footer.is_none() && margins.left == 0 && margins.right == 0 {
        return Ok(grid);
    }

    let title_h = title.as_ref().map_or(0, |t| t.height());
    let footer_h = footer.as_ref().map_or(0, |f| f.height());
    let width = u64::from(margins.left) + u64::from(grid.width()) + u64::from(margins.right);
    let height = u64::from(title_h) + u64::from(grid.height()) + u64::from(footer_h);
    let (width, height) = match (u32::try_from(width), u32::try_from(height)) {
        (Ok(w), Ok(h)) => (w, h),
        _ => {
            return Err(PosterError::layout(format!(
                "framed poster {width}x{height} exceeds the u32 pixel range"
            )));
        }
    };

    let mut canvas = image::RgbaImage::from_pixel(width, height, config.background.to_pixel());
    let x = i64::from(margins.left);
    if let Some(t) = &title {
        image::imageops::replace(&mut canvas, t, x, 0);
    }
    image::imageops::replace(&mut canvas, &grid.image, x, i64::from(title_h));
    if let Some(f) = &footer {
        image::imageops::replace(&mut canvas, f, x, i64::from(title_h + grid.height()));
    }

    Ok(Poster {
        image: canvas,
        grid: grid.grid,
        grid_origin: (margins.left, title_h),
    })
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
