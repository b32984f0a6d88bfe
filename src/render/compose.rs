use crate::{
    foundation::core::{Rgba8, Size},
    foundation::error::{PosterError, PosterResult},
    layout::grid::{GridLayout, GridSpec},
    render::cell::Cell,
};

/// Final composite image plus the geometry used to build it.
#[derive(Clone, Debug, PartialEq)]
pub struct Poster {
    pub image: image::RgbaImage,
    pub grid: GridLayout,
    /// Top-left of the grid inside `image` (non-zero once title or margins are added).
    pub grid_origin: (u32, u32),
}

impl Poster {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Paste `cells` row-major into a `bg_color` canvas with `images_per_row` columns.
///
/// The last row is left-aligned; unused trailing positions stay background.
pub fn compose(cells: &[Cell], images_per_row: u32, bg_color: Rgba8) -> PosterResult<Poster> {
    compose_grid(cells, GridSpec::columns(images_per_row), bg_color)
}

/// [`compose`] with gutters; gutters stay background-colored.
pub fn compose_grid(cells: &[Cell], spec: GridSpec, bg_color: Rgba8) -> PosterResult<Poster> {
    if spec.images_per_row == 0 {
        return Err(PosterError::config("images_per_row must be >= 1"));
    }
    let first = cells
        .first()
        .ok_or_else(|| PosterError::config("cannot compose an empty cell sequence"))?;
    let (cell_w, cell_h) = first.size();
    if let Some((idx, bad)) = cells
        .iter()
        .enumerate()
        .find(|(_, c)| c.size() != (cell_w, cell_h))
    {
        return Err(PosterError::layout(format!(
            "cell {idx} is {}x{}, expected {cell_w}x{cell_h} like cell 0",
            bad.width(),
            bad.height()
        )));
    }

    let cell = Size::new(cell_w, cell_h).map_err(|_| {
        PosterError::layout(format!("cells have empty size {cell_w}x{cell_h}"))
    })?;
    let grid = GridLayout::new(cells.len(), cell, spec)?;
    tracing::debug!(
        columns = grid.columns,
        rows = grid.rows,
        width = grid.width,
        height = grid.height,
        "composing grid"
    );

    let mut canvas = image::RgbaImage::from_pixel(grid.width, grid.height, bg_color.to_pixel());
    for (idx, c) in cells.iter().enumerate() {
        let rect = grid
            .cell_rect(idx)
            .ok_or_else(|| PosterError::layout(format!("cell {idx} has no grid position")))?;
        image::imageops::replace(
            &mut canvas,
            c.as_rgba(),
            i64::from(rect.x),
            i64::from(rect.y),
        );
    }

    Ok(Poster {
        image: canvas,
        grid,
        grid_origin: (0, 0),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/compose.rs"]
mod tests;
