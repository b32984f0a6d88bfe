use serde::{Deserialize, Serialize};

use crate::{
    foundation::core::Size,
    foundation::error::{PosterError, PosterResult},
};

/// Column count and gutters of a poster grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSpec {
    pub images_per_row: u32,
    /// Horizontal gap between adjacent columns.
    pub spacing_x: u32,
    /// Vertical gap between adjacent rows.
    pub spacing_y: u32,
}

impl Default for GridSpec {
    fn default() -> Self {
        Self {
            images_per_row: 1,
            spacing_x: 0,
            spacing_y: 0,
        }
    }
}

impl GridSpec {
    pub fn columns(images_per_row: u32) -> Self {
        Self {
            images_per_row,
            ..Self::default()
        }
    }
}

/// Pixel rectangle of one grid cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Resolved row-major placement of `count` uniform cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridLayout {
    pub count: usize,
    pub columns: u32,
    pub rows: u32,
    pub cell: Size,
    pub spacing_x: u32,
    pub spacing_y: u32,
    /// Total grid width, gutters included.
    pub width: u32,
    /// Total grid height, gutters included.
    pub height: u32,
}

impl GridLayout {
    pub fn new(count: usize, cell: Size, spec: GridSpec) -> PosterResult<Self> {
        if spec.images_per_row == 0 {
            return Err(PosterError::config("images_per_row must be >= 1"));
        }
        if count == 0 {
            return Err(PosterError::config("a poster needs at least one image"));
        }
        if cell.width == 0 || cell.height == 0 {
            return Err(PosterError::config(format!(
                "cell size must be positive, got {cell}"
            )));
        }

        let columns = u64::from(spec.images_per_row);
        let rows = (count as u64).div_ceil(columns);
        let width = span(columns, cell.width, spec.spacing_x);
        let height = span(rows, cell.height, spec.spacing_y);

        let to_u32 = |v: u64, what: &str| -> PosterResult<u32> {
            u32::try_from(v).map_err(|_| {
                PosterError::layout(format!("poster {what} {v} exceeds the u32 pixel range"))
            })
        };

        Ok(Self {
            count,
            columns: spec.images_per_row,
            rows: to_u32(rows, "row count")?,
            cell,
            spacing_x: spec.spacing_x,
            spacing_y: spec.spacing_y,
            width: to_u32(width, "width")?,
            height: to_u32(height, "height")?,
        })
    }

    /// `(column, row)` of cell `index`, row-major.
    pub fn position(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.count {
            return None;
        }
        let cols = self.columns as usize;
        Some(((index % cols) as u32, (index / cols) as u32))
    }

    pub fn cell_rect(&self, index: usize) -> Option<CellRect> {
        let (col, row) = self.position(index)?;
        Some(CellRect {
            x: offset(col, self.cell.width, self.spacing_x),
            y: offset(row, self.cell.height, self.spacing_y),
            width: self.cell.width,
            height: self.cell.height,
        })
    }

    /// Number of cells in the last row (equal to `columns` when it is full).
    pub fn last_row_len(&self) -> u32 {
        let rem = (self.count % self.columns as usize) as u32;
        if rem == 0 { self.columns } else { rem }
    }
}

// Bounded by the validated canvas size, so the narrowing cannot truncate.
fn offset(i: u32, cell: u32, gap: u32) -> u32 {
    (u64::from(i) * (u64::from(cell) + u64::from(gap))) as u32
}

fn span(n: u64, cell: u32, gap: u32) -> u64 {
    n * u64::from(cell) + n.saturating_sub(1) * u64::from(gap)
}

#[cfg(test)]
#[path = "../../tests/unit/layout/grid.rs"]
mod tests;
