use super::*;

const BG: Rgba8 = Rgba8::new(250, 250, 250, 255);

/// Cell whose pixels encode its index and local coordinates.
fn patterned(idx: u8, w: u32, h: u32) -> Cell {
    Cell::from_rgba(image::RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([idx, (x % 256) as u8, (y % 256) as u8, 255])
    }))
}

fn assert_cell_at(poster: &Poster, cell: &Cell, x0: u32, y0: u32) {
    for y in 0..cell.height() {
        for x in 0..cell.width() {
            assert_eq!(
                poster.image.get_pixel(x0 + x, y0 + y),
                cell.as_rgba().get_pixel(x, y)
            );
        }
    }
}

fn assert_region_is(poster: &Poster, x0: u32, y0: u32, x1: u32, y1: u32, c: Rgba8) {
    for y in y0..y1 {
        for x in x0..x1 {
            assert_eq!(*poster.image.get_pixel(x, y), c.to_pixel());
        }
    }
}

#[test]
fn three_cells_two_per_row_leave_trailing_background() {
    let cells: Vec<Cell> = (0..3).map(|i| patterned(i, 120, 160)).collect();
    let poster = compose(&cells, 2, BG).unwrap();
    assert_eq!((poster.width(), poster.height()), (240, 320));
    assert_cell_at(&poster, &cells[0], 0, 0);
    assert_cell_at(&poster, &cells[1], 120, 0);
    assert_cell_at(&poster, &cells[2], 0, 160);
    assert_region_is(&poster, 120, 160, 240, 320, BG);
}

#[test]
fn every_cell_lands_at_its_row_major_offset() {
    for per_row in 1..=5u32 {
        let cells: Vec<Cell> = (0..7).map(|i| patterned(i, 6, 4)).collect();
        let poster = compose(&cells, per_row, BG).unwrap();
        let rows = 7u32.div_ceil(per_row);
        assert_eq!((poster.width(), poster.height()), (per_row * 6, rows * 4));
        for (i, c) in cells.iter().enumerate() {
            let i = i as u32;
            assert_cell_at(&poster, c, (i % per_row) * 6, (i / per_row) * 4);
        }
        let last = 7 % per_row;
        if last != 0 {
            assert_region_is(&poster, last * 6, (rows - 1) * 4, per_row * 6, rows * 4, BG);
        }
    }
}

#[test]
fn full_seven_by_seven_grid() {
    let cells: Vec<Cell> = (0..49).map(|i| patterned(i, 200, 260)).collect();
    let poster = compose(&cells, 7, BG).unwrap();
    assert_eq!((poster.width(), poster.height()), (1400, 1820));
    assert_eq!(poster.grid.rows, 7);
    assert_cell_at(&poster, &cells[48], 1200, 1560);
}

#[test]
fn composing_twice_is_byte_identical() {
    let cells: Vec<Cell> = (0..5).map(|i| patterned(i, 9, 9)).collect();
    let a = compose(&cells, 3, BG).unwrap();
    let b = compose(&cells, 3, BG).unwrap();
    assert_eq!(a.image.as_raw(), b.image.as_raw());
}

#[test]
fn translucent_cells_overwrite_without_blending() {
    let cell = Cell::from_rgba(image::RgbaImage::from_pixel(
        2,
        2,
        image::Rgba([10, 20, 30, 0]),
    ));
    let poster = compose(std::slice::from_ref(&cell), 1, BG).unwrap();
    assert_eq!(poster.image.get_pixel(0, 0).0, [10, 20, 30, 0]);
}

#[test]
fn gutters_stay_background() {
    let cells: Vec<Cell> = (0..2).map(|i| patterned(i, 4, 4)).collect();
    let spec = GridSpec {
        images_per_row: 2,
        spacing_x: 3,
        spacing_y: 0,
    };
    let poster = compose_grid(&cells, spec, BG).unwrap();
    assert_eq!((poster.width(), poster.height()), (11, 4));
    assert_region_is(&poster, 4, 0, 7, 4, BG);
    assert_cell_at(&poster, &cells[1], 7, 0);
}

#[test]
fn mismatched_cell_sizes_are_layout_errors() {
    let cells = vec![patterned(0, 4, 4), patterned(1, 4, 5)];
    let err = compose(&cells, 2, BG).unwrap_err();
    assert!(matches!(err, PosterError::Layout(_)));
    assert!(err.to_string().contains("cell 1"));
}

#[test]
fn invalid_column_count_and_empty_input_are_config_errors() {
    let cells = vec![patterned(0, 4, 4)];
    assert!(matches!(
        compose(&cells, 0, BG),
        Err(PosterError::Config(_))
    ));
    assert!(matches!(compose(&[], 2, BG), Err(PosterError::Config(_))));
}
