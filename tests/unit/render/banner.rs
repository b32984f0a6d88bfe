use super::*;
use crate::test_support::BlockFont;

fn style(height: u32) -> BannerStyle {
    BannerStyle {
        height,
        font: Arc::new(BlockFont),
        font_size: 20.0,
        text_color: Rgba8::BLACK,
        bg_color: Rgba8::WHITE,
    }
}

#[test]
fn title_is_centered_on_both_axes() {
    let row = render_title(100, "abcd", &style(40)).unwrap();
    assert_eq!(row.dimensions(), (100, 40));
    // 40x20 text block at (30, 10).
    assert_eq!(*row.get_pixel(30, 10), Rgba8::BLACK.to_pixel());
    assert_eq!(*row.get_pixel(69, 29), Rgba8::BLACK.to_pixel());
    assert_eq!(*row.get_pixel(29, 10), Rgba8::WHITE.to_pixel());
    assert_eq!(*row.get_pixel(30, 9), Rgba8::WHITE.to_pixel());
    assert_eq!(*row.get_pixel(30, 30), Rgba8::WHITE.to_pixel());
}

#[test]
fn footer_starts_at_inset() {
    let row = render_footer(100, "ab", &style(30), 40).unwrap();
    assert_eq!(*row.get_pixel(39, 15), Rgba8::WHITE.to_pixel());
    assert_eq!(*row.get_pixel(40, 5), Rgba8::BLACK.to_pixel());
    assert_eq!(*row.get_pixel(59, 24), Rgba8::BLACK.to_pixel());
    assert_eq!(*row.get_pixel(60, 15), Rgba8::WHITE.to_pixel());
}

#[test]
fn zero_height_banner_is_config_error() {
    assert!(matches!(
        render_title(100, "x", &style(0)),
        Err(PosterError::Config(_))
    ));
}
