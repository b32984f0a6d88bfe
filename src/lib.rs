//! Fixed-column poster compositing for image collections.
//!
//! Every source image is scaled into a uniform cell (optionally with a
//! centered text label underneath), and the cells are pasted row-major onto a
//! single canvas. Title and footer rows and side margins frame the grid.
//!
//! ```no_run
//! use postergrid::{FontResolver, PosterConfig, build_poster, save_poster};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut config = PosterConfig::default();
//! config.grid.images_per_row = 7;
//! let fonts = FontResolver::new(&[]);
//! let paths: Vec<std::path::PathBuf> = vec!["covers/japan.jpg".into(), "covers/france.jpg".into()];
//! let poster = build_poster(&paths, &config, &fonts)?;
//! save_poster(&poster, std::path::Path::new("poster.jpg"), postergrid::DEFAULT_JPEG_QUALITY)?;
//! # Ok(())
//! # }
//! ```
#![forbid(unsafe_code)]

// Lets the shared test helpers name items as `postergrid::..` from unit tests too.
#[cfg(test)]
extern crate self as postergrid;

pub mod assets;
pub mod config;
pub mod foundation;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod text;

pub use assets::{
    catalog::{RegionCatalog, derive_label},
    decode::{SourceImage, decode_image, load_image},
    prep::Preprocess,
};
pub use config::{FooterConfig, LabelConfig, Margins, PosterConfig, TitleConfig};
pub use foundation::{
    core::{Insets, Rgba8, Size},
    error::{PosterError, PosterResult},
};
pub use layout::grid::{CellRect, GridLayout, GridSpec};
pub use output::{DEFAULT_JPEG_QUALITY, save_poster};
pub use pipeline::build_poster;
pub use render::{
    banner::{BannerStyle, render_footer, render_title},
    cell::{Cell, CellConfig, fit_inside, label_band_height, render_cell},
    compose::{Poster, compose, compose_grid},
};
pub use text::{
    font::{FaceListing, FixedFont, FontProvider, FontResolver, LoadedFont},
    raster::{ParleyRasterizer, TextExtent, TextRasterizer},
};

#[cfg(test)]
#[path = "../tests/support/mod.rs"]
pub(crate) mod test_support;
