/// Font discovery and resolution.
pub mod font;
/// Text measurement and rasterization.
pub mod raster;
