//! Cell rendering, grid compositing, and full-width banner rows.

pub mod banner;
pub mod cell;
pub mod compose;
