/// Row-major grid geometry.
pub mod grid;
