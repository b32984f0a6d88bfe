/// Region directory scanning and label derivation.
pub mod catalog;
/// Image decoding into [`decode::SourceImage`].
pub mod decode;
/// Source normalization (resize + inset crop).
pub mod prep;
