//! Overlay placement record and the affine it describes.

pub mod state;
