//! Destructive crop of the overlay raster with visual anchoring.

pub mod engine;
