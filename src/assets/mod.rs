//! Byte-level image IO at the edge of the engine.

pub mod decode;
pub mod encode;
