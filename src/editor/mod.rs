//! The editor context: owns the rasters, the transform, the history and the
//! gesture state machine, and turns input into committed state changes.

pub mod input;
pub mod mode;
pub mod session;
