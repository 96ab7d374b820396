//! Stateless pointer geometry: background space to overlay-local space, hit
//! classification and the drag / resize update rules.

pub mod gesture;
pub mod hit;
