//! Keystage is an overlay compositing engine for still images.
//!
//! A session holds one background raster and at most one overlay. The overlay
//! is chroma-keyed on load, placed with a [`TransformState`] (position, uniform
//! scale, rotation, flips) and edited through pointer gestures and discrete
//! actions. Every committed change is undoable.
//!
//! # Flow
//!
//! 1. **Load**: decode the background and the overlay; the overlay is keyed
//!    ([`ChromaKey::extract`]) and fitted inside the background.
//! 2. **Edit**: feed [`PointerEvent`]s and discrete actions to an [`Editor`]
//!    (drag, corner resize, rotate, flip, scale, crop).
//! 3. **Read**: draw [`Editor::scene`] for on-screen chrome, or flatten with
//!    [`Editor::export_composite`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Atomic actions**: every mutation applies completely or reports an
//!   [`Outcome::Ignored`] and leaves state untouched.
//! - **Straight-alpha RGBA8** rasters everywhere; premultiplication happens
//!   only inside the compositor.
#![forbid(unsafe_code)]

mod assets;
mod crop;
mod editor;
mod foundation;
mod geometry;
mod history;
mod keying;
mod render;
mod transform;

pub use assets::decode::{ImageDecoder, RasterDecoder, decode_raster};
pub use assets::encode::encode_png;
pub use crop::engine::{
    CropOutcome, CropSelection, PixelRect, perform_crop, selection_pixels, to_crop_space,
};
pub use editor::input::{EditorCommand, PointerEvent, PointerKind};
pub use editor::mode::{EditorMode, Outcome, Skip};
pub use editor::session::{Editor, OverlayLayer};
pub use foundation::config::EditorConfig;
pub use foundation::core::{Affine, Point, RasterImage, Rgba8, Size, Vec2};
pub use foundation::error::{KeystageError, KeystageResult};
pub use foundation::math::{clamp_axis, normalize_angle, rotate_vec};
pub use geometry::gesture::{drag, resize, scale_about_center};
pub use geometry::hit::{Corner, HitTarget, classify, from_local, to_local};
pub use history::manager::{History, HistorySnapshot};
pub use keying::chroma::ChromaKey;
pub use render::composite::composite;
pub use render::scene::{HandleView, SceneView};
pub use transform::state::TransformState;
