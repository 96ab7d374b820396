//! Geometry the renderer needs to paint the editor state. Nothing here
//! touches pixels.

use crate::editor::mode::EditorMode;
use crate::foundation::core::{Point, Size, Vec2};
use crate::geometry::hit::{Corner, from_local};
use crate::transform::state::TransformState;

/// A square corner handle in background pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandleView {
    pub corner: Corner,
    pub center: Point,
    pub half_size: f64,
}

/// Snapshot of what to draw over the background.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneView {
    /// Overlay box corners in background space, indexed like [`Corner`].
    pub overlay_quad: [Point; 4],
    pub handles: [HandleView; 4],
    /// Handles are hidden while crop mode is active.
    pub show_handles: bool,
    /// Crop selection outline while a selection is being dragged.
    pub crop_quad: Option<[Point; 4]>,
}

impl SceneView {
    pub fn build(
        size: Size,
        transform: &TransformState,
        mode: &EditorMode,
        handle_half_size: f64,
    ) -> Self {
        let scaled = transform.scaled_size(size);
        let overlay_quad =
            Corner::ALL.map(|c| from_local(c.local_position(scaled), transform, size));
        let handles = Corner::ALL.map(|corner| HandleView {
            corner,
            center: overlay_quad[corner.index()],
            half_size: handle_half_size,
        });

        let crop_quad = match mode {
            EditorMode::CropDragging { selection, .. } => {
                let (x1, y1, x2, y2) = selection.bounds();
                let s = transform.scale;
                Some(
                    [(x1, y1), (x2, y1), (x2, y2), (x1, y2)]
                        .map(|(x, y)| from_local(Vec2::new(x * s, y * s), transform, size)),
                )
            }
            _ => None,
        };

        Self {
            overlay_quad,
            handles,
            show_handles: !mode.is_crop(),
            crop_quad,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/scene.rs"]
mod tests;
