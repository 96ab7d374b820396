use crate::crop::engine::CropSelection;
use crate::foundation::core::{Point, Vec2};
use crate::geometry::hit::Corner;
use crate::transform::state::TransformState;

/// Gesture state machine.
///
/// ```text
/// Idle --down(body)--> Dragging --up--> Idle
/// Idle --down(handle)--> Resizing --up--> Idle
/// Idle --enter crop--> CropArmed --down(inside)--> CropDragging --up--> Idle (committed)
/// CropArmed --exit crop--> Idle        CropDragging --exit crop / cancel--> Idle / CropArmed
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EditorMode {
    Idle,
    CropArmed,
    CropDragging {
        pointer_id: u32,
        selection: CropSelection,
    },
    Dragging {
        pointer_id: u32,
        /// Pointer offset from the box center in local scaled space.
        anchor: Vec2,
        before: TransformState,
    },
    Resizing {
        pointer_id: u32,
        handle: Corner,
        center: Point,
        before: TransformState,
    },
}

impl EditorMode {
    /// True while a pointer gesture owns the pointer.
    pub fn is_gesture(&self) -> bool {
        matches!(
            self,
            EditorMode::CropDragging { .. }
                | EditorMode::Dragging { .. }
                | EditorMode::Resizing { .. }
        )
    }

    pub fn is_crop(&self) -> bool {
        matches!(self, EditorMode::CropArmed | EditorMode::CropDragging { .. })
    }

    /// Pointer that owns the active gesture.
    pub fn captured_pointer(&self) -> Option<u32> {
        match *self {
            EditorMode::CropDragging { pointer_id, .. }
            | EditorMode::Dragging { pointer_id, .. }
            | EditorMode::Resizing { pointer_id, .. } => Some(pointer_id),
            EditorMode::Idle | EditorMode::CropArmed => None,
        }
    }
}

/// Why an action left the state untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Skip {
    NoOverlay,
    NoBackground,
    /// A pointer gesture is in progress.
    GestureActive,
    /// Crop selection with no area, or outside the raster.
    EmptySelection,
    HistoryEmpty,
    /// Non-finite or out-of-range argument.
    InvalidInput,
    /// Event has no meaning in the current mode.
    Unhandled,
}

/// Result of a mutating editor action.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Ignored(Skip),
}

impl Outcome {
    pub fn is_applied(self) -> bool {
        self == Outcome::Applied
    }
}
