use std::collections::VecDeque;

use crate::foundation::core::RasterImage;
use crate::transform::state::TransformState;

/// Immutable capture of the overlay raster and its transform.
///
/// A snapshot without a raster stands for "no overlay loaded" and is a
/// regular state that undo/redo can return to.
#[derive(Clone, Debug, PartialEq)]
pub struct HistorySnapshot {
    overlay: Option<RasterImage>,
    transform: Option<TransformState>,
}

impl HistorySnapshot {
    pub fn new(overlay: RasterImage, transform: TransformState) -> Self {
        Self {
            overlay: Some(overlay),
            transform: Some(transform),
        }
    }

    pub fn empty() -> Self {
        Self {
            overlay: None,
            transform: None,
        }
    }

    pub fn overlay(&self) -> Option<&RasterImage> {
        self.overlay.as_ref()
    }

    pub fn transform(&self) -> Option<&TransformState> {
        self.transform.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.overlay.is_none()
    }

    pub fn into_parts(self) -> (Option<RasterImage>, Option<TransformState>) {
        (self.overlay, self.transform)
    }
}

/// Two-stack history, most recent entry at the back.
///
/// The caller supplies the live state on every undo/redo; that state moves
/// onto the opposite stack so the step can be reversed.
#[derive(Clone, Debug, Default)]
pub struct History {
    undo: VecDeque<HistorySnapshot>,
    redo: VecDeque<HistorySnapshot>,
    limit: usize,
}

impl History {
    /// `limit` caps the undo depth; 0 means unbounded.
    pub fn new(limit: usize) -> Self {
        Self {
            undo: VecDeque::new(),
            redo: VecDeque::new(),
            limit,
        }
    }

    /// Push the pre-mutation state and invalidate redo.
    pub fn record(&mut self, before: HistorySnapshot) {
        self.undo.push_back(before);
        if self.limit > 0 {
            while self.undo.len() > self.limit {
                self.undo.pop_front();
            }
        }
        self.redo.clear();
    }

    /// Step back. Returns the state to install, or `None` when there is
    /// nothing to undo (in which case `current` is dropped and no stack moves).
    pub fn undo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        let target = self.undo.pop_back()?;
        self.redo.push_back(current);
        Some(target)
    }

    /// Step forward; mirror of [`History::undo`].
    pub fn redo(&mut self, current: HistorySnapshot) -> Option<HistorySnapshot> {
        let target = self.redo.pop_back()?;
        self.undo.push_back(current);
        Some(target)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/history/manager.rs"]
mod tests;
