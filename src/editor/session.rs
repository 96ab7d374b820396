use crate::assets::decode::RasterDecoder;
use crate::crop::engine::{CropSelection, perform_crop, to_crop_space};
use crate::editor::input::{EditorCommand, PointerEvent, PointerKind};
use crate::editor::mode::{EditorMode, Outcome, Skip};
use crate::foundation::config::EditorConfig;
use crate::foundation::core::{RasterImage, Size};
use crate::foundation::error::KeystageResult;
use crate::geometry::gesture::{drag, resize, scale_about_center};
use crate::geometry::hit::{HitTarget, classify, to_local};
use crate::history::manager::{History, HistorySnapshot};
use crate::render::composite::composite;
use crate::render::scene::SceneView;
use crate::transform::state::TransformState;

/// The keyed overlay together with its placement. Both are always replaced
/// together.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLayer {
    pub raster: RasterImage,
    pub transform: TransformState,
}

/// Engine context for one editing session.
///
/// Owns the background, the overlay layer, the undo/redo history and the
/// gesture state. Rendering code reads it between mutations; every mutation
/// goes through a method here and either applies completely or not at all.
#[derive(Clone, Debug)]
pub struct Editor {
    config: EditorConfig,
    background: Option<RasterImage>,
    overlay: Option<OverlayLayer>,
    history: History,
    mode: EditorMode,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            history: History::new(config.history_limit),
            config,
            background: None,
            overlay: None,
            mode: EditorMode::Idle,
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn mode(&self) -> &EditorMode {
        &self.mode
    }

    pub fn background(&self) -> Option<&RasterImage> {
        self.background.as_ref()
    }

    pub fn overlay(&self) -> Option<&OverlayLayer> {
        self.overlay.as_ref()
    }

    pub fn transform(&self) -> Option<&TransformState> {
        self.overlay.as_ref().map(|l| &l.transform)
    }

    /// Keyed overlay before any transform; replaced by crops.
    pub fn original_overlay(&self) -> Option<&RasterImage> {
        self.overlay.as_ref().map(|l| &l.raster)
    }

    /// Overlay raster currently drawn. Crop replaces the single overlay
    /// lineage, so this is the same raster as [`Editor::original_overlay`].
    pub fn current_overlay(&self) -> Option<&RasterImage> {
        self.original_overlay()
    }

    pub fn has_overlay(&self) -> bool {
        self.overlay.is_some()
    }

    pub fn has_background(&self) -> bool {
        self.background.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn is_crop_mode_active(&self) -> bool {
        self.mode.is_crop()
    }

    // ---------------------------------------------------------------------
    // Loading
    // ---------------------------------------------------------------------

    /// Install a decoded background. An existing overlay is re-clamped into
    /// the new bounds.
    pub fn load_background(&mut self, raster: RasterImage) -> Outcome {
        if self.mode.is_gesture() {
            return ignored("load_background", Skip::GestureActive);
        }
        let bg = raster.size();
        if let Some(layer) = self.overlay.as_mut() {
            layer.transform = layer.transform.clamped(layer.raster.size(), bg);
        }
        self.background = Some(raster);
        tracing::debug!(width = bg.width, height = bg.height, "background loaded");
        Outcome::Applied
    }

    /// Key a raw overlay raster and place it with the default fit.
    pub fn load_overlay(&mut self, raw: RasterImage) -> Outcome {
        if self.mode.is_gesture() {
            return ignored("load_overlay", Skip::GestureActive);
        }
        let Some(bg) = self.background_size() else {
            return ignored("load_overlay", Skip::NoBackground);
        };

        let keyed = self.config.chroma_key.extract(&raw);
        let transform = TransformState::fit(
            keyed.size(),
            bg,
            self.config.initial_margin,
            self.config.min_scale,
        );

        self.record_before_action();
        self.overlay = Some(OverlayLayer {
            raster: keyed,
            transform,
        });
        tracing::debug!(scale = transform.scale, "overlay loaded");
        Outcome::Applied
    }

    /// Decode `bytes` and install them as the background.
    ///
    /// The editor stays borrowed until the decode resolves, so no other
    /// action can interleave with it. Dropping the future cancels the load
    /// without touching state.
    pub async fn load_background_bytes<D: RasterDecoder>(
        &mut self,
        decoder: &D,
        bytes: &[u8],
    ) -> KeystageResult<Outcome> {
        if self.mode.is_gesture() {
            return Ok(ignored("load_background", Skip::GestureActive));
        }
        let raster = decoder.decode(bytes).await?;
        Ok(self.load_background(raster))
    }

    /// Decode `bytes`, key them and install the result as the overlay.
    pub async fn load_overlay_bytes<D: RasterDecoder>(
        &mut self,
        decoder: &D,
        bytes: &[u8],
    ) -> KeystageResult<Outcome> {
        if self.mode.is_gesture() {
            return Ok(ignored("load_overlay", Skip::GestureActive));
        }
        if self.background.is_none() {
            return Ok(ignored("load_overlay", Skip::NoBackground));
        }
        let raster = decoder.decode(bytes).await?;
        Ok(self.load_overlay(raster))
    }

    // ---------------------------------------------------------------------
    // History
    // ---------------------------------------------------------------------

    fn snapshot(&self) -> HistorySnapshot {
        match &self.overlay {
            Some(layer) => HistorySnapshot::new(layer.raster.clone(), layer.transform),
            None => HistorySnapshot::empty(),
        }
    }

    /// Push the pre-mutation state. Nothing to protect without an overlay.
    fn record_before_action(&mut self) {
        if self.overlay.is_some() {
            let snapshot = self.snapshot();
            self.history.record(snapshot);
        }
    }

    fn restore(&mut self, snapshot: HistorySnapshot) {
        let bg = self.background_size();
        let (raster, transform) = snapshot.into_parts();
        self.overlay = raster.map(|raster| {
            let size = raster.size();
            let transform = match (transform, bg) {
                // The background may have changed since the snapshot was taken.
                (Some(t), Some(bg)) => t.clamped(size, bg),
                (Some(t), None) => t,
                (None, Some(bg)) => TransformState::fit(
                    size,
                    bg,
                    self.config.initial_margin,
                    self.config.min_scale,
                ),
                (None, None) => TransformState::default(),
            };
            OverlayLayer { raster, transform }
        });
        if self.overlay.is_none() {
            self.mode = EditorMode::Idle;
        }
    }

    pub fn undo(&mut self) -> Outcome {
        if self.mode.is_gesture() {
            return ignored("undo", Skip::GestureActive);
        }
        let current = self.snapshot();
        match self.history.undo(current) {
            Some(target) => {
                self.restore(target);
                tracing::debug!(depth = self.history.undo_depth(), "undo");
                Outcome::Applied
            }
            None => ignored("undo", Skip::HistoryEmpty),
        }
    }

    pub fn redo(&mut self) -> Outcome {
        if self.mode.is_gesture() {
            return ignored("redo", Skip::GestureActive);
        }
        let current = self.snapshot();
        match self.history.redo(current) {
            Some(target) => {
                self.restore(target);
                tracing::debug!(depth = self.history.redo_depth(), "redo");
                Outcome::Applied
            }
            None => ignored("redo", Skip::HistoryEmpty),
        }
    }

    // ---------------------------------------------------------------------
    // Discrete transform actions
    // ---------------------------------------------------------------------

    pub fn flip_horizontal(&mut self) -> Outcome {
        self.mutate_transform("flip_horizontal", |t, _, _, _| {
            Some(TransformState {
                flip_h: !t.flip_h,
                ..*t
            })
        })
    }

    pub fn flip_vertical(&mut self) -> Outcome {
        self.mutate_transform("flip_vertical", |t, _, _, _| {
            Some(TransformState {
                flip_v: !t.flip_v,
                ..*t
            })
        })
    }

    pub fn rotate_by(&mut self, degrees: f64) -> Outcome {
        self.mutate_transform("rotate_by", |t, _, _, _| {
            degrees
                .is_finite()
                .then(|| t.with_angle(t.angle_degrees + degrees))
        })
    }

    pub fn set_angle(&mut self, degrees: f64) -> Outcome {
        self.mutate_transform("set_angle", |t, _, _, _| {
            degrees.is_finite().then(|| t.with_angle(degrees))
        })
    }

    pub fn scale_by(&mut self, factor: f64) -> Outcome {
        self.mutate_transform("scale_by", |t, size, bg, cfg| {
            (factor.is_finite() && factor > 0.0)
                .then(|| scale_about_center(factor, t, size, bg, cfg.min_scale))
        })
    }

    /// Shared path for one-shot transform edits: check preconditions, compute
    /// the new transform, then record and install it.
    fn mutate_transform<F>(&mut self, action: &'static str, f: F) -> Outcome
    where
        F: FnOnce(&TransformState, Size, Size, &EditorConfig) -> Option<TransformState>,
    {
        if self.mode.is_gesture() {
            return ignored(action, Skip::GestureActive);
        }
        let Some(bg) = self.background_size() else {
            return ignored(action, Skip::NoBackground);
        };
        let Some(layer) = self.overlay.as_ref() else {
            return ignored(action, Skip::NoOverlay);
        };
        let size = layer.raster.size();
        let Some(next) = f(&layer.transform, size, bg, &self.config) else {
            return ignored(action, Skip::InvalidInput);
        };

        self.record_before_action();
        if let Some(layer) = self.overlay.as_mut() {
            layer.transform = next.clamped(size, bg);
        }
        tracing::debug!(action, "transform committed");
        Outcome::Applied
    }

    // ---------------------------------------------------------------------
    // Crop mode
    // ---------------------------------------------------------------------

    pub fn enter_crop_mode(&mut self) -> Outcome {
        if self.mode.is_gesture() {
            return ignored("enter_crop_mode", Skip::GestureActive);
        }
        if self.overlay.is_none() {
            return ignored("enter_crop_mode", Skip::NoOverlay);
        }
        if self.mode.is_crop() {
            return ignored("enter_crop_mode", Skip::Unhandled);
        }
        self.mode = EditorMode::CropArmed;
        Outcome::Applied
    }

    /// Leave crop mode. An in-flight selection is dropped without cropping.
    pub fn exit_crop_mode(&mut self) -> Outcome {
        match self.mode {
            EditorMode::CropArmed | EditorMode::CropDragging { .. } => {
                self.mode = EditorMode::Idle;
                Outcome::Applied
            }
            _ => ignored("exit_crop_mode", Skip::Unhandled),
        }
    }

    // ---------------------------------------------------------------------
    // Pointer gestures
    // ---------------------------------------------------------------------

    pub fn pointer(&mut self, event: PointerEvent) -> Outcome {
        if !(event.x.is_finite() && event.y.is_finite()) {
            return ignored("pointer", Skip::InvalidInput);
        }
        match event.kind {
            PointerKind::Down => self.pointer_down(event),
            PointerKind::Move => self.pointer_move(event),
            PointerKind::Up => self.pointer_up(event),
            PointerKind::Cancel => self.pointer_cancel(event),
        }
    }

    fn pointer_down(&mut self, event: PointerEvent) -> Outcome {
        if self.mode.is_gesture() {
            return ignored("pointer_down", Skip::GestureActive);
        }
        if self.background.is_none() {
            return ignored("pointer_down", Skip::NoBackground);
        }
        let Some(layer) = self.overlay.as_ref() else {
            return ignored("pointer_down", Skip::NoOverlay);
        };
        let size = layer.raster.size();
        let t = layer.transform;
        let p = event.position();
        let pointer_id = event.pointer_id;

        let next = match self.mode {
            EditorMode::CropArmed => {
                let start = to_crop_space(p, &t, size);
                if start.x.abs() > size.width / 2.0 || start.y.abs() > size.height / 2.0 {
                    return ignored("crop_start", Skip::Unhandled);
                }
                EditorMode::CropDragging {
                    pointer_id,
                    selection: CropSelection::new(start, start),
                }
            }
            EditorMode::Idle => {
                let local = to_local(p, &t, size);
                match classify(local, t.scaled_size(size), self.config.handle_half_size) {
                    HitTarget::Handle(handle) => EditorMode::Resizing {
                        pointer_id,
                        handle,
                        center: t.center(size),
                        before: t,
                    },
                    HitTarget::Body => EditorMode::Dragging {
                        pointer_id,
                        anchor: local,
                        before: t,
                    },
                    HitTarget::Outside => return ignored("pointer_down", Skip::Unhandled),
                }
            }
            _ => return ignored("pointer_down", Skip::GestureActive),
        };

        self.record_before_action();
        self.mode = next;
        tracing::debug!(mode = ?self.mode, "gesture started");
        Outcome::Applied
    }

    fn pointer_move(&mut self, event: PointerEvent) -> Outcome {
        if self.mode.captured_pointer() != Some(event.pointer_id) {
            return ignored("pointer_move", Skip::Unhandled);
        }
        let Some(bg) = self.background_size() else {
            return ignored("pointer_move", Skip::NoBackground);
        };
        let Some(layer) = self.overlay.as_mut() else {
            return ignored("pointer_move", Skip::NoOverlay);
        };
        let size = layer.raster.size();
        let p = event.position();

        match self.mode {
            EditorMode::Dragging { anchor, .. } => {
                layer.transform = drag(p, anchor, &layer.transform, size, bg);
            }
            EditorMode::Resizing { center, .. } => {
                layer.transform = resize(
                    p,
                    center,
                    &layer.transform,
                    size,
                    bg,
                    self.config.min_scale,
                );
            }
            EditorMode::CropDragging {
                pointer_id,
                selection,
            } => {
                let end = to_crop_space(p, &layer.transform, size);
                self.mode = EditorMode::CropDragging {
                    pointer_id,
                    selection: CropSelection::new(selection.start, end),
                };
            }
            EditorMode::Idle | EditorMode::CropArmed => {
                return ignored("pointer_move", Skip::Unhandled);
            }
        }
        Outcome::Applied
    }

    fn pointer_up(&mut self, event: PointerEvent) -> Outcome {
        if self.mode.captured_pointer() != Some(event.pointer_id) {
            return ignored("pointer_up", Skip::Unhandled);
        }
        // The release position is the gesture's final position.
        let moved = self.pointer_move(event);

        match self.mode {
            EditorMode::Dragging { .. } | EditorMode::Resizing { .. } => {
                self.mode = EditorMode::Idle;
                tracing::debug!(transform = ?self.transform(), "gesture committed");
                moved
            }
            EditorMode::CropDragging { selection, .. } => self.commit_crop(&selection),
            EditorMode::Idle | EditorMode::CropArmed => ignored("pointer_up", Skip::Unhandled),
        }
    }

    fn commit_crop(&mut self, selection: &CropSelection) -> Outcome {
        let bg = self.background_size();
        let outcome = match (self.overlay.as_ref(), bg) {
            (Some(layer), Some(bg)) => {
                perform_crop(selection, &layer.transform, &layer.raster, bg)
            }
            _ => None,
        };
        match outcome {
            Some(cropped) => {
                self.overlay = Some(OverlayLayer {
                    raster: cropped.raster,
                    transform: cropped.transform,
                });
                self.mode = EditorMode::Idle;
                tracing::debug!(rect = ?cropped.rect, "crop committed");
                Outcome::Applied
            }
            None => {
                self.mode = EditorMode::CropArmed;
                ignored("crop", Skip::EmptySelection)
            }
        }
    }

    fn pointer_cancel(&mut self, event: PointerEvent) -> Outcome {
        if self.mode.captured_pointer() != Some(event.pointer_id) {
            return ignored("pointer_cancel", Skip::Unhandled);
        }
        match self.mode {
            EditorMode::Dragging { before, .. } | EditorMode::Resizing { before, .. } => {
                if let Some(layer) = self.overlay.as_mut() {
                    layer.transform = before;
                }
                self.mode = EditorMode::Idle;
            }
            EditorMode::CropDragging { .. } => self.mode = EditorMode::CropArmed,
            EditorMode::Idle | EditorMode::CropArmed => {
                return ignored("pointer_cancel", Skip::Unhandled);
            }
        }
        tracing::debug!("gesture cancelled");
        Outcome::Applied
    }

    // ---------------------------------------------------------------------
    // Commands and outputs
    // ---------------------------------------------------------------------

    /// Dispatch one scripted command.
    pub fn apply(&mut self, command: EditorCommand) -> Outcome {
        match command {
            EditorCommand::Pointer(event) => self.pointer(event),
            EditorCommand::Undo => self.undo(),
            EditorCommand::Redo => self.redo(),
            EditorCommand::EnterCropMode => self.enter_crop_mode(),
            EditorCommand::ExitCropMode => self.exit_crop_mode(),
            EditorCommand::FlipHorizontal => self.flip_horizontal(),
            EditorCommand::FlipVertical => self.flip_vertical(),
            EditorCommand::RotateBy { degrees } => self.rotate_by(degrees),
            EditorCommand::SetAngle { degrees } => self.set_angle(degrees),
            EditorCommand::ScaleBy { factor } => self.scale_by(factor),
        }
    }

    /// Background with the overlay drawn at its current placement.
    pub fn export_composite(&self) -> Option<RasterImage> {
        let background = self.background.as_ref()?;
        Some(match &self.overlay {
            Some(layer) => composite(background, &layer.raster, &layer.transform),
            None => background.clone(),
        })
    }

    /// The keyed (and possibly cropped) overlay, untransformed.
    pub fn export_overlay_only(&self) -> Option<RasterImage> {
        self.overlay.as_ref().map(|l| l.raster.clone())
    }

    /// Outline, handles and crop selection to draw for the current state.
    pub fn scene(&self) -> Option<SceneView> {
        let layer = self.overlay.as_ref()?;
        Some(SceneView::build(
            layer.raster.size(),
            &layer.transform,
            &self.mode,
            self.config.handle_half_size,
        ))
    }

    fn background_size(&self) -> Option<Size> {
        self.background.as_ref().map(RasterImage::size)
    }
}

fn ignored(action: &'static str, skip: Skip) -> Outcome {
    tracing::debug!(action, ?skip, "action ignored");
    Outcome::Ignored(skip)
}

#[cfg(test)]
#[path = "../../tests/unit/editor/session.rs"]
mod tests;
