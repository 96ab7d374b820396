use crate::foundation::core::Point;

/// Pointer event phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointerKind {
    Down,
    Move,
    Up,
    /// Capture lost; the active gesture is abandoned.
    Cancel,
}

/// Pointer input in background pixel space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub pointer_id: u32,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, x: f64, y: f64) -> Self {
        Self {
            kind,
            x,
            y,
            pointer_id: 0,
        }
    }

    pub fn down(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Down, x, y)
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Move, x, y)
    }

    pub fn up(x: f64, y: f64) -> Self {
        Self::new(PointerKind::Up, x, y)
    }

    pub fn with_id(self, pointer_id: u32) -> Self {
        Self { pointer_id, ..self }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// One scripted editor action, as read from a JSON command list.
///
/// ```json
/// [{ "op": "pointer", "kind": "down", "x": 40, "y": 30 }, { "op": "rotate_by", "degrees": 15 }]
/// ```
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditorCommand {
    Pointer(PointerEvent),
    Undo,
    Redo,
    EnterCropMode,
    ExitCropMode,
    FlipHorizontal,
    FlipVertical,
    RotateBy { degrees: f64 },
    SetAngle { degrees: f64 },
    ScaleBy { factor: f64 },
}

impl EditorCommand {
    /// Parse a JSON array of commands.
    pub fn parse_script(json: &str) -> crate::KeystageResult<Vec<Self>> {
        use anyhow::Context as _;
        let cmds = serde_json::from_str(json).context("parse editor command script")?;
        Ok(cmds)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/editor/input.rs"]
mod tests;
