//! Undo/redo stacks of immutable overlay snapshots.

pub mod manager;
