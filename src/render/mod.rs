//! Read-only views of the editor state: the flattened composite and the
//! on-screen chrome (outline, handles, crop selection).

pub mod composite;
pub mod scene;
