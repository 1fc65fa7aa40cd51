// Library crate: the welding/selection core plus the headless host used by the
// binary, integration tests and the JSON command protocol.

pub mod build;
pub mod command;
pub mod fixtures;
pub mod harness;
pub mod state;
pub mod validation;

/// Renderer-facing buffers and pick queries.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
}
