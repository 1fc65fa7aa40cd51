//! Headless harness for driving the viewer state programmatically.
//!
//! Wraps `AppState` with the shortcuts tests and the command protocol need:
//! loading from fixtures or JSON, clicking straight down onto the mesh,
//! inspecting per-triangle alpha.

use glam::Vec3;
use shared::{MeshDescription, ShadingMode};

use crate::build::LoadError;
use crate::state::{AppSettings, AppState};
use crate::validation::MeshValidator;
use crate::viewport::mesh::WeldedMesh;
use crate::viewport::picking::{Ray, TriangleHit};

/// Height above the mesh bounds that `click_down` rays start from
const CLICK_CLEARANCE: f32 = 10.0;

/// Headless harness: owns the application state, never touches the config dir
pub struct TestHarness {
    pub state: AppState,
    last_error: Option<String>,
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

impl TestHarness {
    /// Create a harness with default settings.
    pub fn new() -> Self {
        Self::with_settings(AppSettings::default())
    }

    pub fn with_settings(settings: AppSettings) -> Self {
        Self::from_state(AppState::new(settings))
    }

    /// Drive an existing state (e.g. one built from the saved settings)
    pub fn from_state(state: AppState) -> Self {
        Self {
            state,
            last_error: None,
        }
    }

    // ── Loading ───────────────────────────────────────────────

    /// Load a description. Returns false (and records the error) on failure.
    pub fn load(&mut self, desc: &MeshDescription) -> bool {
        let result = self.state.load_mesh(desc).map(|_| ()).map_err(|e| e.to_string());
        self.record(result)
    }

    /// Load a mesh from a JSON document string
    pub fn load_json(&mut self, json: &str) -> Result<(), LoadError> {
        let result = self.state.load_json(json).map(|_| ());
        self.last_error = result.as_ref().err().map(|e| e.to_string());
        result
    }

    fn record(&mut self, result: Result<(), String>) -> bool {
        match result {
            Ok(()) => {
                self.last_error = None;
                true
            }
            Err(e) => {
                self.last_error = Some(e);
                false
            }
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn reset(&mut self) {
        self.state.reset();
        self.last_error = None;
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn mesh(&self) -> Option<&WeldedMesh> {
        self.state.mesh()
    }

    pub fn vertex_count(&self) -> usize {
        self.mesh().map_or(0, |m| m.vertex_count())
    }

    pub fn triangle_count(&self) -> usize {
        self.mesh().map_or(0, |m| m.triangle_count())
    }

    pub fn selected(&self) -> Vec<usize> {
        self.state
            .selection()
            .map(|s| s.selected())
            .unwrap_or_default()
    }

    /// Alpha of the three corners of a triangle
    pub fn triangle_alphas(&self, triangle: usize) -> Option<[f32; 3]> {
        let mesh = self.mesh()?;
        let [a, b, c] = mesh.triangle(triangle)?;
        Some([mesh.alpha(a), mesh.alpha(b), mesh.alpha(c)])
    }

    /// Validation errors of the live mesh (`None` if nothing is loaded)
    pub fn validate(&self) -> Option<Vec<String>> {
        self.mesh().map(|m| MeshValidator::new(m).validate_all())
    }

    // ── Interaction ───────────────────────────────────────────

    pub fn set_mode(&mut self, mode: ShadingMode) {
        self.state.set_shading_mode(mode);
    }

    pub fn toggle(&mut self, triangle: i64) -> bool {
        self.state.toggle_face(triangle)
    }

    /// Click with a ray cast straight down (−Y) through renderer-space (x, z)
    pub fn click_down(&mut self, x: f32, z: f32) -> Option<TriangleHit> {
        let top = self
            .state
            .live()
            .and_then(|l| l.bounds)
            .map_or(0.0, |b| b.max.y);
        let ray = Ray::new(Vec3::new(x, top + CLICK_CLEARANCE, z), Vec3::NEG_Y);
        self.state.click(&ray)
    }
}
