pub mod selection;
pub mod settings;
pub mod shading;

use std::path::Path;
use std::sync::mpsc::Receiver;

use shared::{MeshDescription, ShadingMode};

use crate::build::{load_description, parse_description, LoadError, MalformedInputError};
use crate::viewport::mesh::WeldedMesh;
use crate::viewport::picking::{pick_triangle, Aabb, Ray, TriangleHit};
pub use selection::{FaceSelection, SelectionStyle, SharedVertexPolicy};
pub use settings::AppSettings;
pub use shading::ShadingState;

/// The mesh currently shown, with the selection bound to it
#[derive(Debug, Clone)]
pub struct LiveMesh {
    pub mesh: WeldedMesh,
    pub selection: FaceSelection,
    /// Bounds recomputed on every load (for camera framing)
    pub bounds: Option<Aabb>,
}

impl LiveMesh {
    fn new(mesh: WeldedMesh, style: SelectionStyle) -> Self {
        let selection = FaceSelection::new(&mesh, style);
        let bounds = Aabb::from_mesh(&mesh);
        Self {
            mesh,
            selection,
            bounds,
        }
    }

    pub fn toggle(&mut self, triangle: i64) -> bool {
        self.selection.toggle(&mut self.mesh, triangle)
    }
}

/// Combined application state. At most one mesh is live at a time.
#[derive(Debug, Default)]
pub struct AppState {
    pub settings: AppSettings,
    shading: ShadingState,
    live: Option<LiveMesh>,
    /// Number of successful loads
    generation: u64,
}

impl AppState {
    pub fn new(settings: AppSettings) -> Self {
        Self {
            shading: ShadingState::new(settings.shading_mode),
            settings,
            live: None,
            generation: 0,
        }
    }

    /// State initialised from the settings file in the platform config dir
    pub fn with_saved_settings() -> Self {
        Self::new(AppSettings::load())
    }

    pub fn live(&self) -> Option<&LiveMesh> {
        self.live.as_ref()
    }

    pub fn mesh(&self) -> Option<&WeldedMesh> {
        self.live.as_ref().map(|l| &l.mesh)
    }

    pub fn selection(&self) -> Option<&FaceSelection> {
        self.live.as_ref().map(|l| &l.selection)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    // ── Loading ──────────────────────────────────────────────

    /// Weld `desc` and make it the live mesh with an empty selection.
    ///
    /// On error the previous mesh and selection stay live untouched.
    pub fn load_mesh(&mut self, desc: &MeshDescription) -> Result<&LiveMesh, MalformedInputError> {
        let mesh = self.settings.welder().weld(desc)?;
        self.generation += 1;
        tracing::info!(
            "Mesh generated (load #{}): {} vertices, {} triangles",
            self.generation,
            mesh.vertex_count(),
            mesh.triangle_count()
        );
        Ok(self
            .live
            .insert(LiveMesh::new(mesh, self.settings.selection)))
    }

    pub fn load_json(&mut self, json: &str) -> Result<&LiveMesh, LoadError> {
        let desc = parse_description(json)?;
        Ok(self.load_mesh(&desc)?)
    }

    pub fn load_file(&mut self, path: &Path) -> Result<&LiveMesh, LoadError> {
        let desc = load_description(path)?;
        Ok(self.load_mesh(&desc)?)
    }

    /// Drop the live mesh and go back to the configured shading mode
    pub fn reset(&mut self) {
        if self.live.take().is_some() {
            tracing::info!("Live mesh discarded");
        }
        self.shading.set(self.settings.shading_mode);
    }

    // ── Shading ──────────────────────────────────────────────

    pub fn shading_mode(&self) -> ShadingMode {
        self.shading.mode()
    }

    pub fn set_shading_mode(&mut self, mode: ShadingMode) {
        self.shading.set(mode);
    }

    pub fn interaction_enabled(&self) -> bool {
        self.shading.interaction_enabled()
    }

    pub fn subscribe_shading(&mut self) -> Receiver<ShadingMode> {
        self.shading.subscribe()
    }

    // ── Selection ────────────────────────────────────────────

    /// Resolve a click ray against the live mesh and toggle the hit triangle.
    /// Does nothing unless face selection mode is active.
    pub fn click(&mut self, ray: &Ray) -> Option<TriangleHit> {
        if !self.interaction_enabled() {
            return None;
        }
        let live = self.live.as_mut()?;
        let hit = pick_triangle(ray, &live.mesh)?;
        live.toggle(hit.triangle_index as i64);
        Some(hit)
    }

    /// Toggle a triangle directly. Returns `true` if the color buffer changed.
    pub fn toggle_face(&mut self, triangle: i64) -> bool {
        self.live
            .as_mut()
            .is_some_and(|live| live.toggle(triangle))
    }

    pub fn clear_selection(&mut self) -> bool {
        self.live
            .as_mut()
            .is_some_and(|live| live.selection.clear(&mut live.mesh))
    }
}
