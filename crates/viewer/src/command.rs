//! JSON command protocol for driving the viewer headlessly.

use serde::{Deserialize, Serialize};
use shared::{MeshDescription, ShadingMode};

use crate::harness::TestHarness;
use crate::viewport::picking::Ray;

/// A command the host can execute.
#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum ViewerCommand {
    /// Weld and show a mesh description (replaces the live mesh)
    LoadMesh { mesh: MeshDescription },
    /// Same as `LoadMesh`, with the description given as a JSON string
    LoadMeshJson { json: String },
    /// Switch shading mode
    SetShadingMode { mode: ShadingMode },
    /// Toggle selection of one triangle
    ToggleFace { triangle: i64 },
    /// Cast a pick ray; toggles the hit triangle in face selection mode
    Pick {
        origin: [f32; 3],
        direction: [f32; 3],
    },
    /// Deselect all triangles
    ClearSelection,
    /// Drop the live mesh
    Reset,
    /// Report mesh and selection state
    Inspect,
}

/// Response from executing a command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl CommandResponse {
    fn ok() -> Self {
        Self {
            success: true,
            error: None,
            data: None,
        }
    }

    fn ok_with_data(data: serde_json::Value) -> Self {
        Self {
            success: true,
            error: None,
            data: Some(data),
        }
    }

    fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(msg.into()),
            data: None,
        }
    }
}

fn loaded_summary(harness: &TestHarness) -> serde_json::Value {
    serde_json::json!({
        "vertex_count": harness.vertex_count(),
        "triangle_count": harness.triangle_count(),
    })
}

/// Execute a single command on the harness.
pub fn execute_command(harness: &mut TestHarness, cmd: ViewerCommand) -> CommandResponse {
    match cmd {
        ViewerCommand::LoadMesh { mesh } => {
            if harness.load(&mesh) {
                CommandResponse::ok_with_data(loaded_summary(harness))
            } else {
                CommandResponse::err(harness.last_error().unwrap_or("load failed"))
            }
        }

        ViewerCommand::LoadMeshJson { json } => match harness.load_json(&json) {
            Ok(()) => CommandResponse::ok_with_data(loaded_summary(harness)),
            Err(e) => CommandResponse::err(e.to_string()),
        },

        ViewerCommand::SetShadingMode { mode } => {
            harness.set_mode(mode);
            CommandResponse::ok_with_data(serde_json::json!({
                "mode": mode,
                "interaction_enabled": harness.state.interaction_enabled(),
            }))
        }

        ViewerCommand::ToggleFace { triangle } => {
            let changed = harness.toggle(triangle);
            CommandResponse::ok_with_data(serde_json::json!({
                "changed": changed,
                "selected": harness.selected(),
            }))
        }

        ViewerCommand::Pick { origin, direction } => {
            let ray = Ray::new(origin.into(), direction.into());
            let hit = harness.state.click(&ray);
            CommandResponse::ok_with_data(serde_json::json!({
                "triangle": hit.as_ref().map(|h| h.triangle_index),
                "distance": hit.as_ref().map(|h| h.distance),
                "selected": harness.selected(),
            }))
        }

        ViewerCommand::ClearSelection => {
            harness.state.clear_selection();
            CommandResponse::ok()
        }

        ViewerCommand::Reset => {
            harness.reset();
            CommandResponse::ok()
        }

        ViewerCommand::Inspect => {
            let bounds = harness
                .state
                .live()
                .and_then(|l| l.bounds)
                .map(|b| serde_json::json!({ "min": b.min.to_array(), "max": b.max.to_array() }));
            CommandResponse::ok_with_data(serde_json::json!({
                "loaded": harness.mesh().is_some(),
                "generation": harness.state.generation(),
                "mode": harness.state.shading_mode(),
                "vertex_count": harness.vertex_count(),
                "triangle_count": harness.triangle_count(),
                "selected": harness.selected(),
                "selection_version": harness.state.selection().map(|s| s.version()),
                "bounds": bounds,
            }))
        }
    }
}

/// Parse and execute a single JSON command string.
pub fn execute_json(harness: &mut TestHarness, json: &str) -> Result<CommandResponse, String> {
    let cmd: ViewerCommand =
        serde_json::from_str(json).map_err(|e| format!("Invalid command JSON: {e}"))?;
    Ok(execute_command(harness, cmd))
}

/// Parse and execute multiple JSON commands (array).
pub fn execute_json_batch(
    harness: &mut TestHarness,
    json: &str,
) -> Result<Vec<CommandResponse>, String> {
    let cmds: Vec<ViewerCommand> =
        serde_json::from_str(json).map_err(|e| format!("Invalid commands JSON: {e}"))?;
    Ok(cmds
        .into_iter()
        .map(|cmd| execute_command(harness, cmd))
        .collect())
}
