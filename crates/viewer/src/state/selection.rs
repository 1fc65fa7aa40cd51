//! Per-triangle face selection, mirrored into the mesh color alpha channel.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::viewport::mesh::WeldedMesh;

/// How a vertex shared by selected and unselected triangles is shown
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SharedVertexPolicy {
    /// The most recently toggled neighbor decides the alpha
    #[default]
    LastWriteWins,
    /// Highlighted while at least one adjacent triangle is selected
    AnySelected,
}

/// Alpha values written by the selection store
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectionStyle {
    pub base_alpha: f32,
    pub highlight_alpha: f32,
    #[serde(default)]
    pub shared_vertices: SharedVertexPolicy,
}

impl Default for SelectionStyle {
    fn default() -> Self {
        Self {
            base_alpha: 0.0,
            highlight_alpha: 1.0,
            shared_vertices: SharedVertexPolicy::LastWriteWins,
        }
    }
}

/// Selected triangles of one welded mesh.
///
/// Lives exactly as long as the mesh it was created for; a reload replaces
/// both together.
#[derive(Debug, Clone)]
pub struct FaceSelection {
    selected: HashSet<usize>,
    triangle_count: usize,
    /// Vertex count of the mesh this selection was created for
    vertex_count: usize,
    style: SelectionStyle,
    /// Selected triangles touching each vertex (`AnySelected` only)
    owners: Vec<u32>,
    /// Bumped on every change that rewrote alpha values
    version: u64,
}

impl FaceSelection {
    /// Empty selection over `mesh`
    pub fn new(mesh: &WeldedMesh, style: SelectionStyle) -> Self {
        let owners = match style.shared_vertices {
            SharedVertexPolicy::LastWriteWins => Vec::new(),
            SharedVertexPolicy::AnySelected => vec![0; mesh.vertex_count()],
        };
        Self {
            selected: HashSet::new(),
            triangle_count: mesh.triangle_count(),
            vertex_count: mesh.vertex_count(),
            style,
            owners,
            version: 0,
        }
    }

    /// Flip the selection state of a triangle and rewrite its corner alphas.
    ///
    /// Indices outside `0..triangle_count` are ignored: pick results may be
    /// stale after a reload. Returns `true` when the color buffer changed and
    /// must be re-submitted in full.
    pub fn toggle(&mut self, mesh: &mut WeldedMesh, triangle: i64) -> bool {
        let Some(tri) = usize::try_from(triangle)
            .ok()
            .filter(|&t| t < self.triangle_count)
        else {
            tracing::trace!(
                "ignoring toggle of triangle {triangle} (mesh has {})",
                self.triangle_count
            );
            return false;
        };
        let Some(corners) = mesh.triangle(tri).filter(|_| self.is_bound_to(mesh)) else {
            tracing::warn!("selection bound to a different mesh, ignoring toggle of {tri}");
            return false;
        };

        let now_selected = if self.selected.remove(&tri) {
            false
        } else {
            self.selected.insert(tri);
            true
        };
        self.write_corners(mesh, corners, now_selected);
        self.version += 1;

        tracing::debug!(
            "triangle {tri} {} ({} selected)",
            if now_selected { "selected" } else { "deselected" },
            self.selected.len()
        );
        true
    }

    fn write_corners(&mut self, mesh: &mut WeldedMesh, corners: [u32; 3], selected: bool) {
        let SelectionStyle {
            base_alpha,
            highlight_alpha,
            shared_vertices,
        } = self.style;

        for v in corners {
            let alpha = match shared_vertices {
                SharedVertexPolicy::LastWriteWins => {
                    if selected {
                        highlight_alpha
                    } else {
                        base_alpha
                    }
                }
                SharedVertexPolicy::AnySelected => {
                    let count = &mut self.owners[v as usize];
                    if selected {
                        *count += 1;
                    } else {
                        *count = count.saturating_sub(1);
                    }
                    if *count > 0 {
                        highlight_alpha
                    } else {
                        base_alpha
                    }
                }
            };
            mesh.set_alpha(v, alpha);
        }
    }

    /// Deselect everything. Returns `true` if anything was selected.
    pub fn clear(&mut self, mesh: &mut WeldedMesh) -> bool {
        if self.selected.is_empty() {
            return false;
        }
        if !self.is_bound_to(mesh) {
            tracing::warn!("selection bound to a different mesh, ignoring clear");
            return false;
        }
        for tri in std::mem::take(&mut self.selected) {
            if let Some(corners) = mesh.triangle(tri) {
                for v in corners {
                    mesh.set_alpha(v, self.style.base_alpha);
                }
            }
        }
        self.owners.iter_mut().for_each(|c| *c = 0);
        self.version += 1;
        true
    }

    fn is_bound_to(&self, mesh: &WeldedMesh) -> bool {
        mesh.triangle_count() == self.triangle_count && mesh.vertex_count() == self.vertex_count
    }

    pub fn is_selected(&self, triangle: usize) -> bool {
        self.selected.contains(&triangle)
    }

    /// Selected triangle indices, ascending
    pub fn selected(&self) -> Vec<usize> {
        let mut out: Vec<usize> = self.selected.iter().copied().collect();
        out.sort_unstable();
        out
    }

    pub fn count(&self) -> usize {
        self.selected.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Two triangles sharing the edge 0-2: [0, 1, 2] and [0, 2, 3]
    fn quad() -> WeldedMesh {
        WeldedMesh::from_parts(
            vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 0.0, 1.0],
                [0.0, 0.0, 1.0],
            ],
            vec![[0.0, 1.0, 0.0]; 4],
            vec![[0.2, 1.0, 1.0, 0.0]; 4],
            vec![0, 1, 2, 0, 2, 3],
        )
    }

    fn alphas(mesh: &WeldedMesh) -> Vec<f32> {
        mesh.colors().iter().map(|c| c[3]).collect()
    }

    #[test]
    fn test_initial_empty() {
        let mesh = quad();
        let s = FaceSelection::new(&mesh, SelectionStyle::default());
        assert_eq!(s.count(), 0);
        assert_eq!(s.triangle_count(), 2);
        assert!(s.selected().is_empty());
        assert_eq!(s.version(), 0);
    }

    #[test]
    fn test_toggle_selects_and_highlights() {
        let mut mesh = quad();
        let mut s = FaceSelection::new(&mesh, SelectionStyle::default());
        assert!(s.toggle(&mut mesh, 0));
        assert!(s.is_selected(0));
        assert_eq!(alphas(&mesh), vec![1.0, 1.0, 1.0, 0.0]);
        // rgb untouched
        assert_eq!(mesh.colors()[1], [0.2, 1.0, 1.0, 1.0]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut mesh = quad();
        let before = mesh.clone();
        let mut s = FaceSelection::new(&mesh, SelectionStyle::default());
        s.toggle(&mut mesh, 1);
        s.toggle(&mut mesh, 1);
        assert!(!s.is_selected(1));
        assert_eq!(s.count(), 0);
        assert_eq!(mesh, before);
        assert_eq!(s.version(), 2);
    }

    #[test]
    fn test_out_of_range_toggle_is_noop() {
        let mut mesh = quad();
        let before = mesh.clone();
        let mut s = FaceSelection::new(&mesh, SelectionStyle::default());
        assert!(!s.toggle(&mut mesh, -1));
        assert!(!s.toggle(&mut mesh, 2));
        assert!(!s.toggle(&mut mesh, i64::MAX));
        assert_eq!(s.count(), 0);
        assert_eq!(s.version(), 0);
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_shared_vertex_last_write_wins() {
        let mut mesh = quad();
        let mut s = FaceSelection::new(&mesh, SelectionStyle::default());
        s.toggle(&mut mesh, 0);
        s.toggle(&mut mesh, 1);
        assert_eq!(alphas(&mesh), vec![1.0, 1.0, 1.0, 1.0]);

        // deselecting triangle 1 drops the shared edge even though 0 is still selected
        s.toggle(&mut mesh, 1);
        assert!(s.is_selected(0));
        assert_eq!(alphas(&mesh), vec![0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_shared_vertex_any_selected() {
        let mut mesh = quad();
        let style = SelectionStyle {
            shared_vertices: SharedVertexPolicy::AnySelected,
            ..SelectionStyle::default()
        };
        let mut s = FaceSelection::new(&mesh, style);
        s.toggle(&mut mesh, 0);
        s.toggle(&mut mesh, 1);
        s.toggle(&mut mesh, 1);
        assert_eq!(alphas(&mesh), vec![1.0, 1.0, 1.0, 0.0]);

        s.toggle(&mut mesh, 0);
        assert_eq!(alphas(&mesh), vec![0.0; 4]);
    }

    #[test]
    fn test_custom_alphas() {
        let mut mesh = quad();
        let style = SelectionStyle {
            base_alpha: 0.0,
            highlight_alpha: 0.75,
            ..SelectionStyle::default()
        };
        let mut s = FaceSelection::new(&mesh, style);
        s.toggle(&mut mesh, 1);
        assert_eq!(alphas(&mesh), vec![0.75, 0.0, 0.75, 0.75]);
    }

    #[test]
    fn test_selected_sorted() {
        let mut mesh = quad();
        let mut s = FaceSelection::new(&mesh, SelectionStyle::default());
        s.toggle(&mut mesh, 1);
        s.toggle(&mut mesh, 0);
        assert_eq!(s.selected(), vec![0, 1]);
    }

    #[test]
    fn test_clear() {
        let mut mesh = quad();
        let before = mesh.clone();
        let mut s = FaceSelection::new(&mesh, SelectionStyle::default());
        assert!(!s.clear(&mut mesh));
        s.toggle(&mut mesh, 0);
        s.toggle(&mut mesh, 1);
        assert!(s.clear(&mut mesh));
        assert_eq!(s.count(), 0);
        assert_eq!(mesh, before);
    }

    #[test]
    fn test_clear_resets_owner_counts() {
        let mut mesh = quad();
        let style = SelectionStyle {
            shared_vertices: SharedVertexPolicy::AnySelected,
            ..SelectionStyle::default()
        };
        let mut s = FaceSelection::new(&mesh, style);
        s.toggle(&mut mesh, 0);
        s.clear(&mut mesh);
        s.toggle(&mut mesh, 1);
        s.toggle(&mut mesh, 1);
        assert_eq!(alphas(&mesh), vec![0.0; 4]);
    }

    #[test]
    fn test_foreign_mesh_with_more_vertices_is_ignored() {
        let mut mesh = quad();
        let style = SelectionStyle {
            shared_vertices: SharedVertexPolicy::AnySelected,
            ..SelectionStyle::default()
        };
        let mut s = FaceSelection::new(&mesh, style);
        s.toggle(&mut mesh, 0);

        // same triangle count, one extra vertex
        let mut other = WeldedMesh::from_parts(
            vec![[0.0; 3]; 5],
            vec![[0.0, 1.0, 0.0]; 5],
            vec![[0.0, 1.0, 1.0, 0.0]; 5],
            vec![0, 1, 2, 0, 3, 4],
        );
        let before = other.clone();
        assert!(!s.toggle(&mut other, 1));
        assert!(!s.clear(&mut other));
        assert_eq!(other, before);
        assert_eq!(s.selected(), vec![0]);
        assert_eq!(s.version(), 1);
    }

    #[test]
    fn test_style_serde_defaults_policy() {
        let style: SelectionStyle =
            serde_json::from_str(r#"{"base_alpha": 0.1, "highlight_alpha": 0.9}"#).unwrap();
        assert_eq!(style.shared_vertices, SharedVertexPolicy::LastWriteWins);
    }
}
