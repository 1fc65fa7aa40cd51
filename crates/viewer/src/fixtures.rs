//! Factory functions for creating test data.
//!
//! Provides mesh descriptions in the source (Z-up) convention used by tests and
//! by the command protocol examples.

use shared::MeshDescription;

// ── Small descriptions ──────────────────────────────────────────

/// Unit quad in the source XZ plane as two triangles, slopes 0/30/60/90.
pub fn quad_with_slopes() -> MeshDescription {
    MeshDescription::new(
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0],
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )
    .with_slopes(vec![0.0, 30.0, 60.0, 90.0])
}

/// Two triangles exported with their own copies of every corner; source
/// vertices 0 and 3 coincide.
pub fn split_triangles_sharing_corner() -> MeshDescription {
    MeshDescription::new(
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
        ],
        vec![[0, 1, 2], [3, 4, 5]],
    )
}

/// Flat ground triangle in the source XY plane (faces up after conversion).
pub fn ground_triangle() -> MeshDescription {
    MeshDescription::new(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![[0, 1, 2]],
    )
    .with_normals(vec![[0.0, 0.0, 1.0]; 3])
    .with_slopes(vec![0.0; 3])
}

// ── Terrain grid ────────────────────────────────────────────────

/// `n × n` cell terrain grid in the source XY plane, exported triangle soup
/// style: every triangle carries its own three vertices, so welding has to
/// merge the copies back together. Heights follow `z = 0.1 * x`, giving a
/// constant slope of atan(0.1).
pub fn terrain_soup(n: usize) -> MeshDescription {
    let slope = 0.1_f32.atan().to_degrees();
    let mut vertices = Vec::new();
    let mut faces = Vec::new();
    let mut normals = Vec::new();

    let normal = {
        let len = (0.1_f32 * 0.1 + 1.0).sqrt();
        [-0.1 / len, 0.0, 1.0 / len]
    };
    let corner = |x: usize, y: usize| [x as f32, y as f32, 0.1 * x as f32];

    for y in 0..n {
        for x in 0..n {
            let quad = [
                corner(x, y),
                corner(x + 1, y),
                corner(x + 1, y + 1),
                corner(x, y + 1),
            ];
            for tri in [[0, 1, 2], [0, 2, 3]] {
                let base = vertices.len() as i64;
                for i in tri {
                    vertices.push(quad[i]);
                    normals.push(normal);
                }
                faces.push([base, base + 1, base + 2]);
            }
        }
    }

    let slopes = vec![slope; vertices.len()];
    MeshDescription::new(vertices, faces)
        .with_normals(normals)
        .with_slopes(slopes)
}

/// Serialize a description to the JSON document format.
pub fn description_json(desc: &MeshDescription) -> String {
    serde_json::to_string(desc).unwrap_or_default()
}
