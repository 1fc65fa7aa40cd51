//! Source (Z-up) to renderer (Y-up) axis conversion

use glam::Vec3;

/// Swap Y and Z. Applies to positions and directions alike since the
/// conversion has no translation part.
pub fn z_up_to_y_up(v: [f32; 3]) -> Vec3 {
    Vec3::new(v[0], v[2], v[1])
}
