//! Vertex welding.
//!
//! Source vertices whose converted positions round to the same fixed-point key
//! collapse into one welded vertex. Normals and slope angles are accumulated
//! over every face corner that lands on a welded vertex and averaged once all
//! faces are walked; the averaged slope is encoded into the red channel.

use std::collections::HashMap;

use glam::Vec3;
use shared::MeshDescription;

use super::error::{Channel, MalformedInputError};
use super::normalize::z_up_to_y_up;
use crate::viewport::mesh::WeldedMesh;

/// Fixed-point scale of the welding key (4 decimal digits)
pub const WELD_SCALE: f32 = 10_000.0;

/// Slope domain encoded into the red channel
pub const SLOPE_MIN_DEGREES: f32 = 0.0;
pub const SLOPE_MAX_DEGREES: f32 = 90.0;

/// Alpha of every welded vertex right after welding
pub const DEFAULT_BASE_ALPHA: f32 = 0.0;

/// Rounded position used to decide whether two vertices coincide.
///
/// Stored as scaled integers so that values which round the same always hash
/// the same.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WeldKey([i64; 3]);

impl WeldKey {
    pub fn new(position: Vec3) -> Self {
        Self([
            quantize(position.x),
            quantize(position.y),
            quantize(position.z),
        ])
    }
}

/// Scaled in single precision, then rounded half to even
fn quantize(coord: f32) -> i64 {
    f64::from(coord * WELD_SCALE).round_ties_even() as i64
}

/// Map an averaged slope angle to the red channel, clamping outside 0..90°
pub fn slope_to_red(degrees: f32) -> f32 {
    ((degrees - SLOPE_MIN_DEGREES) / (SLOPE_MAX_DEGREES - SLOPE_MIN_DEGREES)).clamp(0.0, 1.0)
}

#[derive(Default)]
struct Accumulator {
    normal_sum: Vec3,
    slope_sum: f32,
    slope_count: u32,
}

impl Accumulator {
    fn normal(&self) -> [f32; 3] {
        self.normal_sum.normalize_or_zero().to_array()
    }

    fn color(&self, base_alpha: f32) -> [f32; 4] {
        if self.slope_count == 0 {
            return [0.0, 0.0, 0.0, base_alpha];
        }
        let average = self.slope_sum / self.slope_count as f32;
        [slope_to_red(average), 1.0, 1.0, base_alpha]
    }
}

/// Welder configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Welder {
    pub base_alpha: f32,
}

impl Default for Welder {
    fn default() -> Self {
        Self {
            base_alpha: DEFAULT_BASE_ALPHA,
        }
    }
}

impl Welder {
    pub fn new(base_alpha: f32) -> Self {
        Self { base_alpha }
    }

    /// Weld a description into a renderer-ready mesh.
    ///
    /// Triangle `i` of the output is face `i` of the input. Fails before
    /// building anything if a face index or channel length is invalid.
    pub fn weld(&self, desc: &MeshDescription) -> Result<WeldedMesh, MalformedInputError> {
        let faces = check_description(desc)?;
        let normals = desc.normals();
        let slopes = desc.slopes();

        let mut lookup: HashMap<WeldKey, u32> = HashMap::with_capacity(desc.vertex_count());
        let mut positions: Vec<[f32; 3]> = Vec::with_capacity(desc.vertex_count());
        let mut accum: Vec<Accumulator> = Vec::with_capacity(desc.vertex_count());
        let mut indices: Vec<u32> = Vec::with_capacity(faces.len() * 3);

        for face in &faces {
            for &src in face {
                let position = z_up_to_y_up(desc.vertices[src]);
                let welded = *lookup.entry(WeldKey::new(position)).or_insert_with(|| {
                    positions.push(position.to_array());
                    accum.push(Accumulator::default());
                    (positions.len() - 1) as u32
                });

                let slot = &mut accum[welded as usize];
                if let Some(normals) = normals {
                    slot.normal_sum += z_up_to_y_up(normals[src]);
                }
                if let Some(slopes) = slopes {
                    slot.slope_sum += slopes[src];
                    slot.slope_count += 1;
                }

                indices.push(welded);
            }
        }

        let (welded_normals, colors): (Vec<_>, Vec<_>) = accum
            .iter()
            .map(|a| (a.normal(), a.color(self.base_alpha)))
            .unzip();

        tracing::info!(
            "weld: {} vertices, {} triangles (from {} source vertices)",
            positions.len(),
            faces.len(),
            desc.vertex_count()
        );
        tracing::debug!(
            "weld: {} face corners merged into existing vertices",
            indices.len() - positions.len()
        );

        Ok(WeldedMesh::from_parts(
            positions,
            welded_normals,
            colors,
            indices,
        ))
    }
}

/// Weld with the default base alpha
pub fn weld(desc: &MeshDescription) -> Result<WeldedMesh, MalformedInputError> {
    Welder::default().weld(desc)
}

/// Validate channel lengths and face indices, returning faces as `usize`
/// triples ready for indexing.
fn check_description(desc: &MeshDescription) -> Result<Vec<[usize; 3]>, MalformedInputError> {
    let vertex_count = desc.vertex_count();

    if let Some(normals) = desc.normals() {
        if normals.len() != vertex_count {
            return Err(MalformedInputError::ChannelLengthMismatch {
                channel: Channel::Normals,
                len: normals.len(),
                expected: vertex_count,
            });
        }
    }
    if let Some(slopes) = desc.slopes() {
        if slopes.len() != vertex_count {
            return Err(MalformedInputError::ChannelLengthMismatch {
                channel: Channel::SlopeAngles,
                len: slopes.len(),
                expected: vertex_count,
            });
        }
    }

    desc.faces
        .iter()
        .enumerate()
        .map(|(face, corners)| {
            let mut out = [0usize; 3];
            for (slot, &index) in out.iter_mut().zip(corners) {
                *slot = usize::try_from(index)
                    .ok()
                    .filter(|&i| i < vertex_count)
                    .ok_or(MalformedInputError::FaceIndexOutOfRange {
                        face,
                        index,
                        vertex_count,
                    })?;
            }
            Ok(out)
        })
        .collect()
}
