//! Mesh ingest: JSON description → axis conversion → welding.

pub mod error;
mod loader;
pub mod normalize;
mod weld;

pub use error::{Channel, LoadError, MalformedInputError};
pub use loader::{load_description, parse_description};
pub use normalize::z_up_to_y_up;
pub use weld::{
    slope_to_red, weld, WeldKey, Welder, DEFAULT_BASE_ALPHA, SLOPE_MAX_DEGREES,
    SLOPE_MIN_DEGREES, WELD_SCALE,
};

use crate::viewport::mesh::WeldedMesh;

/// Parse and weld a JSON document in one step
pub fn build_from_json(json: &str, welder: &Welder) -> Result<WeldedMesh, LoadError> {
    let desc = parse_description(json)?;
    Ok(welder.weld(&desc)?)
}
