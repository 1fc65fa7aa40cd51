//! Mesh description loading from JSON

use std::path::Path;

use shared::MeshDescription;

use super::error::LoadError;

/// Parse a mesh description from a JSON string
pub fn parse_description(json: &str) -> Result<MeshDescription, LoadError> {
    let desc: MeshDescription = serde_json::from_str(json)?;
    tracing::debug!(
        "parsed mesh description: {} vertices, {} faces, normals={}, slopes={}",
        desc.vertex_count(),
        desc.face_count(),
        desc.normals().is_some(),
        desc.slopes().is_some()
    );
    Ok(desc)
}

/// Read and parse a mesh description file
pub fn load_description(path: &Path) -> Result<MeshDescription, LoadError> {
    let json = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let desc = parse_description(&json)?;
    tracing::info!("Loaded mesh description from {}", path.display());
    Ok(desc)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid() {
        let desc = parse_description(
            r#"{"vertices": [[0,0,0],[1,0,0],[0,1,0]], "faces": [[0,1,2]]}"#,
        )
        .unwrap();
        assert_eq!(desc.face_count(), 1);
    }

    #[test]
    fn test_parse_invalid_json() {
        let err = parse_description("{ not json").unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_parse_wrong_face_arity() {
        let err =
            parse_description(r#"{"vertices": [[0,0,0]], "faces": [[0, 0, 0, 0]]}"#).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_description(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mesh.json");
        std::fs::write(
            &path,
            r#"{"Vertices": [[0,0,0],[1,0,0],[0,1,0]], "Faces": [[0,1,2]], "Slope_Angles": [1,2,3]}"#,
        )
        .unwrap();
        let desc = load_description(&path).unwrap();
        assert_eq!(desc.slopes(), Some(&[1.0, 2.0, 3.0][..]));
    }
}
