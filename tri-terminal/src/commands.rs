/// Implementations behind the `tri` subcommands
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tri_core::{
    export_document, import_objects, load_tri, save_tri, CodecConfig, ExportMesh, IndexedMesh,
    TriDocument,
};

/// Human-readable listing of a decoded document
pub fn describe(document: &TriDocument) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} object(s), {} triangle(s)",
        document.objects.len(),
        document.triangle_count()
    );
    for (i, object) in document.objects.iter().enumerate() {
        if object.triangles.is_empty() {
            let _ = writeln!(out, "  [{}] {:<24} 0 triangles", i, object.name);
        } else {
            let _ = writeln!(
                out,
                "  [{}] {:<24} {} triangle(s)  texture {}",
                i,
                object.name,
                object.triangle_count(),
                object.texture
            );
        }
    }
    if let Some(name) = &document.closing_name {
        let _ = writeln!(out, "closing name: {}", name);
    }
    out
}

pub fn info(path: &Path, config: &CodecConfig) -> Result<String> {
    let document = load_tri(path, config)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(describe(&document))
}

/// Decode `input` and write it back out through the encoder
pub fn rewrite(input: &Path, output: &Path, config: &CodecConfig) -> Result<PathBuf> {
    let document = load_tri(input, config)
        .with_context(|| format!("Failed to read {}", input.display()))?;
    save_tri(output, &document, config)
        .with_context(|| format!("Failed to write {}", output.display()))
}

/// Write a demo cube through the export pipeline
pub fn cube(output: &Path, size: f32, name: &str, config: &CodecConfig) -> Result<PathBuf> {
    let document = export_document(&[ExportMesh::cube(name, size)], config);
    save_tri(output, &document, config)
        .with_context(|| format!("Failed to write {}", output.display()))
}

/// Load a file and import it into indexed meshes for viewing
pub fn load_meshes(path: &Path, config: &CodecConfig) -> Result<Vec<IndexedMesh>> {
    let document = load_tri(path, config)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let mut meshes = Vec::new();
    let created = import_objects(&document.objects, &mut meshes, config);
    log::info!("Imported {} mesh(es) from {}", created, path.display());
    Ok(meshes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_core::{decode_document, MeshObject};

    #[test]
    fn test_cube_then_info() {
        let dir = tempfile::tempdir().unwrap();
        let config = CodecConfig::default();
        let written = cube(&dir.path().join("demo"), 1.0, "Demo", &config).unwrap();
        assert_eq!(written.extension().unwrap(), "tri");

        let text = info(&written, &config).unwrap();
        assert!(text.starts_with("1 object(s), 12 triangle(s)"));
        assert!(text.contains("Demo"));
        assert!(text.contains("default_tex.tga"));
        assert!(text.contains("closing name: EndOfFile"));
    }

    #[test]
    fn test_rewrite_preserves_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let config = CodecConfig::default();
        let original = cube(&dir.path().join("a.tri"), 2.0, "A", &config).unwrap();
        let copy = rewrite(&original, &dir.path().join("b.tri"), &config).unwrap();
        assert_eq!(std::fs::read(original).unwrap(), std::fs::read(copy).unwrap());
    }

    #[test]
    fn test_load_meshes_round_trips_geometry() {
        let dir = tempfile::tempdir().unwrap();
        let config = CodecConfig::default();
        let path = cube(&dir.path().join("c.tri"), 2.0, "C", &config).unwrap();
        let meshes = load_meshes(&path, &config).unwrap();
        assert_eq!(meshes.len(), 1);
        assert_eq!(meshes[0].faces.len(), 12);
        let (lo, hi) = meshes[0].bounds().unwrap();
        assert!((lo - nalgebra::Point3::new(-1.0, -1.0, -1.0)).norm() < 1e-6);
        assert!((hi - nalgebra::Point3::new(1.0, 1.0, 1.0)).norm() < 1e-6);
    }

    #[test]
    fn test_describe_empty_object() {
        let document = TriDocument::new(vec![MeshObject::new("Marker", "")]);
        let bytes = tri_core::encode_document(&document, &CodecConfig::default()).unwrap();
        let decoded = decode_document(&bytes, &CodecConfig::default()).unwrap();
        let text = describe(&decoded);
        assert!(text.contains("Marker"));
        assert!(text.contains("0 triangles"));
    }
}
