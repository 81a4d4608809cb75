/// Decoded objects into indexed geometry for a host mesh engine
use nalgebra::{Point3, Vector3};

use crate::config::CodecConfig;
use crate::geometry::MeshObject;

/// Receiver of imported geometry: one call per object that has triangles
pub trait MeshSink {
    fn add_mesh(&mut self, name: &str, positions: Vec<Point3<f32>>, faces: Vec<[u32; 3]>);
}

/// Plain indexed triangle mesh
#[derive(Debug, Clone, PartialEq, Default)]
pub struct IndexedMesh {
    pub name: String,
    pub positions: Vec<Point3<f32>>,
    pub faces: Vec<[u32; 3]>,
}

impl IndexedMesh {
    pub fn triangle(&self, face: usize) -> [Point3<f32>; 3] {
        self.faces[face].map(|i| self.positions[i as usize])
    }

    /// Face normal from the winding of the triangle's corners
    pub fn face_normal(&self, face: usize) -> Vector3<f32> {
        let [p0, p1, p2] = self.triangle(face);
        (p1 - p0).cross(&(p2 - p0)).normalize()
    }

    /// Axis-aligned bounds, `None` for a mesh without vertices
    pub fn bounds(&self) -> Option<(Point3<f32>, Point3<f32>)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(lo, hi), p| {
            (lo.inf(p), hi.sup(p))
        }))
    }
}

impl MeshSink for Vec<IndexedMesh> {
    fn add_mesh(&mut self, name: &str, positions: Vec<Point3<f32>>, faces: Vec<[u32; 3]>) {
        self.push(IndexedMesh {
            name: name.to_string(),
            positions,
            faces,
        });
    }
}

/// Hand every object with triangles to `sink`, three fresh vertices per triangle.
///
/// Positions are mapped back through the inverse of the configured
/// coordinate conversion. Returns the number of meshes created.
pub fn import_objects<S: MeshSink>(
    objects: &[MeshObject],
    sink: &mut S,
    config: &CodecConfig,
) -> usize {
    let mut created = 0;
    for object in objects {
        if object.triangles.is_empty() {
            log::debug!("Object '{}' has 0 triangles, nothing to import", object.name);
            continue;
        }

        let mut positions = Vec::with_capacity(object.triangle_count() * 3);
        let mut faces = Vec::with_capacity(object.triangle_count());
        for triangle in &object.triangles {
            let base = positions.len() as u32;
            for corner in &triangle.corners {
                positions.push(config.coordinates.invert_point(&corner.position));
            }
            faces.push([base, base + 1, base + 2]);
        }

        log::debug!("Imported {} triangle(s) for '{}'", faces.len(), object.name);
        sink.add_mesh(&object.name, positions, faces);
        created += 1;
    }
    created
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{AliasPoint, Triangle};
    use crate::transform::CoordinateConversion;

    fn raw() -> CodecConfig {
        CodecConfig {
            coordinates: CoordinateConversion::None,
            ..Default::default()
        }
    }

    fn two_triangles() -> MeshObject {
        let mut object = MeshObject::new("Pair", "tex");
        object.add_triangle(Triangle::new(
            AliasPoint::at(0.0, 0.0, 0.0),
            AliasPoint::at(1.0, 0.0, 0.0),
            AliasPoint::at(0.0, 1.0, 0.0),
        ));
        object.add_triangle(Triangle::new(
            AliasPoint::at(1.0, 0.0, 0.0),
            AliasPoint::at(1.0, 1.0, 0.0),
            AliasPoint::at(0.0, 1.0, 0.0),
        ));
        object
    }

    #[test]
    fn test_unshared_vertices() {
        let mut meshes: Vec<IndexedMesh> = Vec::new();
        let created = import_objects(&[two_triangles()], &mut meshes, &raw());
        assert_eq!(created, 1);
        let mesh = &meshes[0];
        assert_eq!(mesh.name, "Pair");
        assert_eq!(mesh.positions.len(), 6);
        assert_eq!(mesh.faces, vec![[0, 1, 2], [3, 4, 5]]);
        assert_eq!(mesh.positions[4], Point3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_empty_objects_skipped() {
        let mut meshes: Vec<IndexedMesh> = Vec::new();
        let objects = [MeshObject::new("Nothing", ""), two_triangles()];
        assert_eq!(import_objects(&objects, &mut meshes, &raw()), 1);
        assert_eq!(meshes[0].name, "Pair");
    }

    #[test]
    fn test_inverse_conversion() {
        let mut meshes: Vec<IndexedMesh> = Vec::new();
        import_objects(&[two_triangles()], &mut meshes, &CodecConfig::default());
        // file (x, y, z) -> authoring (x, z, -y)
        assert_eq!(meshes[0].positions[2], Point3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn test_bounds_and_normal() {
        let mut meshes: Vec<IndexedMesh> = Vec::new();
        import_objects(&[two_triangles()], &mut meshes, &raw());
        let (lo, hi) = meshes[0].bounds().unwrap();
        assert_eq!(lo, Point3::new(0.0, 0.0, 0.0));
        assert_eq!(hi, Point3::new(1.0, 1.0, 0.0));
        assert!((meshes[0].face_normal(0) - Vector3::z()).norm() < 1e-6);
        assert!(IndexedMesh::default().bounds().is_none());
    }
}
