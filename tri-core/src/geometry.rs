/// Record types carried across the codec boundary
use nalgebra::{Point3, Vector2, Vector3};

use crate::format::RECORD_FLOATS;

/// One triangle corner: the 11-float "aliaspoint" record
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AliasPoint {
    pub normal: Vector3<f32>,
    pub position: Point3<f32>,
    pub color: Vector3<f32>,
    pub uv: Vector2<f32>,
}

impl AliasPoint {
    pub fn new(
        normal: Vector3<f32>,
        position: Point3<f32>,
        color: Vector3<f32>,
        uv: Vector2<f32>,
    ) -> Self {
        Self {
            normal,
            position,
            color,
            uv,
        }
    }

    /// A corner at `position` with zeroed normal, color and UV
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self::new(
            Vector3::zeros(),
            Point3::new(x, y, z),
            Vector3::zeros(),
            Vector2::zeros(),
        )
    }

    /// Build from the on-disk field order: n.xyz, p.xyz, c.rgb, u, v
    pub fn from_floats(f: [f32; RECORD_FLOATS]) -> Self {
        Self {
            normal: Vector3::new(f[0], f[1], f[2]),
            position: Point3::new(f[3], f[4], f[5]),
            color: Vector3::new(f[6], f[7], f[8]),
            uv: Vector2::new(f[9], f[10]),
        }
    }

    /// Flatten into the on-disk field order
    pub fn to_floats(&self) -> [f32; RECORD_FLOATS] {
        let (n, p, c, uv) = (&self.normal, &self.position, &self.color, &self.uv);
        [n.x, n.y, n.z, p.x, p.y, p.z, c.x, c.y, c.z, uv.x, uv.y]
    }
}

/// A triangle stored as three independent corner records
#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    pub corners: [AliasPoint; 3],
}

impl Triangle {
    pub fn new(c0: AliasPoint, c1: AliasPoint, c2: AliasPoint) -> Self {
        Self {
            corners: [c0, c1, c2],
        }
    }

    pub fn positions(&self) -> [Point3<f32>; 3] {
        [
            self.corners[0].position,
            self.corners[1].position,
            self.corners[2].position,
        ]
    }
}

/// A named group of triangles sharing one texture name
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MeshObject {
    pub name: String,
    /// Only written when the object has triangles
    pub texture: String,
    pub triangles: Vec<Triangle>,
}

impl MeshObject {
    pub fn new(name: impl Into<String>, texture: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            texture: texture.into(),
            triangles: Vec::new(),
        }
    }

    pub fn with_capacity(
        name: impl Into<String>,
        texture: impl Into<String>,
        capacity: usize,
    ) -> Self {
        Self {
            name: name.into(),
            texture: texture.into(),
            triangles: Vec::with_capacity(capacity),
        }
    }

    pub fn add_triangle(&mut self, triangle: Triangle) {
        self.triangles.push(triangle);
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }
}

/// A whole .tri file: its objects plus the label that followed the last END marker
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TriDocument {
    pub objects: Vec<MeshObject>,
    pub closing_name: Option<String>,
}

impl TriDocument {
    pub fn new(objects: Vec<MeshObject>) -> Self {
        Self {
            objects,
            closing_name: None,
        }
    }

    pub fn triangle_count(&self) -> usize {
        self.objects.iter().map(MeshObject::triangle_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_field_order() {
        let floats = [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.1, 0.2, 0.3, 0.5, 0.75];
        let point = AliasPoint::from_floats(floats);
        assert_eq!(point.normal, Vector3::new(1.0, 2.0, 3.0));
        assert_eq!(point.position, Point3::new(4.0, 5.0, 6.0));
        assert_eq!(point.color, Vector3::new(0.1, 0.2, 0.3));
        assert_eq!(point.uv, Vector2::new(0.5, 0.75));
        assert_eq!(point.to_floats(), floats);
    }

    #[test]
    fn test_document_triangle_count() {
        let mut a = MeshObject::new("a", "tex");
        a.add_triangle(Triangle::new(
            AliasPoint::at(0.0, 0.0, 0.0),
            AliasPoint::at(1.0, 0.0, 0.0),
            AliasPoint::at(0.0, 1.0, 0.0),
        ));
        let doc = TriDocument::new(vec![a, MeshObject::new("empty", "")]);
        assert_eq!(doc.triangle_count(), 1);
    }
}
