/// Axis conversion between authoring space and Quake space
use nalgebra::{Matrix3, Point3, Vector3};
use serde::{Deserialize, Serialize};

use crate::geometry::{AliasPoint, MeshObject};

/// Coordinate conversion applied to positions and normals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoordinateConversion {
    /// Leave coordinates untouched
    None,
    /// Blender Z-up to Quake: (x, y, z) -> (x, -z, y)
    #[default]
    BlenderToQuake,
}

impl CoordinateConversion {
    /// Matrix taking authoring coordinates to file coordinates
    pub fn matrix(self) -> Matrix3<f32> {
        match self {
            CoordinateConversion::None => Matrix3::identity(),
            CoordinateConversion::BlenderToQuake => Matrix3::new(
                1.0, 0.0, 0.0, //
                0.0, 0.0, -1.0, //
                0.0, 1.0, 0.0,
            ),
        }
    }

    /// Matrix taking file coordinates back to authoring coordinates
    pub fn inverse_matrix(self) -> Matrix3<f32> {
        // Pure axis permutations with sign flips are orthonormal
        self.matrix().transpose()
    }

    pub fn apply_point(self, p: &Point3<f32>) -> Point3<f32> {
        Point3::from(self.matrix() * p.coords)
    }

    pub fn apply_vector(self, v: &Vector3<f32>) -> Vector3<f32> {
        self.matrix() * v
    }

    pub fn invert_point(self, p: &Point3<f32>) -> Point3<f32> {
        Point3::from(self.inverse_matrix() * p.coords)
    }

    /// Convert the position and normal of one corner
    pub fn apply_corner(self, corner: &AliasPoint) -> AliasPoint {
        AliasPoint {
            normal: self.apply_vector(&corner.normal),
            position: self.apply_point(&corner.position),
            ..*corner
        }
    }

    /// Convert every corner of an object in place
    pub fn apply_object(self, object: &mut MeshObject) {
        if self == CoordinateConversion::None {
            return;
        }
        for triangle in &mut object.triangles {
            for corner in &mut triangle.corners {
                *corner = self.apply_corner(corner);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Triangle;

    #[test]
    fn test_blender_to_quake() {
        let conv = CoordinateConversion::BlenderToQuake;
        let p = conv.apply_point(&Point3::new(1.0, 2.0, 3.0));
        assert_eq!(p, Point3::new(1.0, -3.0, 2.0));
        let n = conv.apply_vector(&Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(n, Vector3::new(0.0, -1.0, 0.0));
    }

    #[test]
    fn test_inverse_restores_point() {
        let conv = CoordinateConversion::BlenderToQuake;
        let original = Point3::new(1.5, -2.0, 7.25);
        let back = conv.invert_point(&conv.apply_point(&original));
        assert!((back - original).norm() < 1e-6);
    }

    #[test]
    fn test_none_is_identity() {
        let mut object = MeshObject::new("a", "t");
        object.add_triangle(Triangle::new(
            AliasPoint::at(1.0, 2.0, 3.0),
            AliasPoint::at(4.0, 5.0, 6.0),
            AliasPoint::at(7.0, 8.0, 9.0),
        ));
        let before = object.clone();
        CoordinateConversion::None.apply_object(&mut object);
        assert_eq!(object, before);
    }

    #[test]
    fn test_apply_corner_keeps_color_and_uv() {
        let mut corner = AliasPoint::at(0.0, 1.0, 0.0);
        corner.color = Vector3::new(0.25, 0.5, 1.0);
        corner.uv = nalgebra::Vector2::new(0.1, 0.9);
        let converted = CoordinateConversion::BlenderToQuake.apply_corner(&corner);
        assert_eq!(converted.position, Point3::new(0.0, 0.0, 1.0));
        assert_eq!(converted.color, corner.color);
        assert_eq!(converted.uv, corner.uv);
    }
}
