/// Scene meshes to [`MeshObject`]s
///
/// The host application hands over already-triangulated meshes with
/// per-corner attributes. This module applies the caller-side steps that
/// happen before encoding: selection filtering, default colors and UVs,
/// coordinate conversion and texture-name derivation.
use nalgebra::{Point3, Vector2, Vector3};

use crate::config::{CodecConfig, SelectionMode};
use crate::geometry::{AliasPoint, MeshObject, TriDocument, Triangle};

/// Texture name used when a mesh has no image in its materials
pub const DEFAULT_TEXTURE_NAME: &str = "default_tex.tga";

/// Characters of the image stem kept in a derived texture name
const TEXTURE_STEM_LEN: usize = 8;

/// Color written when a mesh has no vertex-color layer
pub const DEFAULT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];

/// One triangulated corner as authored
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExportCorner {
    pub position: Point3<f32>,
    pub normal: Vector3<f32>,
    pub color: Option<Vector3<f32>>,
    pub uv: Option<Vector2<f32>>,
}

impl ExportCorner {
    pub fn new(position: Point3<f32>, normal: Vector3<f32>) -> Self {
        Self {
            position,
            normal,
            color: None,
            uv: None,
        }
    }

    pub fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.uv = Some(Vector2::new(u, v));
        self
    }

    pub fn with_color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.color = Some(Vector3::new(r, g, b));
        self
    }
}

/// A triangulated scene mesh ready for export
#[derive(Debug, Clone, Default)]
pub struct ExportMesh {
    pub name: String,
    pub selected: bool,
    pub hidden: bool,
    /// Image file paths found in the mesh's materials, in slot order
    pub image_paths: Vec<String>,
    pub faces: Vec<[ExportCorner; 3]>,
}

impl ExportMesh {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            selected: true,
            ..Default::default()
        }
    }

    pub fn add_face(&mut self, face: [ExportCorner; 3]) {
        self.faces.push(face);
    }

    /// Split a planar quad into two faces with unit-square UVs
    fn add_quad(&mut self, corners: [Point3<f32>; 4], normal: Vector3<f32>) {
        let uvs = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];
        let corner = |i: usize| ExportCorner::new(corners[i], normal).with_uv(uvs[i].0, uvs[i].1);
        self.add_face([corner(0), corner(1), corner(2)]);
        self.add_face([corner(0), corner(2), corner(3)]);
    }

    /// An axis-aligned cube centred on the origin, wound counter-clockwise
    pub fn cube(name: impl Into<String>, size: f32) -> Self {
        let h = size / 2.0;
        let p = Point3::new;
        let mut mesh = Self::new(name);

        mesh.add_quad(
            [p(-h, -h, h), p(h, -h, h), p(h, h, h), p(-h, h, h)],
            Vector3::z(),
        );
        mesh.add_quad(
            [p(h, -h, -h), p(-h, -h, -h), p(-h, h, -h), p(h, h, -h)],
            -Vector3::z(),
        );
        mesh.add_quad(
            [p(-h, h, h), p(h, h, h), p(h, h, -h), p(-h, h, -h)],
            Vector3::y(),
        );
        mesh.add_quad(
            [p(-h, -h, -h), p(h, -h, -h), p(h, -h, h), p(-h, -h, h)],
            -Vector3::y(),
        );
        mesh.add_quad(
            [p(h, -h, h), p(h, -h, -h), p(h, h, -h), p(h, h, h)],
            Vector3::x(),
        );
        mesh.add_quad(
            [p(-h, -h, -h), p(-h, -h, h), p(-h, h, h), p(-h, h, -h)],
            -Vector3::x(),
        );

        mesh
    }
}

/// Texture name from an image path: lowercased stem, at most 8 characters, `.tga`
pub fn texture_name_from_image(path: &str) -> String {
    let base = path.rsplit(['/', '\\']).next().unwrap_or(path);
    let stem = match base.rfind('.') {
        Some(dot) if dot > 0 => &base[..dot],
        _ => base,
    };
    let stem: String = stem.to_lowercase().chars().take(TEXTURE_STEM_LEN).collect();
    format!("{}.tga", stem)
}

/// First usable image path wins; otherwise [`DEFAULT_TEXTURE_NAME`]
pub fn resolve_texture_name(image_paths: &[String]) -> String {
    image_paths
        .iter()
        .find(|path| !path.trim().is_empty())
        .map(|path| texture_name_from_image(path))
        .unwrap_or_else(|| DEFAULT_TEXTURE_NAME.to_string())
}

/// Turn scene meshes into codec records according to `config`
pub fn prepare_objects(meshes: &[ExportMesh], config: &CodecConfig) -> Vec<MeshObject> {
    let mut objects = Vec::new();
    for mesh in meshes {
        if config.selection == SelectionMode::Selected && !mesh.selected {
            log::debug!("Skipping unselected mesh '{}'", mesh.name);
            continue;
        }
        if mesh.hidden {
            log::debug!("Skipping hidden mesh '{}'", mesh.name);
            continue;
        }
        if mesh.faces.is_empty() {
            log::warn!("Mesh '{}' has no faces, skipping", mesh.name);
            continue;
        }

        let texture = resolve_texture_name(&mesh.image_paths);
        let mut object = MeshObject::with_capacity(mesh.name.clone(), texture, mesh.faces.len());
        for face in &mesh.faces {
            let [a, b, c] = face.map(|corner| alias_point(&corner));
            object.add_triangle(Triangle::new(a, b, c));
        }
        config.coordinates.apply_object(&mut object);

        log::debug!(
            "Prepared '{}': {} triangle(s), texture '{}'",
            object.name,
            object.triangle_count(),
            object.texture
        );
        objects.push(object);
    }
    objects
}

/// [`prepare_objects`] wrapped in a document carrying the configured closing label
pub fn export_document(meshes: &[ExportMesh], config: &CodecConfig) -> TriDocument {
    TriDocument {
        objects: prepare_objects(meshes, config),
        closing_name: config.closing_name.clone(),
    }
}

fn alias_point(corner: &ExportCorner) -> AliasPoint {
    AliasPoint::new(
        corner.normal,
        corner.position,
        corner.color.unwrap_or_else(|| Vector3::from(DEFAULT_COLOR)),
        corner.uv.unwrap_or_else(Vector2::zeros),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::CoordinateConversion;

    fn single_face(name: &str) -> ExportMesh {
        let mut mesh = ExportMesh::new(name);
        mesh.add_face([
            ExportCorner::new(Point3::new(0.0, 0.0, 1.0), Vector3::z()),
            ExportCorner::new(Point3::new(1.0, 0.0, 1.0), Vector3::z()).with_color(0.5, 0.25, 0.0),
            ExportCorner::new(Point3::new(0.0, 1.0, 1.0), Vector3::z()).with_uv(0.0, 1.0),
        ]);
        mesh
    }

    #[test]
    fn test_texture_name_from_image() {
        assert_eq!(texture_name_from_image("//textures/PlayerSkin.png"), "playersk.tga");
        assert_eq!(texture_name_from_image("C:\\art\\Gun.bmp"), "gun.tga");
        assert_eq!(texture_name_from_image("wall"), "wall.tga");
        assert_eq!(texture_name_from_image("a/.hidden"), ".hidden.tga");
    }

    #[test]
    fn test_resolve_texture_default() {
        assert_eq!(resolve_texture_name(&[]), DEFAULT_TEXTURE_NAME);
        assert_eq!(resolve_texture_name(&["".into(), "x/Rock.png".into()]), "rock.tga");
    }

    #[test]
    fn test_selection_filter() {
        let mut unselected = single_face("Other");
        unselected.selected = false;
        let meshes = vec![single_face("Picked"), unselected];

        let selected = prepare_objects(&meshes, &CodecConfig::default());
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name, "Picked");

        let config = CodecConfig {
            selection: SelectionMode::All,
            ..Default::default()
        };
        assert_eq!(prepare_objects(&meshes, &config).len(), 2);
    }

    #[test]
    fn test_hidden_and_empty_skipped() {
        let mut hidden = single_face("Hidden");
        hidden.hidden = true;
        let meshes = vec![hidden, ExportMesh::new("Empty")];
        assert!(prepare_objects(&meshes, &CodecConfig::default()).is_empty());
    }

    #[test]
    fn test_defaults_and_conversion() {
        let objects = prepare_objects(&[single_face("Face")], &CodecConfig::default());
        let corners = &objects[0].triangles[0].corners;

        // (x, y, z) -> (x, -z, y)
        assert_eq!(corners[1].position, Point3::new(1.0, -1.0, 0.0));
        assert_eq!(corners[0].normal, Vector3::new(0.0, -1.0, 0.0));
        assert_eq!(corners[0].color, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(corners[1].color, Vector3::new(0.5, 0.25, 0.0));
        assert_eq!(corners[0].uv, Vector2::zeros());
        assert_eq!(corners[2].uv, Vector2::new(0.0, 1.0));
        assert_eq!(objects[0].texture, DEFAULT_TEXTURE_NAME);
    }

    #[test]
    fn test_no_conversion() {
        let config = CodecConfig {
            coordinates: CoordinateConversion::None,
            ..Default::default()
        };
        let objects = prepare_objects(&[single_face("Face")], &config);
        assert_eq!(objects[0].triangles[0].corners[1].position, Point3::new(1.0, 0.0, 1.0));
    }

    #[test]
    fn test_cube_faces() {
        let cube = ExportMesh::cube("Cube", 2.0);
        assert_eq!(cube.faces.len(), 12);
        for face in &cube.faces {
            let [a, b, c] = face.map(|corner| corner.position);
            let winding = (b - a).cross(&(c - a)).normalize();
            assert!((winding - face[0].normal).norm() < 1e-6);
        }
    }
}
