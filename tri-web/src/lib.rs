/// TRI Web - WASM bindings for the .tri codec
///
/// Exposes a decoded file to JavaScript as flat per-corner attribute arrays
/// (three corners per triangle) that map directly onto vertex buffers.
use tri_core::{decode_document, encode_document, CodecConfig, MeshObject, TriDocument};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct TriFile {
    document: TriDocument,
    config: CodecConfig,
}

#[wasm_bindgen]
impl TriFile {
    /// Decode a .tri byte buffer
    #[wasm_bindgen(constructor)]
    pub fn new(bytes: &[u8]) -> Result<TriFile, JsValue> {
        Self::decode(bytes, CodecConfig::default())
    }

    /// Decode with a custom triangle-count ceiling
    #[wasm_bindgen(js_name = withMaxTriangles)]
    pub fn with_max_triangles(bytes: &[u8], max_triangles: u32) -> Result<TriFile, JsValue> {
        Self::decode(bytes, CodecConfig::default().with_max_triangles(max_triangles))
    }

    #[wasm_bindgen(js_name = objectCount)]
    pub fn object_count(&self) -> usize {
        self.document.objects.len()
    }

    #[wasm_bindgen(js_name = objectName)]
    pub fn object_name(&self, index: usize) -> Option<String> {
        self.object(index).map(|o| o.name.clone())
    }

    #[wasm_bindgen(js_name = textureName)]
    pub fn texture_name(&self, index: usize) -> Option<String> {
        self.object(index).map(|o| o.texture.clone())
    }

    #[wasm_bindgen(js_name = triangleCount)]
    pub fn triangle_count(&self, index: usize) -> usize {
        self.object(index).map_or(0, MeshObject::triangle_count)
    }

    /// x, y, z per corner
    pub fn positions(&self, index: usize) -> Vec<f32> {
        self.flatten(index, |c| c.position.coords.as_slice().to_vec())
    }

    /// x, y, z per corner
    pub fn normals(&self, index: usize) -> Vec<f32> {
        self.flatten(index, |c| c.normal.as_slice().to_vec())
    }

    /// r, g, b per corner
    pub fn colors(&self, index: usize) -> Vec<f32> {
        self.flatten(index, |c| c.color.as_slice().to_vec())
    }

    /// u, v per corner
    pub fn uvs(&self, index: usize) -> Vec<f32> {
        self.flatten(index, |c| c.uv.as_slice().to_vec())
    }

    /// Re-encode the decoded document
    pub fn encode(&self) -> Result<Vec<u8>, JsValue> {
        encode_document(&self.document, &self.config)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl TriFile {
    fn decode(bytes: &[u8], config: CodecConfig) -> Result<TriFile, JsValue> {
        let document = decode_document(bytes, &config)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        Ok(TriFile { document, config })
    }

    fn object(&self, index: usize) -> Option<&MeshObject> {
        self.document.objects.get(index)
    }

    fn flatten(
        &self,
        index: usize,
        field: impl Fn(&tri_core::AliasPoint) -> Vec<f32>,
    ) -> Vec<f32> {
        self.object(index)
            .map(|object| {
                object
                    .triangles
                    .iter()
                    .flat_map(|t| t.corners.iter())
                    .flat_map(&field)
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tri_core::{encode, AliasPoint, Triangle};

    fn sample_bytes() -> Vec<u8> {
        let mut object = MeshObject::new("Wedge", "wedge.tga");
        object.add_triangle(Triangle::new(
            AliasPoint::at(0.0, 0.0, 0.0),
            AliasPoint::at(1.0, 0.0, 0.0),
            AliasPoint::at(0.0, 1.0, 0.0),
        ));
        encode(&[object], &CodecConfig::default()).unwrap()
    }

    #[test]
    fn test_flat_arrays() {
        let file = TriFile::decode(&sample_bytes(), CodecConfig::default()).unwrap();
        assert_eq!(file.object_count(), 1);
        assert_eq!(file.object_name(0).as_deref(), Some("Wedge"));
        assert_eq!(file.texture_name(0).as_deref(), Some("wedge.tga"));
        assert_eq!(file.triangle_count(0), 1);
        assert_eq!(file.positions(0), vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0]);
        assert_eq!(file.uvs(0).len(), 6);
        assert!(file.positions(5).is_empty());
        assert_eq!(file.object_name(5), None);
    }

    #[test]
    fn test_encode_round_trip() {
        let bytes = sample_bytes();
        let file = TriFile::decode(&bytes, CodecConfig::default()).unwrap();
        assert_eq!(file.encode().unwrap(), bytes);
    }
}
