/// ASCII rasterizer for imported .tri meshes
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::{Matrix4, Vector3};
use std::io::Write;
use tri_core::IndexedMesh;

use crate::camera::Camera;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    /// Character at a cell, for inspection
    pub fn cell(&self, x: usize, y: usize) -> char {
        self.char_buffer[y * self.width + x]
    }

    pub fn render_mesh(
        &mut self,
        mesh: &IndexedMesh,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) {
        for face in 0..mesh.faces.len() {
            self.render_face(mesh, face, model_matrix, camera);
        }
    }

    fn render_face(
        &mut self,
        mesh: &IndexedMesh,
        face: usize,
        model_matrix: &Matrix4<f32>,
        camera: &Camera,
    ) {
        let mut screen = [(0.0, 0.0, 0.0); 3];
        let (width, height) = (self.width as u32, self.height as u32);
        for (slot, position) in screen.iter_mut().zip(mesh.triangle(face)) {
            match camera.project_to_screen(&position, model_matrix, width, height) {
                Some(coords) => *slot = coords,
                None => return,
            }
        }

        let normal = model_matrix.transform_vector(&mesh.face_normal(face));
        if !normal.iter().all(|c| c.is_finite()) {
            return; // degenerate triangle
        }
        let light_dir = Vector3::new(0.3, 0.5, 1.0).normalize();
        let brightness = normal.dot(&light_dir).abs();

        let index = (brightness * (LUMINOSITY_RAMP.len() - 1) as f32) as usize;
        let character = LUMINOSITY_RAMP[index.clamp(1, LUMINOSITY_RAMP.len() - 1)];

        self.rasterize_triangle(&screen, character);
    }

    fn rasterize_triangle(&mut self, coords: &[(f32, f32, f32); 3], character: char) {
        let [v0, v1, v2] = *coords;

        let min_x = (v0.0.min(v1.0).min(v2.0).floor() as i32).max(0);
        let max_x = (v0.0.max(v1.0).max(v2.0).ceil() as i32).min(self.width as i32 - 1);
        let min_y = (v0.1.min(v1.1).min(v2.1).floor() as i32).max(0);
        let max_y = (v0.1.max(v1.1).max(v2.1).ceil() as i32).min(self.height as i32 - 1);

        let (a, b, c) = ((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1));
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                let Some((w0, w1, w2)) = barycentric(a, b, c, p) else {
                    continue;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                let idx = y as usize * self.width + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.char_buffer[idx] = character;
                }
            }
        }
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for row in self.char_buffer.chunks(self.width.max(1)) {
            for &c in row {
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    _ => Color::Cyan,
                };
                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            writer.queue(Print("\r\n"))?;
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Barycentric coordinates of `p` in a screen-space triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);
    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    Some((w0, w1, 1.0 - w0 - w1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;

    fn facing_quad() -> IndexedMesh {
        IndexedMesh {
            name: "Quad".into(),
            positions: vec![
                Point3::new(-1.0, -1.0, 0.0),
                Point3::new(1.0, -1.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(-1.0, 1.0, 0.0),
            ],
            faces: vec![[0, 1, 2], [0, 2, 3]],
        }
    }

    #[test]
    fn test_barycentric_centroid() {
        let (w0, w1, w2) = barycentric((0.0, 0.0), (3.0, 0.0), (0.0, 3.0), (1.0, 1.0)).unwrap();
        assert!((w0 - 1.0 / 3.0).abs() < 1e-5);
        assert!((w1 - 1.0 / 3.0).abs() < 1e-5);
        assert!((w2 - 1.0 / 3.0).abs() < 1e-5);
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }

    #[test]
    fn test_quad_covers_centre() {
        let mut renderer = AsciiRenderer::new(40, 20);
        let mut camera = Camera::new(40, 20);
        camera.frame_radius(2.0);
        renderer.render_mesh(&facing_quad(), &Matrix4::identity(), &camera);
        assert_ne!(renderer.cell(20, 10), ' ');
        assert_eq!(renderer.cell(0, 0), ' ');

        renderer.clear();
        assert_eq!(renderer.cell(20, 10), ' ');
    }

    #[test]
    fn test_draw_emits_rows() {
        let renderer = AsciiRenderer::new(3, 2);
        let mut out = Vec::new();
        renderer.draw(&mut out).unwrap();
        let text = String::from_utf8_lossy(&out);
        assert_eq!(text.matches("\r\n").count(), 2);
    }
}
