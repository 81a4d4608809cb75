/// Orbit rotation and a perspective camera framed on the loaded meshes
use nalgebra::{Matrix4, Point3, Vector3};

/// Rotation around three axes (in radians)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn rotate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.x += dx;
        self.y += dy;
        self.z += dz;
    }

    /// Z, then Y, then X
    pub fn matrix(&self) -> Matrix4<f32> {
        let rx = Matrix4::new_rotation(Vector3::new(self.x, 0.0, 0.0));
        let ry = Matrix4::new_rotation(Vector3::new(0.0, self.y, 0.0));
        let rz = Matrix4::new_rotation(Vector3::new(0.0, 0.0, self.z));
        rz * ry * rx
    }
}

pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Camera {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            position: Point3::new(0.0, 0.0, 5.0),
            target: Point3::origin(),
            up: Vector3::y(),
            fov: std::f32::consts::FRAC_PI_4,
            // Terminal cells are roughly twice as tall as they are wide
            aspect: width as f32 / (height.max(1) as f32 * 2.0),
            near: 0.1,
            far: 100.0,
        }
    }

    /// Back off along +Z until a sphere of `radius` around the origin fits the view
    pub fn frame_radius(&mut self, radius: f32) {
        let radius = radius.max(1e-3);
        let distance = radius / (self.fov / 2.0).sin();
        self.position = Point3::new(0.0, 0.0, distance);
        self.target = Point3::origin();
        self.near = (distance - radius).max(1e-3) * 0.5;
        self.far = distance + radius * 2.0;
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> Matrix4<f32> {
        Matrix4::new_perspective(self.aspect, self.fov, self.near, self.far)
    }

    /// Project a model-space point to (column, row, depth); `None` when off screen
    pub fn project_to_screen(
        &self,
        point: &Point3<f32>,
        model_matrix: &Matrix4<f32>,
        width: u32,
        height: u32,
    ) -> Option<(f32, f32, f32)> {
        let mvp = self.projection_matrix() * self.view_matrix() * model_matrix;
        let ndc = mvp.transform_point(point);

        if !(-1.0..=1.0).contains(&ndc.z) {
            return None;
        }
        if ndc.x.abs() > 1.0 || ndc.y.abs() > 1.0 {
            return None;
        }

        let screen_x = (ndc.x + 1.0) * 0.5 * width as f32;
        let screen_y = (1.0 - ndc.y) * 0.5 * height as f32;
        Some((screen_x, screen_y, ndc.z))
    }
}
