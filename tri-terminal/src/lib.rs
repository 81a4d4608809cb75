/// Terminal viewer and command implementations for .tri files
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use nalgebra::{Matrix4, Point3};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};
use tri_core::IndexedMesh;

pub mod camera;
pub mod commands;
pub mod renderer;

pub use camera::{Camera, RotationState};
pub use renderer::AsciiRenderer;

/// Centre and radius of the bounding box around every mesh
pub fn scene_extent(meshes: &[IndexedMesh]) -> Option<(Point3<f32>, f32)> {
    let (lo, hi) = meshes
        .iter()
        .filter_map(IndexedMesh::bounds)
        .reduce(|(lo_a, hi_a), (lo_b, hi_b)| (lo_a.inf(&lo_b), hi_a.sup(&hi_b)))?;
    let centre = nalgebra::center(&lo, &hi);
    Some((centre, (hi - lo).norm() / 2.0))
}

/// Interactive viewer for imported meshes
pub struct TerminalApp {
    meshes: Vec<IndexedMesh>,
    title: String,
    centre: Point3<f32>,
    rotation: RotationState,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(meshes: Vec<IndexedMesh>, title: impl Into<String>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        // Leave the top row for the status line
        let height = height.saturating_sub(1).max(1);

        let (centre, radius) = scene_extent(&meshes).unwrap_or((Point3::origin(), 1.0));
        let mut camera = Camera::new(width as u32, height as u32);
        camera.frame_radius(radius);

        Ok(Self {
            meshes,
            title: title.into(),
            centre,
            rotation: RotationState::new(0.3, 0.3, 0.0),
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30);

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }
            self.rotation.rotate(0.0, 0.015, 0.0);
            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        if let Event::Key(KeyEvent { code, .. }) = event::read()? {
            match code {
                KeyCode::Char('q') | KeyCode::Esc => self.running = false,
                KeyCode::Char('w') | KeyCode::Up => self.rotation.rotate(0.1, 0.0, 0.0),
                KeyCode::Char('s') | KeyCode::Down => self.rotation.rotate(-0.1, 0.0, 0.0),
                KeyCode::Char('a') | KeyCode::Left => self.rotation.rotate(0.0, -0.1, 0.0),
                KeyCode::Char('d') | KeyCode::Right => self.rotation.rotate(0.0, 0.1, 0.0),
                KeyCode::Char('e') => self.rotation.rotate(0.0, 0.0, 0.1),
                KeyCode::Char('r') => self.rotation.rotate(0.0, 0.0, -0.1),
                _ => {}
            }
        }
        Ok(())
    }

    fn model_matrix(&self) -> Matrix4<f32> {
        self.rotation.matrix() * Matrix4::new_translation(&-self.centre.coords)
    }

    fn render(&mut self) -> io::Result<()> {
        let model = self.model_matrix();

        self.renderer.clear();
        for mesh in &self.meshes {
            self.renderer.render_mesh(mesh, &model, &self.camera);
        }

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 1))?;
        self.renderer.draw(&mut stdout)?;

        let triangles: usize = self.meshes.iter().map(|m| m.faces.len()).sum();
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "{} | {} mesh(es), {} tris | FPS: {:.1} | WASD/Arrows=Rotate E/R=Roll Q=Quit",
                self.title,
                self.meshes.len(),
                triangles,
                self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
