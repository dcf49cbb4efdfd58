use std::path::Path;

use color_eyre::Result;
use glium::glutin::surface::WindowSurface;
use glium::{Display, Frame};
use nalgebra::{Matrix4, Vector3};

use common::colors::{self, Color, ColorExt};
use common::frame_loop::{FrameClock, FrameView, Scene};
use common::geometry::{LitVertex, Mesh, primitives};
use common::import;
use common::shader::ShaderProgram;

use super::{LIT_FRAGMENT_SHADER, LIT_VERTEX_SHADER, LightSource, depth_tested};

struct PhongMaterial {
    color: Color,
    ambient_strength: f32,
    specular_strength: f32,
    shininess: f32,
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self {
            color: colors::OBJECT,
            ambient_strength: 0.1,
            specular_strength: 0.5,
            shininess: 32.0,
        }
    }
}

/// Phong shaded meshes lit by a light orbiting the Y axis.
pub struct LitScene {
    program: ShaderProgram,
    mesh: Mesh<LitVertex>,
    material: PhongMaterial,
    placements: Vec<Matrix4<f32>>,
    light: LightSource,
}

impl LitScene {
    /// A cube at the origin and a second one five units further down -Z.
    pub fn cubes(display: &Display<WindowSurface>) -> Result<Self> {
        Self::new(
            display,
            Mesh::new(display, &primitives::LIT_CUBE)?,
            vec![
                Matrix4::identity(),
                Matrix4::new_translation(&Vector3::new(0.0, 0.0, -5.0)),
            ],
        )
    }

    /// A single vertex-list model at the origin, shaded with per-triangle normals.
    pub fn model(display: &Display<WindowSurface>, path: &Path) -> Result<Self> {
        let vertices = import::load_vertex_list(path)?.to_lit_vertices();

        Self::new(
            display,
            Mesh::new(display, &vertices)?,
            vec![Matrix4::identity()],
        )
    }

    fn new(
        display: &Display<WindowSurface>,
        mesh: Mesh<LitVertex>,
        placements: Vec<Matrix4<f32>>,
    ) -> Result<Self> {
        Ok(Self {
            program: ShaderProgram::from_files(display, LIT_VERTEX_SHADER, LIT_FRAGMENT_SHADER)?,
            mesh,
            material: PhongMaterial::default(),
            placements,
            light: LightSource::new(display)?,
        })
    }
}

impl Scene<Frame> for LitScene {
    fn update(&mut self, _clock: &FrameClock) {
        self.light.orbit();
    }

    fn draw(&mut self, frame: &mut Frame, view: &FrameView<'_>) -> Result<()> {
        let mut program = self.program.use_program();

        program.set_uniform_vec3("object_color", self.material.color.to_rgb_array());
        program.set_uniform_vec3("light_color", self.light.color().to_rgb_array());
        program.set_uniform_vec3("light_position", self.light.position());
        program.set_uniform_vec3("view_position", view.camera_position);
        program.set_uniform_float("ambient_strength", self.material.ambient_strength);
        program.set_uniform_float("specular_strength", self.material.specular_strength);
        program.set_uniform_float("shininess", self.material.shininess);

        for model in &self.placements {
            program.set_mvp(model, &view.view, &view.projection);
            program.draw(frame, &self.mesh, &depth_tested())?;
        }

        self.light.draw(frame, view)
    }
}
