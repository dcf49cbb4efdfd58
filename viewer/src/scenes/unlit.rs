use color_eyre::Result;
use glium::glutin::surface::WindowSurface;
use glium::{Display, Frame};
use nalgebra::{Matrix4, Vector3};

use common::colors::{self, ColorExt};
use common::frame_loop::{FrameClock, FrameView, Scene};
use common::geometry::{Mesh, PositionVertex, primitives};
use common::shader::ShaderProgram;

use super::{FLAT_FRAGMENT_SHADER, FLAT_VERTEX_SHADER, LightSource, depth_tested};

/// Flat coloured cubes next to a resting light marker, before any lighting is applied.
pub struct UnlitScene {
    program: ShaderProgram,
    cube: Mesh<PositionVertex>,
    light: LightSource,
}

impl UnlitScene {
    pub fn new(display: &Display<WindowSurface>) -> Result<Self> {
        Ok(Self {
            program: ShaderProgram::from_files(display, FLAT_VERTEX_SHADER, FLAT_FRAGMENT_SHADER)?,
            cube: Mesh::indexed(
                display,
                &primitives::CUBE_CORNERS,
                &primitives::CUBE_INDICES,
            )?,
            light: LightSource::new(display)?,
        })
    }
}

impl Scene<Frame> for UnlitScene {
    fn update(&mut self, _clock: &FrameClock) {}

    fn draw(&mut self, frame: &mut Frame, view: &FrameView<'_>) -> Result<()> {
        let mut program = self.program.use_program();
        program.set_uniform_vec3("color", colors::OBJECT.to_rgb_array());

        for translation in [Vector3::zeros(), Vector3::new(0.0, 0.0, -5.0)] {
            let model = Matrix4::new_translation(&translation);
            program.set_mvp(&model, &view.view, &view.projection);
            program.draw(frame, &self.cube, &depth_tested())?;
        }

        self.light.draw(frame, view)
    }
}
