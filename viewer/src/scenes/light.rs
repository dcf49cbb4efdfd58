use color_eyre::Result;
use glium::glutin::surface::WindowSurface;
use glium::{Display, Frame};
use nalgebra::Point3;

use common::colors::{Color, ColorExt};
use common::frame_loop::FrameView;
use common::geometry::{Mesh, PositionVertex, primitives};
use common::maths;
use common::shader::ShaderProgram;

use super::{FLAT_FRAGMENT_SHADER, FLAT_VERTEX_SHADER, depth_tested};

const START_POSITION: [f32; 3] = [0.5, -0.5, 3.0];
// Radians per frame about the world Y axis
const ORBIT_STEP: f32 = -0.01;
const SCALE: f32 = 0.5;

/// The small unlit cube marking where the scene's point light sits.
pub struct LightSource {
    position: Point3<f32>,
    color: Color,
    program: ShaderProgram,
    cube: Mesh<PositionVertex>,
}

impl LightSource {
    pub fn new(display: &Display<WindowSurface>) -> Result<Self> {
        Ok(Self {
            position: Point3::from(START_POSITION),
            color: Color::from_named(palette::named::WHITE),
            program: ShaderProgram::from_files(display, FLAT_VERTEX_SHADER, FLAT_FRAGMENT_SHADER)?,
            cube: Mesh::indexed(
                display,
                &primitives::CUBE_CORNERS,
                &primitives::CUBE_INDICES,
            )?,
        })
    }

    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn orbit(&mut self) {
        self.position = maths::orbit_y(self.position, ORBIT_STEP);
    }

    pub fn draw(&mut self, frame: &mut Frame, view: &FrameView<'_>) -> Result<()> {
        let model = maths::translate_scale(self.position.coords, SCALE);

        let mut program = self.program.use_program();
        program.set_uniform_vec3("color", self.color.to_rgb_array());
        program.set_mvp(&model, &view.view, &view.projection);
        program.draw(frame, &self.cube, &depth_tested())?;

        Ok(())
    }
}
