use glium::{Depth, DepthTest, DrawParameters};

pub use light::LightSource;
pub use lit::LitScene;
pub use unlit::UnlitScene;

mod light;
mod lit;
mod unlit;

const FLAT_VERTEX_SHADER: &str = "assets/shaders/flat/flat.vert";
const FLAT_FRAGMENT_SHADER: &str = "assets/shaders/flat/flat.frag";
const LIT_VERTEX_SHADER: &str = "assets/shaders/lit/lit.vert";
const LIT_FRAGMENT_SHADER: &str = "assets/shaders/lit/lit.frag";

fn depth_tested() -> DrawParameters<'static> {
    DrawParameters {
        depth: Depth {
            test: DepthTest::IfLess,
            write: true,
            ..Default::default()
        },
        ..DrawParameters::default()
    }
}
