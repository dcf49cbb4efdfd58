use glium::implement_vertex;
use serde::{Deserialize, Serialize};

/// Interleaved position and normal, the layout of every lit mesh.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LitVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

implement_vertex!(LitVertex, position, normal);

#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PositionVertex {
    pub position: [f32; 3],
}

implement_vertex!(PositionVertex, position);
