pub use mesh::{Mesh, MeshError};
pub use vertex::{LitVertex, PositionVertex};

mod mesh;
pub mod primitives;
mod vertex;
