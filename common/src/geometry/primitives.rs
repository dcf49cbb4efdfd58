use crate::geometry::{LitVertex, PositionVertex};

const fn lit(position: [f32; 3], normal: [f32; 3]) -> LitVertex {
    LitVertex { position, normal }
}

const BACK: [f32; 3] = [0.0, 0.0, -1.0];
const FRONT: [f32; 3] = [0.0, 0.0, 1.0];
const LEFT: [f32; 3] = [-1.0, 0.0, 0.0];
const RIGHT: [f32; 3] = [1.0, 0.0, 0.0];
const BOTTOM: [f32; 3] = [0.0, -1.0, 0.0];
const TOP: [f32; 3] = [0.0, 1.0, 0.0];

/// Unit cube centred on the origin, two triangles per face with flat normals.
pub const LIT_CUBE: [LitVertex; 36] = [
    lit([-0.5, -0.5, -0.5], BACK),
    lit([0.5, -0.5, -0.5], BACK),
    lit([0.5, 0.5, -0.5], BACK),
    lit([0.5, 0.5, -0.5], BACK),
    lit([-0.5, 0.5, -0.5], BACK),
    lit([-0.5, -0.5, -0.5], BACK),
    lit([-0.5, -0.5, 0.5], FRONT),
    lit([0.5, -0.5, 0.5], FRONT),
    lit([0.5, 0.5, 0.5], FRONT),
    lit([0.5, 0.5, 0.5], FRONT),
    lit([-0.5, 0.5, 0.5], FRONT),
    lit([-0.5, -0.5, 0.5], FRONT),
    lit([-0.5, 0.5, 0.5], LEFT),
    lit([-0.5, 0.5, -0.5], LEFT),
    lit([-0.5, -0.5, -0.5], LEFT),
    lit([-0.5, -0.5, -0.5], LEFT),
    lit([-0.5, -0.5, 0.5], LEFT),
    lit([-0.5, 0.5, 0.5], LEFT),
    lit([0.5, 0.5, 0.5], RIGHT),
    lit([0.5, 0.5, -0.5], RIGHT),
    lit([0.5, -0.5, -0.5], RIGHT),
    lit([0.5, -0.5, -0.5], RIGHT),
    lit([0.5, -0.5, 0.5], RIGHT),
    lit([0.5, 0.5, 0.5], RIGHT),
    lit([-0.5, -0.5, -0.5], BOTTOM),
    lit([0.5, -0.5, -0.5], BOTTOM),
    lit([0.5, -0.5, 0.5], BOTTOM),
    lit([0.5, -0.5, 0.5], BOTTOM),
    lit([-0.5, -0.5, 0.5], BOTTOM),
    lit([-0.5, -0.5, -0.5], BOTTOM),
    lit([-0.5, 0.5, -0.5], TOP),
    lit([0.5, 0.5, -0.5], TOP),
    lit([0.5, 0.5, 0.5], TOP),
    lit([0.5, 0.5, 0.5], TOP),
    lit([-0.5, 0.5, 0.5], TOP),
    lit([-0.5, 0.5, -0.5], TOP),
];

const fn corner(position: [f32; 3]) -> PositionVertex {
    PositionVertex { position }
}

/// Corners of the unit cube, indexed by `x | y << 1 | z << 2` with a set bit on the positive side.
pub const CUBE_CORNERS: [PositionVertex; 8] = [
    corner([-0.5, -0.5, -0.5]),
    corner([0.5, -0.5, -0.5]),
    corner([-0.5, 0.5, -0.5]),
    corner([0.5, 0.5, -0.5]),
    corner([-0.5, -0.5, 0.5]),
    corner([0.5, -0.5, 0.5]),
    corner([-0.5, 0.5, 0.5]),
    corner([0.5, 0.5, 0.5]),
];

/// Triangles over [`CUBE_CORNERS`] in the same order and winding as [`LIT_CUBE`].
#[rustfmt::skip]
pub const CUBE_INDICES: [u32; 36] = [
    0, 1, 3, 3, 2, 0,
    4, 5, 7, 7, 6, 4,
    6, 2, 0, 0, 4, 6,
    7, 3, 1, 1, 5, 7,
    0, 1, 5, 5, 4, 0,
    2, 3, 7, 7, 6, 2,
];
