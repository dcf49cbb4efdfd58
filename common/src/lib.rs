pub mod camera;
pub mod colors;
pub mod config;
pub mod context;
pub mod debug;
pub mod frame_loop;
pub mod geometry;
pub mod import;
pub mod input;
pub mod maths;
pub mod platform;
pub mod shader;
