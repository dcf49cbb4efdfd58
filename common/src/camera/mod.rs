pub use free_camera::{CameraState, FreeCamera, MOUSE_SENSITIVITY, PITCH_LIMIT};
pub use movement::{KeyBindings, Movement, MovementMode, MovementSet};

mod free_camera;
mod movement;
