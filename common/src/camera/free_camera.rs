use nalgebra::{Matrix4, Point2, Point3, Vector3};

use crate::camera::movement::{Movement, MovementSet};

pub const MOUSE_SENSITIVITY: f32 = 0.1;
pub const PITCH_LIMIT: f32 = 89.0;

/// Position and orientation of a [`FreeCamera`]. Angles are in degrees.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraState {
    position: Point3<f32>,
    forward: Vector3<f32>,
    up: Vector3<f32>,
    yaw: f32,
    pitch: f32,
    last_cursor: Option<Point2<f32>>,
}

impl CameraState {
    pub fn position(&self) -> Point3<f32> {
        self.position
    }

    pub fn forward(&self) -> Vector3<f32> {
        self.forward
    }

    pub fn up(&self) -> Vector3<f32> {
        self.up
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    pub fn last_cursor(&self) -> Option<Point2<f32>> {
        self.last_cursor
    }
}

/// First-person fly camera driven by held movement keys and absolute cursor samples.
#[derive(Clone, Debug, PartialEq)]
pub struct FreeCamera {
    state: CameraState,
}

impl FreeCamera {
    /// Looks down -Z from `position`.
    pub fn new(position: Point3<f32>) -> Self {
        Self {
            state: CameraState {
                position,
                forward: Vector3::new(0.0, 0.0, -1.0),
                up: Vector3::y(),
                yaw: -90.0,
                pitch: 0.0,
                last_cursor: None,
            },
        }
    }

    pub fn with_orientation(position: Point3<f32>, yaw: f32, pitch: f32) -> Self {
        let pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

        Self {
            state: CameraState {
                position,
                forward: direction_from_angles(yaw, pitch),
                up: Vector3::y(),
                yaw,
                pitch,
                last_cursor: None,
            },
        }
    }

    pub fn state(&self) -> &CameraState {
        &self.state
    }

    pub fn position(&self) -> Point3<f32> {
        self.state.position
    }

    pub fn apply_discrete_movement(&mut self, held: MovementSet, speed: f32) {
        let state = &mut self.state;
        let strafe = strafe_axis(state);

        for movement in held.iter() {
            match movement {
                Movement::Forward => state.position += state.forward * speed,
                Movement::Backward => state.position -= state.forward * speed,
                Movement::Left => state.position += strafe * speed,
                Movement::Right => state.position -= strafe * speed,
                Movement::Up => state.position += state.up * speed,
                Movement::Down => state.position -= state.up * speed,
            }
        }
    }

    /// Takes an absolute cursor position. The first sample only becomes the reference point.
    pub fn apply_mouse_delta(&mut self, cursor_x: f64, cursor_y: f64) {
        let cursor = Point2::new(cursor_x as f32, cursor_y as f32);

        let Some(last) = self.state.last_cursor.replace(cursor) else {
            return;
        };

        let xoffset = (last.x - cursor.x) * MOUSE_SENSITIVITY;
        let yoffset = (cursor.y - last.y) * MOUSE_SENSITIVITY;

        self.state.yaw += xoffset;
        self.state.pitch = (self.state.pitch + yoffset).clamp(-PITCH_LIMIT, PITCH_LIMIT);

        self.state.forward = direction_from_angles(self.state.yaw, self.state.pitch);
    }

    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(
            &self.state.position,
            &(self.state.position + self.state.forward),
            &self.state.up,
        )
    }
}

impl Default for FreeCamera {
    fn default() -> Self {
        Self::new(Point3::new(0.0, 0.0, 5.0))
    }
}

fn strafe_axis(state: &CameraState) -> Vector3<f32> {
    state
        .forward
        .cross(&state.up)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(Vector3::zeros)
}

fn direction_from_angles(yaw: f32, pitch: f32) -> Vector3<f32> {
    let (yaw, pitch) = (yaw.to_radians(), pitch.to_radians());

    Vector3::new(
        yaw.cos() * pitch.cos(),
        pitch.sin(),
        yaw.sin() * pitch.cos(),
    )
    .normalize()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    use super::*;

    fn held(movements: &[Movement]) -> MovementSet {
        movements.iter().copied().collect()
    }

    #[test]
    fn forward_step_from_start_position() {
        let mut camera = FreeCamera::new(Point3::new(0.0, 0.0, 5.0));

        camera.apply_discrete_movement(held(&[Movement::Forward]), 0.05);

        assert_relative_eq!(camera.position(), Point3::new(0.0, 0.0, 4.95));
    }

    #[test]
    fn no_keys_held_keeps_position() {
        let mut camera = FreeCamera::default();

        camera.apply_discrete_movement(MovementSet::new(), 0.05);

        assert_eq!(camera.position(), Point3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn right_strafe_subtracts_cross_product() {
        let mut camera = FreeCamera::default();

        // cross((0, 0, -1), (0, 1, 0)) is +X
        camera.apply_discrete_movement(held(&[Movement::Right]), 0.5);
        assert_relative_eq!(camera.position(), Point3::new(-0.5, 0.0, 5.0));

        camera.apply_discrete_movement(held(&[Movement::Left]), 1.0);
        assert_relative_eq!(camera.position(), Point3::new(0.5, 0.0, 5.0));
    }

    #[test]
    fn vertical_movement_follows_world_up() {
        let mut camera = FreeCamera::default();

        camera.apply_discrete_movement(held(&[Movement::Up]), 0.25);
        assert_relative_eq!(camera.position(), Point3::new(0.0, 0.25, 5.0));

        camera.apply_discrete_movement(held(&[Movement::Down]), 1.0);
        assert_relative_eq!(camera.position(), Point3::new(0.0, -0.75, 5.0));
    }

    #[test]
    fn simultaneous_keys_accumulate_without_normalisation() {
        let mut camera = FreeCamera::default();

        camera.apply_discrete_movement(held(&[Movement::Forward, Movement::Left]), 1.0);

        assert_relative_eq!(camera.position(), Point3::new(1.0, 0.0, 4.0));
        assert_relative_eq!(
            (camera.position() - Point3::new(0.0, 0.0, 5.0)).norm(),
            2.0_f32.sqrt()
        );
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut camera = FreeCamera::default();

        camera.apply_discrete_movement(held(&[Movement::Forward, Movement::Backward]), 1.0);

        assert_relative_eq!(camera.position(), Point3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn first_cursor_sample_only_seeds_reference() {
        let mut camera = FreeCamera::default();

        camera.apply_mouse_delta(640.0, 360.0);

        assert_eq!(camera.state().yaw(), -90.0);
        assert_eq!(camera.state().pitch(), 0.0);
        assert_eq!(camera.state().forward(), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(camera.state().last_cursor(), Some(Point2::new(640.0, 360.0)));
    }

    #[test]
    fn identical_samples_do_not_rotate() {
        let mut camera = FreeCamera::default();

        camera.apply_mouse_delta(100.0, 100.0);
        camera.apply_mouse_delta(100.0, 100.0);

        assert_relative_eq!(camera.state().yaw(), -90.0);
        assert_relative_eq!(camera.state().pitch(), 0.0);
    }

    #[test]
    fn moving_cursor_right_decreases_yaw() {
        let mut camera = FreeCamera::default();

        camera.apply_mouse_delta(100.0, 100.0);
        camera.apply_mouse_delta(110.0, 100.0);

        assert_relative_eq!(camera.state().yaw(), -91.0, epsilon = 1e-4);
        assert_relative_eq!(camera.state().pitch(), 0.0);
    }

    #[test]
    fn moving_cursor_down_increases_pitch() {
        let mut camera = FreeCamera::default();

        camera.apply_mouse_delta(100.0, 100.0);
        camera.apply_mouse_delta(100.0, 150.0);

        assert_relative_eq!(camera.state().pitch(), 5.0, epsilon = 1e-4);
        assert!(camera.state().forward().y > 0.0);
    }

    #[test]
    fn pitch_is_clamped() {
        let mut camera = FreeCamera::default();

        camera.apply_mouse_delta(0.0, 0.0);
        camera.apply_mouse_delta(0.0, 10_000.0);
        assert_relative_eq!(camera.state().pitch(), PITCH_LIMIT);

        camera.apply_mouse_delta(0.0, -20_000.0);
        assert_relative_eq!(camera.state().pitch(), -PITCH_LIMIT);
    }

    #[test]
    fn random_cursor_paths_keep_invariants() {
        let mut rng = fastrand::Rng::with_seed(0x5eed);

        for _ in 0..50 {
            let mut camera = FreeCamera::default();

            for _ in 0..200 {
                let x = rng.f64() * 4000.0 - 2000.0;
                let y = rng.f64() * 4000.0 - 2000.0;
                camera.apply_mouse_delta(x, y);

                let state = camera.state();
                assert!((-PITCH_LIMIT..=PITCH_LIMIT).contains(&state.pitch()));
                assert_relative_eq!(state.forward().norm(), 1.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn yaw_is_unbounded() {
        let mut camera = FreeCamera::default();

        camera.apply_mouse_delta(0.0, 0.0);
        camera.apply_mouse_delta(-36_000.0, 0.0);

        assert_relative_eq!(camera.state().yaw(), 3510.0, epsilon = 1e-2);
        assert_relative_eq!(camera.state().forward().norm(), 1.0, epsilon = 1e-5);
    }

    #[test]
    fn with_orientation_matches_default_forward() {
        let camera = FreeCamera::with_orientation(Point3::new(0.0, 0.0, 5.0), -90.0, 0.0);

        assert_relative_eq!(
            camera.state().forward(),
            Vector3::new(0.0, 0.0, -1.0),
            epsilon = 1e-6
        );
    }

    #[test]
    fn with_orientation_clamps_pitch() {
        let camera = FreeCamera::with_orientation(Point3::origin(), 0.0, 120.0);

        assert_relative_eq!(camera.state().pitch(), PITCH_LIMIT);
    }

    #[test]
    fn view_matrix_is_pure() {
        let mut camera = FreeCamera::default();
        camera.apply_mouse_delta(10.0, 10.0);
        camera.apply_mouse_delta(42.0, -7.0);

        assert_eq!(camera.view_matrix(), camera.view_matrix());
    }

    #[test]
    fn view_matrix_moves_camera_to_origin_looking_down_negative_z() {
        let camera = FreeCamera::default();
        let view = camera.view_matrix();

        let eye = view * Vector4::new(0.0, 0.0, 5.0, 1.0);
        assert_relative_eq!(eye, Vector4::new(0.0, 0.0, 0.0, 1.0), epsilon = 1e-6);

        let ahead = view * Vector4::new(0.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(ahead, Vector4::new(0.0, 0.0, -5.0, 1.0), epsilon = 1e-6);
    }
}
