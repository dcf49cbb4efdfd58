use nalgebra::{Matrix4, Point3, Rotation3, Vector3};

pub fn raw_matrix(matrix: Matrix4<f32>) -> [[f32; 4]; 4] {
    <[[f32; 4]; 4]>::from(matrix)
}

/// Perspective projection with the vertical field of view given in degrees.
///
/// A negative field of view is passed through unchanged and mirrors the image on both axes.
pub fn perspective_matrix(aspect: f32, fov_degrees: f32, near: f32, far: f32) -> Matrix4<f32> {
    Matrix4::new_perspective(aspect, fov_degrees.to_radians(), near, far)
}

pub fn perspective_matrix_from_window_size(
    window_width: f32,
    window_height: f32,
    fov_degrees: f32,
    near: f32,
    far: f32,
) -> Matrix4<f32> {
    perspective_matrix(window_width / window_height, fov_degrees, near, far)
}

/// Rotates `point` about the world Y axis through the origin.
pub fn orbit_y(point: Point3<f32>, angle: f32) -> Point3<f32> {
    Rotation3::from_axis_angle(&Vector3::y_axis(), angle) * point
}

/// Model matrix for a translated and uniformly scaled object.
pub fn translate_scale(translation: Vector3<f32>, scale: f32) -> Matrix4<f32> {
    Matrix4::new_translation(&translation) * Matrix4::new_scaling(scale)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector4;

    use super::*;

    #[test]
    fn raw_matrix_is_column_major() {
        let matrix = Matrix4::new_translation(&Vector3::new(1.0, 2.0, 3.0));

        assert_eq!(raw_matrix(matrix)[3], [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn negative_fov_mirrors_both_axes() {
        let positive = perspective_matrix(16.0 / 9.0, 45.0, 0.1, 100.0);
        let negative = perspective_matrix(16.0 / 9.0, -45.0, 0.1, 100.0);

        assert_relative_eq!(negative[(0, 0)], -positive[(0, 0)]);
        assert_relative_eq!(negative[(1, 1)], -positive[(1, 1)]);
        assert_relative_eq!(negative[(2, 2)], positive[(2, 2)]);
    }

    #[test]
    fn window_size_sets_aspect() {
        let projection = perspective_matrix_from_window_size(1920.0, 1080.0, 45.0, 0.1, 100.0);

        assert_relative_eq!(
            projection[(1, 1)] / projection[(0, 0)],
            1920.0 / 1080.0,
            epsilon = 1e-5
        );
    }

    #[test]
    fn orbit_keeps_height_and_radius() {
        let start = Point3::new(0.5, -0.5, 3.0);
        let mut point = start;

        for _ in 0..1000 {
            point = orbit_y(point, -0.01);
        }

        assert_relative_eq!(point.y, start.y, epsilon = 1e-5);
        assert_relative_eq!(
            Vector3::new(point.x, 0.0, point.z).norm(),
            Vector3::new(start.x, 0.0, start.z).norm(),
            epsilon = 1e-4
        );
    }

    #[test]
    fn translate_scale_applies_scale_first() {
        let model = translate_scale(Vector3::new(0.0, 0.0, -5.0), 0.5);

        assert_relative_eq!(
            model * Vector4::new(1.0, 1.0, 1.0, 1.0),
            Vector4::new(0.5, 0.5, -4.5, 1.0)
        );
    }
}
