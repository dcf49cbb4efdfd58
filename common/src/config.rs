use std::io;
use std::path::{Path, PathBuf};

use log::LevelFilter;
use nalgebra::Point3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{FreeCamera, KeyBindings, MovementMode};
use crate::maths;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config {}: {reason}", path.display())]
    Invalid { path: PathBuf, reason: String },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: u32,
    pub height: u32,
    pub title: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            title: "triangles".to_owned(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    pub movement: MovementMode,
}

impl CameraConfig {
    pub fn build(&self) -> FreeCamera {
        FreeCamera::with_orientation(Point3::from(self.position), self.yaw, self.pitch)
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 0.0, 5.0],
            yaw: -90.0,
            pitch: 0.0,
            movement: MovementMode::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectionConfig {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: -45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SceneConfig {
    Unlit,
    #[default]
    Lit,
    Model {
        path: PathBuf,
    },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    pub projection: ProjectionConfig,
    pub key_bindings: KeyBindings,
    pub scene: SceneConfig,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            projection: ProjectionConfig::default(),
            key_bindings: KeyBindings::default(),
            scene: SceneConfig::default(),
            log_level: LevelFilter::Info,
        }
    }
}

impl Config {
    pub const DEFAULT_PATH: &'static str = "viewer.json";

    pub fn from_json(path: &Path, json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate().map_err(|reason| ConfigError::Invalid {
            path: path.to_path_buf(),
            reason,
        })?;

        Ok(config)
    }

    /// Reads `path`, or returns `None` when the file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Option<Self>, ConfigError> {
        let path = path.as_ref();

        match std::fs::read_to_string(path) {
            Ok(json) => Self::from_json(path, &json).map(Some),
            Err(error) if error.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    /// Rejects values the projection cannot be built from.
    fn validate(&self) -> Result<(), String> {
        let (width, height) = (self.window.width, self.window.height);
        if width == 0 || height == 0 {
            return Err(format!("window size {width}x{height} has a zero dimension"));
        }
        if width as f32 / height as f32 <= f32::EPSILON {
            return Err(format!("window size {width}x{height} is too narrow"));
        }

        let ProjectionConfig {
            fov_degrees,
            near,
            far,
        } = self.projection;

        if !fov_degrees.is_finite() || fov_degrees == 0.0 || fov_degrees.abs() >= 180.0 {
            return Err(format!(
                "field of view {fov_degrees} must be non-zero and within ±180 degrees"
            ));
        }
        if !(near.is_finite() && far.is_finite() && near > 0.0 && far - near > f32::EPSILON) {
            return Err(format!(
                "clip planes near {near} and far {far} must satisfy 0 < near < far"
            ));
        }

        Ok(())
    }

    pub fn projection_matrix(&self) -> nalgebra::Matrix4<f32> {
        maths::perspective_matrix_from_window_size(
            self.window.width as f32,
            self.window.height as f32,
            self.projection.fov_degrees,
            self.projection.near,
            self.projection.far,
        )
    }
}

#[cfg(test)]
mod tests {
    use winit::keyboard::KeyCode;

    use super::*;
    use crate::camera::Movement;

    #[test]
    fn empty_object_gives_defaults() {
        let config = Config::from_json(Path::new("test.json"), "{}").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.window.width, 1920);
        assert_eq!(config.window.height, 1080);
        assert_eq!(config.camera.movement, MovementMode::FixedStep { step: 0.05 });
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let json = r#"{
            "camera": { "movement": { "mode": "time_scaled", "units_per_second": 2.5 } },
            "scene": { "kind": "model", "path": "assets/models/teapot.txt" },
            "log_level": "debug"
        }"#;

        let config = Config::from_json(Path::new("test.json"), json).unwrap();

        assert_eq!(
            config.camera.movement,
            MovementMode::TimeScaled {
                units_per_second: 2.5
            }
        );
        assert_eq!(config.camera.position, [0.0, 0.0, 5.0]);
        assert_eq!(
            config.scene,
            SceneConfig::Model {
                path: PathBuf::from("assets/models/teapot.txt")
            }
        );
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.projection, ProjectionConfig::default());
    }

    #[test]
    fn key_bindings_from_json() {
        let json = r#"{ "key_bindings": [["ArrowUp", "forward"], ["Space", "up"]] }"#;

        let config = Config::from_json(Path::new("test.json"), json).unwrap();

        assert_eq!(
            config.key_bindings,
            KeyBindings(vec![
                (KeyCode::ArrowUp, Movement::Forward),
                (KeyCode::Space, Movement::Up),
            ])
        );
    }

    #[test]
    fn invalid_json_names_the_file() {
        let error = Config::from_json(Path::new("broken.json"), "{ window: ").unwrap_err();

        assert!(matches!(error, ConfigError::Parse { .. }));
        assert!(error.to_string().contains("broken.json"));
    }

    #[test]
    fn missing_file_is_not_an_error() {
        assert_eq!(Config::load("does/not/exist/viewer.json").unwrap(), None);
    }

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();

        assert_eq!(config.validate(), Ok(()));
        assert!(config.projection_matrix().iter().all(|value| value.is_finite()));
    }

    fn invalid_reason(json: &str) -> String {
        match Config::from_json(Path::new("test.json"), json) {
            Err(ConfigError::Invalid { reason, .. }) => reason,
            other => panic!("expected an invalid config, got {other:?}"),
        }
    }

    #[test]
    fn zero_window_width_is_rejected() {
        let reason = invalid_reason(r#"{ "window": { "width": 0 } }"#);

        assert!(reason.contains("0x1080"), "{reason}");
    }

    #[test]
    fn zero_window_height_is_rejected() {
        invalid_reason(r#"{ "window": { "height": 0 } }"#);
    }

    #[test]
    fn equal_clip_planes_are_rejected() {
        let reason = invalid_reason(r#"{ "projection": { "near": 1.0, "far": 1.0 } }"#);

        assert!(reason.contains("near 1"), "{reason}");
    }

    #[test]
    fn reversed_clip_planes_are_rejected() {
        invalid_reason(r#"{ "projection": { "near": 10.0, "far": 1.0 } }"#);
    }

    #[test]
    fn non_positive_near_plane_is_rejected() {
        invalid_reason(r#"{ "projection": { "near": 0.0 } }"#);
    }

    #[test]
    fn zero_field_of_view_is_rejected() {
        invalid_reason(r#"{ "projection": { "fov_degrees": 0.0 } }"#);
    }

    #[test]
    fn straight_angle_field_of_view_is_rejected() {
        invalid_reason(r#"{ "projection": { "fov_degrees": -180.0 } }"#);
    }

    #[test]
    fn invalid_config_names_the_file() {
        let error =
            Config::from_json(Path::new("tiny.json"), r#"{ "window": { "height": 0 } }"#)
                .unwrap_err();

        assert!(error.to_string().contains("tiny.json"));
    }

    #[test]
    fn configured_pitch_is_clamped_on_build() {
        let config =
            Config::from_json(Path::new("test.json"), r#"{ "camera": { "pitch": 120.0 } }"#)
                .unwrap();

        let camera = config.camera.build();

        assert_eq!(camera.state().pitch(), 89.0);
        assert!((camera.state().forward().norm() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn default_camera_starts_behind_origin() {
        let camera = Config::default().camera.build();

        assert_eq!(camera.position(), Point3::new(0.0, 0.0, 5.0));
        assert_eq!(camera.state().yaw(), -90.0);
    }
}
