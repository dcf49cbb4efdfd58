use std::time::{Duration, Instant};

use color_eyre::Result;
use log::{debug, info};
use nalgebra::{Matrix4, Point3};

use crate::camera::{FreeCamera, KeyBindings, MovementMode};
use crate::config::Config;
use crate::platform::Platform;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum LoopState {
    Running,
    Closing,
}

/// Frame timing, measured from the first tick so setup work before the loop is not counted.
#[derive(Default)]
pub struct FrameClock {
    start: Option<Instant>,
    last_frame: Option<Instant>,
    deltatime: f32,
    frame_count: u64,
    fps_window_start: Option<Instant>,
    fps_window_frames: u32,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a frame at `now`. The first tick has a deltatime of zero.
    pub fn tick(&mut self, now: Instant) {
        self.start.get_or_insert(now);
        let last_frame = self.last_frame.replace(now).unwrap_or(now);

        self.deltatime = now.saturating_duration_since(last_frame).as_secs_f32();
        self.frame_count += 1;

        let fps_window_start = *self.fps_window_start.get_or_insert(now);
        self.fps_window_frames += 1;

        let window = now.saturating_duration_since(fps_window_start);
        if window >= Duration::from_secs(1) {
            debug!(
                "{:.1} fps",
                self.fps_window_frames as f32 / window.as_secs_f32()
            );
            self.fps_window_start = Some(now);
            self.fps_window_frames = 0;
        }
    }

    /// Seconds between the two most recent ticks.
    pub fn deltatime(&self) -> f32 {
        self.deltatime
    }

    /// Seconds from the first tick to the most recent one.
    pub fn elapsed(&self) -> f32 {
        match (self.start, self.last_frame) {
            (Some(start), Some(last_frame)) => {
                last_frame.saturating_duration_since(start).as_secs_f32()
            }
            _ => 0.0,
        }
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

pub struct FrameView<'a> {
    pub view: Matrix4<f32>,
    pub projection: Matrix4<f32>,
    pub camera_position: Point3<f32>,
    pub clock: &'a FrameClock,
}

/// Everything drawn each frame: updates its model matrices, then binds programs and issues draws.
pub trait Scene<F> {
    fn update(&mut self, clock: &FrameClock);

    fn draw(&mut self, frame: &mut F, view: &FrameView<'_>) -> Result<()>;
}

pub struct FrameLoop {
    state: LoopState,
    camera: FreeCamera,
    key_bindings: KeyBindings,
    movement: MovementMode,
    projection: Matrix4<f32>,
    clock: FrameClock,
}

impl FrameLoop {
    pub fn new(
        camera: FreeCamera,
        key_bindings: KeyBindings,
        movement: MovementMode,
        projection: Matrix4<f32>,
    ) -> Self {
        Self {
            state: LoopState::Running,
            camera,
            key_bindings,
            movement,
            projection,
            clock: FrameClock::new(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            config.camera.build(),
            config.key_bindings.clone(),
            config.camera.movement,
            config.projection_matrix(),
        )
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn camera(&self) -> &FreeCamera {
        &self.camera
    }

    pub fn clock(&self) -> &FrameClock {
        &self.clock
    }

    pub fn run<P: Platform, S: Scene<P::Frame>>(
        &mut self,
        platform: &mut P,
        scene: &mut S,
    ) -> Result<()> {
        while self.step(platform, scene)? == LoopState::Running {}

        info!(
            "Frame loop finished after {} frames in {:.1}s",
            self.clock.frame_count(),
            self.clock.elapsed()
        );

        Ok(())
    }

    pub fn step<P: Platform, S: Scene<P::Frame>>(
        &mut self,
        platform: &mut P,
        scene: &mut S,
    ) -> Result<LoopState> {
        self.step_at(platform, scene, Instant::now())
    }

    /// Runs one frame as of `now`. A started frame is always presented, even when drawing fails.
    pub fn step_at<P: Platform, S: Scene<P::Frame>>(
        &mut self,
        platform: &mut P,
        scene: &mut S,
        now: Instant,
    ) -> Result<LoopState> {
        if self.state == LoopState::Closing {
            return Ok(LoopState::Closing);
        }

        if platform.should_close() {
            info!("Close requested, leaving the frame loop");
            self.state = LoopState::Closing;
            return Ok(LoopState::Closing);
        }

        platform.poll_events();

        for cursor in platform.take_cursor_samples() {
            self.camera.apply_mouse_delta(cursor.x, cursor.y);
        }

        self.clock.tick(now);

        let held = self.key_bindings.held(|key_code| platform.is_key_pressed(key_code));
        self.camera
            .apply_discrete_movement(held, self.movement.step(self.clock.deltatime()));

        let view = FrameView {
            view: self.camera.view_matrix(),
            projection: self.projection,
            camera_position: self.camera.position(),
            clock: &self.clock,
        };

        scene.update(&self.clock);

        let mut frame = platform.begin_frame()?;
        let drawn = scene.draw(&mut frame, &view);
        platform.swap_buffers(frame)?;
        drawn?;

        Ok(LoopState::Running)
    }
}
