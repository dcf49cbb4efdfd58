use color_eyre::Result;
use nalgebra::Point2;
use winit::keyboard::KeyCode;

/// The windowing side of the frame loop: events, key state, cursor samples and presentation.
pub trait Platform {
    /// Draw target for a single frame, handed back through [`Platform::swap_buffers`].
    type Frame;

    fn poll_events(&mut self);

    fn should_close(&self) -> bool;

    fn is_key_pressed(&self, key_code: KeyCode) -> bool;

    /// Absolute cursor positions delivered by the last poll, oldest first.
    fn take_cursor_samples(&mut self) -> Vec<Point2<f64>>;

    fn begin_frame(&mut self) -> Result<Self::Frame>;

    fn swap_buffers(&mut self, frame: Self::Frame) -> Result<()>;
}
