use log::warn;
use nalgebra::Point2;
use winit::event::{DeviceEvent, ElementState, WindowEvent};
use winit::keyboard::{KeyCode, NativeKeyCode, PhysicalKey};

const NUM_KEYS: usize = 194;

#[derive(Copy, Clone, PartialEq, Debug)]
enum KeyState {
    Released,
    Pressed,
    Repeat,
}

/// Keyboard state and a virtual cursor for one window.
///
/// The cursor is hidden and grabbed while the viewer runs, so its position is rebuilt by summing
/// raw device motion. Every motion event yields one absolute sample, queued until taken.
pub struct Input {
    key_states: [KeyState; NUM_KEYS],
    cursor_position: Point2<f64>,
    cursor_samples: Vec<Point2<f64>>,
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}

impl Input {
    pub fn new() -> Self {
        Self {
            key_states: [KeyState::Released; NUM_KEYS],
            cursor_position: Point2::origin(),
            cursor_samples: Vec::new(),
        }
    }

    pub fn key_pressed(&self, key_code: KeyCode) -> bool {
        self.key_state(key_code) == KeyState::Pressed
    }

    pub fn key_down(&self, key_code: KeyCode) -> bool {
        let state = self.key_state(key_code);
        state == KeyState::Pressed || state == KeyState::Repeat
    }

    pub fn cursor_position(&self) -> Point2<f64> {
        self.cursor_position
    }

    /// Cursor samples received since the last call, oldest first.
    pub fn take_cursor_samples(&mut self) -> Vec<Point2<f64>> {
        std::mem::take(&mut self.cursor_samples)
    }

    pub fn process_window_event(&mut self, window_event: &WindowEvent) {
        if let WindowEvent::KeyboardInput { event, .. } = window_event {
            self.process_key(event.physical_key, event.state);
        }
    }

    pub fn process_device_event(&mut self, device_event: &DeviceEvent) {
        if let DeviceEvent::MouseMotion { delta } = device_event {
            self.cursor_position.x += delta.0;
            self.cursor_position.y += delta.1;
            self.cursor_samples.push(self.cursor_position);
        }
    }

    pub fn process_key(&mut self, physical_key: PhysicalKey, state: ElementState) {
        match physical_key {
            PhysicalKey::Code(key_code) => match self.key_states.get_mut(key_code as usize) {
                Some(key_state) => *key_state = Self::next_key_state(*key_state, state),
                None => warn!("Key {:?} is outside of the tracked key range", key_code),
            },
            PhysicalKey::Unidentified(native_key_code) => {
                let (platform, code) = match native_key_code {
                    NativeKeyCode::Windows(code) => ("Windows", code as u32),
                    NativeKeyCode::MacOS(code) => ("MacOS", code as u32),
                    NativeKeyCode::Android(code) => ("Android", code),
                    NativeKeyCode::Xkb(code) => ("XKB", code),
                    NativeKeyCode::Unidentified => return warn!("Unidentified key event received"),
                };

                warn!("Unidentified {} key event {}", platform, code)
            }
        }
    }

    fn key_state(&self, key_code: KeyCode) -> KeyState {
        self.key_states
            .get(key_code as usize)
            .copied()
            .unwrap_or(KeyState::Released)
    }

    fn next_key_state(old_state: KeyState, state: ElementState) -> KeyState {
        match (state, old_state) {
            (ElementState::Pressed, KeyState::Released) => KeyState::Pressed,
            (ElementState::Pressed, _) => KeyState::Repeat,
            (ElementState::Released, _) => KeyState::Released,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(input: &mut Input, key_code: KeyCode) {
        input.process_key(PhysicalKey::Code(key_code), ElementState::Pressed);
    }

    fn release(input: &mut Input, key_code: KeyCode) {
        input.process_key(PhysicalKey::Code(key_code), ElementState::Released);
    }

    fn motion(input: &mut Input, x: f64, y: f64) {
        input.process_device_event(&DeviceEvent::MouseMotion { delta: (x, y) });
    }

    #[test]
    fn key_press_and_repeat_are_down() {
        let mut input = Input::new();

        press(&mut input, KeyCode::KeyW);
        assert!(input.key_pressed(KeyCode::KeyW));
        assert!(input.key_down(KeyCode::KeyW));

        press(&mut input, KeyCode::KeyW);
        assert!(!input.key_pressed(KeyCode::KeyW));
        assert!(input.key_down(KeyCode::KeyW));
    }

    #[test]
    fn release_clears_held_key() {
        let mut input = Input::new();

        press(&mut input, KeyCode::KeyA);
        press(&mut input, KeyCode::KeyA);
        release(&mut input, KeyCode::KeyA);

        assert!(!input.key_down(KeyCode::KeyA));

        press(&mut input, KeyCode::KeyA);
        assert!(input.key_pressed(KeyCode::KeyA));
    }

    #[test]
    fn release_without_press_stays_released() {
        let mut input = Input::new();

        release(&mut input, KeyCode::KeyD);

        assert!(!input.key_down(KeyCode::KeyD));
    }

    #[test]
    fn unidentified_keys_are_ignored() {
        let mut input = Input::new();

        input.process_key(
            PhysicalKey::Unidentified(NativeKeyCode::Xkb(999)),
            ElementState::Pressed,
        );

        assert!(!input.key_down(KeyCode::KeyW));
    }

    #[test]
    fn device_motion_accumulates_into_samples() {
        let mut input = Input::new();

        motion(&mut input, 10.0, -5.0);
        motion(&mut input, 2.5, 1.0);

        assert_eq!(
            input.take_cursor_samples(),
            vec![Point2::new(10.0, -5.0), Point2::new(12.5, -4.0)]
        );
        assert!(input.take_cursor_samples().is_empty());
        assert_eq!(input.cursor_position(), Point2::new(12.5, -4.0));
    }

    #[test]
    fn other_device_events_do_not_move_cursor() {
        let mut input = Input::new();

        input.process_device_event(&DeviceEvent::Added);

        assert!(input.take_cursor_samples().is_empty());
    }
}
