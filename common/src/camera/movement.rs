use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Movement {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Movement {
    pub const ALL: [Movement; 6] = [
        Movement::Forward,
        Movement::Backward,
        Movement::Left,
        Movement::Right,
        Movement::Up,
        Movement::Down,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// The directions held during one frame. Holding a key twice is still one direction.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct MovementSet(u8);

impl MovementSet {
    pub fn new() -> Self {
        Self(0)
    }

    pub fn insert(&mut self, movement: Movement) {
        self.0 |= movement.bit();
    }

    pub fn contains(&self, movement: Movement) -> bool {
        self.0 & movement.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Movement> + '_ {
        Movement::ALL
            .into_iter()
            .filter(move |movement| self.contains(*movement))
    }
}

impl FromIterator<Movement> for MovementSet {
    fn from_iter<I: IntoIterator<Item = Movement>>(iter: I) -> Self {
        let mut set = Self::new();
        for movement in iter {
            set.insert(movement);
        }
        set
    }
}

/// How the per-frame movement step is derived.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MovementMode {
    /// Constant distance per frame, so traversal speed follows the frame rate.
    FixedStep { step: f32 },
    TimeScaled { units_per_second: f32 },
}

impl MovementMode {
    pub fn step(&self, deltatime: f32) -> f32 {
        match *self {
            MovementMode::FixedStep { step } => step,
            MovementMode::TimeScaled { units_per_second } => units_per_second * deltatime,
        }
    }
}

impl Default for MovementMode {
    fn default() -> Self {
        MovementMode::FixedStep { step: 0.05 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyBindings(pub Vec<(KeyCode, Movement)>);

impl KeyBindings {
    pub fn held(&self, is_key_pressed: impl Fn(KeyCode) -> bool) -> MovementSet {
        self.0
            .iter()
            .filter(|(key_code, _)| is_key_pressed(*key_code))
            .map(|(_, movement)| *movement)
            .collect()
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self(vec![
            (KeyCode::KeyW, Movement::Forward),
            (KeyCode::KeyS, Movement::Backward),
            (KeyCode::KeyA, Movement::Left),
            (KeyCode::KeyD, Movement::Right),
            (KeyCode::KeyQ, Movement::Up),
            (KeyCode::KeyE, Movement::Down),
        ])
    }
}
