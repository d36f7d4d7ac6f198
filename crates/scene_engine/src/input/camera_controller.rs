//! Keyboard and mouse control of a [`Camera`]

use bitflags::bitflags;

use crate::render::camera::{Camera, CameraMovement};

use super::KeyCode;

bitflags! {
    /// Movement keys currently held
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MovementKeys: u8 {
        /// Move along the view direction
        const FORWARD = 1 << 0;
        /// Move against the view direction
        const BACKWARD = 1 << 1;
        /// Strafe left
        const LEFT = 1 << 2;
        /// Strafe right
        const RIGHT = 1 << 3;
    }
}

impl MovementKeys {
    /// Flag bound to a key, if any
    pub fn from_key(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::W | KeyCode::Up => Some(Self::FORWARD),
            KeyCode::S | KeyCode::Down => Some(Self::BACKWARD),
            KeyCode::A | KeyCode::Left => Some(Self::LEFT),
            KeyCode::D | KeyCode::Right => Some(Self::RIGHT),
            _ => None,
        }
    }

    /// Camera movements for the held flags, in a fixed order
    pub fn directions(self) -> impl Iterator<Item = CameraMovement> {
        [
            (Self::FORWARD, CameraMovement::Forward),
            (Self::BACKWARD, CameraMovement::Backward),
            (Self::LEFT, CameraMovement::Left),
            (Self::RIGHT, CameraMovement::Right),
        ]
        .into_iter()
        .filter(move |(flag, _)| self.contains(*flag))
        .map(|(_, movement)| movement)
    }
}

/// Converts absolute cursor positions into look offsets
#[derive(Debug, Clone, Copy, Default)]
pub struct MouseLook {
    last: Option<(f64, f64)>,
}

impl MouseLook {
    /// Tracker with no previous sample
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a cursor position
    ///
    /// The first sample only records the position and returns `None`.
    /// Screen y grows downwards, so the y offset is inverted.
    pub fn sample(&mut self, x: f64, y: f64) -> Option<(f32, f32)> {
        let offset = self
            .last
            .map(|(last_x, last_y)| ((x - last_x) as f32, (last_y - y) as f32));
        self.last = Some((x, y));
        offset
    }

    /// Forget the last position, e.g. after the cursor was re-captured
    pub fn reset(&mut self) {
        self.last = None;
    }
}

/// Accumulates input between frames and applies it to a camera
#[derive(Debug, Clone, Default)]
pub struct CameraController {
    held: MovementKeys,
    mouse: MouseLook,
    pending_look: (f32, f32),
    quit_requested: bool,
}

impl CameraController {
    /// Controller with nothing held
    pub fn new() -> Self {
        Self::default()
    }

    /// Key went down
    pub fn press(&mut self, key: KeyCode) {
        if key == KeyCode::Escape {
            log::info!("Quit requested");
            self.quit_requested = true;
        } else if let Some(flag) = MovementKeys::from_key(key) {
            self.held.insert(flag);
        }
    }

    /// Key went up
    pub fn release(&mut self, key: KeyCode) {
        if let Some(flag) = MovementKeys::from_key(key) {
            self.held.remove(flag);
        }
    }

    /// Cursor moved to an absolute position
    pub fn cursor_moved(&mut self, x: f64, y: f64) {
        if let Some((dx, dy)) = self.mouse.sample(x, y) {
            self.pending_look.0 += dx;
            self.pending_look.1 += dy;
        }
    }

    /// Keys currently held
    pub fn held(&self) -> MovementKeys {
        self.held
    }

    /// Whether Escape has been pressed; the host should close
    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Apply held movement for `delta_time`, then the accumulated look offset
    pub fn apply(&mut self, camera: &mut Camera, delta_time: f32) {
        for direction in self.held.directions() {
            camera.process_movement(direction, delta_time);
        }

        let (x_offset, y_offset) = std::mem::take(&mut self.pending_look);
        if x_offset != 0.0 || y_offset != 0.0 {
            camera.process_look(x_offset, y_offset);
        }
    }
}
