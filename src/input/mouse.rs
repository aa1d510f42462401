//! Mouse state

bitflags::bitflags! {
    /// Pressed mouse buttons
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u32 {
        const LEFT  = 0b0000_0001;
        const RIGHT = 0b0000_0010;
    }
}

/// Axis selector for delta reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

/// Wheel direction selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wheel {
    Up,
    Down,
    Left,
    Right,
}

/// Last-known mouse position, buttons and accumulated wheel ticks
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    /// Absolute window position in logical points
    pub window_x: i16,
    pub window_y: i16,
    /// Position already reported through [`MouseState::consume_delta`]
    pub last_x: i16,
    pub last_y: i16,
    pub buttons: MouseButtons,
    pub wheel_up: i16,
    pub wheel_down: i16,
    pub wheel_left: i16,
    pub wheel_right: i16,
}

impl MouseState {
    /// Creates a mouse state at the origin with nothing pressed
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute window coordinate on an axis
    pub fn position(&self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.window_x,
            Axis::Y => self.window_y,
        }
    }

    /// Movement since the last consumed read, without consuming it
    pub fn peek_delta(&self, axis: Axis) -> i16 {
        match axis {
            Axis::X => self.window_x.wrapping_sub(self.last_x),
            Axis::Y => self.window_y.wrapping_sub(self.last_y),
        }
    }

    /// Movement since the last consumed read; marks the current position as reported
    pub fn consume_delta(&mut self, axis: Axis) -> i16 {
        let delta = self.peek_delta(axis);
        match axis {
            Axis::X => self.last_x = self.window_x,
            Axis::Y => self.last_y = self.window_y,
        }
        delta
    }

    /// Moves the cursor to an absolute window position
    pub fn move_to(&mut self, x: i16, y: i16) {
        self.window_x = x;
        self.window_y = y;
    }

    pub fn set_button(&mut self, button: MouseButtons, pressed: bool) {
        self.buttons.set(button, pressed);
    }

    pub fn is_pressed(&self, button: MouseButtons) -> bool {
        self.buttons.contains(button)
    }

    /// Accumulated ticks in a wheel direction
    pub fn wheel(&self, wheel: Wheel) -> i16 {
        match wheel {
            Wheel::Up => self.wheel_up,
            Wheel::Down => self.wheel_down,
            Wheel::Left => self.wheel_left,
            Wheel::Right => self.wheel_right,
        }
    }

    /// Adds ticks to a wheel direction
    pub fn add_wheel(&mut self, wheel: Wheel, ticks: i16) {
        let counter = match wheel {
            Wheel::Up => &mut self.wheel_up,
            Wheel::Down => &mut self.wheel_down,
            Wheel::Left => &mut self.wheel_left,
            Wheel::Right => &mut self.wheel_right,
        };
        *counter = counter.saturating_add(ticks);
    }

    /// Zeroes all wheel counters
    pub fn reset_wheel(&mut self) {
        self.wheel_up = 0;
        self.wheel_down = 0;
        self.wheel_left = 0;
        self.wheel_right = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consume_delta_is_destructive() {
        let mut mouse = MouseState::new();
        mouse.move_to(30, -5);

        assert_eq!(mouse.consume_delta(Axis::X), 30);
        assert_eq!(mouse.consume_delta(Axis::X), 0);
        // Y is tracked independently
        assert_eq!(mouse.consume_delta(Axis::Y), -5);
        assert_eq!(mouse.consume_delta(Axis::Y), 0);
    }

    #[test]
    fn test_peek_delta_does_not_consume() {
        let mut mouse = MouseState::new();
        mouse.move_to(12, 7);
        assert_eq!(mouse.peek_delta(Axis::X), 12);
        assert_eq!(mouse.peek_delta(Axis::X), 12);
        assert_eq!(mouse.consume_delta(Axis::X), 12);
        assert_eq!(mouse.peek_delta(Axis::X), 0);
    }

    #[test]
    fn test_delta_after_second_move() {
        let mut mouse = MouseState::new();
        mouse.move_to(10, 10);
        mouse.consume_delta(Axis::X);
        mouse.move_to(4, 10);
        assert_eq!(mouse.consume_delta(Axis::X), -6);
    }

    #[test]
    fn test_buttons() {
        let mut mouse = MouseState::new();
        mouse.set_button(MouseButtons::RIGHT, true);
        assert!(mouse.is_pressed(MouseButtons::RIGHT));
        assert!(!mouse.is_pressed(MouseButtons::LEFT));
        assert_eq!(mouse.buttons.bits(), 0b10);

        mouse.set_button(MouseButtons::RIGHT, false);
        assert!(mouse.buttons.is_empty());
    }

    #[test]
    fn test_wheel_accumulates_and_resets() {
        let mut mouse = MouseState::new();
        mouse.add_wheel(Wheel::Up, 2);
        mouse.add_wheel(Wheel::Up, 1);
        mouse.add_wheel(Wheel::Left, 1);
        assert_eq!(mouse.wheel(Wheel::Up), 3);
        assert_eq!(mouse.wheel(Wheel::Left), 1);
        assert_eq!(mouse.wheel(Wheel::Down), 0);

        mouse.reset_wheel();
        assert_eq!(mouse.wheel(Wheel::Up), 0);
        assert_eq!(mouse.wheel(Wheel::Left), 0);
    }
}
