//! Frame-coherent mouse state for the orbit camera.
//!
//! [`MouseState`] accumulates winit mouse events between frames. A left-button
//! drag becomes rotation, the wheel becomes zoom; [`MouseState::orbit_input`]
//! packages both for [`galaxy_scene::OrbitControls`].

use galaxy_scene::OrbitInput;
use glam::Vec2;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};

/// Pixels of a trackpad scroll treated as one wheel notch.
const PIXELS_PER_LINE: f64 = 40.0;

/// Mouse state accumulated over one frame.
///
/// Forward winit events through the `on_*` methods, read
/// [`orbit_input`](Self::orbit_input) once per frame, then call
/// [`clear_transients`](Self::clear_transients).
#[derive(Debug, Clone, Default)]
pub struct MouseState {
    position: Option<Vec2>,
    drag_delta: Vec2,
    left_pressed: bool,
    scroll: f32,
}

impl MouseState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a `CursorMoved` event. Movement counts as drag only while the
    /// left button is held.
    pub fn on_cursor_moved(&mut self, x: f64, y: f64) {
        let new_pos = Vec2::new(x as f32, y as f32);
        if self.left_pressed
            && let Some(prev) = self.position
        {
            self.drag_delta += new_pos - prev;
        }
        self.position = Some(new_pos);
    }

    /// Process a `MouseInput` event.
    pub fn on_button(&mut self, button: MouseButton, state: ElementState) {
        if button == MouseButton::Left {
            self.left_pressed = state == ElementState::Pressed;
        }
    }

    /// Process a `MouseWheel` event. Positive is scroll up (zoom in).
    pub fn on_scroll(&mut self, delta: MouseScrollDelta) {
        match delta {
            MouseScrollDelta::LineDelta(_x, y) => {
                self.scroll += y;
            }
            MouseScrollDelta::PixelDelta(pos) => {
                self.scroll += (pos.y / PIXELS_PER_LINE) as f32;
            }
        }
    }

    /// Leaving the window ends any drag in progress.
    pub fn on_cursor_left(&mut self) {
        self.left_pressed = false;
        self.position = None;
    }

    /// Clears per-frame drag and scroll accumulators.
    pub fn clear_transients(&mut self) {
        self.drag_delta = Vec2::ZERO;
        self.scroll = 0.0;
    }

    /// Drag movement since the last clear, in physical pixels.
    #[must_use]
    pub fn drag_delta(&self) -> Vec2 {
        self.drag_delta
    }

    /// Wheel notches since the last clear.
    #[must_use]
    pub fn scroll(&self) -> f32 {
        self.scroll
    }

    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.left_pressed
    }

    /// This frame's camera input.
    #[must_use]
    pub fn orbit_input(&self) -> OrbitInput {
        OrbitInput {
            rotate_delta: self.drag_delta,
            zoom_steps: self.scroll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::dpi::PhysicalPosition;

    #[test]
    fn test_motion_without_button_is_not_a_drag() {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(10.0, 10.0);
        mouse.on_cursor_moved(50.0, 30.0);
        assert_eq!(mouse.drag_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_left_drag_accumulates_delta() {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(10.0, 10.0);
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(15.0, 12.0);
        mouse.on_cursor_moved(20.0, 20.0);
        assert_eq!(mouse.drag_delta(), Vec2::new(10.0, 10.0));
        assert!(mouse.is_dragging());

        mouse.on_button(MouseButton::Left, ElementState::Released);
        mouse.on_cursor_moved(100.0, 100.0);
        assert_eq!(mouse.drag_delta(), Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_right_button_does_not_drag() {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_button(MouseButton::Right, ElementState::Pressed);
        mouse.on_cursor_moved(5.0, 5.0);
        assert_eq!(mouse.drag_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_scroll_line_and_pixel() {
        let mut mouse = MouseState::new();
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 2.0));
        mouse.on_scroll(MouseScrollDelta::PixelDelta(PhysicalPosition::new(0.0, -40.0)));
        assert!((mouse.scroll() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_clear_transients_keeps_button_state() {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(3.0, 4.0);
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, 1.0));
        mouse.clear_transients();
        assert_eq!(mouse.drag_delta(), Vec2::ZERO);
        assert_eq!(mouse.scroll(), 0.0);
        assert!(mouse.is_dragging());
    }

    #[test]
    fn test_cursor_left_ends_drag() {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_left();
        assert!(!mouse.is_dragging());

        // Re-entering does not produce a jump from the old position.
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(500.0, 500.0);
        assert_eq!(mouse.drag_delta(), Vec2::ZERO);
    }

    #[test]
    fn test_orbit_input_packages_drag_and_scroll() {
        let mut mouse = MouseState::new();
        mouse.on_cursor_moved(0.0, 0.0);
        mouse.on_button(MouseButton::Left, ElementState::Pressed);
        mouse.on_cursor_moved(-8.0, 2.0);
        mouse.on_scroll(MouseScrollDelta::LineDelta(0.0, -1.0));
        let input = mouse.orbit_input();
        assert_eq!(input.rotate_delta, Vec2::new(-8.0, 2.0));
        assert_eq!(input.zoom_steps, -1.0);
    }
}
