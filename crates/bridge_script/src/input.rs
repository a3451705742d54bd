//! Read-only access to the host's input state.

use std::rc::Rc;

use bridge_calls::{Bridge, KeyCode, MouseButton};
use bridge_math::Vec2;

/// Keyboard and mouse queries for the current frame.
#[derive(Debug, Clone)]
pub struct Input {
    bridge: Rc<Bridge>,
}

impl Input {
    #[must_use]
    pub fn new(bridge: &Rc<Bridge>) -> Self {
        Self {
            bridge: Rc::clone(bridge),
        }
    }

    /// `true` only on the frame the key went down.
    #[must_use]
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        // SAFETY: the bridge only holds addresses bound with this signature.
        unsafe { self.bridge.calls().input_get_key_press()(key.to_raw()) }
    }

    /// `true` while the key is held.
    #[must_use]
    pub fn key_down(&self, key: KeyCode) -> bool {
        // SAFETY: as above.
        unsafe { self.bridge.calls().input_get_key_down()(key.to_raw()) }
    }

    /// `true` only on the frame the key was released.
    #[must_use]
    pub fn key_up(&self, key: KeyCode) -> bool {
        // SAFETY: as above.
        unsafe { self.bridge.calls().input_get_key_up()(key.to_raw()) }
    }

    #[must_use]
    pub fn mouse_button_down(&self, button: MouseButton) -> bool {
        // SAFETY: as above.
        unsafe { self.bridge.calls().input_get_mouse_button_down()(button.to_raw()) }
    }

    /// Horizontal cursor movement since the last frame.
    #[must_use]
    pub fn mouse_axis_horizontal(&self) -> f32 {
        // SAFETY: as above.
        unsafe { self.bridge.calls().input_get_mouse_axis_horizontal()() }
    }

    /// Vertical cursor movement since the last frame.
    #[must_use]
    pub fn mouse_axis_vertical(&self) -> f32 {
        // SAFETY: as above.
        unsafe { self.bridge.calls().input_get_mouse_axis_vertical()() }
    }

    #[must_use]
    pub fn mouse_position(&self) -> Vec2 {
        // SAFETY: as above.
        unsafe { self.bridge.calls().input_get_mouse_position()() }
    }
}

#[cfg(test)]
mod tests {
    use bridge_calls::BridgeConfig;
    use bridge_native::with_world;

    use super::*;

    fn input() -> Input {
        bridge_native::reset();
        let bridge = bridge_native::attach(BridgeConfig::new()).unwrap();
        Input::new(&bridge)
    }

    #[test]
    fn test_key_edges() {
        let input = input();
        with_world(|world| world.input_mut().press_key(KeyCode::W.to_raw()));
        assert!(input.key_pressed(KeyCode::W));
        assert!(input.key_down(KeyCode::W));
        assert!(!input.key_down(KeyCode::S));

        with_world(|world| {
            world.begin_frame(0.016);
            world.input_mut().release_key(KeyCode::W.to_raw());
        });
        assert!(!input.key_pressed(KeyCode::W));
        assert!(input.key_up(KeyCode::W));
    }

    #[test]
    fn test_mouse() {
        let input = input();
        with_world(|world| {
            world.input_mut().set_mouse_button(MouseButton::Right.to_raw(), true);
            world.input_mut().move_mouse(Vec2::new(4.0, -2.0));
        });
        assert!(input.mouse_button_down(MouseButton::Right));
        assert!(!input.mouse_button_down(MouseButton::Left));
        assert_eq!(input.mouse_axis_horizontal(), 4.0);
        assert_eq!(input.mouse_axis_vertical(), -2.0);
        assert_eq!(input.mouse_position(), Vec2::new(4.0, -2.0));
    }
}
