//! The host's frame clock.

use std::rc::Rc;

use bridge_calls::Bridge;

#[derive(Debug, Clone)]
pub struct Time {
    bridge: Rc<Bridge>,
}

impl Time {
    #[must_use]
    pub fn new(bridge: &Rc<Bridge>) -> Self {
        Self {
            bridge: Rc::clone(bridge),
        }
    }

    /// Seconds elapsed over the previous frame.
    #[must_use]
    pub fn delta_time(&self) -> f32 {
        // SAFETY: the bridge only holds addresses bound with this signature.
        unsafe { self.bridge.calls().time_get_delta_time()() }
    }
}
