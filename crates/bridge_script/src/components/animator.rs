use bridge_core::NativeStr;

use crate::component::component_wrapper;

component_wrapper!(
    /// Drives an animation state machine through named parameters.
    Animator,
    "Animator"
);

impl Animator {
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        let op = self.owner.calls().animator_is_enabled();
        // SAFETY: the bridge only holds addresses bound with this signature.
        unsafe { op(self.owner.entity()) }
    }

    pub fn set_float(&self, name: &str, value: f32) {
        self.owner
            .write_named(self.owner.calls().animator_set_float(), name, value);
    }

    pub fn set_bool(&self, name: &str, value: bool) {
        self.owner
            .write_named(self.owner.calls().animator_set_bool(), name, value);
    }

    pub fn set_int(&self, name: &str, value: i32) {
        self.owner
            .write_named(self.owner.calls().animator_set_int(), name, value);
    }

    pub fn set_trigger(&self, name: &str) {
        self.owner
            .write(self.owner.calls().animator_set_trigger(), NativeStr::new(name));
    }
}

#[cfg(test)]
mod tests {
    use bridge_native::components::{AnimatorParameter, ComponentState};
    use bridge_native::{ComponentKind, with_world};

    use super::*;
    use crate::Component;
    use crate::components::test_support;

    fn parameter(animator: &Animator, name: &str) -> Option<AnimatorParameter> {
        with_world(|world| match world.component(animator.entity(), ComponentKind::Animator) {
            Some(ComponentState::Animator(state)) => state.get(name),
            _ => None,
        })
    }

    #[test]
    fn test_parameters_reach_native() {
        let (_bridge, e) = test_support::entity();
        let animator = e.add_component::<Animator>();
        assert!(animator.is_enabled());

        animator.set_float("speed", 1.5);
        animator.set_bool("grounded", true);
        animator.set_int("combo", 3);
        animator.set_trigger("jump");

        assert_eq!(parameter(&animator, "speed"), Some(AnimatorParameter::Float(1.5)));
        assert_eq!(parameter(&animator, "grounded"), Some(AnimatorParameter::Bool(true)));
        assert_eq!(parameter(&animator, "combo"), Some(AnimatorParameter::Int(3)));
        assert_eq!(parameter(&animator, "jump"), Some(AnimatorParameter::Trigger));
    }
}
