use bridge_core::{AssetHandle, NativeStr};
use bridge_math::{Float4, Vec2, Vec3, Vec4};

use crate::assets::{Asset, Mesh};
use crate::component::component_wrapper;

component_wrapper!(
    /// Renders a mesh with per-submesh material properties.
    MeshRenderer,
    "MeshRenderer"
);

impl MeshRenderer {
    /// The mesh being drawn, or `None` if native reports none.
    #[must_use]
    pub fn mesh(&self) -> Option<Mesh> {
        let op = self.owner.calls().mesh_renderer_get_mesh();
        // SAFETY: the bridge only holds addresses bound with this signature.
        let handle: AssetHandle = unsafe { op(self.owner.entity()) };
        handle
            .is_valid()
            .then(|| Mesh::from_handle(self.owner.bridge(), handle))
    }

    pub fn set_mesh(&self, mesh: &Mesh) {
        self.owner
            .write(self.owner.calls().mesh_renderer_set_mesh(), mesh.handle());
    }

    pub fn set_float(&self, name: &str, value: f32, submesh: i32) {
        let op = self.owner.calls().mesh_renderer_set_float();
        // SAFETY: `name` outlives the call; signature matches.
        unsafe { op(self.owner.entity(), NativeStr::new(name), value, submesh) };
    }

    pub fn set_float2(&self, name: &str, value: Vec2, submesh: i32) {
        let op = self.owner.calls().mesh_renderer_set_float2();
        // SAFETY: `name` outlives the call; signature matches.
        unsafe { op(self.owner.entity(), NativeStr::new(name), value, submesh) };
    }

    pub fn set_float3(&self, name: &str, value: Vec3, submesh: i32) {
        let op = self.owner.calls().mesh_renderer_set_float3();
        // SAFETY: `name` outlives the call; signature matches.
        unsafe { op(self.owner.entity(), NativeStr::new(name), value, submesh) };
    }

    pub fn set_float4(&self, name: &str, value: Vec4, submesh: i32) {
        let op = self.owner.calls().mesh_renderer_set_float4();
        // SAFETY: `name` outlives the call; signature matches.
        unsafe { op(self.owner.entity(), NativeStr::new(name), Float4::from(value), submesh) };
    }

    pub fn set_bool(&self, name: &str, value: bool, submesh: i32) {
        let op = self.owner.calls().mesh_renderer_set_bool();
        // SAFETY: `name` outlives the call; signature matches.
        unsafe { op(self.owner.entity(), NativeStr::new(name), value, submesh) };
    }
}

#[cfg(test)]
mod tests {
    use bridge_native::components::{ComponentState, MaterialValue};
    use bridge_native::{ComponentKind, with_world};

    use super::*;
    use crate::Component;
    use crate::components::test_support;

    fn material(renderer: &MeshRenderer, submesh: i32, name: &str) -> Option<MaterialValue> {
        with_world(|world| match world.component(renderer.entity(), ComponentKind::MeshRenderer) {
            Some(ComponentState::MeshRenderer(state)) => state.property(submesh, name),
            _ => None,
        })
    }

    #[test]
    fn test_no_mesh_reads_as_none() {
        let (_bridge, e) = test_support::entity();
        let renderer = e.add_component::<MeshRenderer>();
        assert!(renderer.mesh().is_none());
    }

    #[test]
    fn test_mesh_round_trip() {
        let (bridge, e) = test_support::entity();
        let handle = with_world(|world| world.create_mesh("Sphere", 482, 2880));
        let renderer = e.add_component::<MeshRenderer>();
        renderer.set_mesh(&Mesh::from_handle(&bridge, handle));
        let mesh = renderer.mesh().unwrap();
        assert_eq!(mesh.handle(), handle);
        assert_eq!(mesh.vertex_count(), 482);
    }

    #[test]
    fn test_material_properties_reach_native() {
        let (_bridge, e) = test_support::entity();
        let renderer = e.add_component::<MeshRenderer>();
        renderer.set_float("roughness", 0.3, 0);
        renderer.set_float2("tiling", Vec2::new(2.0, 2.0), 0);
        renderer.set_float3("emission", Vec3::ONE, 1);
        renderer.set_float4("albedo", Vec4::new(1.0, 0.5, 0.25, 1.0), 1);
        renderer.set_bool("cast_shadows", false, 0);

        assert_eq!(material(&renderer, 0, "roughness"), Some(MaterialValue::Float(0.3)));
        assert_eq!(material(&renderer, 0, "tiling"), Some(MaterialValue::Float2(Vec2::new(2.0, 2.0))));
        assert_eq!(material(&renderer, 1, "emission"), Some(MaterialValue::Float3(Vec3::ONE)));
        assert_eq!(
            material(&renderer, 1, "albedo"),
            Some(MaterialValue::Float4(Vec4::new(1.0, 0.5, 0.25, 1.0)))
        );
        assert_eq!(material(&renderer, 0, "cast_shadows"), Some(MaterialValue::Bool(false)));
        assert_eq!(material(&renderer, 0, "emission"), None);
    }
}
