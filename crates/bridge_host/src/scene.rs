//! Scene descriptions that seed the native world.
//!
//! ```json
//! {
//!   "meshes": [{ "name": "Cube", "vertex_count": 24, "index_count": 36 }],
//!   "entities": [
//!     {
//!       "name": "Player",
//!       "components": ["Transform", "CharacterController"],
//!       "position": [0.0, 1.0, 0.0],
//!       "scripts": ["PlayerController"]
//!     }
//!   ]
//! }
//! ```

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use bridge_core::{AssetHandle, EntityHandle, TypeTag};
use bridge_math::Vec3;
use bridge_native::components::ComponentState;
use bridge_native::{ComponentKind, NativeWorld};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub meshes: Vec<SceneMesh>,
    #[serde(default)]
    pub entities: Vec<SceneEntity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneMesh {
    pub name: String,
    pub vertex_count: u32,
    pub index_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneEntity {
    pub name: String,
    #[serde(default)]
    pub components: Vec<String>,
    #[serde(default)]
    pub position: Option<Vec3>,
    /// Mesh name for the entity's `MeshRenderer`.
    #[serde(default)]
    pub mesh: Option<String>,
    #[serde(default)]
    pub scripts: Vec<String>,
}

/// An entity the scene spawned, with the scripts it asks for.
#[derive(Debug, Clone, PartialEq)]
pub struct Spawned {
    pub entity: EntityHandle,
    pub name: String,
    pub scripts: Vec<String>,
}

impl SceneDescription {
    /// Read a JSON scene from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid scene.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scene {}", path.display()))?;
        let scene = serde_json::from_str(&text)
            .with_context(|| format!("parsing scene {}", path.display()))?;
        Ok(scene)
    }

    /// The scene used when none is given: a player, a spinning cube, and
    /// the floor they stand on.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            meshes: vec![SceneMesh {
                name: "Cube".into(),
                vertex_count: 24,
                index_count: 36,
            }],
            entities: vec![
                SceneEntity {
                    name: "Player".into(),
                    components: vec!["Transform".into(), "CharacterController".into()],
                    position: Some(Vec3::new(0.0, 1.0, 0.0)),
                    mesh: None,
                    scripts: vec!["PlayerController".into()],
                },
                SceneEntity {
                    name: "Spinner".into(),
                    components: vec!["Transform".into(), "MeshRenderer".into()],
                    position: Some(Vec3::new(3.0, 1.0, 3.0)),
                    mesh: Some("Cube".into()),
                    scripts: vec!["Spinner".into()],
                },
                SceneEntity {
                    name: "Floor".into(),
                    components: vec!["Transform".into(), "RigidBody".into()],
                    position: None,
                    mesh: None,
                    scripts: Vec::new(),
                },
            ],
        }
    }

    /// Create every mesh and entity in `world`.
    pub fn spawn(&self, world: &mut NativeWorld) -> Vec<Spawned> {
        let meshes: HashMap<&str, AssetHandle> = self
            .meshes
            .iter()
            .map(|m| {
                let handle = world.create_mesh(m.name.as_str(), m.vertex_count, m.index_count);
                (m.name.as_str(), handle)
            })
            .collect();

        let spawned: Vec<Spawned> = self
            .entities
            .iter()
            .map(|desc| {
                let entity = world.create_named_entity(desc.name.as_str());
                for component in &desc.components {
                    if !world.add_component(entity, TypeTag::from_name(component)) {
                        warn!(entity = %desc.name, component = %component, "component not added");
                    }
                }
                if let Some(position) = desc.position {
                    match world.component_mut(entity, ComponentKind::Transform) {
                        Some(ComponentState::Transform(t)) => t.position = position,
                        _ => warn!(entity = %desc.name, "position given without a Transform"),
                    }
                }
                if let Some(mesh) = &desc.mesh {
                    match (meshes.get(mesh.as_str()), world.component_mut(entity, ComponentKind::MeshRenderer)) {
                        (Some(handle), Some(ComponentState::MeshRenderer(r))) => r.mesh = *handle,
                        (None, _) => warn!(entity = %desc.name, mesh = %mesh, "unknown mesh"),
                        _ => warn!(entity = %desc.name, "mesh given without a MeshRenderer"),
                    }
                }
                Spawned {
                    entity,
                    name: desc.name.clone(),
                    scripts: desc.scripts.clone(),
                }
            })
            .collect();

        info!(
            meshes = meshes.len(),
            entities = spawned.len(),
            "scene spawned"
        );
        spawned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal_scene() {
        let scene: SceneDescription = serde_json::from_str(
            r#"{ "entities": [{ "name": "Lamp", "components": ["Transform"], "position": [1.0, 2.0, 3.0] }] }"#,
        )
        .unwrap();
        assert!(scene.meshes.is_empty());
        assert_eq!(scene.entities[0].position, Some(Vec3::new(1.0, 2.0, 3.0)));
        assert!(scene.entities[0].scripts.is_empty());
    }

    #[test]
    fn test_builtin_scene_spawns() {
        let mut world = NativeWorld::new();
        let spawned = SceneDescription::builtin().spawn(&mut world);
        assert_eq!(spawned.len(), 3);
        assert_eq!(world.entity_count(), 3);
        assert_eq!(world.asset_count(), 1);

        let spinner = &spawned[1];
        assert_eq!(spinner.scripts, ["Spinner"]);
        match world.component(spinner.entity, ComponentKind::MeshRenderer) {
            Some(ComponentState::MeshRenderer(r)) => assert!(r.mesh.is_valid()),
            other => panic!("unexpected component: {other:?}"),
        }
        match world.component(spawned[0].entity, ComponentKind::Transform) {
            Some(ComponentState::Transform(t)) => assert_eq!(t.position, Vec3::new(0.0, 1.0, 0.0)),
            other => panic!("unexpected component: {other:?}"),
        }
    }

    #[test]
    fn test_unknown_component_names_are_skipped() {
        let mut world = NativeWorld::new();
        let scene = SceneDescription {
            meshes: Vec::new(),
            entities: vec![SceneEntity {
                name: "Odd".into(),
                components: vec!["Light".into(), "Transform".into()],
                position: None,
                mesh: None,
                scripts: Vec::new(),
            }],
        };
        let spawned = scene.spawn(&mut world);
        assert_eq!(world.component_count(spawned[0].entity), 1);
    }
}
