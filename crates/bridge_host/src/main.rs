//! # bridge_host
//!
//! Runs scripts against the in-memory native world.
//!
//! ## Startup Sequence
//!
//! 1. Parse flags and `BRIDGE_*` environment variables.
//! 2. Attach the bridge to the native operations.
//! 3. Seed the native world from a scene description.
//! 4. Register the demo scripts and attach the ones the scene asks for.
//! 5. Run the fixed-step frame loop, then shut every script down.

mod config;
mod scene;
mod scripts;

use anyhow::Result;
use bridge_calls::KeyCode;
use bridge_math::Vec3;
use bridge_native::with_world;
use bridge_script::components::Transform;
use bridge_script::{Entity, ScriptHost, ScriptRegistry};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use config::HostConfig;
use scene::SceneDescription;

fn main() -> Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("bridge_host=info".parse()?))
        .init();

    let config = HostConfig::parse();
    info!(?config, "bridge host starting");

    let bridge = bridge_native::attach(config.bridge_config())?;

    let scene = match &config.scene {
        Some(path) => SceneDescription::load(path)?,
        None => SceneDescription::builtin(),
    };
    let spawned = with_world(|world| scene.spawn(world));

    let mut registry = ScriptRegistry::new();
    scripts::register(&mut registry)?;
    let mut host = ScriptHost::new(&bridge, registry);
    for entry in &spawned {
        for script in &entry.scripts {
            if let Err(err) = host.attach(entry.entity, script) {
                warn!(entity = %entry.name, %err, "script not attached");
            }
        }
    }
    info!(scripts = host.len(), "scripts attached");

    for frame in 0..config.frames {
        with_world(|world| {
            world.begin_frame(config.delta);
            // Scripted input: walk forward for the first half of the run.
            if frame == 0 {
                world.input_mut().press_key(KeyCode::W.to_raw());
            }
            if frame == config.frames / 2 {
                world.input_mut().release_key(KeyCode::W.to_raw());
                world.input_mut().press_key(KeyCode::Space.to_raw());
            }
        });
        host.update_all(config.delta);

        if frame == config.frames / 2 {
            if let [first, second, ..] = spawned.as_slice() {
                host.collision_enter(first.entity, second.entity, Vec3::Y);
                host.collision_exit(first.entity, second.entity);
            }
        }
    }

    for entry in &spawned {
        let entity = Entity::from_handle(&bridge, entry.entity);
        match entity.get_component::<Transform>() {
            Some(t) => info!(
                entity = %entity.name(),
                position = ?t.position(),
                rotation = ?t.euler_angles(),
                "final transform"
            ),
            None => info!(entity = %entity.name(), "no transform"),
        }
    }

    host.shutdown();
    info!(frames = config.frames, "bridge host shut down");
    Ok(())
}
