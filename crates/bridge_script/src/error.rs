//! Script registration and attachment errors.

use bridge_core::EntityHandle;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    /// No factory is registered under this name.
    #[error("unknown script type: {0}")]
    UnknownScript(String),

    /// A factory is already registered under this name.
    #[error("script type already registered: {0}")]
    DuplicateScript(String),

    /// The entity already runs an instance of this script.
    #[error("script {script} is already attached to {entity}")]
    AlreadyAttached { entity: EntityHandle, script: String },
}
