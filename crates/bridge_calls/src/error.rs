//! Attach-time error types.
//!
//! These cover the startup hand-off only. Invoking an operation that was
//! never populated is not an error value; see
//! [`integration_failure`](crate::table::integration_failure).

/// Errors that can occur while populating the call table.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum BridgeError {
    /// The host offered an operation name the table does not define.
    #[error("unknown native operation `{0}`")]
    UnknownOperation(String),

    /// The host offered a null address.
    #[error("native operation `{0}` was bound to a null address")]
    NullAddress(String),

    /// The host offered the same operation twice.
    #[error("native operation `{0}` was bound more than once")]
    DuplicateBinding(String),

    /// A binding name was not valid UTF-8.
    #[error("binding name is not valid UTF-8")]
    InvalidName,

    /// Strict attach found unpopulated operations.
    #[error("{} native operation(s) were never populated: {}", .0.len(), .0.join(", "))]
    MissingOperations(Vec<&'static str>),
}
