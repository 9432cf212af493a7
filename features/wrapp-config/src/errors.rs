use thiserror::Error;
use wrapp_di::types::{DynError, TypeInfo};

/// The properties of a type could not be enumerated
///
/// Recovered by the walker: the value's fields are still visited.
#[derive(Error, Debug, Clone)]
#[error("Failed to introspect '{type_info}': {reason}")]
pub struct IntrospectionError {
    pub type_info: TypeInfo,
    pub reason: String,
}
impl IntrospectionError {
    pub fn new<T: 'static + ?Sized>(reason: impl Into<String>) -> Self {
        IntrospectionError {
            type_info: TypeInfo::of::<T>(),
            reason: reason.into(),
        }
    }
}

/// Reading a property or field failed
///
/// Recovered by the walker: the member is treated as absent.
#[derive(Error, Debug)]
pub enum AccessError {
    #[error("The member is not accessible")]
    Inaccessible,
    #[error("The accessor failed: {0}")]
    Failed(DynError),
}

/// Errors aborting the walk of a single root
#[derive(Error, Debug, Clone)]
pub enum BindError {
    #[error("Configuration graph is nested deeper than {limit} levels at '{at}'")]
    DepthExceeded { limit: usize, at: TypeInfo },
}

/// A root which failed to bind
#[derive(Error, Debug, Clone)]
#[error("Binding configuration root #{index} ('{root}') failed: {error}")]
pub struct RootError {
    /// Position of the root as passed to the binder
    pub index: usize,
    pub root: TypeInfo,
    #[source]
    pub error: BindError,
}
