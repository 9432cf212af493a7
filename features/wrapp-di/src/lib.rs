//! Wrapp DI is a minimal, synchronous binding container.
//!
//! Instances are registered on a [DiBuilder], either directly or through a [Module]
//! installed on it, and resolved afterwards from the built [DiContainer] by type and,
//! optionally, by [Qualifier].

pub mod builder;
pub mod container;
pub mod errors;
pub mod types;

pub use builder::{DiBuilder, Module};
pub use container::DiContainer;
pub use errors::{ConfigurationErrors, InitError, RequireError};
pub use types::{BindingKey, DynError, Injectable, Instance, Qualifier, TypeInfo};
