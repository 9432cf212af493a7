//! Wrapp Config binds the values held by configuration objects into the DI container.
//!
//! Configuration objects are plain structs implementing [reflect::Reflect]. The binder walks
//! everything reachable from them and binds each value that was read through a property or
//! field annotated with a binding qualifier, keyed by the value's type and that qualifier.
//! Application code then requires it like any other dependency.
//!
//! Wrapp Config consists of the following components:
//!
//! 1. Reflect - exposes the properties and fields of a configuration value
//! 2. Descriptor - type descriptors declaring qualifiers, and the roots handed to the binder
//! 3. Qualifier - discovers the qualifiers declared by the roots
//! 4. Walker - depth-first traversal with cycle suppression
//! 5. Binder - the [ConfigurationModule], producing the binding table
//! 6. Settings - stop types, visit policy and depth limit
//! 7. Errors - for introspection and binding errors

pub mod binder;
pub mod descriptor;
pub mod errors;
pub mod qualifier;
pub mod reflect;
pub mod settings;
pub mod walker;

pub use binder::{BindingReport, BindingTable, ConfigurationModule};
