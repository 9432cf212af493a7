use std::{collections::HashMap, sync::Arc};

use crate::{
    container::DiContainer,
    errors::{ConfigurationErrors, InitError},
    types::{BindingKey, DynError, Injectable, Instance},
};

//////////////////////////////////////////////////////////////////////
///
/// Building a container consists of two parts.
/// 1. The DiBuilder where one registers instances, directly or by installing modules
/// 2. `build`, which refuses to produce a container if any module reported an error

/// Bundles a set of bindings
///
/// `configure` is the single hook where a module contributes to the builder.
/// Problems should be reported through [DiBuilder::add_error] instead of aborting,
/// so the other modules still get to register their bindings.
pub trait Module {
    fn configure(&self, builder: &mut DiBuilder);
}

pub struct DiBuilder {
    /// Registered already created instances
    pub(crate) registered_instances: HashMap<BindingKey, Instance>,
    /// Errors reported by modules during configuration
    pub(crate) errors: Vec<Arc<DynError>>,
}
impl Default for DiBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DiBuilder {
    pub fn new() -> Self {
        DiBuilder {
            registered_instances: HashMap::new(),
            errors: Vec::new(),
        }
    }
}
impl DiBuilder {
    pub fn add_instance<T: Injectable>(mut self, instance: T) -> Self {
        self.registered_instances
            .insert(BindingKey::of::<T>(), Instance::new(instance));
        self
    }

    /// Binds an instance under a key
    ///
    /// A later binding for the same key replaces the former one
    pub fn add_qualified_instance(&mut self, key: BindingKey, instance: Instance) -> &mut Self {
        if let Some(replaced) = self.registered_instances.insert(key, instance) {
            tracing::debug!("Binding for {key} replaced a previous {}", replaced.info);
        }
        self
    }

    /// Records an error, failing [DiBuilder::build] later on
    pub fn add_error(&mut self, error: impl Into<DynError>) -> &mut Self {
        let error = error.into();
        tracing::error!("Configuration error: {error}");
        self.errors.push(Arc::new(error));
        self
    }

    /// Lets a module register its bindings
    pub fn install<M: Module + ?Sized>(mut self, module: &M) -> Self {
        module.configure(&mut self);
        self
    }

    pub fn errors(&self) -> impl Iterator<Item = &DynError> {
        self.errors.iter().map(|e| e.as_ref())
    }

    pub fn build(self) -> Result<DiContainer, InitError> {
        let DiBuilder {
            registered_instances,
            errors,
        } = self;

        if !errors.is_empty() {
            return Err(ConfigurationErrors { errors }.into());
        }

        tracing::debug!(
            "Building container with {} bindings",
            registered_instances.len()
        );
        Ok(DiContainer::new(registered_instances))
    }
}
