use std::sync::Arc;

use thiserror::Error;

use crate::types::{BindingKey, DynError};

/// Errors when trying to require a certain type
#[derive(Error, Debug, Clone)]
pub enum RequireError {
    /// Nothing is bound under the required key
    #[error("Nothing is bound to '{0}'")]
    TypeMissing(BindingKey),

    #[error("Failed to downcast, required: '{required_type}' actual: '{actual_type}'")]
    DowncastFailed {
        required_type: &'static str,
        actual_type: &'static str,
    },
}

/// Errors while building the container
#[derive(Error, Debug, Clone)]
pub enum InitError {
    /// One or more modules reported errors while configuring
    #[error(transparent)]
    Configuration(#[from] ConfigurationErrors),
}

/// All errors reported through [crate::builder::DiBuilder::add_error]
#[derive(Error, Debug, Clone)]
pub struct ConfigurationErrors {
    pub errors: Vec<Arc<DynError>>,
}
impl std::fmt::Display for ConfigurationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut display = Vec::new();
        display.push(format!(
            "Configuration failed with {} error(s):",
            self.errors.len()
        ));
        for (i, error) in self.errors.iter().enumerate() {
            display.push(format!("{}) {}", i + 1, error));
        }
        f.write_str(&display.join("\n"))
    }
}
