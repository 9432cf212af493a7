use std::{any::type_name, collections::HashMap, fmt::Debug, sync::Arc};

use crate::{
    errors::RequireError,
    types::{BindingKey, Injectable, Instance, Qualifier, TypeInfo},
};

/// Container holding all bound instances
#[derive(Clone)]
pub struct DiContainer(pub Arc<DiContainerInner>);
pub struct DiContainerInner {
    instances: HashMap<BindingKey, Instance>,
}
impl Debug for DiContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut keys: Vec<_> = self.0.instances.keys().collect();
        keys.sort();
        f.debug_set().entries(keys.into_iter().map(ToString::to_string)).finish()
    }
}

impl DiContainer {
    pub(crate) fn new(instances: HashMap<BindingKey, Instance>) -> Self {
        Self(Arc::new(DiContainerInner { instances }))
    }

    /// Attempts to get the requested type
    pub fn require<T: Injectable>(&self) -> Result<Arc<T>, RequireError> {
        self.require_key(BindingKey::of::<T>())
    }

    /// Attempts to get the requested type bound under `qualifier`
    pub fn require_qualified<T: Injectable>(
        &self,
        qualifier: Qualifier,
    ) -> Result<Arc<T>, RequireError> {
        self.require_key(BindingKey::qualified(TypeInfo::of::<T>(), qualifier))
    }

    fn require_key<T: Injectable>(&self, key: BindingKey) -> Result<Arc<T>, RequireError> {
        match self.0.instances.get(&key) {
            Some(instance) => {
                instance
                    .downcast()
                    .map_err(|actual_type| RequireError::DowncastFailed {
                        required_type: type_name::<T>(),
                        actual_type,
                    })
            }
            None => Err(RequireError::TypeMissing(key)),
        }
    }

    pub fn contains(&self, key: &BindingKey) -> bool {
        self.0.instances.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.instances.len()
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        builder::DiBuilder,
        errors::RequireError,
        types::{BindingKey, Qualifier},
    };

    struct Missing;

    #[test]
    fn require_unqualified_instance() {
        let container = DiBuilder::new()
            .add_instance("test".to_string())
            .build()
            .unwrap();

        assert_eq!(container.len(), 1);
        assert!(container.contains(&BindingKey::of::<String>()));
        assert!(!container.contains(&BindingKey::of::<u8>()));
        assert_eq!(*container.require::<String>().unwrap(), "test");
        assert!(matches!(
            container.require::<u8>(),
            Err(RequireError::TypeMissing(_))
        ));
        assert!(matches!(
            container.require_qualified::<String>(Qualifier::of::<Missing>()),
            Err(RequireError::TypeMissing(_))
        ));
    }
}
