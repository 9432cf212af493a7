use std::{
    collections::{hash_map, HashMap},
    sync::Arc,
};

use wrapp_di::{
    builder::{DiBuilder, Module},
    types::{BindingKey, Injectable, Instance, Qualifier, TypeInfo},
};

use crate::{
    descriptor::Root,
    errors::RootError,
    qualifier::QualifierSet,
    reflect::{to_instance, type_of, Node},
    settings::BinderSettings,
    walker::{Visitor, Walker},
};

/// Bindings produced by a single pass
#[derive(Debug, Clone, Default)]
pub struct BindingTable {
    entries: HashMap<BindingKey, Instance>,
}
impl BindingTable {
    /// Binds `instance` under `key`, returning the instance it replaced
    pub fn insert(&mut self, key: BindingKey, instance: Instance) -> Option<Instance> {
        self.entries.insert(key, instance)
    }

    pub fn get(&self, key: &BindingKey) -> Option<&Instance> {
        self.entries.get(key)
    }

    /// Looks up the value of type `T` bound under `qualifier`
    pub fn get_qualified<T: Injectable>(&self, qualifier: Qualifier) -> Option<Arc<T>> {
        self.get(&BindingKey::qualified(TypeInfo::of::<T>(), qualifier))
            .and_then(|instance| instance.downcast().ok())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&BindingKey, &Instance)> {
        self.entries.iter()
    }
}
impl IntoIterator for BindingTable {
    type Item = (BindingKey, Instance);
    type IntoIter = hash_map::IntoIter<BindingKey, Instance>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Outcome of [ConfigurationModule::bind_all]
#[derive(Debug, Clone, Default)]
pub struct BindingReport {
    pub table: BindingTable,
    /// One entry per root that failed, in root order
    pub errors: Vec<RootError>,
}
impl BindingReport {
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Binds qualified values found in configuration objects
///
/// Every value reachable from a value root through properties or declared fields is
/// bound by its runtime type under each qualifier annotating the member it was read from,
/// as long as one of the type roots declares that qualifier.
///
/// # Example
/// ```rust
/// use wrapp_config::{descriptor::{Root, TypeDescriptor}, reflect::{Field, Reflect}, ConfigurationModule};
/// use wrapp_di::{DiBuilder, Qualifier};
///
/// struct ListenPort;
///
/// struct HttpConfig {
///     port: u16,
/// }
/// impl Reflect for HttpConfig {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![Field::value::<Self, _>("port", &self.port).qualified_with::<ListenPort>()]
///     }
/// }
///
/// let module = ConfigurationModule::new([
///     Root::from(TypeDescriptor::qualifier::<ListenPort>()),
///     Root::value(HttpConfig { port: 8080 }),
/// ]);
/// let container = DiBuilder::new().install(&module).build().unwrap();
///
/// let port = container.require_qualified::<u16>(Qualifier::of::<ListenPort>()).unwrap();
/// assert_eq!(*port, 8080);
/// ```
#[derive(Debug)]
pub struct ConfigurationModule {
    roots: Vec<Root>,
    qualifiers: QualifierSet,
    settings: BinderSettings,
}
impl ConfigurationModule {
    pub fn new(roots: impl IntoIterator<Item = Root>) -> Self {
        Self::with_settings(roots, BinderSettings::default())
    }

    pub fn with_settings(roots: impl IntoIterator<Item = Root>, settings: BinderSettings) -> Self {
        let roots: Vec<Root> = roots.into_iter().collect();
        let qualifiers = QualifierSet::discover(&roots);
        tracing::debug!(
            "Configuration module with {} roots declaring {} qualifiers",
            roots.len(),
            qualifiers.len()
        );

        ConfigurationModule {
            roots,
            qualifiers,
            settings,
        }
    }

    pub fn qualifiers(&self) -> &QualifierSet {
        &self.qualifiers
    }

    /// Walks every root, collecting bindings into a fresh table
    ///
    /// A failing root does not stop the others. Bindings it made before failing are kept.
    pub fn bind_all(&self) -> BindingReport {
        let walker = Walker::new(&self.settings);
        let mut report = BindingReport::default();

        for (index, root) in self.roots.iter().enumerate() {
            let Root::Value(value) = root else {
                continue;
            };

            let mut binder = TableBinder {
                qualifiers: &self.qualifiers,
                table: &mut report.table,
            };
            if let Err(error) = walker.walk(value, &mut binder) {
                let error = RootError {
                    index,
                    root: root.type_info(),
                    error,
                };
                tracing::error!("{error}");
                report.errors.push(error);
            }
        }

        tracing::debug!(
            "Bound {} values, {} roots failed",
            report.table.len(),
            report.errors.len()
        );
        report
    }
}
impl Module for ConfigurationModule {
    fn configure(&self, builder: &mut DiBuilder) {
        let BindingReport { table, errors } = self.bind_all();
        for (key, instance) in table {
            builder.add_qualified_instance(key, instance);
        }
        for error in errors {
            builder.add_error(error);
        }
    }
}

/// Records visited values into a [BindingTable]
struct TableBinder<'a> {
    qualifiers: &'a QualifierSet,
    table: &'a mut BindingTable,
}
impl Visitor for TableBinder<'_> {
    fn visit(&mut self, value: &Node, qualifiers: &[Qualifier]) {
        if qualifiers.is_empty() {
            return;
        }

        let info = type_of(value);
        for qualifier in self.qualifiers.matching(qualifiers) {
            tracing::info!("Binding property {}: {}", qualifier.name(), info);
            self.table
                .insert(BindingKey::qualified(info, qualifier), to_instance(value));
        }
    }
}
