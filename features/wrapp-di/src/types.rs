use std::{
    any::{Any, TypeId},
    sync::Arc,
};

/// Type erased error used at the seams between crates
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Bound values may be shared with whoever requires them later,
/// so anything injectable needs to be Send + Sync + 'static
pub trait Injectable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Injectable for T {}

/// A bound value
#[derive(Clone)]
pub struct Instance {
    pub info: TypeInfo,
    pub instance: Arc<dyn Any + Send + Sync + 'static>,
}
impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Instance").field(&self.info.type_name).finish()
    }
}

impl Instance {
    pub fn new<ExistingInstance: Injectable>(instance: ExistingInstance) -> Self {
        Instance {
            info: TypeInfo::of::<ExistingInstance>(),
            instance: Arc::new(instance),
        }
    }

    /// Wraps an already shared value without moving it
    ///
    /// `info` must describe the concrete type behind `instance`, otherwise every later downcast fails
    pub fn from_shared(info: TypeInfo, instance: Arc<dyn Any + Send + Sync + 'static>) -> Self {
        Instance { info, instance }
    }

    pub fn downcast<T: Injectable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.instance.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.info.type_name),
        }
    }

    /// True if both point to the very same allocation
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.instance, &other.instance)
    }
}

/// Type Name and Type Id
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct TypeInfo {
    pub type_name: &'static str,
    pub type_id: TypeId,
}
impl std::fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.type_name)
    }
}
impl TypeInfo {
    pub fn of<T: 'static + ?Sized>() -> TypeInfo {
        TypeInfo {
            type_name: std::any::type_name::<T>(),
            type_id: TypeId::of::<T>(),
        }
    }

    /// Type name without its module path
    pub fn short_name(&self) -> &'static str {
        let name = self.type_name;
        // Generic arguments may contain paths themselves, only strip the outer one
        let outer = name.split('<').next().unwrap_or(name);
        match outer.rfind("::") {
            Some(pos) => &name[pos + 2..],
            None => name,
        }
    }
}

/// Disambiguates several bindings of the same type
///
/// A qualifier is identified by a marker type, usually a unit struct:
/// ```rust
/// use wrapp_di::types::Qualifier;
///
/// struct PrimaryDatabase;
///
/// let qualifier = Qualifier::of::<PrimaryDatabase>();
/// assert_eq!(qualifier, Qualifier::of::<PrimaryDatabase>());
/// ```
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct Qualifier(TypeInfo);
impl Qualifier {
    pub fn of<Marker: 'static + ?Sized>() -> Qualifier {
        Qualifier(TypeInfo::of::<Marker>())
    }

    pub fn info(&self) -> TypeInfo {
        self.0
    }

    pub fn name(&self) -> &'static str {
        self.0.short_name()
    }
}
impl From<TypeInfo> for Qualifier {
    fn from(info: TypeInfo) -> Self {
        Qualifier(info)
    }
}
impl std::fmt::Display for Qualifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "@{}", self.name())
    }
}

/// Key under which a binding is registered
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct BindingKey {
    pub type_info: TypeInfo,
    pub qualifier: Option<Qualifier>,
}
impl BindingKey {
    pub fn of<T: 'static + ?Sized>() -> Self {
        BindingKey {
            type_info: TypeInfo::of::<T>(),
            qualifier: None,
        }
    }

    pub fn qualified(type_info: TypeInfo, qualifier: Qualifier) -> Self {
        BindingKey {
            type_info,
            qualifier: Some(qualifier),
        }
    }
}
impl std::fmt::Display for BindingKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.qualifier {
            Some(qualifier) => write!(f, "{} {}", qualifier, self.type_info),
            None => write!(f, "{}", self.type_info),
        }
    }
}
