use std::{any::Any, sync::Arc};

use wrapp_di::types::{Instance, Qualifier, TypeInfo};

use crate::{
    descriptor::TypeDescriptor,
    errors::{AccessError, IntrospectionError},
};

/// A shared, navigable configuration value
pub type Node = Arc<dyn Reflect>;

/// Lazily evaluated read of a property or field
pub type Read<'a> = Box<dyn Fn() -> Result<Option<Node>, AccessError> + 'a>;

/// Wraps a value into a [Node]
pub fn node<T: Reflect>(value: T) -> Node {
    Arc::new(value)
}

/// Runtime type of the value behind a node
pub fn type_of(node: &Node) -> TypeInfo {
    <dyn Reflect as Erased>::runtime_type(&**node)
}

/// Shares the value behind a node as a DI instance of its runtime type
pub fn to_instance(node: &Node) -> Instance {
    <dyn Reflect as Erased>::into_instance(Arc::clone(node))
}

/// Identity of the allocation behind a node
pub(crate) fn node_id(node: &Node) -> usize {
    Arc::as_ptr(node) as *const () as usize
}

/// Type erasure helpers, implemented for every sized type
pub trait Erased: Any + Send + Sync {
    fn runtime_type(&self) -> TypeInfo;

    fn into_instance(self: Arc<Self>) -> Instance;
}
impl<T: Any + Send + Sync> Erased for T {
    fn runtime_type(&self) -> TypeInfo {
        TypeInfo::of::<T>()
    }

    fn into_instance(self: Arc<Self>) -> Instance {
        Instance::from_shared(TypeInfo::of::<T>(), self)
    }
}

/// Exposes the navigable structure of a configuration value
///
/// Both methods default to "no children", which is all a terminal value needs.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use wrapp_config::reflect::{Field, Property, Reflect};
/// use wrapp_config::errors::IntrospectionError;
///
/// struct Primary;
///
/// struct Database {
///     url: String,
/// }
/// impl Reflect for Database {
///     fn fields(&self) -> Vec<Field<'_>> {
///         vec![Field::value::<Self, _>("url", &self.url).qualified_with::<Primary>()]
///     }
/// }
///
/// struct AppConfig {
///     database: Arc<Database>,
/// }
/// impl Reflect for AppConfig {
///     fn properties(&self) -> Result<Vec<Property<'_>>, IntrospectionError> {
///         Ok(vec![Property::shared("database", &self.database)])
///     }
/// }
/// ```
pub trait Reflect: Erased {
    /// Bean-style properties, visited before [Reflect::fields]
    fn properties(&self) -> Result<Vec<Property<'_>>, IntrospectionError> {
        Ok(Vec::new())
    }

    /// Instance fields, each tagged with the type declaring it
    fn fields(&self) -> Vec<Field<'_>> {
        Vec::new()
    }

    fn as_type_descriptor(&self) -> Option<&TypeDescriptor> {
        None
    }
}

macro_rules! terminal_values {
    ($($ty:ty),* $(,)?) => {
        $(impl Reflect for $ty {})*
    };
}
terminal_values!(
    bool, char, i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64, String,
    &'static str,
);

impl Reflect for TypeDescriptor {
    fn as_type_descriptor(&self) -> Option<&TypeDescriptor> {
        Some(self)
    }
}

/// A bean-style property
///
/// Only properties with a read accessor take part in binding.
pub struct Property<'a> {
    name: &'static str,
    qualifiers: Vec<Qualifier>,
    read: Option<Read<'a>>,
}
impl<'a> Property<'a> {
    pub fn getter(
        name: &'static str,
        read: impl Fn() -> Result<Option<Node>, AccessError> + 'a,
    ) -> Self {
        Property {
            name,
            qualifiers: Vec::new(),
            read: Some(Box::new(read)),
        }
    }

    pub fn write_only(name: &'static str) -> Self {
        Property {
            name,
            qualifiers: Vec::new(),
            read: None,
        }
    }

    /// Property returning a copy of `value`
    pub fn value<T: Reflect + Clone>(name: &'static str, value: &'a T) -> Self {
        Self::getter(name, move || Ok(Some(node(value.clone()))))
    }

    /// Property returning the shared `value` itself
    pub fn shared<T: Reflect>(name: &'static str, value: &'a Arc<T>) -> Self {
        Self::getter(name, move || {
            let value: Node = value.clone();
            Ok(Some(value))
        })
    }

    pub fn qualified_with<Marker: 'static>(self) -> Self {
        self.annotated(Qualifier::of::<Marker>())
    }

    pub fn annotated(mut self, qualifier: Qualifier) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    pub fn is_readable(&self) -> bool {
        self.read.is_some()
    }

    /// Invokes the read accessor, `None` if there is none
    pub fn read(&self) -> Option<Result<Option<Node>, AccessError>> {
        self.read.as_ref().map(|read| read())
    }
}

/// An instance field
pub struct Field<'a> {
    name: &'static str,
    declared_by: TypeInfo,
    qualifiers: Vec<Qualifier>,
    read: Read<'a>,
}
impl<'a> Field<'a> {
    /// Field declared on `Owner`
    pub fn new<Owner: 'static>(
        name: &'static str,
        read: impl Fn() -> Result<Option<Node>, AccessError> + 'a,
    ) -> Self {
        Field {
            name,
            declared_by: TypeInfo::of::<Owner>(),
            qualifiers: Vec::new(),
            read: Box::new(read),
        }
    }

    /// Field holding `value` by value, read as a copy
    pub fn value<Owner: 'static, T: Reflect + Clone>(name: &'static str, value: &'a T) -> Self {
        Self::new::<Owner>(name, move || Ok(Some(node(value.clone()))))
    }

    /// Field holding a shared value
    pub fn shared<Owner: 'static, T: Reflect>(name: &'static str, value: &'a Arc<T>) -> Self {
        Self::new::<Owner>(name, move || {
            let value: Node = value.clone();
            Ok(Some(value))
        })
    }

    /// Field holding an optional shared value
    pub fn optional<Owner: 'static, T: Reflect>(
        name: &'static str,
        value: &'a Option<Arc<T>>,
    ) -> Self {
        Self::new::<Owner>(name, move || {
            Ok(value.as_ref().map(|value| -> Node { value.clone() }))
        })
    }

    /// Field that can not be read
    pub fn inaccessible<Owner: 'static>(name: &'static str) -> Self {
        Self::new::<Owner>(name, || Err(AccessError::Inaccessible))
    }

    pub fn qualified_with<Marker: 'static>(self) -> Self {
        self.annotated(Qualifier::of::<Marker>())
    }

    pub fn annotated(mut self, qualifier: Qualifier) -> Self {
        self.qualifiers.push(qualifier);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn declared_by(&self) -> TypeInfo {
        self.declared_by
    }

    pub fn qualifiers(&self) -> &[Qualifier] {
        &self.qualifiers
    }

    pub fn read(&self) -> Result<Option<Node>, AccessError> {
        (self.read)()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Holder {
        shared: Arc<String>,
        missing: Option<Arc<String>>,
    }
    impl Reflect for Holder {}

    #[test]
    fn type_of_reports_value_type_not_pointer() {
        let value = node(5_u16);
        assert_eq!(type_of(&value), TypeInfo::of::<u16>());

        let instance = to_instance(&value);
        assert_eq!(instance.info, TypeInfo::of::<u16>());
        assert_eq!(*instance.downcast::<u16>().unwrap(), 5);
    }

    #[test]
    fn shared_field_keeps_identity() {
        let holder = Holder {
            shared: Arc::new("db".to_string()),
            missing: None,
        };

        let field = Field::shared::<Holder, _>("shared", &holder.shared);
        let read = field.read().unwrap().unwrap();
        assert_eq!(node_id(&read), Arc::as_ptr(&holder.shared) as *const () as usize);
        assert_eq!(field.declared_by(), TypeInfo::of::<Holder>());

        let field = Field::optional::<Holder, _>("missing", &holder.missing);
        assert!(field.read().unwrap().is_none());
    }

    #[test]
    fn write_only_property_has_no_reader() {
        let property = Property::write_only("secret");
        assert!(!property.is_readable());
        assert!(property.read().is_none());
    }

    #[test]
    fn type_descriptor_is_recognised() {
        let value = node(TypeDescriptor::class::<Holder>());
        assert!(value.as_type_descriptor().is_some());
        assert!(node(1_i32).as_type_descriptor().is_none());
    }
}
