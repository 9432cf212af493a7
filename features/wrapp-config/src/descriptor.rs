use std::fmt::Debug;

use wrapp_di::types::{Qualifier, TypeInfo};

use crate::reflect::{node, type_of, Node, Reflect};

/// What kind of type a [TypeDescriptor] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind {
    /// Any ordinary type
    Class,
    /// A marker type meant to annotate properties and fields
    Annotation {
        /// Annotations marked as binding qualifiers select which values get bound
        binding_qualifier: bool,
    },
}

/// Describes a type instead of holding a value of it
///
/// Descriptors are configuration keys, not configuration values: they declare
/// qualifiers and are never bound themselves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    info: TypeInfo,
    kind: TypeKind,
    declared: Vec<TypeDescriptor>,
}
impl TypeDescriptor {
    pub fn class<T: 'static + ?Sized>() -> Self {
        Self::new(TypeInfo::of::<T>(), TypeKind::Class)
    }

    /// An annotation type which is not a binding qualifier
    pub fn annotation<Marker: 'static + ?Sized>() -> Self {
        Self::new(
            TypeInfo::of::<Marker>(),
            TypeKind::Annotation {
                binding_qualifier: false,
            },
        )
    }

    /// An annotation type marked as binding qualifier
    pub fn qualifier<Marker: 'static + ?Sized>() -> Self {
        Self::new(
            TypeInfo::of::<Marker>(),
            TypeKind::Annotation {
                binding_qualifier: true,
            },
        )
    }

    fn new(info: TypeInfo, kind: TypeKind) -> Self {
        TypeDescriptor {
            info,
            kind,
            declared: Vec::new(),
        }
    }

    /// Adds a type declared inside this one
    pub fn declaring(mut self, nested: TypeDescriptor) -> Self {
        self.declared.push(nested);
        self
    }

    pub fn info(&self) -> TypeInfo {
        self.info
    }

    pub fn kind(&self) -> TypeKind {
        self.kind
    }

    pub fn declared_types(&self) -> &[TypeDescriptor] {
        &self.declared
    }

    pub fn is_annotation(&self) -> bool {
        matches!(self.kind, TypeKind::Annotation { .. })
    }

    /// The qualifier this type stands for, if it is a binding qualifier annotation
    pub fn as_qualifier(&self) -> Option<Qualifier> {
        match self.kind {
            TypeKind::Annotation {
                binding_qualifier: true,
            } => Some(Qualifier::from(self.info)),
            _ => None,
        }
    }
}

/// A configuration root handed to the binder
#[derive(Clone)]
pub enum Root {
    /// A configuration object whose graph is walked for bindings
    Value(Node),
    /// A type declaring binding qualifiers
    Type(TypeDescriptor),
}
impl Root {
    pub fn value<T: Reflect>(value: T) -> Self {
        Root::Value(node(value))
    }

    pub fn type_info(&self) -> TypeInfo {
        match self {
            Root::Value(value) => type_of(value),
            Root::Type(descriptor) => descriptor.info(),
        }
    }
}
impl From<TypeDescriptor> for Root {
    fn from(descriptor: TypeDescriptor) -> Self {
        Root::Type(descriptor)
    }
}
impl From<Node> for Root {
    fn from(value: Node) -> Self {
        Root::Value(value)
    }
}
impl Debug for Root {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Root::Value(value) => f.debug_tuple("Value").field(&type_of(value)).finish(),
            Root::Type(descriptor) => f.debug_tuple("Type").field(descriptor).finish(),
        }
    }
}
