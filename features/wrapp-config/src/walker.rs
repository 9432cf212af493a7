use std::collections::HashMap;

use wrapp_di::types::{Qualifier, TypeInfo};

use crate::{
    errors::BindError,
    reflect::{node_id, type_of, Node},
    settings::{BinderSettings, VisitPolicy},
};

/// Receives every value reached by a [Walker]
pub trait Visitor {
    /// `qualifiers` are the annotations of the property or field the value was read from,
    /// empty for the root itself
    fn visit(&mut self, value: &Node, qualifiers: &[Qualifier]);
}

/// Values currently being visited, used to break cycles
///
/// Owned by a single walk, never shared between roots.
pub struct VisitPath {
    policy: VisitPolicy,
    stack: Vec<usize>,
    /// Only filled with [VisitPolicy::Memoized], holds the values so their addresses stay unique
    visited: HashMap<usize, Node>,
}
impl std::fmt::Debug for VisitPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitPath")
            .field("policy", &self.policy)
            .field("depth", &self.stack.len())
            .finish()
    }
}
impl VisitPath {
    pub fn new(policy: VisitPolicy) -> Self {
        VisitPath {
            policy,
            stack: Vec::new(),
            visited: HashMap::new(),
        }
    }

    /// Pushes the value, returns false if it must not be entered
    pub fn enter(&mut self, value: &Node) -> bool {
        let id = node_id(value);
        let seen = match self.policy {
            VisitPolicy::PathScoped => self.stack.contains(&id),
            VisitPolicy::Memoized => self.visited.insert(id, value.clone()).is_some(),
        };
        if seen {
            return false;
        }
        self.stack.push(id);
        true
    }

    /// Pops the value entered last
    pub fn leave(&mut self) {
        self.stack.pop();
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

/// Depth-first walk over properties and declared fields
pub struct Walker<'s> {
    settings: &'s BinderSettings,
}
impl<'s> Walker<'s> {
    pub fn new(settings: &'s BinderSettings) -> Self {
        Walker { settings }
    }

    /// Walks everything reachable from `root`
    pub fn walk(&self, root: &Node, visitor: &mut impl Visitor) -> Result<(), BindError> {
        let mut path = VisitPath::new(self.settings.visit_policy);
        self.visit(root, &[], &mut path, visitor)
    }

    fn visit(
        &self,
        value: &Node,
        qualifiers: &[Qualifier],
        path: &mut VisitPath,
        visitor: &mut impl Visitor,
    ) -> Result<(), BindError> {
        // Descriptors are keys, not values
        if value.as_type_descriptor().is_some() {
            return Ok(());
        }

        let info = type_of(value);
        if !path.enter(value) {
            tracing::trace!("Already visiting {info}, skipping");
            return Ok(());
        }

        let result = self.visit_entered(value, info, qualifiers, path, visitor);
        path.leave();
        result
    }

    fn visit_entered(
        &self,
        value: &Node,
        info: TypeInfo,
        qualifiers: &[Qualifier],
        path: &mut VisitPath,
        visitor: &mut impl Visitor,
    ) -> Result<(), BindError> {
        let depth = path.depth();
        tracing::trace!("Stack size: {depth}");
        if depth > self.settings.max_depth {
            return Err(BindError::DepthExceeded {
                limit: self.settings.max_depth,
                at: info,
            });
        }

        visitor.visit(value, qualifiers);

        if self.settings.stop_types.contains(&info) {
            return Ok(());
        }

        self.visit_properties(value, info, path, visitor)?;
        self.visit_fields(value, info, path, visitor)
    }

    fn visit_properties(
        &self,
        value: &Node,
        info: TypeInfo,
        path: &mut VisitPath,
        visitor: &mut impl Visitor,
    ) -> Result<(), BindError> {
        let properties = match value.properties() {
            Ok(properties) => properties,
            Err(e) => {
                tracing::warn!("Skipping properties of {info}: {e}");
                return Ok(());
            }
        };

        for property in properties {
            let Some(read) = property.read() else {
                continue;
            };
            match read {
                Ok(Some(child)) => {
                    tracing::trace!(
                        "Scanning bean property: {} ({})",
                        property.name(),
                        type_of(&child)
                    );
                    self.visit(&child, property.qualifiers(), path, visitor)?;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!("Skipping property {}.{}: {e}", info, property.name());
                }
            }
        }

        Ok(())
    }

    fn visit_fields(
        &self,
        value: &Node,
        info: TypeInfo,
        path: &mut VisitPath,
        visitor: &mut impl Visitor,
    ) -> Result<(), BindError> {
        for field in value.fields() {
            // Only fields declared on the exact runtime type count
            if field.declared_by() != info {
                continue;
            }
            match field.read() {
                Ok(Some(child)) => {
                    tracing::trace!(
                        "Scanning field: {} ({})",
                        field.name(),
                        type_of(&child)
                    );
                    self.visit(&child, field.qualifiers(), path, visitor)?;
                }
                Ok(None) | Err(_) => {}
            }
        }

        Ok(())
    }
}
