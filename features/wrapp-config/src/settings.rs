use std::collections::HashMap;
use std::any::TypeId;

use wrapp_di::types::TypeInfo;

use crate::descriptor::TypeDescriptor;

/// Maximum nesting of a walk if not configured otherwise
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Decides which values the walker refuses to enter again
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum VisitPolicy {
    /// A value is only skipped while it is on the current branch.
    /// The same value reached through two separate branches is visited, and bound, twice.
    #[default]
    PathScoped,
    /// A value is visited at most once per root
    Memoized,
}

/// Terminal value types, the walker never looks inside of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StopTypes(HashMap<TypeId, TypeInfo>);
impl StopTypes {
    pub fn empty() -> Self {
        StopTypes(HashMap::new())
    }

    pub fn with<T: 'static + ?Sized>(mut self) -> Self {
        let info = TypeInfo::of::<T>();
        self.0.insert(info.type_id, info);
        self
    }

    pub fn without<T: 'static + ?Sized>(mut self) -> Self {
        self.0.remove(&TypeId::of::<T>());
        self
    }

    pub fn contains(&self, info: &TypeInfo) -> bool {
        self.0.contains_key(&info.type_id)
    }
}
impl Default for StopTypes {
    /// Primitives, text and type descriptors
    fn default() -> Self {
        StopTypes::empty()
            .with::<bool>()
            .with::<char>()
            .with::<i8>()
            .with::<i16>()
            .with::<i32>()
            .with::<i64>()
            .with::<i128>()
            .with::<isize>()
            .with::<u8>()
            .with::<u16>()
            .with::<u32>()
            .with::<u64>()
            .with::<u128>()
            .with::<usize>()
            .with::<f32>()
            .with::<f64>()
            .with::<String>()
            .with::<&'static str>()
            .with::<TypeDescriptor>()
    }
}

/// Tunes a binding pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinderSettings {
    pub stop_types: StopTypes,
    pub visit_policy: VisitPolicy,
    /// Walks nested deeper than this fail their root
    pub max_depth: usize,
}
impl Default for BinderSettings {
    fn default() -> Self {
        BinderSettings {
            stop_types: StopTypes::default(),
            visit_policy: VisitPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}
impl BinderSettings {
    pub fn with_stop_types(mut self, stop_types: StopTypes) -> Self {
        self.stop_types = stop_types;
        self
    }

    pub fn with_visit_policy(mut self, visit_policy: VisitPolicy) -> Self {
        self.visit_policy = visit_policy;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stop_types_cover_primitives_and_text() {
        let stop = StopTypes::default();
        assert!(stop.contains(&TypeInfo::of::<i64>()));
        assert!(stop.contains(&TypeInfo::of::<String>()));
        assert!(stop.contains(&TypeInfo::of::<TypeDescriptor>()));
        assert!(!stop.contains(&TypeInfo::of::<Vec<u8>>()));

        let stop = stop.without::<String>();
        assert!(!stop.contains(&TypeInfo::of::<String>()));
    }
}
