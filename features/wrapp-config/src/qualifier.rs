use std::collections::HashSet;

use wrapp_di::types::Qualifier;

use crate::descriptor::{Root, TypeDescriptor};

/// The binding qualifiers declared by a set of roots
///
/// Computed once, never changed afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QualifierSet(HashSet<Qualifier>);
impl QualifierSet {
    /// Collects every binding qualifier annotation among the roots that are type descriptors
    /// and the types nested in them. Other value roots contribute nothing.
    pub fn discover<'a>(roots: impl IntoIterator<Item = &'a Root>) -> Self {
        let mut found = HashSet::new();
        for root in roots {
            let descriptor = match root {
                Root::Type(descriptor) => Some(descriptor),
                Root::Value(value) => value.as_type_descriptor(),
            };
            if let Some(descriptor) = descriptor {
                collect(descriptor, &mut found);
            }
        }
        return QualifierSet(found);

        fn collect(descriptor: &TypeDescriptor, found: &mut HashSet<Qualifier>) {
            if let Some(qualifier) = descriptor.as_qualifier() {
                found.insert(qualifier);
            }
            for nested in descriptor.declared_types() {
                collect(nested, found);
            }
        }
    }

    pub fn contains(&self, qualifier: &Qualifier) -> bool {
        self.0.contains(qualifier)
    }

    /// The subset of `annotations` which are known qualifiers, without duplicates
    pub fn matching(&self, annotations: &[Qualifier]) -> Vec<Qualifier> {
        let mut matched = Vec::new();
        for annotation in annotations {
            if self.contains(annotation) && !matched.contains(annotation) {
                matched.push(*annotation);
            }
        }
        matched
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Qualifier> {
        self.0.iter()
    }
}
impl FromIterator<Qualifier> for QualifierSet {
    fn from_iter<I: IntoIterator<Item = Qualifier>>(iter: I) -> Self {
        QualifierSet(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reflect::node;

    struct Qualifiers;
    struct DatabaseUrl;
    struct ListenPort;
    struct Documented;
    struct Inner;
    struct Deep;

    #[test]
    fn discovers_nested_binding_qualifiers() {
        let roots = vec![
            Root::from(
                TypeDescriptor::class::<Qualifiers>()
                    .declaring(TypeDescriptor::qualifier::<DatabaseUrl>())
                    .declaring(TypeDescriptor::annotation::<Documented>())
                    .declaring(
                        TypeDescriptor::class::<Inner>()
                            .declaring(TypeDescriptor::qualifier::<Deep>()),
                    ),
            ),
            Root::from(TypeDescriptor::qualifier::<ListenPort>()),
            Root::value("not a type".to_string()),
        ];

        let set = QualifierSet::discover(&roots);
        assert_eq!(set.len(), 3);
        assert!(set.contains(&Qualifier::of::<DatabaseUrl>()));
        assert!(set.contains(&Qualifier::of::<ListenPort>()));
        assert!(set.contains(&Qualifier::of::<Deep>()));
        assert!(!set.contains(&Qualifier::of::<Documented>()));
    }

    #[test]
    fn descriptor_value_roots_declare_qualifiers() {
        let roots = vec![
            Root::value(TypeDescriptor::qualifier::<DatabaseUrl>()),
            Root::from(node(
                TypeDescriptor::class::<Qualifiers>()
                    .declaring(TypeDescriptor::qualifier::<ListenPort>()),
            )),
        ];

        let set = QualifierSet::discover(&roots);
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Qualifier::of::<DatabaseUrl>()));
        assert!(set.contains(&Qualifier::of::<ListenPort>()));
    }

    #[test]
    fn value_roots_declare_nothing() {
        let roots = vec![Root::value(42_u32), Root::from(TypeDescriptor::class::<Inner>())];
        assert!(QualifierSet::discover(&roots).is_empty());
    }

    #[test]
    fn matching_keeps_only_known_qualifiers() {
        let set: QualifierSet = [Qualifier::of::<DatabaseUrl>()].into_iter().collect();
        let matched = set.matching(&[
            Qualifier::of::<Documented>(),
            Qualifier::of::<DatabaseUrl>(),
            Qualifier::of::<DatabaseUrl>(),
        ]);
        assert_eq!(matched, vec![Qualifier::of::<DatabaseUrl>()]);
    }
}
