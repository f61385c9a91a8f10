//! Cross-schema type-name collision detection and renaming.

use std::collections::HashMap;

use tracing::info;
use wsdlgen_wsdl::types::Schema;

/// Maps `(target namespace, original type name)` to the disambiguated
/// name. Populated once, before any generation task reads the graph.
#[derive(Debug, Default, Clone)]
pub struct CollisionMap {
    renames: HashMap<(String, String), String>,
}

impl CollisionMap {
    pub fn renamed(&self, namespace: &str, name: &str) -> Option<&str> {
        self.renames
            .get(&(namespace.to_owned(), name.to_owned()))
            .map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    pub fn len(&self) -> usize {
        self.renames.len()
    }

    fn insert(&mut self, namespace: &str, original: &str, renamed: String) {
        self.renames
            .insert((namespace.to_owned(), original.to_owned()), renamed);
    }
}

/// Scans `schemas` for complex/simple type names declared more than once
/// across the whole collection and renames every colliding declaration.
/// Each occurrence, in schema-traversal order, receives the remaining
/// occurrence count as a suffix, so two declarations of `Item` become
/// `Item2` and `Item1`.
///
/// Returns the rewritten schemas together with the rename map; references
/// to renamed types are rewritten separately by the traverser.
pub fn resolve(mut schemas: Vec<Schema>) -> (Vec<Schema>, CollisionMap) {
    let mut seen: HashMap<String, usize> = HashMap::new();
    for schema in &schemas {
        for complex_type in &schema.complex_types {
            *seen.entry(complex_type.name.clone()).or_default() += 1;
        }
        for simple_type in &schema.simple_types {
            *seen.entry(simple_type.name.clone()).or_default() += 1;
        }
    }
    seen.retain(|_, count| *count >= 2);

    let mut map = CollisionMap::default();
    for schema in &mut schemas {
        let namespace = schema.target_namespace.clone();
        for complex_type in &mut schema.complex_types {
            rename(&mut seen, &mut map, &namespace, &mut complex_type.name, "ComplexType");
        }
        for simple_type in &mut schema.simple_types {
            rename(&mut seen, &mut map, &namespace, &mut simple_type.name, "SimpleType");
        }
    }

    (schemas, map)
}

fn rename(
    seen: &mut HashMap<String, usize>,
    map: &mut CollisionMap,
    namespace: &str,
    name: &mut String,
    kind: &str,
) {
    let Some(remaining) = seen.get_mut(name.as_str()) else {
        return;
    };
    if *remaining == 0 {
        return;
    }

    let renamed = format!("{name}{remaining}");
    *remaining -= 1;

    info!(
        kind,
        original = %name,
        renamed = %renamed,
        namespace,
        "collision detected, type renamed"
    );

    map.insert(namespace, name, renamed.clone());
    *name = renamed;
}

#[cfg(test)]
mod tests {
    use wsdlgen_wsdl::types::{ComplexType, SimpleType};

    use super::*;

    fn schema(namespace: &str, complex: &[&str], simple: &[&str]) -> Schema {
        Schema {
            target_namespace: namespace.to_owned(),
            complex_types: complex
                .iter()
                .map(|name| ComplexType {
                    name: (*name).to_owned(),
                    ..ComplexType::default()
                })
                .collect(),
            simple_types: simple
                .iter()
                .map(|name| SimpleType {
                    name: (*name).to_owned(),
                    base: None,
                })
                .collect(),
            ..Schema::default()
        }
    }

    #[test]
    fn colliding_names_become_distinct() {
        let schemas = vec![
            schema("urn:one", &["Item", "Order"], &[]),
            schema("urn:two", &["Item"], &[]),
        ];

        let (schemas, map) = resolve(schemas);

        assert_eq!(schemas[0].complex_types[0].name, "Item2");
        assert_eq!(schemas[0].complex_types[1].name, "Order");
        assert_eq!(schemas[1].complex_types[0].name, "Item1");

        assert_eq!(map.len(), 2);
        assert_eq!(map.renamed("urn:one", "Item"), Some("Item2"));
        assert_eq!(map.renamed("urn:two", "Item"), Some("Item1"));
        assert_eq!(map.renamed("urn:one", "Order"), None);
    }

    #[test]
    fn collisions_span_complex_and_simple_types() {
        let schemas = vec![
            schema("urn:one", &["Code"], &[]),
            schema("urn:two", &[], &["Code"]),
        ];

        let (schemas, map) = resolve(schemas);

        assert_eq!(schemas[0].complex_types[0].name, "Code2");
        assert_eq!(schemas[1].simple_types[0].name, "Code1");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn unique_names_are_untouched() {
        let schemas = vec![schema("urn:one", &["Alpha"], &["Beta"])];
        let (schemas, map) = resolve(schemas);

        assert_eq!(schemas[0].complex_types[0].name, "Alpha");
        assert_eq!(schemas[0].simple_types[0].name, "Beta");
        assert!(map.is_empty());
    }

    #[test]
    fn three_way_collisions_stay_distinct() {
        let schemas = vec![
            schema("urn:one", &["Item"], &[]),
            schema("urn:two", &["Item"], &[]),
            schema("urn:three", &["Item"], &[]),
        ];

        let (schemas, _) = resolve(schemas);
        let mut names: Vec<&str> = schemas
            .iter()
            .map(|s| s.complex_types[0].name.as_str())
            .collect();
        names.sort_unstable();
        assert_eq!(names, ["Item1", "Item2", "Item3"]);
    }
}
