//! Walks every type and element declaration across all schemas, keeping
//! references consistent with the collision resolver's renames, and
//! answers reverse type-to-element lookups.

use wsdlgen_wsdl::types::{ComplexType, Element, Schema};

use crate::collisions::CollisionMap;
use crate::naming::{split_ref, strip_ns};

/// Rewrites every type reference in `schemas` whose `(namespace, name)`
/// pair appears in `map` to the renamed form, so reference sites stay
/// consistent with the renamed declarations. A prefixed reference resolves
/// through the schema's prefix table; an unprefixed one is taken to point
/// into the schema's own target namespace.
pub fn apply_renames(mut schemas: Vec<Schema>, map: &CollisionMap) -> Vec<Schema> {
    if map.is_empty() {
        return schemas;
    }

    for schema in &mut schemas {
        let prefixes = schema.namespaces.clone();
        let target = schema.target_namespace.clone();

        let resolve = |reference: &mut Option<String>| {
            if let Some(reference) = reference {
                rewrite(reference, &prefixes, &target, map);
            }
        };

        for element in &mut schema.elements {
            rewrite_element(element, &resolve);
        }
        for complex_type in &mut schema.complex_types {
            rewrite_complex_type(complex_type, &resolve);
        }
        for simple_type in &mut schema.simple_types {
            resolve(&mut simple_type.base);
        }
    }

    schemas
}

fn rewrite_element(element: &mut Element, resolve: &impl Fn(&mut Option<String>)) {
    resolve(&mut element.ty);
    if let Some(inline) = &mut element.complex_type {
        rewrite_complex_type(inline, resolve);
    }
}

fn rewrite_complex_type(complex_type: &mut ComplexType, resolve: &impl Fn(&mut Option<String>)) {
    for element in &mut complex_type.sequence {
        rewrite_element(element, resolve);
    }
    for attribute in &mut complex_type.attributes {
        resolve(&mut attribute.ty);
    }
}

fn rewrite(
    reference: &mut String,
    prefixes: &std::collections::HashMap<String, String>,
    target_namespace: &str,
    map: &CollisionMap,
) {
    let (prefix, local) = split_ref(reference);
    let namespace = prefix
        .and_then(|p| prefixes.get(p).map(String::as_str))
        .unwrap_or(target_namespace);

    if let Some(renamed) = map.renamed(namespace, local) {
        *reference = match prefix {
            Some(prefix) => format!("{prefix}:{renamed}"),
            None => renamed.to_owned(),
        };
    }
}

/// Finds an element in any schema whose declared type is `name`,
/// returning the element's name. Yields nothing when no element declares
/// the type; callers fall back to the type name itself.
pub fn find_name_by_type(schemas: &[Schema], name: &str) -> Option<String> {
    schemas
        .iter()
        .flat_map(|schema| &schema.elements)
        .find(|element| element.ty.as_deref().map(strip_ns) == Some(name))
        .map(|element| element.name.clone())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use wsdlgen_wsdl::types::Attribute;

    use super::*;
    use crate::collisions;

    fn item_schemas() -> Vec<Schema> {
        // Both schemas declare `Item`; the second also references its own
        // `Item` from an element and the first schema's `Item` through a
        // prefix.
        let first = Schema {
            target_namespace: "urn:one".to_owned(),
            complex_types: vec![ComplexType {
                name: "Item".to_owned(),
                ..ComplexType::default()
            }],
            ..Schema::default()
        };

        let mut namespaces = HashMap::new();
        namespaces.insert("tns".to_owned(), "urn:two".to_owned());
        namespaces.insert("one".to_owned(), "urn:one".to_owned());

        let second = Schema {
            target_namespace: "urn:two".to_owned(),
            namespaces,
            complex_types: vec![ComplexType {
                name: "Item".to_owned(),
                sequence: vec![Element {
                    name: "related".to_owned(),
                    ty: Some("one:Item".to_owned()),
                    ..Element::default()
                }],
                attributes: vec![Attribute {
                    name: "parent".to_owned(),
                    ty: Some("tns:Item".to_owned()),
                    required: false,
                }],
            }],
            elements: vec![Element {
                name: "item".to_owned(),
                ty: Some("tns:Item".to_owned()),
                ..Element::default()
            }],
            ..Schema::default()
        };

        vec![first, second]
    }

    #[test]
    fn references_follow_renamed_declarations() {
        let (schemas, map) = collisions::resolve(item_schemas());
        let schemas = apply_renames(schemas, &map);

        // Declarations: first schema's Item became Item2, second's Item1.
        assert_eq!(schemas[0].complex_types[0].name, "Item2");
        assert_eq!(schemas[1].complex_types[0].name, "Item1");

        // References in the second schema resolve per prefix.
        assert_eq!(schemas[1].elements[0].ty.as_deref(), Some("tns:Item1"));
        assert_eq!(
            schemas[1].complex_types[0].sequence[0].ty.as_deref(),
            Some("one:Item2")
        );
        assert_eq!(
            schemas[1].complex_types[0].attributes[0].ty.as_deref(),
            Some("tns:Item1")
        );
    }

    #[test]
    fn unrelated_references_are_untouched() {
        let (schemas, map) = collisions::resolve(item_schemas());
        let mut schemas = apply_renames(schemas, &map);

        schemas[1].elements.push(Element {
            name: "label".to_owned(),
            ty: Some("xsd:string".to_owned()),
            ..Element::default()
        });
        let schemas = apply_renames(schemas, &map);
        assert_eq!(schemas[1].elements[1].ty.as_deref(), Some("xsd:string"));
    }

    #[test]
    fn reverse_lookup_finds_the_declaring_element() {
        let (schemas, map) = collisions::resolve(item_schemas());
        let schemas = apply_renames(schemas, &map);

        assert_eq!(find_name_by_type(&schemas, "Item1"), Some("item".to_owned()));
        assert_eq!(find_name_by_type(&schemas, "NoSuchType"), None);
    }
}
