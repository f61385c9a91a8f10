//! Emission of type declarations for every schema in the collection.

use proc_macro2::TokenStream;
use quote::quote;
use wsdlgen_wsdl::types::{ComplexType, Element, Schema, Wsdl};

use crate::error::Error;
use crate::generator::Options;
use crate::naming::{
    make_private, replace_attr_reserved_words, replace_reserved_words, strip_option, to_rust_type,
};

use super::{ident, type_tokens};

pub(crate) fn types(wsdl: &Wsdl, options: &Options) -> Result<TokenStream, Error> {
    let mut out = helper_types();

    for schema in &wsdl.schemas {
        // The schema's target namespace is threaded explicitly into every
        // declaration emitted from it.
        out.extend(schema_types(schema, &schema.target_namespace, options)?);
    }

    Ok(out)
}

/// Companion declarations referenced by the primitive mapping table and
/// by simple-content carriers.
fn helper_types() -> TokenStream {
    quote! {
        pub type AnyType = String;
        pub type AnyUri = String;
        pub type NCName = String;

        /// Carrier for string simple content that also has attributes;
        /// schema attributes named `string` are renamed to avoid it.
        #[derive(Debug, Clone, Default)]
        pub struct string {
            pub value: String,
        }
    }
}

fn schema_types(schema: &Schema, namespace: &str, options: &Options) -> Result<TokenStream, Error> {
    let mut out = TokenStream::new();

    for element in &schema.elements {
        if let Some(inline) = &element.complex_type {
            out.extend(complex_type_decl(&element.name, inline, namespace, options)?);
        } else if let Some(ty) = &element.ty {
            out.extend(element_alias(&element.name, ty, options)?);
        }
    }

    for complex_type in &schema.complex_types {
        out.extend(complex_type_decl(&complex_type.name, complex_type, namespace, options)?);
    }

    for simple_type in &schema.simple_types {
        let name = ident(&options.type_name(&simple_type.name))?;
        let base = simple_type.base.as_deref().unwrap_or("string");
        let base = type_tokens(strip_option(&to_rust_type(base, false)))?;
        let vis = options.visibility();
        out.extend(quote! {
            #vis type #name = #base;
        });
    }

    Ok(out)
}

/// A named top-level element declaring its type by reference becomes an
/// alias onto the referenced type.
fn element_alias(element_name: &str, ty: &str, options: &Options) -> Result<TokenStream, Error> {
    let name = options.type_name(element_name);
    let target = strip_option(&to_rust_type(ty, false)).to_owned();
    if name == target {
        // An element conventionally named after its own type adds nothing.
        return Ok(TokenStream::new());
    }

    let name = ident(&name)?;
    let target = type_tokens(&target)?;
    let vis = options.visibility();
    Ok(quote! {
        #vis type #name = #target;
    })
}

/// Emits the struct for a complex type, plus one struct per anonymous
/// complex type nested in its sequence.
fn complex_type_decl(
    name: &str,
    complex_type: &ComplexType,
    namespace: &str,
    options: &Options,
) -> Result<TokenStream, Error> {
    let type_name = options.type_name(name);
    let struct_ident = ident(&type_name)?;
    let vis = options.visibility();
    let ns_doc = format!("XML namespace: {namespace}");

    let mut nested = TokenStream::new();
    let mut fields = Vec::new();

    for element in &complex_type.sequence {
        let field_ident = ident(&replace_reserved_words(&make_private(&element.name)))?;
        let ty = type_tokens(&field_type(element, &mut nested, namespace, options)?)?;
        fields.push(quote! { #vis #field_ident: #ty, });
    }

    for attribute in &complex_type.attributes {
        let field_ident = ident(&replace_attr_reserved_words(&make_private(&attribute.name)))?;
        let ty = match &attribute.ty {
            Some(ty) => to_rust_type(ty, !attribute.required),
            None => "String".to_owned(),
        };
        let ty = type_tokens(&ty)?;
        fields.push(quote! { #vis #field_ident: #ty, });
    }

    Ok(quote! {
        #[doc = #ns_doc]
        #[derive(Debug, Clone, Default)]
        #vis struct #struct_ident {
            #(#fields)*
        }

        #nested
    })
}

fn field_type(
    element: &Element,
    nested: &mut TokenStream,
    namespace: &str,
    options: &Options,
) -> Result<String, Error> {
    if let Some(inline) = &element.complex_type {
        // The anonymous type is named after the field that declares it.
        nested.extend(complex_type_decl(&element.name, inline, namespace, options)?);
        let name = options.type_name(&element.name);
        return Ok(if element.is_unbounded() {
            format!("Vec<{name}>")
        } else {
            format!("Option<{name}>")
        });
    }

    let declared = element.ty.as_deref().unwrap_or_default();
    let mapped = to_rust_type(declared, element.is_optional());
    Ok(if element.is_unbounded() {
        format!("Vec<{}>", strip_option(&mapped))
    } else {
        mapped
    })
}

#[cfg(test)]
mod tests {
    use wsdlgen_wsdl::types::Attribute;

    use super::*;

    fn options() -> Options {
        Options {
            package: "svc".to_owned(),
            export_all: true,
        }
    }

    fn render(tokens: TokenStream) -> String {
        prettyplease::unparse(&syn::parse2(tokens).unwrap())
    }

    #[test]
    fn sequences_and_attributes_become_fields() {
        let complex_type = ComplexType {
            name: "Trade".to_owned(),
            sequence: vec![
                Element {
                    name: "symbol".to_owned(),
                    ty: Some("xsd:string".to_owned()),
                    ..Element::default()
                },
                Element {
                    name: "price".to_owned(),
                    ty: Some("xsd:float".to_owned()),
                    nillable: true,
                    ..Element::default()
                },
            ],
            attributes: vec![Attribute {
                name: "string".to_owned(),
                ty: Some("xsd:string".to_owned()),
                required: true,
            }],
        };

        let code = render(complex_type_decl(&complex_type.name, &complex_type, "urn:x", &options()).unwrap());
        assert!(code.contains("pub struct Trade"));
        assert!(code.contains("pub symbol: String"));
        assert!(code.contains("pub price: Option<f32>"));
        assert!(code.contains("pub astring: String"));
        assert!(code.contains("XML namespace: urn:x"));
    }

    #[test]
    fn repeated_elements_become_vectors() {
        let complex_type = ComplexType {
            name: "Batch".to_owned(),
            sequence: vec![Element {
                name: "entry".to_owned(),
                ty: Some("tns:Entry".to_owned()),
                max_occurs: Some("unbounded".to_owned()),
                ..Element::default()
            }],
            attributes: vec![],
        };

        let code = render(complex_type_decl(&complex_type.name, &complex_type, "urn:x", &options()).unwrap());
        assert!(code.contains("pub entry: Vec<Entry>"));
    }

    #[test]
    fn anonymous_inline_types_are_named_after_their_element() {
        let complex_type = ComplexType {
            name: "Outer".to_owned(),
            sequence: vec![Element {
                name: "detail".to_owned(),
                complex_type: Some(Box::new(ComplexType {
                    name: String::new(),
                    sequence: vec![Element {
                        name: "note".to_owned(),
                        ty: Some("xsd:string".to_owned()),
                        ..Element::default()
                    }],
                    attributes: vec![],
                })),
                ..Element::default()
            }],
            attributes: vec![],
        };

        let code = render(complex_type_decl(&complex_type.name, &complex_type, "urn:x", &options()).unwrap());
        assert!(code.contains("pub detail: Option<Detail>"));
        assert!(code.contains("pub struct Detail"));
        assert!(code.contains("pub note: String"));
    }

    #[test]
    fn private_mode_drops_pub_and_keeps_casing() {
        let opts = Options {
            package: "svc".to_owned(),
            export_all: false,
        };
        let complex_type = ComplexType {
            name: "trade".to_owned(),
            sequence: vec![],
            attributes: vec![],
        };

        let code = render(complex_type_decl(&complex_type.name, &complex_type, "urn:x", &opts).unwrap());
        assert!(code.contains("struct trade"));
        assert!(!code.contains("pub struct"));
    }

    #[test]
    fn reserved_field_names_are_escaped() {
        let complex_type = ComplexType {
            name: "Keywords".to_owned(),
            sequence: vec![Element {
                name: "Type".to_owned(),
                ty: Some("xsd:string".to_owned()),
                ..Element::default()
            }],
            attributes: vec![],
        };

        let code = render(complex_type_decl(&complex_type.name, &complex_type, "urn:x", &options()).unwrap());
        assert!(code.contains("pub type_: String"));
    }
}
