//! The in-memory model of a parsed WSDL document and its XSD schemas.
//!
//! Everything here is plain owned data. The collision resolver in the
//! codegen crate produces rewritten copies of [`Schema`]; nothing mutates
//! a document after resolution has finished.

use std::collections::HashMap;

#[derive(Default, Debug, Clone)]
pub struct Wsdl {
    pub target_namespace: String,
    pub schemas: Vec<Schema>,
    pub messages: Vec<Message>,
    pub port_types: Vec<PortType>,
    pub bindings: Vec<Binding>,
    pub services: Vec<Service>,
}

#[derive(Default, Debug, Clone)]
pub struct Schema {
    pub target_namespace: String,
    /// Prefix to namespace-URI bindings in scope at the schema element.
    /// The default namespace is keyed by the empty string.
    pub namespaces: HashMap<String, String>,
    pub imports: Vec<Import>,
    pub includes: Vec<Include>,
    pub elements: Vec<Element>,
    pub complex_types: Vec<ComplexType>,
    pub simple_types: Vec<SimpleType>,
}

#[derive(Debug, Clone)]
pub struct Import {
    pub namespace: String,
    /// Some service descriptions import a namespace without saying where
    /// its schema lives; those imports are skipped during resolution.
    pub schema_location: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Include {
    pub schema_location: String,
}

#[derive(Default, Debug, Clone)]
pub struct Element {
    pub name: String,
    /// Declared type reference, kept prefix-qualified as written
    /// (for example `xsd:string` or `tns:Item`).
    pub ty: Option<String>,
    pub nillable: bool,
    pub min_occurs: Option<String>,
    pub max_occurs: Option<String>,
    /// Anonymous complex type declared inline under this element.
    pub complex_type: Option<Box<ComplexType>>,
}

impl Element {
    /// True when the element may be absent or carry no value.
    pub fn is_optional(&self) -> bool {
        self.nillable || self.min_occurs.as_deref() == Some("0")
    }

    pub fn is_unbounded(&self) -> bool {
        self.max_occurs.as_deref() == Some("unbounded")
    }
}

#[derive(Default, Debug, Clone)]
pub struct ComplexType {
    pub name: String,
    pub sequence: Vec<Element>,
    pub attributes: Vec<Attribute>,
}

#[derive(Default, Debug, Clone)]
pub struct Attribute {
    pub name: String,
    pub ty: Option<String>,
    pub required: bool,
}

#[derive(Default, Debug, Clone)]
pub struct SimpleType {
    pub name: String,
    /// Restriction base, prefix-qualified as written.
    pub base: Option<String>,
}

#[derive(Default, Debug, Clone)]
pub struct Message {
    pub name: String,
    pub parts: Vec<Part>,
}

#[derive(Default, Debug, Clone)]
pub struct Part {
    pub name: String,
    pub element: Option<String>,
    pub ty: Option<String>,
}

#[derive(Default, Debug, Clone)]
pub struct PortType {
    pub name: String,
    pub operations: Vec<Operation>,
}

#[derive(Default, Debug, Clone)]
pub struct Operation {
    pub name: String,
    pub documentation: Option<String>,
    pub input: Option<String>,
    pub output: Option<String>,
}

#[derive(Default, Debug, Clone)]
pub struct Binding {
    pub name: String,
    /// Port type reference, prefix-qualified as written.
    pub ty: String,
    pub operations: Vec<BindingOperation>,
}

#[derive(Default, Debug, Clone)]
pub struct BindingOperation {
    pub name: String,
    pub soap_action: String,
}

#[derive(Default, Debug, Clone)]
pub struct Service {
    pub name: String,
    pub ports: Vec<Port>,
}

#[derive(Default, Debug, Clone)]
pub struct Port {
    pub name: String,
    pub binding: String,
    /// SOAP address location, the service endpoint URL.
    pub location: String,
}
