//! roxmltree-based parsing of WSDL definitions and XSD schemas into the
//! document model.

use roxmltree::{Document, Node};

use crate::error::Error;
use crate::types::{
    Attribute, Binding, BindingOperation, ComplexType, Element, Import, Include, Message,
    Operation, Part, Port, PortType, Schema, Service, SimpleType, Wsdl,
};

const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
const WSDL_NS: &str = "http://schemas.xmlsoap.org/wsdl/";
const SOAP_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap/";

fn is_named(node: &Node, namespace: &str, name: &str) -> bool {
    node.is_element()
        && node.tag_name().name() == name
        && node.tag_name().namespace() == Some(namespace)
}

fn element_children<'a, 'd: 'a>(node: &'a Node<'a, 'd>) -> impl Iterator<Item = Node<'a, 'd>> {
    node.children().filter(Node::is_element)
}

fn required_attribute(
    node: &Node,
    element: &'static str,
    attribute: &'static str,
) -> Result<String, Error> {
    node.attribute(attribute)
        .map(ToOwned::to_owned)
        .ok_or(Error::MissingAttribute { element, attribute })
}

/// Parses a complete WSDL document.
pub fn parse_wsdl(data: &[u8]) -> Result<Wsdl, Error> {
    let text = std::str::from_utf8(data)?;
    let doc = Document::parse(text)?;

    let root = doc.root();
    let definitions = element_children(&root)
        .find(|n| is_named(n, WSDL_NS, "definitions"))
        .ok_or(Error::MissingElement("definitions"))?;

    let mut wsdl = Wsdl {
        target_namespace: definitions
            .attribute("targetNamespace")
            .unwrap_or_default()
            .to_owned(),
        ..Wsdl::default()
    };

    for child in element_children(&definitions) {
        if !child.tag_name().namespace().map_or(false, |ns| ns == WSDL_NS) {
            continue;
        }
        match child.tag_name().name() {
            "types" => {
                for schema in element_children(&child).filter(|n| is_named(n, XSD_NS, "schema")) {
                    wsdl.schemas.push(parse_schema(&schema)?);
                }
            }
            "message" => wsdl.messages.push(parse_message(&child)?),
            "portType" => wsdl.port_types.push(parse_port_type(&child)?),
            "binding" => wsdl.bindings.push(parse_binding(&child)?),
            "service" => wsdl.services.push(parse_service(&child)?),
            _ => (),
        }
    }

    Ok(wsdl)
}

/// Parses a standalone XSD document, as fetched for an import or include.
pub fn parse_schema_document(data: &[u8]) -> Result<Schema, Error> {
    let text = std::str::from_utf8(data)?;
    let doc = Document::parse(text)?;

    let root = doc.root();
    let schema = element_children(&root)
        .find(|n| is_named(n, XSD_NS, "schema"))
        .ok_or(Error::MissingElement("schema"))?;

    parse_schema(&schema)
}

fn parse_schema(node: &Node) -> Result<Schema, Error> {
    let mut schema = Schema {
        target_namespace: node
            .attribute("targetNamespace")
            .unwrap_or_default()
            .to_owned(),
        ..Schema::default()
    };

    for ns in node.namespaces() {
        schema
            .namespaces
            .insert(ns.name().unwrap_or_default().to_owned(), ns.uri().to_owned());
    }

    for child in element_children(node) {
        if !child.tag_name().namespace().map_or(false, |ns| ns == XSD_NS) {
            continue;
        }
        match child.tag_name().name() {
            "import" => schema.imports.push(Import {
                namespace: child.attribute("namespace").unwrap_or_default().to_owned(),
                schema_location: child.attribute("schemaLocation").map(ToOwned::to_owned),
            }),
            "include" => schema.includes.push(Include {
                schema_location: required_attribute(&child, "include", "schemaLocation")?,
            }),
            "element" => schema.elements.push(parse_element(&child)?),
            "complexType" => schema.complex_types.push(parse_complex_type(&child)?),
            "simpleType" => schema.simple_types.push(parse_simple_type(&child)?),
            _ => (),
        }
    }

    Ok(schema)
}

fn parse_element(node: &Node) -> Result<Element, Error> {
    // An element may declare itself by `name` or point at another
    // top-level element by `ref`; the reference is kept as the entry's
    // type so the field resolves to the referenced declaration.
    let (name, ty) = match node.attribute("name") {
        Some(name) => (name.to_owned(), node.attribute("type").map(ToOwned::to_owned)),
        None => {
            let reference = node.attribute("ref").ok_or(Error::MissingAttribute {
                element: "element",
                attribute: "name",
            })?;
            let local = reference.rsplit(':').next().unwrap_or(reference);
            (local.to_owned(), Some(reference.to_owned()))
        }
    };

    let mut element = Element {
        name,
        ty,
        nillable: node.attribute("nillable") == Some("true"),
        min_occurs: node.attribute("minOccurs").map(ToOwned::to_owned),
        max_occurs: node.attribute("maxOccurs").map(ToOwned::to_owned),
        complex_type: None,
    };

    if let Some(inline) = element_children(node).find(|n| is_named(n, XSD_NS, "complexType")) {
        element.complex_type = Some(Box::new(parse_complex_type(&inline)?));
    }

    Ok(element)
}

fn parse_complex_type(node: &Node) -> Result<ComplexType, Error> {
    // Anonymous inline types have no name attribute.
    let mut complex_type = ComplexType {
        name: node.attribute("name").unwrap_or_default().to_owned(),
        ..ComplexType::default()
    };

    for child in element_children(node) {
        if is_named(&child, XSD_NS, "sequence") || is_named(&child, XSD_NS, "all") {
            for element in element_children(&child).filter(|n| is_named(n, XSD_NS, "element")) {
                complex_type.sequence.push(parse_element(&element)?);
            }
        } else if is_named(&child, XSD_NS, "attribute") {
            complex_type.attributes.push(parse_attribute(&child)?);
        }
    }

    Ok(complex_type)
}

fn parse_attribute(node: &Node) -> Result<Attribute, Error> {
    Ok(Attribute {
        name: required_attribute(node, "attribute", "name")?,
        ty: node.attribute("type").map(ToOwned::to_owned),
        required: node.attribute("use") == Some("required"),
    })
}

fn parse_simple_type(node: &Node) -> Result<SimpleType, Error> {
    let base = element_children(node)
        .find(|n| is_named(n, XSD_NS, "restriction"))
        .and_then(|restriction| restriction.attribute("base").map(ToOwned::to_owned));

    Ok(SimpleType {
        name: required_attribute(node, "simpleType", "name")?,
        base,
    })
}

fn parse_message(node: &Node) -> Result<Message, Error> {
    let mut message = Message {
        name: required_attribute(node, "message", "name")?,
        parts: Vec::new(),
    };

    for part in element_children(node).filter(|n| is_named(n, WSDL_NS, "part")) {
        message.parts.push(Part {
            name: required_attribute(&part, "part", "name")?,
            element: part.attribute("element").map(ToOwned::to_owned),
            ty: part.attribute("type").map(ToOwned::to_owned),
        });
    }

    Ok(message)
}

fn parse_port_type(node: &Node) -> Result<PortType, Error> {
    let mut port_type = PortType {
        name: required_attribute(node, "portType", "name")?,
        operations: Vec::new(),
    };

    for op in element_children(node).filter(|n| is_named(n, WSDL_NS, "operation")) {
        let mut operation = Operation {
            name: required_attribute(&op, "operation", "name")?,
            ..Operation::default()
        };

        for child in element_children(&op) {
            match child.tag_name().name() {
                "documentation" => {
                    operation.documentation = child.text().map(str::trim).map(ToOwned::to_owned)
                }
                "input" => operation.input = child.attribute("message").map(ToOwned::to_owned),
                "output" => operation.output = child.attribute("message").map(ToOwned::to_owned),
                _ => (),
            }
        }

        port_type.operations.push(operation);
    }

    Ok(port_type)
}

fn parse_binding(node: &Node) -> Result<Binding, Error> {
    let mut binding = Binding {
        name: required_attribute(node, "binding", "name")?,
        ty: required_attribute(node, "binding", "type")?,
        operations: Vec::new(),
    };

    for op in element_children(node).filter(|n| is_named(n, WSDL_NS, "operation")) {
        let soap_action = element_children(&op)
            .find(|n| is_named(n, SOAP_NS, "operation"))
            .and_then(|n| n.attribute("soapAction"))
            .unwrap_or_default()
            .to_owned();

        binding.operations.push(BindingOperation {
            name: required_attribute(&op, "operation", "name")?,
            soap_action,
        });
    }

    Ok(binding)
}

fn parse_service(node: &Node) -> Result<Service, Error> {
    let mut service = Service {
        name: required_attribute(node, "service", "name")?,
        ports: Vec::new(),
    };

    for port in element_children(node).filter(|n| is_named(n, WSDL_NS, "port")) {
        let location = element_children(&port)
            .find(|n| is_named(n, SOAP_NS, "address"))
            .and_then(|n| n.attribute("location"))
            .unwrap_or_default()
            .to_owned();

        service.ports.push(Port {
            name: required_attribute(&port, "port", "name")?,
            binding: required_attribute(&port, "port", "binding")?,
            location,
        });
    }

    Ok(service)
}
