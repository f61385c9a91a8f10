//! Binding and address lookups over the resolved document, used while
//! generating operation stubs and the server skeleton.

use tracing::warn;
use wsdlgen_wsdl::types::Wsdl;

use crate::naming::strip_ns;

/// Resolves a message reference to the name of the type it carries, per
/// document/literal wrapped conventions: the first part either declares a
/// type directly or references a wrapper element. Returns an empty string
/// when nothing matches.
pub fn find_type(wsdl: &Wsdl, message: &str) -> String {
    let message = strip_ns(message);

    for msg in &wsdl.messages {
        if msg.name != message {
            continue;
        }

        let Some(part) = msg.parts.first() else {
            // A part-less message usually means an HTTP or SOAP 1.2
            // binding, which are not supported.
            warn!(message = %msg.name, "message doesn't have any parts, ignoring message");
            continue;
        };

        if let Some(ty) = &part.ty {
            return strip_ns(ty).to_owned();
        }

        let Some(element) = &part.element else {
            continue;
        };
        let element = strip_ns(element);

        for schema in &wsdl.schemas {
            for el in &schema.elements {
                if el.name.eq_ignore_ascii_case(element) {
                    return match &el.ty {
                        Some(ty) => strip_ns(ty).to_owned(),
                        None => el.name.clone(),
                    };
                }
            }
        }
    }

    String::new()
}

/// Returns the SOAP action bound to `operation` on the binding for
/// `port_type`, or an empty string when no binding matches.
pub fn find_soap_action(wsdl: &Wsdl, operation: &str, port_type: &str) -> String {
    for binding in &wsdl.bindings {
        if !strip_ns(&binding.ty).eq_ignore_ascii_case(port_type) {
            continue;
        }

        for op in &binding.operations {
            if op.name == operation {
                return op.soap_action.clone();
            }
        }
    }

    String::new()
}

/// Returns the endpoint address of the named port, or an empty string
/// when no service declares it.
pub fn find_service_address(wsdl: &Wsdl, port: &str) -> String {
    for service in &wsdl.services {
        for p in &service.ports {
            if p.name == port {
                return p.location.clone();
            }
        }
    }

    String::new()
}
