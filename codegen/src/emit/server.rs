//! Emission of the server skeleton: one handler trait per port type and
//! a dispatch function routing on SOAP action.

use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use wsdlgen_wsdl::types::{Operation, PortType, Wsdl};

use crate::error::Error;
use crate::generator::Options;
use crate::lookup::{find_soap_action, find_type};
use crate::naming::{make_private, make_public, replace_reserved_words};
use crate::traverser;

use super::{ident, type_tokens};

pub(crate) fn server(wsdl: &Wsdl, options: &Options) -> Result<TokenStream, Error> {
    let mut out = TokenStream::new();
    for port_type in &wsdl.port_types {
        out.extend(port_type_server(wsdl, port_type, options)?);
    }
    Ok(out)
}

fn port_type_server(
    wsdl: &Wsdl,
    port_type: &PortType,
    options: &Options,
) -> Result<TokenStream, Error> {
    let trait_ident = ident(&options.type_name(&port_type.name))?;
    let dispatch_ident = format_ident!("dispatch_{}", snake(&port_type.name));
    let vis = options.visibility();

    let mut methods = Vec::new();
    let mut arms = Vec::new();

    for operation in &port_type.operations {
        let (method, arm) = operation_parts(wsdl, port_type, operation)?;
        methods.push(method);
        arms.push(arm);
    }

    Ok(quote! {
        #vis trait #trait_ident {
            #(#methods)*
        }

        /// Routes a request body to the handler method bound to the SOAP
        /// action, returning `None` for actions this port does not serve.
        #vis fn #dispatch_ident(
            handler: &dyn #trait_ident,
            soap_action: &str,
            body: &[u8],
        ) -> Option<Vec<u8>> {
            match soap_action {
                #(#arms)*
                _ => None,
            }
        }
    })
}

fn operation_parts(
    wsdl: &Wsdl,
    port_type: &PortType,
    operation: &Operation,
) -> Result<(TokenStream, TokenStream), Error> {
    let method = ident(&replace_reserved_words(&make_private(&operation.name)))?;
    let action = find_soap_action(wsdl, &operation.name, &port_type.name);

    let request = message_type(wsdl, operation.input.as_deref());
    let response = message_type(wsdl, operation.output.as_deref());

    let param = match &request {
        Some(name) => {
            let ty = type_tokens(name)?;
            Some(quote! { , request: #ty })
        }
        None => None,
    };
    let returned = match &response {
        Some(name) => type_tokens(name)?,
        None => quote!(()),
    };

    let signature = quote! {
        fn #method(&self #param) -> #returned;
    };

    // The request wrapper may arrive under the element name it was
    // declared with rather than the type name.
    let invocation = match &request {
        Some(name) => {
            let element = traverser::find_name_by_type(&wsdl.schemas, name)
                .unwrap_or_else(|| name.clone());
            quote! {
                let request = soap::decode(body, #element)?;
                Some(soap::encode(&handler.#method(request)))
            }
        }
        None => quote! {
            let _ = body;
            Some(soap::encode(&handler.#method()))
        },
    };

    let arm = quote! {
        #action => {
            #invocation
        }
    };

    Ok((signature, arm))
}

fn message_type(wsdl: &Wsdl, message: Option<&str>) -> Option<String> {
    let carried = find_type(wsdl, message?);
    if carried.is_empty() {
        return None;
    }
    Some(make_public(&replace_reserved_words(&carried)))
}

fn snake(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for (i, c) in name.chars().enumerate() {
        if c.is_uppercase() {
            if i != 0 {
                out.push('_');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}
