//! Emission of client call stubs, one client per port type.

use proc_macro2::TokenStream;
use quote::quote;
use wsdlgen_wsdl::types::{Operation, PortType, Wsdl};

use crate::error::Error;
use crate::generator::Options;
use crate::lookup::{find_service_address, find_soap_action, find_type};
use crate::naming::{make_private, make_public, replace_reserved_words};

use super::{ident, type_tokens};

pub(crate) fn operations(wsdl: &Wsdl, options: &Options) -> Result<TokenStream, Error> {
    let mut out = TokenStream::new();
    for port_type in &wsdl.port_types {
        out.extend(port_type_client(wsdl, port_type, options)?);
    }
    Ok(out)
}

fn port_type_client(
    wsdl: &Wsdl,
    port_type: &PortType,
    options: &Options,
) -> Result<TokenStream, Error> {
    let client_ident = ident(&options.type_name(&port_type.name))?;
    let vis = options.visibility();

    // Empty when no service exposes a port under the port type's name;
    // callers then pass an explicit address.
    let address = find_service_address(wsdl, &port_type.name);

    let mut methods = Vec::new();
    for operation in &port_type.operations {
        methods.push(operation_method(wsdl, port_type, operation)?);
    }

    Ok(quote! {
        #vis struct #client_ident {
            client: soap::Client,
        }

        impl #client_ident {
            pub const DEFAULT_ADDRESS: &'static str = #address;

            pub fn new(address: &str) -> Self {
                Self {
                    client: soap::Client::new(address),
                }
            }

            #(#methods)*
        }
    })
}

fn operation_method(
    wsdl: &Wsdl,
    port_type: &PortType,
    operation: &Operation,
) -> Result<TokenStream, Error> {
    let method = ident(&replace_reserved_words(&make_private(&operation.name)))?;
    let action = find_soap_action(wsdl, &operation.name, &port_type.name);

    let doc = operation
        .documentation
        .as_ref()
        .map(|text| quote! { #[doc = #text] });

    let request = message_type(wsdl, operation.input.as_deref())?;
    let response = message_type(wsdl, operation.output.as_deref())?;

    let param = request.as_ref().map(|ty| quote! { , request: &#ty });
    let argument = match &request {
        Some(_) => quote!(request),
        None => quote!(&()),
    };
    let returned = match &response {
        Some(ty) => quote!(#ty),
        None => quote!(()),
    };

    Ok(quote! {
        #doc
        pub fn #method(&self #param) -> Result<#returned, soap::Error> {
            self.client.call(#action, #argument)
        }
    })
}

/// Resolves an operation's message reference to the Rust type carried by
/// the wrapped request or response, if any.
fn message_type(wsdl: &Wsdl, message: Option<&str>) -> Result<Option<TokenStream>, Error> {
    let Some(message) = message else {
        return Ok(None);
    };

    let carried = find_type(wsdl, message);
    if carried.is_empty() {
        return Ok(None);
    }

    type_tokens(&make_public(&replace_reserved_words(&carried))).map(Some)
}
