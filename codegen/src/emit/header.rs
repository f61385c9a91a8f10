//! File-level preamble and the transport glue shared by every generated
//! client and server.

use proc_macro2::TokenStream;
use quote::quote;

/// Preamble for the client artifact. Generated names follow the schema's
/// casing, so the usual style lints are silenced up front.
pub(crate) fn header(package: &str) -> TokenStream {
    let doc = format!("Generated from a WSDL description for package `{package}`.");
    quote! {
        #![doc = #doc]
        #![allow(dead_code)]
        #![allow(non_snake_case)]
        #![allow(non_camel_case_types)]
    }
}

pub(crate) fn server_header(package: &str) -> TokenStream {
    let doc = format!("Generated server skeleton for package `{package}`.");
    quote! {
        #![doc = #doc]
        #![allow(dead_code)]
        #![allow(non_snake_case)]
        #![allow(non_camel_case_types)]
    }
}

/// Embeds the source description verbatim so a running server can answer
/// `?wsdl` requests without touching the filesystem.
pub(crate) fn raw_wsdl(raw: &[u8]) -> TokenStream {
    let text = String::from_utf8_lossy(raw);
    let text: &str = &text;
    quote! {
        pub const WSDL: &str = #text;
    }
}

/// Minimal SOAP 1.1 document/literal plumbing the generated stubs call
/// into. Serialization is left as a seam for the embedding application.
pub(crate) fn soap_glue() -> TokenStream {
    quote! {
        pub mod soap {
            #[derive(Debug)]
            pub enum Error {
                Transport(String),
                Envelope(String),
            }

            impl std::fmt::Display for Error {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    match self {
                        Error::Transport(message) => write!(f, "transport error: {message}"),
                        Error::Envelope(message) => write!(f, "envelope error: {message}"),
                    }
                }
            }

            impl std::error::Error for Error {}

            pub struct Client {
                endpoint: String,
            }

            impl Client {
                pub fn new(endpoint: &str) -> Self {
                    Self {
                        endpoint: endpoint.to_owned(),
                    }
                }

                pub fn endpoint(&self) -> &str {
                    &self.endpoint
                }

                pub fn call<Request, Response: Default>(
                    &self,
                    action: &str,
                    request: &Request,
                ) -> Result<Response, Error> {
                    let _ = (action, request);
                    Err(Error::Transport(format!(
                        "no transport configured for {}",
                        self.endpoint
                    )))
                }
            }

            pub fn decode<T: Default>(body: &[u8], element: &str) -> Option<T> {
                let _ = (body, element);
                Some(T::default())
            }

            pub fn encode<T>(value: &T) -> Vec<u8> {
                let _ = value;
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(tokens: TokenStream) -> String {
        prettyplease::unparse(&syn::parse2(tokens).unwrap())
    }

    #[test]
    fn headers_carry_lint_allowances() {
        let code = render(header("stock"));
        assert!(code.contains("Generated from a WSDL description for package `stock`."));
        assert!(code.contains("#![allow(non_snake_case)]"));

        let code = render(server_header("stock"));
        assert!(code.contains("Generated server skeleton for package `stock`."));
    }

    #[test]
    fn raw_wsdl_is_embedded_verbatim() {
        let code = render(raw_wsdl(b"<definitions/>"));
        assert!(code.contains("pub const WSDL: &str = \"<definitions/>\";"));
    }

    #[test]
    fn glue_module_parses() {
        let code = render(soap_glue());
        assert!(code.contains("pub mod soap"));
        assert!(code.contains("pub struct Client"));
    }
}
