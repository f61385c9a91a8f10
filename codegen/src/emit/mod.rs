//! Synthesis of the generated source, one artifact per submodule.

mod header;
mod operations;
mod server;
mod types;

pub(crate) use header::{header, raw_wsdl, server_header, soap_glue};
pub(crate) use operations::operations;
pub(crate) use server::server;
pub(crate) use types::types;

use proc_macro2::{Ident, TokenStream};
use quote::{format_ident, quote};

use crate::error::Error;

/// Builds an identifier from an already-sanitized name, rejecting
/// anything the sanitizer could not rescue (empty names, leading digits).
pub(crate) fn ident(name: &str) -> Result<Ident, Error> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_alphabetic() || first == '_')
                && chars.all(|c| c.is_alphanumeric() || c == '_')
        }
        None => false,
    };

    if !valid {
        return Err(Error::InvalidIdentifier(name.to_owned()));
    }
    Ok(format_ident!("{}", name))
}

/// Parses a rendered Rust type (possibly generic, such as
/// `Option<Vec<u8>>`) into tokens.
pub(crate) fn type_tokens(rust_type: &str) -> Result<TokenStream, Error> {
    syn::parse_str::<syn::Type>(rust_type)
        .map(|ty| quote!(#ty))
        .map_err(|_| Error::InvalidType(rust_type.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idents_are_validated() {
        assert!(ident("GetPrice").is_ok());
        assert!(ident("_hidden").is_ok());
        assert!(ident("").is_err());
        assert!(ident("1bad").is_err());
        assert!(ident("no spaces").is_err());
    }

    #[test]
    fn generic_types_parse() {
        assert!(type_tokens("Option<Vec<u8>>").is_ok());
        assert!(type_tokens("not a type!").is_err());
    }
}
