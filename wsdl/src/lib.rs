//! Fetching, parsing, and resolution of WSDL 1.1 documents with embedded
//! or externally referenced XML Schema definitions.

pub mod error;
pub mod fetch;
pub mod location;
pub mod types;

mod parser;
mod resolver;

pub use fetch::Fetcher;
pub use location::Location;

/// A fully resolved document: the parsed model plus the raw bytes it was
/// built from (the raw text is embedded into generated server code).
#[derive(Debug, Clone)]
pub struct Document {
    pub wsdl: types::Wsdl,
    pub raw: Vec<u8>,
}

/// Fetches the document at `location`, parses it, and recursively merges
/// every externally referenced schema into it.
pub fn load(location: &Location, fetcher: &Fetcher) -> Result<Document, error::Error> {
    let raw = fetcher.fetch(location)?;
    let mut wsdl = parser::parse_wsdl(&raw)?;
    resolver::Resolver::default().resolve(fetcher, &mut wsdl, location)?;
    Ok(Document { wsdl, raw })
}

/// Parses WSDL bytes without resolving external references. External
/// schemas referenced by the result are left unfetched.
pub fn parse(data: &[u8]) -> Result<types::Wsdl, error::Error> {
    parser::parse_wsdl(data)
}
