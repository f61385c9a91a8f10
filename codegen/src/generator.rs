//! Orchestration: collision handling, concurrent artifact emission, and
//! final formatting of the generated source.

use std::sync::{Mutex, PoisonError};

use proc_macro2::TokenStream;
use quote::quote;
use tracing::{info, warn};
use wsdlgen_wsdl::types::Wsdl;
use wsdlgen_wsdl::Document;

use crate::collisions;
use crate::emit;
use crate::error::Error;
use crate::naming::{make_public, replace_reserved_words};
use crate::traverser;

/// Controls naming and visibility of the generated declarations.
pub struct Options {
    /// Module name baked into the generated files' documentation.
    pub package: String,

    /// When set, every declaration is `pub` and type names are
    /// capitalized; otherwise names keep the schema's casing and stay
    /// private to the generated module.
    pub export_all: bool,
}

impl Options {
    pub(crate) fn type_name(&self, raw: &str) -> String {
        if self.export_all {
            make_public(&replace_reserved_words(raw))
        } else {
            replace_reserved_words(raw)
        }
    }

    pub(crate) fn visibility(&self) -> TokenStream {
        if self.export_all {
            quote!(pub)
        } else {
            TokenStream::new()
        }
    }
}

/// The rendered output, ready to be written out as two source files.
#[derive(Debug)]
pub struct Artifacts {
    pub client: String,
    pub server: String,
}

/// Generates client and server source for a resolved document.
pub fn generate(document: &Document, options: &Options) -> Result<Artifacts, Error> {
    let (schemas, renames) = collisions::resolve(document.wsdl.schemas.clone());
    let schemas = traverser::apply_renames(schemas, &renames);

    if !renames.is_empty() {
        info!(count = renames.len(), "renamed colliding type declarations");
    }

    let wsdl = Wsdl {
        schemas,
        ..document.wsdl.clone()
    };

    // The three artifacts are independent once the renamed document is
    // built, so they are emitted concurrently. Each worker renders its
    // tokens to text before storing (`TokenStream` stays on its thread).
    // Results land in fixed slots and are inspected in a fixed order, so
    // the surfaced error does not depend on thread scheduling.
    let slots: Mutex<[Option<Result<String, Error>>; 3]> = Mutex::new([None, None, None]);

    std::thread::scope(|scope| {
        scope.spawn(|| {
            let result = emit::types(&wsdl, options).map(|tokens| tokens.to_string());
            store(&slots, 0, result);
        });
        scope.spawn(|| {
            let result = emit::operations(&wsdl, options).map(|tokens| tokens.to_string());
            store(&slots, 1, result);
        });
        scope.spawn(|| {
            let result = emit::server(&wsdl, options).map(|tokens| tokens.to_string());
            store(&slots, 2, result);
        });
    });

    let mut slots = slots
        .into_inner()
        .unwrap_or_else(PoisonError::into_inner);

    let mut take = |index: usize| -> Result<String, Error> {
        slots[index].take().unwrap_or_else(|| Ok(String::new()))
    };

    let types = take(0)?;
    let operations = take(1)?;
    let server = take(2)?;

    let client = format_artifact(&[
        emit::header(&options.package).to_string(),
        types.clone(),
        operations,
        emit::soap_glue().to_string(),
    ]);
    let server = format_artifact(&[
        emit::server_header(&options.package).to_string(),
        emit::raw_wsdl(&document.raw).to_string(),
        types,
        emit::soap_glue().to_string(),
        server,
    ]);

    Ok(Artifacts { client, server })
}

fn store(
    slots: &Mutex<[Option<Result<String, Error>>; 3]>,
    index: usize,
    result: Result<String, Error>,
) {
    let mut slots = slots.lock().unwrap_or_else(PoisonError::into_inner);
    slots[index] = Some(result);
}

/// Runs the merged artifact text through the formatter, falling back to
/// the unformatted text when it does not parse as a file.
fn format_artifact(parts: &[String]) -> String {
    let merged = parts
        .iter()
        .filter(|part| !part.is_empty())
        .cloned()
        .collect::<Vec<_>>()
        .join("\n");

    match syn::parse_str::<syn::File>(&merged) {
        Ok(file) => prettyplease::unparse(&file),
        Err(error) => {
            warn!(%error, "generated source failed to format, emitting unformatted");
            merged
        }
    }
}
