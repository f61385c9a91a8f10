//! Recursive resolution of external XSD imports and includes.
//!
//! Every referenced schema is fetched and parsed exactly once; the
//! seen-set of absolute locations is what terminates import cycles.

use std::collections::HashSet;

use tracing::warn;

use crate::error::Error;
use crate::fetch::Fetcher;
use crate::location::Location;
use crate::parser;
use crate::types::{Schema, Wsdl};

#[derive(Default)]
pub struct Resolver {
    resolved: HashSet<String>,
}

impl Resolver {
    /// Walks the import/include declarations of every schema embedded in
    /// `wsdl`, appending each externally referenced schema to
    /// `wsdl.schemas`. Referenced schemas are resolved depth-first, so a
    /// schema's own externals are merged before the schema itself.
    pub fn resolve(
        &mut self,
        fetcher: &Fetcher,
        wsdl: &mut Wsdl,
        base: &Location,
    ) -> Result<(), Error> {
        let mut fetched = Vec::new();
        for schema in &wsdl.schemas {
            self.resolve_schema(fetcher, schema, base, &mut fetched)?;
        }
        wsdl.schemas.extend(fetched);
        Ok(())
    }

    fn resolve_schema(
        &mut self,
        fetcher: &Fetcher,
        schema: &Schema,
        base: &Location,
        fetched: &mut Vec<Schema>,
    ) -> Result<(), Error> {
        for import in &schema.imports {
            let Some(reference) = &import.schema_location else {
                warn!(
                    namespace = %import.namespace,
                    "don't know where to find XSD for namespace, skipping import"
                );
                continue;
            };
            self.download(fetcher, base, reference, fetched)?;
        }

        for include in &schema.includes {
            self.download(fetcher, base, &include.schema_location, fetched)?;
        }

        Ok(())
    }

    fn download(
        &mut self,
        fetcher: &Fetcher,
        base: &Location,
        reference: &str,
        fetched: &mut Vec<Schema>,
    ) -> Result<(), Error> {
        let location = base.join(reference)?;
        if !self.resolved.insert(location.to_string()) {
            return Ok(());
        }

        let data = fetcher.fetch(&location)?;
        let schema = parser::parse_schema_document(&data)?;

        if !schema.imports.is_empty() || !schema.includes.is_empty() {
            self.resolve_schema(fetcher, &schema, &location, fetched)?;
        }

        fetched.push(schema);
        Ok(())
    }
}
