//! Rust source generation for parsed WSDL documents: typed structs for
//! the schema, call stubs per port type, and a server dispatch skeleton.

pub mod collisions;
pub mod error;
pub mod generator;
pub mod lookup;
pub mod naming;
pub mod traverser;

mod emit;

pub use generator::{generate, Artifacts, Options};
