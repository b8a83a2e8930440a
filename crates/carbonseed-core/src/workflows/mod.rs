//! # Workflows Module
//!
//! High-level entry points that run a whole structure generation: validate the
//! configuration, derive the domain, seed the generator, place every atom and hand back
//! a result that knows how to serialize itself.
//!
//! - **Generation Workflow** ([`generate`]) - Configuration in, [`generate::GeneratedStructure`] out.

pub mod generate;
