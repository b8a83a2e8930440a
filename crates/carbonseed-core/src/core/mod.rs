//! # Core Module
//!
//! The stateless foundation of carbonseed: how big a domain is, which points belong to it,
//! how far apart two points are under its periodic convention, and how a finished
//! coordinate set is written to disk.
//!
//! ## Architecture
//!
//! - **Data Models** ([`models`]) - The simulation domain variants and the append-only atom set
//! - **Domain Sizing** ([`geometry`]) - Box, radius and height derivations from mass and density
//! - **Shape Constraints** ([`membership`]) - Membership predicates and correcting resamples
//! - **Periodic Metric** ([`pbc`]) - Minimum-image displacements per domain
//! - **File Output** ([`io`]) - The POSCAR-style structured coordinate file and naming rules
//!
//! ## Units
//!
//! Lengths are in Ångström, densities in g/cm³ and masses in grams unless a name says
//! otherwise.

pub mod geometry;
pub mod io;
pub mod membership;
pub mod models;
pub mod pbc;
