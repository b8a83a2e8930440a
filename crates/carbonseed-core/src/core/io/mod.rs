//! Provides output functionality for structured coordinate files.
//!
//! A finished [`AtomSet`](crate::core::models::atoms::AtomSet) is written as a
//! POSCAR-style file: a title, a scale factor, three lattice vectors, the species and
//! count lines, the coordinate mode and one fractional coordinate line per atom. The
//! [`naming`] module owns the title and file name conventions.

pub mod naming;
pub mod poscar;
pub mod traits;
