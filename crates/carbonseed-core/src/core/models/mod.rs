//! Data models shared by every layer: the simulation domain and the atom set under
//! construction.

pub mod atoms;
pub mod domain;
