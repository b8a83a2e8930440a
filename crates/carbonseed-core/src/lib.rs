//! # carbonseed Core Library
//!
//! Builds random, non-overlapping carbon coordinate sets used as starting
//! configurations for molecular-dynamics simulation of amorphous graphite
//! (periodic cuboid), multi-walled nanotubes (periodic cylinder) and multi-shell
//! fullerenes (padded sphere).
//!
//! ## Architectural Philosophy
//!
//! The library follows a three-layer architecture so that each concern can be tested
//! in isolation.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`SimulationDomain`, `AtomSet`),
//!   the pure geometry derivations, domain membership sampling, the minimum-image metric
//!   and coordinate file output.
//!
//! - **[`engine`]: The Logic Core.** The validated `PlacementConfig`, the error taxonomy,
//!   progress and cancellation plumbing, the cell-list neighbor index and the
//!   rejection-sampling `PlacementEngine` itself.
//!
//! - **[`workflows`]: The Public API.** Ties `engine` and `core` together: configuration in,
//!   a fully placed and serializable structure out.

pub mod core;
pub mod engine;
pub mod workflows;
