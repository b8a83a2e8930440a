//! # Engine Module
//!
//! The placement engine: validated run parameters in, a complete set of mutually
//! separated positions out.
//!
//! ## Overview
//!
//! Placement is sequential rejection sampling. Each new atom is drawn uniformly inside the
//! domain's bounding cell, corrected into the domain shape, and tested against every
//! accepted atom under the domain's minimum-image metric. The engine tracks the longest
//! run of consecutive rejections and gives up with a dedicated error once a configurable
//! ceiling is reached, so an over-full domain fails instead of hanging.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Parameter ranges, the builder and the sampling knobs
//! - **Placement** ([`placement`]) - The rejection sampler and its neighbor-search strategies
//! - **State Tracking** ([`state`]) - Placement outcome and rejection counters
//! - **Progress Monitoring** ([`progress`]) - Phase and per-atom progress events
//! - **Cancellation** ([`cancel`]) - Cooperative stop flag polled between acceptances
//! - **Error Handling** ([`error`]) - Engine-specific error types and error propagation

pub mod cancel;
pub(crate) mod cell_list;
pub mod config;
pub mod error;
pub mod placement;
pub mod progress;
pub mod state;
