//! Tabular value-iteration solver for finite Markov decision processes.
//!
//! This crate provides:
//! - An [`Environment`] port describing a finite MDP: state and action
//!   enumeration, a one-step transition model, and terminal scoring
//! - A memoizing [`cache::TransitionCache`] over transition queries
//! - A one-shot [`Solver`] that runs Bellman-optimality sweeps to
//!   convergence and freezes into a query-only [`Policy`]
//! - A [`SweepObserver`] port for composable progress reporting
//!
//! The solve is single-threaded and deterministic: states are swept in a
//! sorted order and value updates are applied in place, so repeated runs on
//! the same environment produce identical policies.

pub mod cache;
pub mod env;
pub mod error;
pub mod observer;
pub mod policy;
pub mod solver;
pub mod types;

pub use cache::CacheStats;
pub use env::{Environment, Transition};
pub use error::{Error, Result};
pub use observer::{LogObserver, SweepObserver};
pub use policy::{Policy, SolveSummary};
pub use solver::{Solver, SolverConfig};
pub use types::{Discount, Threshold};
