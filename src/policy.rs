//! The frozen result of a solve: a query-only policy and value table.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Result, cache::CacheStats, env::Environment};

/// Diagnostics for a completed solve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SolveSummary {
    /// Number of sweeps executed
    pub sweeps: usize,
    /// Delta of the final sweep (≤ the convergence threshold)
    pub final_delta: f64,
    /// Per-sweep delta history, in sweep order
    pub deltas: Vec<f64>,
}

/// Converged policy and value function for an [`Environment`].
///
/// Produced exclusively by [`crate::Solver::solve`], after the convergence
/// loop has finished; there is no way to observe a partially-solved table.
/// All queries are O(1) and side-effect free.
pub struct Policy<E: Environment> {
    values: HashMap<E::State, f64>,
    actions: HashMap<E::State, E::Action>,
    summary: SolveSummary,
    cache_stats: CacheStats,
}

impl<E: Environment> Policy<E> {
    pub(crate) fn new(
        values: HashMap<E::State, f64>,
        actions: HashMap<E::State, E::Action>,
        summary: SolveSummary,
        cache_stats: CacheStats,
    ) -> Self {
        Policy {
            values,
            actions,
            summary,
            cache_stats,
        }
    }

    /// Optimal action for `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownState`] if the state was not part of
    /// the enumerated state space.
    pub fn action_for(&self, state: &E::State) -> Result<&E::Action> {
        self.actions
            .get(state)
            .ok_or_else(|| crate::Error::UnknownState {
                state: format!("{state:?}"),
            })
    }

    /// Converged value estimate V(s) for `state`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::UnknownState`] if the state was not part of
    /// the enumerated state space.
    pub fn value_of(&self, state: &E::State) -> Result<f64> {
        self.values
            .get(state)
            .copied()
            .ok_or_else(|| crate::Error::UnknownState {
                state: format!("{state:?}"),
            })
    }

    /// Number of states covered by the policy.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Whether the policy covers no states (never true for a solved policy).
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Diagnostics from the convergence loop.
    pub fn summary(&self) -> &SolveSummary {
        &self.summary
    }

    /// Transition-cache counters accumulated during the solve.
    pub fn cache_stats(&self) -> CacheStats {
        self.cache_stats
    }
}

// Manual impls: the derives would demand `E: Debug + Clone`, but only the
// associated State and Action types appear in the fields, and the
// Environment trait already bounds those.
impl<E: Environment> fmt::Debug for Policy<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("values", &self.values)
            .field("actions", &self.actions)
            .field("summary", &self.summary)
            .field("cache_stats", &self.cache_stats)
            .finish()
    }
}

impl<E: Environment> Clone for Policy<E> {
    fn clone(&self) -> Self {
        Policy {
            values: self.values.clone(),
            actions: self.actions.clone(),
            summary: self.summary.clone(),
            cache_stats: self.cache_stats,
        }
    }
}
