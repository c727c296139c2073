//! Memoization layer over the environment's transition-model query.
//!
//! The environment's answer for a fixed (action, state) pair is pure and
//! deterministic, so it is computed once and stored for the lifetime of the
//! solve. There is no eviction: the cache grows to at most |actions| × |states|
//! entries.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    env::{Environment, Transition},
};

/// Hit/miss counters for the transition cache.
///
/// The miss count equals the number of distinct environment invocations, which
/// is how tests verify that the memoization is transparent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Lookups answered from the cache
    pub hits: u64,
    /// Lookups that invoked the environment
    pub misses: u64,
    /// Resident entries
    pub entries: usize,
}

/// Transition cache keyed by (action, state).
#[derive(Debug)]
pub struct TransitionCache<E: Environment> {
    entries: HashMap<(E::Action, E::State), Transition<E::State>>,
    hits: u64,
    misses: u64,
}

impl<E: Environment> TransitionCache<E> {
    /// Create an empty cache.
    pub fn new() -> Self {
        TransitionCache {
            entries: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    /// Look up the transition result for (action, state), querying the
    /// environment on first use.
    ///
    /// The environment's answer is validated before it is admitted, so every
    /// cached entry satisfies the transition invariants.
    ///
    /// # Errors
    ///
    /// Propagates environment errors and transition validation failures.
    pub fn lookup(
        &mut self,
        env: &E,
        action: &E::Action,
        state: &E::State,
    ) -> Result<&Transition<E::State>> {
        let key = (action.clone(), state.clone());
        if !self.entries.contains_key(&key) {
            let transition = env.next_states(action, state)?;
            transition.validate()?;
            self.entries.insert(key.clone(), transition);
            self.misses += 1;
        } else {
            self.hits += 1;
        }
        Ok(self
            .entries
            .get(&key)
            .expect("entry was just inserted or already present"))
    }

    /// Current counters.
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            entries: self.entries.len(),
        }
    }
}

impl<E: Environment> Default for TransitionCache<E> {
    fn default() -> Self {
        Self::new()
    }
}
