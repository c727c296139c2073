//! Environment port - the external collaborator that defines the MDP.
//!
//! The solver never inspects state or action internals; it only needs them to
//! be hashable keys with a stable ordering for the state sweep. Everything
//! game-specific (dice semantics, scoring, legality) lives behind this trait.

use std::fmt::Debug;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::Result;

/// Sum tolerance when checking that a transition distribution is normalized.
const PROBABILITY_TOLERANCE: f64 = 1e-9;

/// One-step transition model answer for a fixed (action, state) pair.
///
/// `next_states` and `probabilities` are positionally aligned. For a terminal
/// transition the only reachable "next state" is the queried state itself with
/// probability 1, and its value comes from [`Environment::final_score`] rather
/// than the value table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transition<S> {
    /// States reachable in one step
    pub next_states: Vec<S>,
    /// Whether the action ends the decision process
    pub is_terminal: bool,
    /// Immediate reward for taking the action
    pub reward: f64,
    /// Probability of reaching each next state, aligned with `next_states`
    pub probabilities: Vec<f64>,
}

impl<S> Transition<S> {
    /// Create a non-terminal transition.
    pub fn new(next_states: Vec<S>, probabilities: Vec<f64>, reward: f64) -> Self {
        Transition {
            next_states,
            is_terminal: false,
            reward,
            probabilities,
        }
    }

    /// Create a terminal transition: the process ends, deterministically
    /// remaining in `state`.
    pub fn terminal(state: S, reward: f64) -> Self {
        Transition {
            next_states: vec![state],
            is_terminal: true,
            reward,
            probabilities: vec![1.0],
        }
    }

    /// Iterate over (next state, probability) outcomes.
    pub fn outcomes(&self) -> impl Iterator<Item = (&S, f64)> {
        self.next_states
            .iter()
            .zip(self.probabilities.iter().copied())
    }

    /// Check the structural invariants of a transition result.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::LengthMismatch`] if the state and probability
    /// collections disagree in length, or
    /// [`crate::Error::UnnormalizedDistribution`] if a non-terminal
    /// distribution does not sum to 1.
    pub fn validate(&self) -> Result<()> {
        if self.next_states.len() != self.probabilities.len() {
            return Err(crate::Error::LengthMismatch {
                states: self.next_states.len(),
                probabilities: self.probabilities.len(),
            });
        }
        if !self.is_terminal {
            let sum: f64 = self.probabilities.iter().sum();
            if !sum.is_finite() || (sum - 1.0).abs() > PROBABILITY_TOLERANCE {
                return Err(crate::Error::UnnormalizedDistribution { sum });
            }
        }
        Ok(())
    }
}

/// The finite MDP the solver operates on.
///
/// Implementations must keep `next_states` pure: deterministic for fixed
/// inputs and free of observable side effects, since the solver memoizes its
/// answers for the lifetime of a solve.
pub trait Environment {
    /// Opaque state key. `Ord` gives the solver a stable sweep order.
    type State: Clone + Eq + Hash + Ord + Debug;
    /// Opaque action key.
    type Action: Clone + Eq + Hash + Debug;

    /// Enumerate the full reachable state space.
    fn states(&self) -> Vec<Self::State>;

    /// Enumerate the action collection, in a fixed order. By convention the
    /// last action is the terminal one.
    fn actions(&self) -> Vec<Self::Action>;

    /// One-step transition model for (action, state).
    ///
    /// # Errors
    ///
    /// Environment failures propagate out of the solve unmodified; there is
    /// no partial-result contract.
    fn next_states(
        &self,
        action: &Self::Action,
        state: &Self::State,
    ) -> Result<Transition<Self::State>>;

    /// Terminal value of a state under the terminal action.
    fn final_score(&self, state: &Self::State) -> f64;
}

impl<E: Environment> Environment for &E {
    type State = E::State;
    type Action = E::Action;

    fn states(&self) -> Vec<Self::State> {
        (**self).states()
    }

    fn actions(&self) -> Vec<Self::Action> {
        (**self).actions()
    }

    fn next_states(
        &self,
        action: &Self::Action,
        state: &Self::State,
    ) -> Result<Transition<Self::State>> {
        (**self).next_states(action, state)
    }

    fn final_score(&self, state: &Self::State) -> f64 {
        (**self).final_score(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_transition_shape() {
        let transition = Transition::terminal("s", 0.0);
        assert!(transition.is_terminal);
        assert_eq!(transition.next_states, vec!["s"]);
        assert_eq!(transition.probabilities, vec![1.0]);
        assert!(transition.validate().is_ok());
    }

    #[test]
    fn test_outcomes_alignment() {
        let transition = Transition::new(vec!["a", "b"], vec![0.25, 0.75], -1.0);
        let outcomes: Vec<_> = transition.outcomes().collect();
        assert_eq!(outcomes, vec![(&"a", 0.25), (&"b", 0.75)]);
    }

    #[test]
    fn test_validate_length_mismatch() {
        let transition = Transition::new(vec!["a", "b"], vec![1.0], -1.0);
        assert!(matches!(
            transition.validate(),
            Err(crate::Error::LengthMismatch {
                states: 2,
                probabilities: 1
            })
        ));
    }

    #[test]
    fn test_validate_unnormalized() {
        let transition = Transition::new(vec!["a", "b"], vec![0.5, 0.2], -1.0);
        assert!(matches!(
            transition.validate(),
            Err(crate::Error::UnnormalizedDistribution { .. })
        ));
    }

    #[test]
    fn test_validate_tolerates_rounding() {
        let third = 1.0 / 3.0;
        let transition = Transition::new(vec!["a", "b", "c"], vec![third, third, third], -1.0);
        assert!(transition.validate().is_ok());
    }

    #[test]
    fn test_terminal_distribution_not_checked() {
        // Terminal transitions are constructed with probability 1 by the
        // helper, but a hand-rolled one is only checked for alignment.
        let transition = Transition {
            next_states: vec!["s"],
            is_terminal: true,
            reward: 0.0,
            probabilities: vec![0.0],
        };
        assert!(transition.validate().is_ok());
    }
}
