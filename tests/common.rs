//! Common test environments for the solver test suite.
//!
//! These are deliberately tiny MDPs with hand-checkable optimal policies.

use std::cell::Cell;

use bellman::{Environment, Result, Transition};

/// The two-state reroll/hold environment.
///
/// States A and B. `reroll` (reward −1) deterministically swaps the state;
/// `hold` is terminal with final scores 0 (A) and 10 (B). With γ = 0.9 the
/// optimal policy holds at B (value 9.0) and rerolls at A (value 7.1).
pub struct RerollHold;

impl Environment for RerollHold {
    type State = &'static str;
    type Action = &'static str;

    fn states(&self) -> Vec<&'static str> {
        vec!["A", "B"]
    }

    fn actions(&self) -> Vec<&'static str> {
        vec!["reroll", "hold"]
    }

    fn next_states(
        &self,
        action: &&'static str,
        state: &&'static str,
    ) -> Result<Transition<&'static str>> {
        match *action {
            "reroll" => {
                let other = if *state == "A" { "B" } else { "A" };
                Ok(Transition::new(vec![other], vec![1.0], -1.0))
            }
            _ => Ok(Transition::terminal(*state, 0.0)),
        }
    }

    fn final_score(&self, state: &&'static str) -> f64 {
        if *state == "B" { 10.0 } else { 0.0 }
    }
}

/// Wrapper that counts transition-model invocations on the inner environment.
pub struct CountingEnv<E> {
    inner: E,
    calls: Cell<u64>,
}

impl<E> CountingEnv<E> {
    pub fn new(inner: E) -> Self {
        CountingEnv {
            inner,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> u64 {
        self.calls.get()
    }
}

impl<E: Environment> Environment for CountingEnv<E> {
    type State = E::State;
    type Action = E::Action;

    fn states(&self) -> Vec<E::State> {
        self.inner.states()
    }

    fn actions(&self) -> Vec<E::Action> {
        self.inner.actions()
    }

    fn next_states(&self, action: &E::Action, state: &E::State) -> Result<Transition<E::State>> {
        self.calls.set(self.calls.get() + 1);
        self.inner.next_states(action, state)
    }

    fn final_score(&self, state: &E::State) -> f64 {
        self.inner.final_score(state)
    }
}

/// Five-state chain. `advance` (reward −1) moves one step up with probability
/// 0.8 and stays put with probability 0.2; from the last state it stays put.
/// `cash` is terminal, scoring 3 points per chain position.
pub struct Chain;

pub const CHAIN_LEN: u8 = 5;

impl Environment for Chain {
    type State = u8;
    type Action = &'static str;

    fn states(&self) -> Vec<u8> {
        (0..CHAIN_LEN).collect()
    }

    fn actions(&self) -> Vec<&'static str> {
        vec!["advance", "cash"]
    }

    fn next_states(&self, action: &&'static str, state: &u8) -> Result<Transition<u8>> {
        match *action {
            "advance" => {
                if *state + 1 == CHAIN_LEN {
                    Ok(Transition::new(vec![*state], vec![1.0], -1.0))
                } else {
                    Ok(Transition::new(
                        vec![*state + 1, *state],
                        vec![0.8, 0.2],
                        -1.0,
                    ))
                }
            }
            _ => Ok(Transition::terminal(*state, 0.0)),
        }
    }

    fn final_score(&self, state: &u8) -> f64 {
        f64::from(*state) * 3.0
    }
}

/// Environment whose transition model returns a malformed distribution.
pub struct BadDistribution;

impl Environment for BadDistribution {
    type State = u8;
    type Action = &'static str;

    fn states(&self) -> Vec<u8> {
        vec![0, 1]
    }

    fn actions(&self) -> Vec<&'static str> {
        vec!["swap", "stop"]
    }

    fn next_states(&self, action: &&'static str, state: &u8) -> Result<Transition<u8>> {
        match *action {
            "swap" => Ok(Transition::new(vec![0, 1], vec![0.6, 0.6], -1.0)),
            _ => Ok(Transition::terminal(*state, 0.0)),
        }
    }

    fn final_score(&self, _state: &u8) -> f64 {
        0.0
    }
}

/// Environment whose transition model fails outright.
pub struct FailingModel;

impl Environment for FailingModel {
    type State = u8;
    type Action = &'static str;

    fn states(&self) -> Vec<u8> {
        vec![0]
    }

    fn actions(&self) -> Vec<&'static str> {
        vec!["go", "stop"]
    }

    fn next_states(&self, _action: &&'static str, _state: &u8) -> Result<Transition<u8>> {
        Err(bellman::Error::Environment {
            message: "transition table unavailable".to_string(),
        })
    }

    fn final_score(&self, _state: &u8) -> f64 {
        0.0
    }
}
