//! Value-iteration engine: the Bellman-optimality sweep loop.
//!
//! The engine repeatedly sweeps the full state space, recomputing each
//! state's value as the best expected return over all actions, until the
//! largest per-state change in a sweep drops to the convergence threshold.
//! Updates are in-place (Gauss–Seidel): later states in a sweep read values
//! already updated earlier in the same sweep. The sweep order is therefore
//! fixed up front by sorting the enumerated states, so runs are reproducible.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{
    Result,
    cache::TransitionCache,
    env::Environment,
    observer::SweepObserver,
    policy::{Policy, SolveSummary},
    types::{DEFAULT_SWEEP_CAP, Discount, Threshold},
};

/// Tuning parameters for a solve.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Discount factor γ
    pub discount: Discount,
    /// Convergence threshold θ
    pub threshold: Threshold,
    /// Maximum number of sweeps before the solve fails with
    /// [`crate::Error::DidNotConverge`]
    pub sweep_cap: usize,
}

impl SolverConfig {
    /// Create a configuration with the given discount and threshold and the
    /// default sweep cap.
    pub fn new(discount: Discount, threshold: Threshold) -> Self {
        SolverConfig {
            discount,
            threshold,
            sweep_cap: DEFAULT_SWEEP_CAP,
        }
    }

    /// Set the discount factor.
    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    /// Set the convergence threshold.
    pub fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Set the sweep cap.
    pub fn with_sweep_cap(mut self, sweep_cap: usize) -> Self {
        self.sweep_cap = sweep_cap;
        self
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig::new(Discount::default(), Threshold::default())
    }
}

/// One-shot value-iteration solver.
///
/// Construct with a [`SolverConfig`], optionally attach observers, then call
/// [`Solver::solve`] with an environment. The solver is consumed by the
/// solve and freezes into a query-only [`Policy`].
///
/// # Examples
///
/// ```
/// use bellman::{Discount, Environment, Result, Solver, SolverConfig, Threshold, Transition};
///
/// /// Flip a coin (reward −1) hoping to stop on heads, worth 10 points.
/// struct CoinFlip;
///
/// impl Environment for CoinFlip {
///     type State = u8;
///     type Action = &'static str;
///
///     fn states(&self) -> Vec<u8> {
///         vec![0, 1]
///     }
///
///     fn actions(&self) -> Vec<&'static str> {
///         vec!["flip", "stop"]
///     }
///
///     fn next_states(&self, action: &&'static str, state: &u8) -> Result<Transition<u8>> {
///         match *action {
///             "flip" => Ok(Transition::new(vec![0, 1], vec![0.5, 0.5], -1.0)),
///             _ => Ok(Transition::terminal(*state, 0.0)),
///         }
///     }
///
///     fn final_score(&self, state: &u8) -> f64 {
///         f64::from(*state) * 10.0
///     }
/// }
///
/// # fn main() -> bellman::Result<()> {
/// let config = SolverConfig::new(Discount::new(0.9)?, Threshold::new(0.01)?);
/// let policy = Solver::new(config).solve(CoinFlip)?;
/// assert_eq!(policy.action_for(&1)?, &"stop");
/// # Ok(())
/// # }
/// ```
pub struct Solver {
    config: SolverConfig,
    observers: Vec<Box<dyn SweepObserver>>,
}

impl Solver {
    /// Create a solver with the given configuration.
    pub fn new(config: SolverConfig) -> Self {
        Solver {
            config,
            observers: Vec::new(),
        }
    }

    /// Attach an observer to be notified of solve progress.
    pub fn with_observer(mut self, observer: Box<dyn SweepObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Run value iteration to convergence and freeze the result.
    ///
    /// Enumerates the state space once, sorts it into a stable sweep order,
    /// initializes V(s) = 0 everywhere, then sweeps until the per-sweep delta
    /// drops to the threshold. When two actions yield an equal expected
    /// return, the earlier action in the environment's enumeration order is
    /// kept.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::EmptyStateSpace`] / [`crate::Error::EmptyActionSpace`]
    ///   if the environment enumerates nothing
    /// - [`crate::Error::InvalidSweepCap`] for a zero sweep cap
    /// - [`crate::Error::DidNotConverge`] if the cap is exhausted first
    /// - any error raised by the environment's transition model, unmodified
    pub fn solve<E: Environment>(mut self, env: E) -> Result<Policy<E>> {
        if self.config.sweep_cap == 0 {
            return Err(crate::Error::InvalidSweepCap);
        }

        let mut states = env.states();
        if states.is_empty() {
            return Err(crate::Error::EmptyStateSpace);
        }
        states.sort();

        let actions = env.actions();
        if actions.is_empty() {
            return Err(crate::Error::EmptyActionSpace);
        }

        let mut values: HashMap<E::State, f64> =
            states.iter().map(|state| (state.clone(), 0.0)).collect();
        let mut policy: HashMap<E::State, E::Action> = HashMap::with_capacity(states.len());
        let mut cache = TransitionCache::new();
        let mut deltas = Vec::new();

        for observer in &mut self.observers {
            observer.on_solve_start(states.len(), actions.len())?;
        }

        let discount = self.config.discount.value();
        let threshold = self.config.threshold.value();

        for sweep in 1..=self.config.sweep_cap {
            let delta = sweep_once(
                &env,
                &states,
                &actions,
                discount,
                &mut values,
                &mut policy,
                &mut cache,
            )?;
            deltas.push(delta);
            log::debug!("sweep {sweep}: delta = {delta:.6}");
            for observer in &mut self.observers {
                observer.on_sweep(sweep, delta)?;
            }

            if delta <= threshold {
                let summary = SolveSummary {
                    sweeps: sweep,
                    final_delta: delta,
                    deltas,
                };
                log::info!(
                    "value iteration converged after {} sweeps (delta {:.6})",
                    summary.sweeps,
                    summary.final_delta
                );
                for observer in &mut self.observers {
                    observer.on_solve_end(&summary)?;
                }
                return Ok(Policy::new(values, policy, summary, cache.stats()));
            }
        }

        let last_delta = deltas.last().copied().unwrap_or(f64::INFINITY);
        log::warn!(
            "value iteration exhausted {} sweeps without converging (delta {:.6})",
            self.config.sweep_cap,
            last_delta
        );
        Err(crate::Error::DidNotConverge {
            sweeps: self.config.sweep_cap,
            delta: last_delta,
            threshold,
        })
    }
}

impl Default for Solver {
    fn default() -> Self {
        Solver::new(SolverConfig::default())
    }
}

/// Execute a single sweep over every state, in the fixed order, and return
/// the maximum absolute value change it produced.
fn sweep_once<E: Environment>(
    env: &E,
    states: &[E::State],
    actions: &[E::Action],
    discount: f64,
    values: &mut HashMap<E::State, f64>,
    policy: &mut HashMap<E::State, E::Action>,
    cache: &mut TransitionCache<E>,
) -> Result<f64> {
    let mut delta: f64 = 0.0;

    for state in states {
        let old_value = *values
            .get(state)
            .expect("every enumerated state is initialized before the first sweep");

        let mut best_value = f64::NEG_INFINITY;
        let mut best_action: Option<&E::Action> = None;
        for action in actions {
            let value = action_value(env, cache, values, discount, action, state)?;
            // Strict comparison: ties resolve to the earliest action in
            // enumeration order.
            if best_action.is_none() || value > best_value {
                best_value = value;
                best_action = Some(action);
            }
        }
        let best_action = best_action.ok_or(crate::Error::EmptyActionSpace)?;

        values.insert(state.clone(), best_value);
        policy.insert(state.clone(), best_action.clone());
        delta = delta.max((old_value - best_value).abs());
    }

    Ok(delta)
}

/// Expected return of taking `action` in `state` under the current value
/// table.
fn action_value<E: Environment>(
    env: &E,
    cache: &mut TransitionCache<E>,
    values: &HashMap<E::State, f64>,
    discount: f64,
    action: &E::Action,
    state: &E::State,
) -> Result<f64> {
    let transition = cache.lookup(env, action, state)?;

    // Terminal actions are scored by the environment's terminal scoring
    // function, not by lookahead through the value table.
    if transition.is_terminal {
        return Ok(transition.reward + discount * env.final_score(state));
    }

    let mut expected = 0.0;
    for (next_state, probability) in transition.outcomes() {
        let next_value =
            values
                .get(next_state)
                .copied()
                .ok_or_else(|| crate::Error::UnknownState {
                    state: format!("{next_state:?}"),
                })?;
        expected += probability * (transition.reward + discount * next_value);
    }
    Ok(expected)
}
