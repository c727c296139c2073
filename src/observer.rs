//! Observer port for monitoring a solve.
//!
//! Observers allow composable progress reporting without coupling the sweep
//! loop to a particular output. An observer error aborts the solve and is
//! propagated to the caller.

use crate::{Result, policy::SolveSummary};

/// Observer trait for monitoring value iteration.
///
/// The methods are called in order:
/// 1. `on_solve_start(num_states, num_actions)` - once, after enumeration
/// 2. `on_sweep(sweep, delta)` - after every completed sweep
/// 3. `on_solve_end(summary)` - once, on convergence
///
/// All hooks default to doing nothing.
pub trait SweepObserver: Send {
    /// Called once after the state and action spaces have been enumerated.
    fn on_solve_start(&mut self, _num_states: usize, _num_actions: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each completed sweep with its 1-based index and the
    /// maximum per-state value change it produced.
    fn on_sweep(&mut self, _sweep: usize, _delta: f64) -> Result<()> {
        Ok(())
    }

    /// Called once when the value table has converged.
    fn on_solve_end(&mut self, _summary: &SolveSummary) -> Result<()> {
        Ok(())
    }
}

/// Observer that reports solve progress through the `log` facade.
#[derive(Debug, Default)]
pub struct LogObserver;

impl LogObserver {
    /// Create a new logging observer.
    pub fn new() -> Self {
        LogObserver
    }
}

impl SweepObserver for LogObserver {
    fn on_solve_start(&mut self, num_states: usize, num_actions: usize) -> Result<()> {
        log::info!("solving MDP: {num_states} states, {num_actions} actions");
        Ok(())
    }

    fn on_sweep(&mut self, sweep: usize, delta: f64) -> Result<()> {
        log::debug!("sweep {sweep}: delta = {delta:.6}");
        Ok(())
    }

    fn on_solve_end(&mut self, summary: &SolveSummary) -> Result<()> {
        log::info!(
            "converged after {} sweeps (final delta {:.6})",
            summary.sweeps,
            summary.final_delta
        );
        Ok(())
    }
}
