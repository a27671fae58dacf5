//! PyO3 wrapper for Simulator
//!
//! # Example (from Python)
//!
//! ```python
//! from community_moderation_sim import Simulator, compare_policies
//!
//! sim = Simulator({"initial_member_count": 5700, "iterations": 36, "rng_seed": 7})
//! series = sim.run()                      # [(0, 5731), (1, 5760), ...]
//!
//! both = compare_policies({"iterations": 36})
//! plt.plot(*zip(*both["exclusion"]), label="exclusion")
//! plt.plot(*zip(*both["reintegration"]), label="reintegration")
//! ```

use pyo3::prelude::*;
use pyo3::types::PyDict;

use super::types::{comparison_to_py, parse_simulation_config, simulation_error_to_py, tick_result_to_py};
use crate::orchestrator::{self, Simulator as RustSimulator};

/// Python wrapper for the Rust simulator
#[pyclass(name = "Simulator")]
pub struct PySimulator {
    inner: RustSimulator,
}

#[pymethods]
impl PySimulator {
    /// Create a simulator from a configuration dict
    ///
    /// Raises ValueError on invalid configuration.
    #[new]
    fn new(config: &Bound<'_, PyDict>) -> PyResult<Self> {
        let rust_config = parse_simulation_config(config)?;
        let inner = RustSimulator::new(rust_config).map_err(simulation_error_to_py)?;
        Ok(PySimulator { inner })
    }

    /// Execute one tick and return its summary dict
    fn tick<'py>(&mut self, py: Python<'py>) -> PyResult<Bound<'py, PyDict>> {
        let result = self.inner.tick().map_err(simulation_error_to_py)?;
        tick_result_to_py(py, &result)
    }

    /// Run the remaining ticks and return the full `(tick, active_count)` series
    fn run(&mut self) -> PyResult<Vec<(usize, usize)>> {
        let result = self.inner.run().map_err(simulation_error_to_py)?;
        Ok(result.as_pairs())
    }

    fn current_tick(&self) -> usize {
        self.inner.current_tick()
    }

    fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    fn active_count(&self) -> usize {
        self.inner.active_count()
    }

    /// Series recorded so far
    fn series(&self) -> Vec<(usize, usize)> {
        self.inner.series().as_pairs()
    }
}

/// Run one configuration to completion
#[pyfunction]
pub fn run_simulation(config: &Bound<'_, PyDict>) -> PyResult<Vec<(usize, usize)>> {
    let rust_config = parse_simulation_config(config)?;
    let result = orchestrator::run_simulation(&rust_config).map_err(simulation_error_to_py)?;
    Ok(result.as_pairs())
}

/// Run the configuration under exclusion and under reintegration
#[pyfunction]
pub fn compare_policies<'py>(
    py: Python<'py>,
    config: &Bound<'py, PyDict>,
) -> PyResult<Bound<'py, PyDict>> {
    let rust_config = parse_simulation_config(config)?;
    let comparison = orchestrator::compare_policies(&rust_config).map_err(simulation_error_to_py)?;
    comparison_to_py(py, &comparison)
}
