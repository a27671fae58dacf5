//! Type conversion utilities for FFI boundary
//!
//! Converts between Rust types and PyO3-compatible types (PyDict, PyList).

use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::orchestrator::{PolicyComparison, SimulationConfig, SimulationError, TickResult};

// ========================================================================
// PyDict Extraction Helpers
// ========================================================================

/// Extract an optional field from a Python dict.
///
/// # Errors
/// Returns error only if type conversion fails (not if field is missing)
fn extract_optional<T>(dict: &Bound<'_, PyDict>, key: &str) -> PyResult<Option<T>>
where
    T: for<'py> FromPyObject<'py>,
{
    match dict.get_item(key)? {
        Some(value) if !value.is_none() => value.extract().map(Some).map_err(|e| {
            PyValueError::new_err(format!("Invalid value for '{}': {}", key, e))
        }),
        _ => Ok(None),
    }
}

/// Extract a field with a default value if missing.
fn extract_with_default<T>(dict: &Bound<'_, PyDict>, key: &str, default: T) -> PyResult<T>
where
    T: for<'py> FromPyObject<'py>,
{
    Ok(extract_optional(dict, key)?.unwrap_or(default))
}

// ========================================================================
// Configuration Parser
// ========================================================================

/// Convert Python dict to SimulationConfig
///
/// Missing keys take `SimulationConfig::default()` values.
///
/// # Errors
///
/// Returns ValueError if a value has the wrong type (negative counts included)
/// or the resulting configuration fails validation.
pub fn parse_simulation_config(py_config: &Bound<'_, PyDict>) -> PyResult<SimulationConfig> {
    let defaults = SimulationConfig::default();

    let config = SimulationConfig {
        initial_member_count: extract_with_default(
            py_config,
            "initial_member_count",
            defaults.initial_member_count,
        )?,
        iterations: extract_with_default(py_config, "iterations", defaults.iterations)?,
        rng_seed: extract_with_default(py_config, "rng_seed", defaults.rng_seed)?,
        growth_range: extract_with_default(py_config, "growth_range", defaults.growth_range)?,
        ban_count_range: extract_with_default(
            py_config,
            "ban_count_range",
            defaults.ban_count_range,
        )?,
        reintegration_enabled: extract_with_default(
            py_config,
            "reintegration_enabled",
            defaults.reintegration_enabled,
        )?,
        sanction_durations: extract_with_default(
            py_config,
            "sanction_durations",
            defaults.sanction_durations,
        )?,
        duration_weights: extract_optional(py_config, "duration_weights")?,
        base_ban_rate: extract_optional(py_config, "base_ban_rate")?,
    };

    config
        .validate()
        .map_err(|e| PyValueError::new_err(format!("Invalid config: {}", e)))?;
    Ok(config)
}

// ========================================================================
// Result Converters
// ========================================================================

/// Map a simulation error onto the Python exception hierarchy
pub fn simulation_error_to_py(err: SimulationError) -> PyErr {
    match &err {
        SimulationError::InvalidConfig(_) => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

/// Convert TickResult to Python dict
pub fn tick_result_to_py<'py>(py: Python<'py>, result: &TickResult) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("tick", result.tick)?;
    dict.set_item("num_joined", result.num_joined)?;
    dict.set_item("num_reintegrated", result.num_reintegrated)?;
    dict.set_item("num_sanctioned", result.num_sanctioned)?;
    dict.set_item("num_banned", result.num_banned)?;
    dict.set_item("num_suspended", result.num_suspended)?;
    dict.set_item("active_count", result.active_count)?;
    dict.set_item("suspended_count", result.suspended_count)?;
    dict.set_item("banned_count", result.banned_count)?;
    dict.set_item("total_members", result.total_members)?;
    Ok(dict)
}

/// Convert PolicyComparison to Python dict of `(tick, active_count)` lists
pub fn comparison_to_py<'py>(
    py: Python<'py>,
    comparison: &PolicyComparison,
) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("exclusion", comparison.exclusion.as_pairs())?;
    dict.set_item("reintegration", comparison.reintegration.as_pairs())?;
    dict.set_item("final_gap", comparison.final_gap())?;
    Ok(dict)
}
