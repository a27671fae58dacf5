//! Python bindings
//!
//! The plotting side of the experiment lives in Python; these bindings let it
//! configure runs with plain dicts and receive `(tick, active_count)` lists.

pub mod simulator;
pub mod types;
