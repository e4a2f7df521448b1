//! Network topology model and validation.
//!
//! `graph` holds the static overlay graph the searches traverse;
//! `validation` checks its structural invariants before any search
//! runs.

pub mod graph;
pub mod validation;

pub use graph::{Node, Topology, TopologyError};
pub use validation::{ensure_valid, validate, ValidationReport, Violation, ViolationKind};
