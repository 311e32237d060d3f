//! Bulk DNS operation engine
//!
//! `OperationSpec + domains → actions (+ details) → results → report`.
//! Each stage only reads the output of the previous one.

mod aggregator;
mod dispatcher;
mod expander;
mod orchestrator;

pub use orchestrator::BulkOperationService;
