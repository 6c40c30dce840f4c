//! Application use cases for scanlens.
//!
//! Three entry points exist, all safe to call from any non-interactive
//! thread a host designates for background work:
//! - [`run_scan`]: launch the external scanner and aggregate its report;
//! - [`aggregate_report`]: aggregate an existing report file offline;
//! - [`run_gate`]: evaluate the quality gate over `scan_status.json`.
//!
//! Aggregation failures abort the current scan's result presentation (no
//! partial tree is ever returned) but are ordinary errors: the host stays
//! alive and the scan trigger is re-enabled by RAII on the [`ScanGate`].

#![forbid(unsafe_code)]

mod aggregate;
mod gate;
mod scan;

pub use aggregate::{aggregate_report, AggregateInput, AggregateOutput};
pub use gate::{gate_exit_code, run_gate, ScanGate, ScanPermit};
pub use scan::{run_scan, ScanInput};
