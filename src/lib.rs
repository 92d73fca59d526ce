//! wdmon - workload disruption monitor.
//!
//! Terminal dashboard for workload disruptions (OOM kills and non-graceful
//! terminations). Polls a wdmon server over HTTP and presents the workload
//! table with client-side filtering, sorting, and a per-workload detail
//! drill-down, preserving the user's view state across refreshes.

pub mod client;
pub mod model;
pub mod state;
pub mod tui;
pub mod view;
