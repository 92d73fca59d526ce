//! Terminal user interface.
//!
//! An interactive dashboard over the workload table: tick-driven refresh
//! with view-state preservation, live filters, sortable columns, and popups
//! for details, settings, and help.

mod app;
mod dashboard;
mod event;
mod filter;
mod input;
mod refresh;
mod render;
mod style;
mod table;
mod widgets;

pub use app::App;
pub use dashboard::{Dashboard, DetailsPanel, InputMode, SettingsModal};
pub use filter::FilterSet;
pub use refresh::RefreshCoordinator;
pub use table::WorkloadTable;
