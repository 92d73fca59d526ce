//! TUI widgets for wdmon.

mod details;
mod header;
mod help;
mod quit_confirm;
mod settings;
mod workloads;

pub use details::render_details;
pub use header::render_header;
pub use help::render_help;
pub use quit_confirm::render_quit_confirm;
pub use settings::render_settings;
pub use workloads::render_workloads;
