//! Dashboard state: table, view state, filter inputs, panels.

use chrono::{DateTime, Local};

use crate::client::{DisruptionSource, SourceError};
use crate::model::WorkloadKey;
use crate::state::{PersistentViewState, SortSpec, StatusFilter};
use crate::view::ViewRow;
use crate::view::details::build_rows;

use super::filter::FilterSet;
use super::table::WorkloadTable;

/// Input mode for the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Editing the namespace text filter.
    Namespace,
    /// Editing the workload text filter.
    Workload,
    /// Editing the retention field in the settings modal.
    Retention,
}

/// Everything the render pass needs, owned by the app loop.
#[derive(Debug)]
pub struct Dashboard {
    pub table: WorkloadTable,
    pub view_state: PersistentViewState,

    /// Live text filter inputs. Deliberately not durable: only the status
    /// filter and sort survive a restart.
    pub namespace_input: String,
    pub workload_input: String,
    /// Type select; empty is the wildcard.
    pub kind_filter: String,

    pub input_mode: InputMode,
    pub details: DetailsPanel,
    pub settings: SettingsModal,

    pub show_help: bool,
    pub help_scroll: usize,
    pub show_quit_confirm: bool,
    pub status_message: Option<String>,
    pub paused: bool,

    pub endpoint: String,
    pub last_refresh: Option<DateTime<Local>>,
    pub last_error: Option<String>,
}

impl Dashboard {
    pub fn new(view_state: PersistentViewState, endpoint: String) -> Self {
        Self {
            table: WorkloadTable::new(),
            view_state,
            namespace_input: String::new(),
            workload_input: String::new(),
            kind_filter: String::new(),
            input_mode: InputMode::Normal,
            details: DetailsPanel::default(),
            settings: SettingsModal::default(),
            show_help: false,
            help_scroll: 0,
            show_quit_confirm: false,
            status_message: None,
            paused: false,
            endpoint,
            last_refresh: None,
            last_error: None,
        }
    }

    /// The live filter controls combined with an explicit status filter.
    /// The refresh cycle passes its snapshotted status here.
    pub fn filter_set_with_status(&self, status: StatusFilter) -> FilterSet {
        FilterSet {
            namespace: self.namespace_input.clone(),
            kind: self.kind_filter.clone(),
            workload: self.workload_input.clone(),
            status,
        }
    }

    /// The live filter controls with the live status filter.
    pub fn current_filter_set(&self) -> FilterSet {
        self.filter_set_with_status(self.view_state.active_filter())
    }

    /// Recomputes row visibility from the live controls.
    pub fn apply_live_filter(&mut self) {
        let filters = self.current_filter_set();
        self.table.apply_filter(&filters);
        self.table.resolve_selection();
    }

    /// Status button press: persists the filter and re-matches synchronously.
    pub fn set_status_filter(&mut self, status: StatusFilter) {
        self.view_state.set_filter(status);
        self.apply_live_filter();
    }

    /// Column header activation. Same column with `toggle_direction` flips
    /// the direction; a different column resets to ascending; same column
    /// without toggling keeps the direction (the refresh path relies on
    /// this). Persists through the view state, then reorders.
    pub fn sort_on_column(&mut self, column: usize, toggle_direction: bool) {
        let spec = match self.view_state.sort() {
            Some(current) if current.column == column => SortSpec {
                column,
                ascending: if toggle_direction {
                    !current.ascending
                } else {
                    current.ascending
                },
            },
            _ => SortSpec {
                column,
                ascending: true,
            },
        };
        self.view_state.set_sort(spec.column, spec.ascending);
        self.table.apply_sort(spec);
        self.table.resolve_selection();
    }

    /// Cycles the sort to the next column (ascending, like activating a new
    /// header).
    pub fn next_sort_column(&mut self) {
        let next = self
            .view_state
            .sort()
            .map(|s| (s.column + 1) % crate::model::COLUMN_COUNT)
            .unwrap_or(0);
        self.sort_on_column(next, true);
    }

    /// Flips the direction of the current sort column.
    pub fn toggle_sort_direction(&mut self) {
        if let Some(current) = self.view_state.sort() {
            self.sort_on_column(current.column, true);
        }
    }

    /// Cycles the type select through the kinds present in the table:
    /// wildcard -> kind1 -> kind2 -> ... -> wildcard.
    pub fn cycle_kind_filter(&mut self) {
        let mut kinds: Vec<String> = self.table.rows().iter().map(|r| r.kind.clone()).collect();
        kinds.sort();
        kinds.dedup();
        if kinds.is_empty() {
            self.kind_filter.clear();
        } else {
            self.kind_filter = match kinds.iter().position(|k| *k == self.kind_filter) {
                Some(pos) if pos + 1 < kinds.len() => kinds[pos + 1].clone(),
                Some(_) => String::new(),
                None => kinds[0].clone(),
            };
        }
        self.apply_live_filter();
    }

    /// True while any overlay is on top of the table.
    pub fn any_popup_open(&self) -> bool {
        self.details.visible || self.settings.visible || self.show_help || self.show_quit_confirm
    }
}

/// Detail drill-down for one workload's disruption history.
#[derive(Debug, Default)]
pub struct DetailsPanel {
    pub visible: bool,
    pub key: Option<WorkloadKey>,
    pub rows: Vec<ViewRow>,
    pub scroll: usize,
}

impl DetailsPanel {
    /// Fetches and shows the history for `key`. Re-opening with the same key
    /// re-fetches and fully replaces the content but keeps the scroll
    /// position, so a refresh does not yank an open panel back to the top;
    /// the render pass clamps it to the new row count. On failure the panel
    /// keeps whatever it showed before.
    pub fn open(
        &mut self,
        source: &mut dyn DisruptionSource,
        key: WorkloadKey,
    ) -> Result<(), SourceError> {
        let history = source.fetch_details(&key)?;
        if self.key.as_ref() != Some(&key) {
            self.scroll = 0;
        }
        self.rows = build_rows(&history.disruptions);
        self.key = Some(key);
        self.visible = true;
        Ok(())
    }

    /// Hides the panel and discards the rendered events (not cached).
    pub fn close(&mut self) {
        self.visible = false;
        self.key = None;
        self.rows.clear();
        self.scroll = 0;
    }

    pub fn title(&self) -> Option<String> {
        self.key.as_ref().map(WorkloadKey::title)
    }
}

/// Settings modal with the single retention-hours field.
#[derive(Debug, Default)]
pub struct SettingsModal {
    pub visible: bool,
    pub input: String,
    /// Inline error shown when a save is rejected or fails.
    pub error: Option<String>,
}

impl SettingsModal {
    /// Loads the current settings and opens the modal.
    pub fn open(&mut self, source: &mut dyn DisruptionSource) -> Result<(), SourceError> {
        let settings = source.fetch_settings()?;
        self.input = settings.retention_hours.to_string();
        self.error = None;
        self.visible = true;
        Ok(())
    }

    /// Saves the edited value. Only a server `"ok"` closes the modal; any
    /// rejection or failure keeps it open with an inline error.
    pub fn save(&mut self, source: &mut dyn DisruptionSource) {
        let retention_hours = match self.input.trim().parse::<u64>() {
            Ok(v) => v,
            Err(_) => {
                self.error = Some("retention must be a number of hours".to_string());
                return;
            }
        };
        match source.save_settings(crate::model::RetentionSettings { retention_hours }) {
            Ok(status) if status.is_ok() => self.close(),
            Ok(status) => {
                self.error = Some(format!("server rejected save: {}", status.status));
            }
            Err(e) => {
                self.error = Some(e.to_string());
            }
        }
    }

    /// Closes without saving.
    pub fn close(&mut self) {
        self.visible = false;
        self.input.clear();
        self.error = None;
    }
}
