//! The periodic refresh cycle.
//!
//! Each cycle runs snapshot -> fetch -> replace -> sort -> filter -> reopen
//! details, strictly in that order. The snapshot is taken before the fetch,
//! so user actions that land while a fetch is in flight are deliberately not
//! reflected in that cycle's reapplied state — the live view state already
//! has them, and the next cycle picks them up.

use chrono::Local;
use tracing::warn;

use crate::client::DisruptionSource;
use crate::model::WorkloadKey;
use crate::state::ViewState;

use super::dashboard::Dashboard;

/// Transient UI state captured to survive one refresh cycle. Not durable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransientUiState {
    pub details_open: bool,
    pub details_key: Option<WorkloadKey>,
}

/// Drives the fetch cycle and remembers its outcome for the header bar.
///
/// Cycles are serialized by construction: the fetch is a blocking call on
/// the event-loop thread, so a tick can never start a cycle while another
/// one runs.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
    pub cycles: u64,
}

impl RefreshCoordinator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs one refresh cycle.
    ///
    /// A failed fetch leaves the previous table content, visibility, and
    /// view state untouched; the next timer tick simply retries.
    pub fn run_cycle(&mut self, dash: &mut Dashboard, source: &mut dyn DisruptionSource) {
        // 1. Snapshot transient UI state and a defensive copy of the view
        //    state. The cycle uses these, never the live values.
        let ui = TransientUiState {
            details_open: dash.details.visible,
            details_key: dash.details.key.clone(),
        };
        let view: ViewState = dash.view_state.get();

        // 2. Fetch.
        let rows = match source.fetch_workloads() {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "refresh fetch failed, keeping previous rows");
                dash.last_error = Some(e.to_string());
                return;
            }
        };
        dash.last_error = None;
        dash.last_refresh = Some(Local::now());
        self.cycles += 1;

        // 3. Wholesale replacement.
        dash.table.replace(rows);

        // 4. Reapply the snapshotted sort; the direction must never toggle
        //    here.
        if let Some(spec) = view.sort {
            dash.table.apply_sort(spec);
        }

        // 5. Reapply the snapshotted status filter together with the live
        //    text inputs (those are not part of the durable view state).
        let filters = dash.filter_set_with_status(view.active_filter);
        dash.table.apply_filter(&filters);
        dash.table.resolve_selection();

        // 6. Reopen the details panel if it was open before the fetch.
        if ui.details_open
            && let Some(key) = ui.details_key
            && let Err(e) = dash.details.open(source, key)
        {
            warn!(error = %e, "failed to reopen details after refresh");
            dash.status_message = Some(format!("details refresh failed: {}", e));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockSource;
    use crate::model::{TIMESTAMP_COLUMN, WorkloadRow};
    use crate::state::{PersistentViewState, SortSpec, StateStore, StatusFilter};

    fn dashboard() -> (Dashboard, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().to_path_buf());
        let dash = Dashboard::new(
            PersistentViewState::load(store),
            "mock://cluster".to_string(),
        );
        (dash, dir)
    }

    fn visible_names(dash: &Dashboard) -> Vec<String> {
        dash.table
            .visible_rows()
            .iter()
            .map(|r| r.name.clone())
            .collect()
    }

    #[test]
    fn refresh_preserves_filter_sort_and_open_details() {
        let mut source = MockSource::typical_cluster();
        let (mut dash, _dir) = dashboard();
        let mut coordinator = RefreshCoordinator::new();

        // Initial cycle, then the user sets up a view.
        coordinator.run_cycle(&mut dash, &mut source);
        dash.set_status_filter(StatusFilter::Oom);
        dash.sort_on_column(0, true); // namespace, ascending
        let key = crate::model::WorkloadKey::parse("prod-a/Deployment/api").unwrap();
        dash.details.open(&mut source, key).unwrap();

        coordinator.run_cycle(&mut dash, &mut source);

        // Sorted by namespace ascending, filtered to oom > 0.
        assert_eq!(visible_names(&dash), ["api", "db"]);
        let sort = dash.view_state.sort().unwrap();
        assert_eq!(sort.column, 0);
        assert!(sort.ascending);

        // Details panel reopened for the same workload.
        assert!(dash.details.visible);
        assert_eq!(
            dash.details.title().as_deref(),
            Some("Disruption Details: prod-a/api (Deployment)")
        );
        assert_eq!(source.detail_fetch_count, 2);
    }

    #[test]
    fn refresh_keeps_details_scroll_position() {
        let mut source = MockSource::typical_cluster();
        let (mut dash, _dir) = dashboard();
        let mut coordinator = RefreshCoordinator::new();

        coordinator.run_cycle(&mut dash, &mut source);
        let key = crate::model::WorkloadKey::parse("prod-a/Deployment/api").unwrap();
        dash.details.open(&mut source, key).unwrap();
        dash.details.scroll = 1;

        coordinator.run_cycle(&mut dash, &mut source);
        assert!(dash.details.visible);
        assert_eq!(dash.details.scroll, 1);
    }

    #[test]
    fn refresh_never_toggles_sort_direction() {
        let mut source = MockSource::typical_cluster();
        let (mut dash, _dir) = dashboard();
        let mut coordinator = RefreshCoordinator::new();

        dash.sort_on_column(TIMESTAMP_COLUMN, true);
        dash.sort_on_column(TIMESTAMP_COLUMN, true); // descending
        for _ in 0..3 {
            coordinator.run_cycle(&mut dash, &mut source);
            let sort = dash.view_state.sort().unwrap();
            assert_eq!(sort.column, TIMESTAMP_COLUMN);
            assert!(!sort.ascending);
        }
    }

    #[test]
    fn stored_out_of_range_sort_does_not_break_first_refresh() {
        let dir = tempfile::tempdir().unwrap();
        let store = StateStore::new(dir.path().to_path_buf());
        store.put("currentSort", r#"{"column":99,"ascending":true}"#);

        let mut source = MockSource::typical_cluster();
        let mut dash = Dashboard::new(
            PersistentViewState::load(StateStore::new(dir.path().to_path_buf())),
            "mock://cluster".to_string(),
        );
        let mut coordinator = RefreshCoordinator::new();

        coordinator.run_cycle(&mut dash, &mut source);

        // Bad stored entry degrades to server order instead of sorting.
        assert_eq!(dash.view_state.sort(), None);
        assert_eq!(visible_names(&dash).len(), 5);
    }

    #[test]
    fn failed_fetch_keeps_previous_rows_and_state() {
        let mut source = MockSource::typical_cluster();
        let (mut dash, _dir) = dashboard();
        let mut coordinator = RefreshCoordinator::new();

        coordinator.run_cycle(&mut dash, &mut source);
        dash.set_status_filter(StatusFilter::Disrupted);
        let before = visible_names(&dash);
        assert!(!before.is_empty());

        source.fail_next_fetch = true;
        coordinator.run_cycle(&mut dash, &mut source);

        assert_eq!(visible_names(&dash), before);
        assert_eq!(dash.view_state.active_filter(), StatusFilter::Disrupted);
        assert!(dash.last_error.is_some());
        assert_eq!(coordinator.cycles, 1);

        // Next tick retries and clears the error.
        coordinator.run_cycle(&mut dash, &mut source);
        assert!(dash.last_error.is_none());
        assert_eq!(coordinator.cycles, 2);
    }

    #[test]
    fn refresh_uses_snapshot_not_concurrent_edits() {
        // The snapshot is taken before the fetch; a filter change "during"
        // the fetch applies to the live state but the cycle's own reapply
        // uses the earlier snapshot. Simulated here by changing the filter
        // after the cycle and confirming only the next cycle reflects it.
        let mut source = MockSource::typical_cluster();
        let (mut dash, _dir) = dashboard();
        let mut coordinator = RefreshCoordinator::new();

        coordinator.run_cycle(&mut dash, &mut source);
        assert_eq!(visible_names(&dash).len(), 5);

        dash.set_status_filter(StatusFilter::Oom);
        coordinator.run_cycle(&mut dash, &mut source);
        assert_eq!(visible_names(&dash), ["api", "db"]);
    }

    #[test]
    fn refresh_applies_live_text_inputs_with_snapshot_status() {
        let mut source = MockSource::typical_cluster();
        let (mut dash, _dir) = dashboard();
        let mut coordinator = RefreshCoordinator::new();

        dash.namespace_input = "prod".to_string();
        coordinator.run_cycle(&mut dash, &mut source);

        let names = visible_names(&dash);
        assert_eq!(names.len(), 3);
        assert!(names.iter().all(|n| n != "log-agent"));
    }

    #[test]
    fn closed_details_panel_stays_closed() {
        let mut source = MockSource::typical_cluster();
        let (mut dash, _dir) = dashboard();
        let mut coordinator = RefreshCoordinator::new();

        coordinator.run_cycle(&mut dash, &mut source);
        assert!(!dash.details.visible);
        assert_eq!(source.detail_fetch_count, 0);
    }

    #[test]
    fn refresh_replaces_rows_wholesale() {
        let mut source = MockSource::typical_cluster();
        let (mut dash, _dir) = dashboard();
        let mut coordinator = RefreshCoordinator::new();
        coordinator.run_cycle(&mut dash, &mut source);
        assert_eq!(dash.table.len(), 5);

        source.set_rows(vec![WorkloadRow {
            namespace: "prod-a".to_string(),
            kind: "Deployment".to_string(),
            name: "api".to_string(),
            last_disruption: Some("2024-03-05 00:00:00".to_string()),
            oom_kills: 4,
            terminations: 0,
        }]);
        coordinator.run_cycle(&mut dash, &mut source);

        assert_eq!(dash.table.len(), 1);
        assert_eq!(dash.table.rows()[0].oom_kills, 4);
    }
}
