//! Workload table state: ordering, visibility, selection tracking.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use ratatui::widgets::TableState;

use crate::model::{SENTINEL, TIMESTAMP_COLUMN, WorkloadKey, WorkloadRow};
use crate::state::SortSpec;

use super::filter::FilterSet;

/// State for the workload table.
///
/// Rows own the full fetched set; filtering only flips the visibility mask,
/// so a later re-match can bring rows back without re-fetching.
#[derive(Debug, Default)]
pub struct WorkloadTable {
    rows: Vec<WorkloadRow>,
    /// Parallel to `rows`.
    visible: Vec<bool>,
    /// Selected index within the visible rows.
    pub selected: usize,
    /// Tracked workload key. Follows the selected row across refresh,
    /// sort, and filter changes.
    pub tracked_key: Option<WorkloadKey>,
    /// Scroll offset state for the ratatui table widget.
    pub ratatui_state: TableState,
}

impl WorkloadTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wholesale row replacement (the refresh contract: a full swap, never a
    /// merge). Everything becomes visible until the next filter pass.
    pub fn replace(&mut self, rows: Vec<WorkloadRow>) {
        self.visible = vec![true; rows.len()];
        self.rows = rows;
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[WorkloadRow] {
        &self.rows
    }

    /// Rows that pass the current filter, in table order.
    pub fn visible_rows(&self) -> Vec<&WorkloadRow> {
        self.rows
            .iter()
            .zip(&self.visible)
            .filter_map(|(row, &v)| v.then_some(row))
            .collect()
    }

    /// The row under the cursor, if any row is visible.
    pub fn selected_row(&self) -> Option<&WorkloadRow> {
        let visible = self.visible_rows();
        visible.get(self.selected.min(visible.len().saturating_sub(1))).copied()
    }

    /// Reorders rows by the given column and direction.
    ///
    /// Stable: equal keys keep their prior relative order, so a re-sort
    /// after refresh never visually thrashes equal-valued rows. The `"-"`
    /// sentinel sorts after any real value in either direction.
    pub fn apply_sort(&mut self, spec: SortSpec) {
        // Keep the visibility mask aligned with its rows through the sort.
        let mut paired: Vec<(WorkloadRow, bool)> = self
            .rows
            .drain(..)
            .zip(self.visible.drain(..))
            .collect();
        paired.sort_by(|(a, _), (b, _)| compare_rows(a, b, spec));
        (self.rows, self.visible) = paired.into_iter().unzip();
    }

    /// Recomputes visibility per row. Rows are never removed.
    pub fn apply_filter(&mut self, filters: &FilterSet) {
        for (row, visible) in self.rows.iter().zip(self.visible.iter_mut()) {
            *visible = filters.matches(row);
        }
        let count = self.visible.iter().filter(|v| **v).count();
        if self.selected >= count && count > 0 {
            self.selected = count - 1;
        }
    }

    // --- selection ---------------------------------------------------------

    pub fn select_up(&mut self) {
        if self.selected > 0 {
            self.selected -= 1;
            self.tracked_key = None;
        }
    }

    pub fn select_down(&mut self) {
        let max = self.visible_rows().len().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
            self.tracked_key = None;
        }
    }

    pub fn page_up(&mut self, page_size: usize) {
        self.selected = self.selected.saturating_sub(page_size);
        self.tracked_key = None;
    }

    pub fn page_down(&mut self, page_size: usize) {
        let max = self.visible_rows().len().saturating_sub(1);
        self.selected = (self.selected + page_size).min(max);
        self.tracked_key = None;
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
        self.tracked_key = None;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_rows().len().saturating_sub(1);
        self.tracked_key = None;
    }

    /// Resolves the cursor by tracked key. If the tracked workload is still
    /// visible, the cursor follows it to its new index; otherwise the
    /// cursor is clamped and tracking restarts from the current row.
    pub fn resolve_selection(&mut self) {
        let keys: Vec<WorkloadKey> = self.visible_rows().iter().map(|r| r.key()).collect();
        if keys.is_empty() {
            self.selected = 0;
            self.tracked_key = None;
            return;
        }

        if let Some(tracked) = &self.tracked_key {
            if let Some(pos) = keys.iter().position(|k| k == tracked) {
                self.selected = pos;
            } else {
                self.tracked_key = None;
                if self.selected >= keys.len() {
                    self.selected = keys.len() - 1;
                }
            }
        } else if self.selected >= keys.len() {
            self.selected = keys.len() - 1;
        }

        self.tracked_key = keys.get(self.selected).cloned();
    }
}

/// Total order over rows for one sort spec.
///
/// Sentinel placement is direction-invariant; the direction flips only the
/// comparison of real values.
fn compare_rows(a: &WorkloadRow, b: &WorkloadRow, spec: SortSpec) -> Ordering {
    let av = a.cell(spec.column);
    let bv = b.cell(spec.column);
    match (av == SENTINEL, bv == SENTINEL) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = if spec.column == TIMESTAMP_COLUMN {
                compare_timestamps(&av, &bv)
            } else {
                av.cmp(&bv)
            };
            if spec.ascending { ord } else { ord.reverse() }
        }
    }
}

/// Chronological comparison; unparseable pairs fall back to string order so
/// the comparator stays total.
fn compare_timestamps(a: &str, b: &str) -> Ordering {
    match (parse_timestamp(a), parse_timestamp(b)) {
        (Some(ta), Some(tb)) => ta.cmp(&tb),
        _ => a.cmp(b),
    }
}

/// Parses the timestamp formats the server is known to render.
fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|d| d.and_hms_opt(0, 0, 0).unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StatusFilter;

    fn row(name: &str, ts: Option<&str>, oom: u64, term: u64) -> WorkloadRow {
        WorkloadRow {
            namespace: "ns".to_string(),
            kind: "Deployment".to_string(),
            name: name.to_string(),
            last_disruption: ts.map(str::to_string),
            oom_kills: oom,
            terminations: term,
        }
    }

    fn names(table: &WorkloadTable) -> Vec<&str> {
        table.rows().iter().map(|r| r.name.as_str()).collect()
    }

    fn table_with(rows: Vec<WorkloadRow>) -> WorkloadTable {
        let mut table = WorkloadTable::new();
        table.replace(rows);
        table
    }

    #[test]
    fn sentinel_sorts_last_in_both_directions() {
        let rows = vec![
            row("quiet", None, 0, 0),
            row("late", Some("2024-01-02"), 1, 0),
            row("early", Some("2024-01-01"), 1, 0),
        ];

        let mut table = table_with(rows.clone());
        table.apply_sort(SortSpec {
            column: TIMESTAMP_COLUMN,
            ascending: true,
        });
        assert_eq!(names(&table), ["early", "late", "quiet"]);

        let mut table = table_with(rows);
        table.apply_sort(SortSpec {
            column: TIMESTAMP_COLUMN,
            ascending: false,
        });
        assert_eq!(names(&table), ["late", "early", "quiet"]);
    }

    #[test]
    fn two_sentinels_compare_equal_and_keep_order() {
        let mut table = table_with(vec![
            row("a", None, 0, 0),
            row("b", None, 0, 0),
            row("c", Some("2024-01-01"), 1, 0),
        ]);
        table.apply_sort(SortSpec {
            column: TIMESTAMP_COLUMN,
            ascending: true,
        });
        assert_eq!(names(&table), ["c", "a", "b"]);
    }

    #[test]
    fn ties_preserve_prior_order_in_both_directions() {
        // Equal OOM counts: "a" stays before "b" either way.
        for ascending in [true, false] {
            let mut table = table_with(vec![row("a", None, 1, 0), row("b", None, 1, 0)]);
            table.apply_sort(SortSpec { column: 4, ascending });
            assert_eq!(names(&table), ["a", "b"], "ascending={}", ascending);
        }
    }

    #[test]
    fn timestamp_column_sorts_chronologically() {
        let mut table = table_with(vec![
            row("second", Some("2024-01-02"), 0, 0),
            row("first", Some("2024-01-01"), 0, 0),
        ]);
        table.apply_sort(SortSpec {
            column: TIMESTAMP_COLUMN,
            ascending: true,
        });
        assert_eq!(names(&table), ["first", "second"]);
    }

    #[test]
    fn timestamp_parsing_accepts_datetime_formats() {
        let mut table = table_with(vec![
            row("b", Some("2024-01-01 10:30:00"), 0, 0),
            row("a", Some("2024-01-01 09:15:00"), 0, 0),
        ]);
        table.apply_sort(SortSpec {
            column: TIMESTAMP_COLUMN,
            ascending: true,
        });
        assert_eq!(names(&table), ["a", "b"]);
    }

    #[test]
    fn other_columns_sort_as_strings() {
        // String order, not numeric: "10" < "9".
        let mut table = table_with(vec![row("big", None, 9, 0), row("small", None, 10, 0)]);
        table.apply_sort(SortSpec {
            column: 4,
            ascending: true,
        });
        assert_eq!(names(&table), ["small", "big"]);
    }

    #[test]
    fn sort_keeps_visibility_mask_aligned() {
        let mut table = table_with(vec![
            row("visible-late", Some("2024-01-02"), 2, 0),
            row("hidden", Some("2024-01-03"), 0, 0),
            row("visible-early", Some("2024-01-01"), 1, 0),
        ]);
        table.apply_filter(&FilterSet {
            status: StatusFilter::Oom,
            ..FilterSet::default()
        });
        table.apply_sort(SortSpec {
            column: TIMESTAMP_COLUMN,
            ascending: true,
        });

        let visible: Vec<&str> = table.visible_rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(visible, ["visible-early", "visible-late"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn filter_hides_without_removing() {
        let mut table = table_with(vec![row("a", None, 1, 0), row("b", None, 0, 0)]);
        table.apply_filter(&FilterSet {
            status: StatusFilter::Oom,
            ..FilterSet::default()
        });
        assert_eq!(table.visible_rows().len(), 1);
        assert_eq!(table.len(), 2);

        // Re-match with a looser filter brings the row back.
        table.apply_filter(&FilterSet::default());
        assert_eq!(table.visible_rows().len(), 2);
    }

    #[test]
    fn tracked_selection_follows_row_across_sort() {
        let mut table = table_with(vec![
            row("a", Some("2024-01-01"), 0, 0),
            row("b", Some("2024-01-02"), 0, 0),
        ]);
        table.selected = 1; // "b"
        table.resolve_selection();
        assert_eq!(table.tracked_key.as_ref().unwrap().name, "b");

        table.apply_sort(SortSpec {
            column: TIMESTAMP_COLUMN,
            ascending: false,
        });
        table.resolve_selection();
        assert_eq!(table.selected, 0);
        assert_eq!(table.selected_row().unwrap().name, "b");
    }

    #[test]
    fn tracked_selection_clamps_when_row_disappears() {
        let mut table = table_with(vec![row("a", None, 1, 0), row("b", None, 1, 0)]);
        table.selected = 1;
        table.resolve_selection();

        table.replace(vec![row("a", None, 1, 0)]);
        table.resolve_selection();
        assert_eq!(table.selected, 0);
        assert_eq!(table.selected_row().unwrap().name, "a");
    }
}
