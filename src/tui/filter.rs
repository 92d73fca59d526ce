//! Row matching: the pure predicate behind the filter controls.

use crate::model::WorkloadRow;
use crate::state::StatusFilter;

/// The four filter controls: namespace text, type select, workload text,
/// and the status buttons. Empty text fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    /// Case-insensitive substring on the namespace.
    pub namespace: String,
    /// Exact type match; empty is the wildcard.
    pub kind: String,
    /// Case-insensitive substring on the workload name.
    pub workload: String,
    pub status: StatusFilter,
}

impl FilterSet {
    /// True iff the row passes all four predicates.
    pub fn matches(&self, row: &WorkloadRow) -> bool {
        let matches_namespace = self.namespace.is_empty()
            || row
                .namespace
                .to_lowercase()
                .contains(&self.namespace.to_lowercase());
        let matches_kind = self.kind.is_empty() || row.kind == self.kind;
        let matches_workload = self.workload.is_empty()
            || row
                .name
                .to_lowercase()
                .contains(&self.workload.to_lowercase());
        let matches_status = match self.status {
            StatusFilter::All => true,
            StatusFilter::Disrupted => row.total() > 0,
            StatusFilter::Oom => row.oom_kills > 0,
            StatusFilter::Termination => row.terminations > 0,
        };

        matches_namespace && matches_kind && matches_workload && matches_status
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> WorkloadRow {
        WorkloadRow {
            namespace: "prod-a".to_string(),
            kind: "Deployment".to_string(),
            name: "api".to_string(),
            last_disruption: Some("2024-01-01".to_string()),
            oom_kills: 2,
            terminations: 0,
        }
    }

    #[test]
    fn all_four_predicates_are_anded() {
        let row = sample();
        let filters = FilterSet {
            namespace: "prod".to_string(),
            kind: String::new(),
            workload: String::new(),
            status: StatusFilter::Oom,
        };
        assert!(filters.matches(&row));

        let filters = FilterSet {
            status: StatusFilter::Termination,
            ..filters
        };
        assert!(!filters.matches(&row));
    }

    #[test]
    fn text_filters_are_case_insensitive_substrings() {
        let row = sample();
        let filters = FilterSet {
            namespace: "PROD".to_string(),
            workload: "Api".to_string(),
            ..FilterSet::default()
        };
        assert!(filters.matches(&row));

        let filters = FilterSet {
            namespace: "staging".to_string(),
            ..FilterSet::default()
        };
        assert!(!filters.matches(&row));
    }

    #[test]
    fn kind_filter_is_exact_or_wildcard() {
        let row = sample();
        let mut filters = FilterSet::default();
        assert!(filters.matches(&row));

        filters.kind = "Deployment".to_string();
        assert!(filters.matches(&row));

        filters.kind = "Deploy".to_string();
        assert!(!filters.matches(&row));
    }

    #[test]
    fn disrupted_means_any_disruption() {
        let mut quiet = sample();
        quiet.oom_kills = 0;
        quiet.terminations = 0;

        let disrupted = FilterSet {
            status: StatusFilter::Disrupted,
            ..FilterSet::default()
        };
        assert!(!disrupted.matches(&quiet));
        assert!(FilterSet::default().matches(&quiet));

        quiet.terminations = 1;
        assert!(disrupted.matches(&quiet));
        quiet.terminations = 0;
        quiet.oom_kills = 1;
        assert!(disrupted.matches(&quiet));
    }
}
