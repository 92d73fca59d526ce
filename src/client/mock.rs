//! Canned data source for tests and the `--mock` demo mode.

use std::collections::HashMap;

use crate::model::{
    DisruptionEvent, DisruptionHistory, RetentionSettings, SaveStatus, WorkloadKey, WorkloadRow,
};

use super::{DisruptionSource, SourceError};

/// In-memory source serving a fixed row set and per-workload histories.
///
/// Tests drive it through `set_rows`/`fail_next_fetch`; the demo mode uses
/// the pre-built [`MockSource::typical_cluster`] scenario.
#[derive(Debug)]
pub struct MockSource {
    rows: Vec<WorkloadRow>,
    histories: HashMap<String, DisruptionHistory>,
    settings: RetentionSettings,
    /// Status string returned by the next `save_settings` call.
    pub save_response: String,
    /// When set, the next `fetch_workloads` fails once with a transport error.
    pub fail_next_fetch: bool,
    /// Number of completed `fetch_workloads` calls.
    pub fetch_count: usize,
    /// Number of completed `fetch_details` calls.
    pub detail_fetch_count: usize,
}

impl MockSource {
    pub fn new(rows: Vec<WorkloadRow>) -> Self {
        Self {
            rows,
            save_response: "ok".to_string(),
            ..Self::empty()
        }
    }

    fn empty() -> Self {
        Self {
            rows: Vec::new(),
            histories: HashMap::new(),
            settings: RetentionSettings::default(),
            save_response: "ok".to_string(),
            fail_next_fetch: false,
            fetch_count: 0,
            detail_fetch_count: 0,
        }
    }

    /// A small cluster with a mix of disrupted and quiet workloads.
    pub fn typical_cluster() -> Self {
        let rows = vec![
            row("prod-a", "Deployment", "api", Some("2024-03-01 10:15:00"), 2, 0),
            row("prod-a", "Deployment", "worker", Some("2024-03-02 01:40:00"), 0, 1),
            row("prod-b", "StatefulSet", "db", Some("2024-02-28 23:05:00"), 3, 2),
            row("kube-system", "DaemonSet", "log-agent", None, 0, 0),
            row("staging", "Deployment", "api", None, 0, 0),
        ];

        let mut source = Self::new(rows);
        source.insert_history(
            "prod-a/Deployment/api",
            vec![
                event("2024-03-01 10:15:00", "api-7f9c", "api", "OOMKilled"),
                event("2024-02-29 08:02:00", "api-5d21", "api", "OOMKilled"),
            ],
        );
        source.insert_history(
            "prod-b/StatefulSet/db",
            vec![
                event("2024-02-28 23:05:00", "db-0", "postgres", "OOMKilled"),
                event("2024-02-27 14:11:00", "db-1", "postgres", "Error"),
            ],
        );
        source
    }

    /// Replaces the rows served by the next fetch.
    pub fn set_rows(&mut self, rows: Vec<WorkloadRow>) {
        self.rows = rows;
    }

    pub fn insert_history(&mut self, key: &str, events: Vec<DisruptionEvent>) {
        self.histories
            .insert(key.to_string(), DisruptionHistory { disruptions: events });
    }
}

impl DisruptionSource for MockSource {
    fn fetch_workloads(&mut self) -> Result<Vec<WorkloadRow>, SourceError> {
        if self.fail_next_fetch {
            self.fail_next_fetch = false;
            return Err(SourceError::Transport("connection refused".to_string()));
        }
        self.fetch_count += 1;
        Ok(self.rows.clone())
    }

    fn fetch_details(&mut self, key: &WorkloadKey) -> Result<DisruptionHistory, SourceError> {
        self.detail_fetch_count += 1;
        Ok(self
            .histories
            .get(&key.to_string())
            .cloned()
            .unwrap_or_default())
    }

    fn fetch_settings(&mut self) -> Result<RetentionSettings, SourceError> {
        Ok(self.settings)
    }

    fn save_settings(&mut self, settings: RetentionSettings) -> Result<SaveStatus, SourceError> {
        let status = SaveStatus {
            status: self.save_response.clone(),
        };
        if status.is_ok() {
            self.settings = settings;
        }
        Ok(status)
    }

    fn endpoint(&self) -> &str {
        "mock://cluster"
    }
}

fn row(
    namespace: &str,
    kind: &str,
    name: &str,
    last_disruption: Option<&str>,
    oom_kills: u64,
    terminations: u64,
) -> WorkloadRow {
    WorkloadRow {
        namespace: namespace.to_string(),
        kind: kind.to_string(),
        name: name.to_string(),
        last_disruption: last_disruption.map(str::to_string),
        oom_kills,
        terminations,
    }
}

fn event(timestamp: &str, pod: &str, container: &str, reason: &str) -> DisruptionEvent {
    DisruptionEvent {
        timestamp: timestamp.to_string(),
        pod: pod.to_string(),
        container: container.to_string(),
        reason: reason.to_string().into(),
    }
}
