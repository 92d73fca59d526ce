//! Core data types: workload rows, disruption events, settings payloads.

use serde::{Deserialize, Serialize};

/// Number of columns in the workload table.
pub const COLUMN_COUNT: usize = 6;

/// Index of the "LAST DISRUPTION" column, which sorts chronologically.
pub const TIMESTAMP_COLUMN: usize = 3;

/// Placeholder for absent data. Always sorts after real values.
pub const SENTINEL: &str = "-";

/// One workload: a (namespace, type, name) triple with its disruption counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkloadRow {
    pub namespace: String,
    /// Workload type (Deployment/StatefulSet/DaemonSet). Opaque for matching.
    pub kind: String,
    pub name: String,
    /// Timestamp of the most recent disruption, as rendered by the server.
    /// `None` renders as the `"-"` sentinel.
    pub last_disruption: Option<String>,
    pub oom_kills: u64,
    pub terminations: u64,
}

impl WorkloadRow {
    /// Total disruption count (OOM kills + terminations).
    pub fn total(&self) -> u64 {
        self.oom_kills + self.terminations
    }

    /// Identity key addressing the detail endpoint.
    pub fn key(&self) -> WorkloadKey {
        WorkloadKey {
            namespace: self.namespace.clone(),
            kind: self.kind.clone(),
            name: self.name.clone(),
        }
    }

    /// Column headers, in table order.
    pub fn headers() -> [&'static str; COLUMN_COUNT] {
        ["NAMESPACE", "TYPE", "WORKLOAD", "LAST DISRUPTION", "OOM", "TERM"]
    }

    /// Column widths matching `headers()`.
    pub fn widths() -> [u16; COLUMN_COUNT] {
        [18, 12, 24, 20, 5, 5]
    }

    /// Cell text in table order. Sorting and filtering operate on these.
    pub fn cells(&self) -> [String; COLUMN_COUNT] {
        [
            self.namespace.clone(),
            self.kind.clone(),
            self.name.clone(),
            self.last_disruption
                .clone()
                .unwrap_or_else(|| SENTINEL.to_string()),
            self.oom_kills.to_string(),
            self.terminations.to_string(),
        ]
    }

    /// Cell text for a single column.
    pub fn cell(&self, column: usize) -> String {
        self.cells()[column].clone()
    }
}

/// Identity key for a workload, serialized as `namespace/type/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct WorkloadKey {
    pub namespace: String,
    pub kind: String,
    pub name: String,
}

impl WorkloadKey {
    /// Parses `namespace/type/name`. Extra slashes stay in the name part.
    pub fn parse(key: &str) -> Option<Self> {
        let mut parts = key.splitn(3, '/');
        let namespace = parts.next()?.to_string();
        let kind = parts.next()?.to_string();
        let name = parts.next()?.to_string();
        Some(Self {
            namespace,
            kind,
            name,
        })
    }

    /// Detail panel title: `Disruption Details: {namespace}/{name} ({type})`.
    pub fn title(&self) -> String {
        format!(
            "Disruption Details: {}/{} ({})",
            self.namespace, self.name, self.kind
        )
    }

    /// Percent-encodes the key for use in the detail endpoint path.
    pub fn encoded(&self) -> String {
        let raw = self.to_string();
        let mut out = String::with_capacity(raw.len());
        for byte in raw.bytes() {
            match byte {
                b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                    out.push(byte as char)
                }
                _ => out.push_str(&format!("%{:02X}", byte)),
            }
        }
        out
    }
}

impl std::fmt::Display for WorkloadKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}/{}", self.namespace, self.kind, self.name)
    }
}

/// Why a container was killed. Anything but `OOMKilled` is "other".
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum DisruptionReason {
    OomKilled,
    Other(String),
}

impl From<String> for DisruptionReason {
    fn from(s: String) -> Self {
        if s == "OOMKilled" {
            Self::OomKilled
        } else {
            Self::Other(s)
        }
    }
}

impl DisruptionReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::OomKilled => "OOMKilled",
            Self::Other(s) => s,
        }
    }
}

/// One disruption event from the detail endpoint, in server order.
#[derive(Debug, Clone, Deserialize)]
pub struct DisruptionEvent {
    pub timestamp: String,
    pub pod: String,
    pub container: String,
    pub reason: DisruptionReason,
}

/// Payload of `GET /workload/{key}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DisruptionHistory {
    #[serde(default)]
    pub disruptions: Vec<DisruptionEvent>,
}

/// Payload of `GET /settings` and body of `POST /settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetentionSettings {
    pub retention_hours: u64,
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self { retention_hours: 24 }
    }
}

/// Response of `POST /settings`. Only `status == "ok"` counts as accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct SaveStatus {
    pub status: String,
}

impl SaveStatus {
    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
