//! Live HTTP source for the wdmon server.

use std::time::Duration;

use reqwest::blocking::Client;

use crate::model::{DisruptionHistory, RetentionSettings, SaveStatus, WorkloadKey, WorkloadRow};

use super::markup::parse_workload_table;
use super::{DisruptionSource, SourceError};

/// Source backed by a running wdmon server.
///
/// All requests are blocking calls made from the event loop; the request
/// timeout keeps a stalled server from freezing the UI for long.
pub struct HttpSource {
    client: Client,
    /// Server base, e.g. `http://wdmon.example:8080`.
    base: String,
    /// Dashboard page path addressed by the refresh cycle.
    page_path: String,
    endpoint: String,
}

impl HttpSource {
    pub fn new(base: &str, page_path: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        let base = base.trim_end_matches('/').to_string();
        let page_path = if page_path.starts_with('/') {
            page_path.to_string()
        } else {
            format!("/{}", page_path)
        };
        let endpoint = format!("{}{}", base, page_path);
        Ok(Self {
            client,
            base,
            page_path,
            endpoint,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    fn get(&self, path: &str) -> Result<reqwest::blocking::Response, SourceError> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }
        Ok(response)
    }
}

impl DisruptionSource for HttpSource {
    fn fetch_workloads(&mut self) -> Result<Vec<WorkloadRow>, SourceError> {
        let page = self
            .get(&self.page_path.clone())?
            .text()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        parse_workload_table(&page)
    }

    fn fetch_details(&mut self, key: &WorkloadKey) -> Result<DisruptionHistory, SourceError> {
        self.get(&format!("/workload/{}", key.encoded()))?
            .json()
            .map_err(|e| SourceError::Parse(e.to_string()))
    }

    fn fetch_settings(&mut self) -> Result<RetentionSettings, SourceError> {
        self.get("/settings")?
            .json()
            .map_err(|e| SourceError::Parse(e.to_string()))
    }

    fn save_settings(&mut self, settings: RetentionSettings) -> Result<SaveStatus, SourceError> {
        let response = self
            .client
            .post(self.url("/settings"))
            .json(&settings)
            .send()
            .map_err(|e| SourceError::Transport(e.to_string()))?;
        if !response.status().is_success() {
            return Err(SourceError::Status(response.status().as_u16()));
        }
        response.json().map_err(|e| SourceError::Parse(e.to_string()))
    }

    fn endpoint(&self) -> &str {
        &self.endpoint
    }
}
