//! View model for the disruption details panel.

use crate::model::{DisruptionEvent, DisruptionReason};

use super::{RowStyleClass, ViewRow};

/// Column headers of the details table.
pub fn headers() -> [&'static str; 4] {
    ["TIMESTAMP", "POD", "CONTAINER", "REASON"]
}

/// Builds the detail rows in server order (no client resort).
///
/// OOM kills get the warning class; everything else alternates between
/// normal and dimmed, a cosmetic stagger only.
pub fn build_rows(events: &[DisruptionEvent]) -> Vec<ViewRow> {
    events
        .iter()
        .enumerate()
        .map(|(i, event)| {
            let style = match event.reason {
                DisruptionReason::OomKilled => RowStyleClass::Warning,
                DisruptionReason::Other(_) if i % 2 == 1 => RowStyleClass::Dimmed,
                DisruptionReason::Other(_) => RowStyleClass::Normal,
            };
            ViewRow {
                cells: vec![
                    event.timestamp.clone(),
                    event.pod.clone(),
                    event.container.clone(),
                    event.reason.as_str().to_string(),
                ],
                style,
            }
        })
        .collect()
}
