//! Durable view state: active status filter and sort order.
//!
//! The state survives restarts through [`StateStore`] and survives every
//! refresh cycle because the refresh only ever reads it.

mod store;

pub use store::StateStore;

use serde::{Deserialize, Serialize};

/// Status filter buttons. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    /// Any disruption at all (OOM or termination).
    Disrupted,
    Oom,
    Termination,
}

impl StatusFilter {
    pub fn all() -> &'static [StatusFilter] {
        &[Self::All, Self::Disrupted, Self::Oom, Self::Termination]
    }

    /// Button label in the header bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::All => "All",
            Self::Disrupted => "Disrupted",
            Self::Oom => "OOM",
            Self::Termination => "Term",
        }
    }

    /// Stable token used for persistence and display.
    pub fn token(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Disrupted => "disrupted",
            Self::Oom => "oom",
            Self::Termination => "termination",
        }
    }

    /// Parses a stored token. Unknown tokens are treated as absent.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "all" => Some(Self::All),
            "disrupted" => Some(Self::Disrupted),
            "oom" => Some(Self::Oom),
            "termination" => Some(Self::Termination),
            _ => None,
        }
    }
}

/// Active sort: column index plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub column: usize,
    pub ascending: bool,
}

/// The durable user preference for current filter and sort.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewState {
    pub active_filter: StatusFilter,
    /// `None` = server order, no sort indicator.
    pub sort: Option<SortSpec>,
}

/// View state bound to its durable store. Mutations write through
/// immediately; persistence failures are swallowed and the in-memory state
/// stays authoritative for the session.
#[derive(Debug)]
pub struct PersistentViewState {
    state: ViewState,
    store: StateStore,
}

impl PersistentViewState {
    /// Loads the stored state. Missing or malformed entries default to
    /// `{all, no sort}` without failing.
    pub fn load(store: StateStore) -> Self {
        let active_filter = store
            .get(store::KEY_ACTIVE_FILTER)
            .and_then(|raw| StatusFilter::from_token(raw.trim()))
            .unwrap_or_default();

        // Stored as JSON {"column": n|null, "ascending": bool}; a null,
        // out-of-range, or unparseable column means no sort. The sort path
        // indexes row cells by this value, so it must never escape the
        // table's column range.
        let sort = store
            .get(store::KEY_CURRENT_SORT)
            .and_then(|raw| serde_json::from_str::<StoredSort>(&raw).ok())
            .and_then(|stored| {
                stored
                    .column
                    .filter(|column| *column < crate::model::COLUMN_COUNT)
                    .map(|column| SortSpec {
                        column,
                        ascending: stored.ascending,
                    })
            });

        Self {
            state: ViewState {
                active_filter,
                sort,
            },
            store,
        }
    }

    /// Current state, for snapshotting and rendering.
    pub fn get(&self) -> ViewState {
        self.state
    }

    pub fn active_filter(&self) -> StatusFilter {
        self.state.active_filter
    }

    pub fn sort(&self) -> Option<SortSpec> {
        self.state.sort
    }

    /// Switches the status filter and persists it.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.state.active_filter = filter;
        self.store.put(store::KEY_ACTIVE_FILTER, filter.token());
    }

    /// Switches the sort and persists it.
    pub fn set_sort(&mut self, column: usize, ascending: bool) {
        self.state.sort = Some(SortSpec { column, ascending });
        let stored = StoredSort {
            column: Some(column),
            ascending,
        };
        if let Ok(json) = serde_json::to_string(&stored) {
            self.store.put(store::KEY_CURRENT_SORT, &json);
        }
    }
}

/// On-disk shape of the `currentSort` entry.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSort {
    column: Option<usize>,
    ascending: bool,
}
