//! Dashboard view-model. The loading flag, error and results live in a single
//! tagged [`Phase`], so a failed action can never also show rows and a running
//! action can never also show an error.
//!
//! Each action is split into `begin_*`, which moves the state to `Loading` and
//! hands out a [`PendingRequest`], and [`Dashboard::settle`], which applies the
//! response. Only the most recently started request may settle the state; older
//! ones are dropped when they arrive.

use super::{
    api::Endpoint,
    errors::AppError,
    records::{extract_list, extract_single, Record},
};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

/// Message shown when a search fails without any detail.
pub const NOT_FOUND_MESSAGE: &str = "not found";

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    /// A request is in flight; the rows shown before it started stay visible.
    Loading { previous: Vec<Record> },
    Loaded { results: Vec<Record> },
    Failed { error: String },
}

/// Which action a request belongs to; decides how its response is read.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    FetchAll,
    SearchById,
}

/// A request handed out by `begin_*`, to be passed back to `settle`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingRequest {
    ticket: u64,
    kind: RequestKind,
    endpoint: Endpoint,
}

impl PendingRequest {
    #[must_use]
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    #[must_use]
    pub fn kind(&self) -> RequestKind {
        self.kind
    }

    #[must_use]
    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Dashboard {
    query: String,
    #[serde(flatten)]
    phase: Phase,
    #[serde(skip)]
    latest_ticket: u64,
}

impl Dashboard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Rows currently on screen.
    #[must_use]
    pub fn results(&self) -> &[Record] {
        match &self.phase {
            Phase::Loading { previous } => previous.as_slice(),
            Phase::Loaded { results } => results.as_slice(),
            Phase::Idle | Phase::Failed { .. } => &[],
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Loading { .. })
    }

    /// Current error message, empty when there is none.
    #[must_use]
    pub fn error(&self) -> &str {
        match &self.phase {
            Phase::Failed { error } => error.as_str(),
            _ => "",
        }
    }

    /// Text input binding.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Starts fetch-all: clears the error and enters `Loading`.
    pub fn begin_fetch_all(&mut self) -> PendingRequest {
        self.begin(RequestKind::FetchAll, Endpoint::Users)
    }

    /// Starts search-by-id with the trimmed query. Returns `None` and leaves the
    /// state untouched when the query is blank.
    pub fn begin_search(&mut self) -> Option<PendingRequest> {
        let id = self.query.trim();
        if id.is_empty() {
            return None;
        }
        let endpoint = Endpoint::User(id.to_string());
        Some(self.begin(RequestKind::SearchById, endpoint))
    }

    /// Resets query, results and error. A request already in flight stays in
    /// flight and may still settle afterwards.
    pub fn clear(&mut self) {
        self.query.clear();
        self.phase = if self.is_loading() {
            Phase::Loading {
                previous: Vec::new(),
            }
        } else {
            Phase::Idle
        };
    }

    /// Applies the outcome of `request`. Returns `false` and changes nothing when
    /// a newer request was started in the meantime.
    pub fn settle(&mut self, request: &PendingRequest, outcome: Result<Value, AppError>) -> bool {
        if request.ticket != self.latest_ticket {
            debug!(
                "discarding stale response for ticket {} (latest {})",
                request.ticket, self.latest_ticket
            );
            return false;
        }

        self.phase = match (request.kind, outcome) {
            (RequestKind::FetchAll, Ok(body)) => Phase::Loaded {
                results: extract_list(body),
            },
            (RequestKind::FetchAll, Err(err)) => Phase::Failed {
                error: err.to_string(),
            },
            (RequestKind::SearchById, Ok(body)) => match extract_single(body) {
                Some(record) => Phase::Loaded {
                    results: vec![record],
                },
                None => Phase::Failed {
                    error: AppError::NoResult.to_string(),
                },
            },
            (RequestKind::SearchById, Err(err)) => {
                let error = err.to_string();
                Phase::Failed {
                    error: if error.is_empty() {
                        NOT_FOUND_MESSAGE.to_string()
                    } else {
                        error
                    },
                }
            }
        };

        true
    }

    fn begin(&mut self, kind: RequestKind, endpoint: Endpoint) -> PendingRequest {
        self.latest_ticket += 1;
        let previous = std::mem::take(&mut self.phase);
        self.phase = Phase::Loading {
            previous: match previous {
                Phase::Loading { previous } => previous,
                Phase::Loaded { results } => results,
                Phase::Idle | Phase::Failed { .. } => Vec::new(),
            },
        };

        PendingRequest {
            ticket: self.latest_ticket,
            kind,
            endpoint,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Dashboard, Phase, RequestKind};
    use crate::dashboard::{api::Endpoint, errors::AppError};
    use serde_json::json;

    fn boom() -> AppError {
        AppError::Request {
            status: 500,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn new_dashboard_is_idle() {
        let dashboard = Dashboard::new();
        assert_eq!(dashboard.phase(), &Phase::Idle);
        assert!(dashboard.results().is_empty());
        assert_eq!(dashboard.error(), "");
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn fetch_all_loads_results() {
        let mut dashboard = Dashboard::new();
        let request = dashboard.begin_fetch_all();
        assert!(dashboard.is_loading());
        assert_eq!(request.kind(), RequestKind::FetchAll);
        assert_eq!(request.endpoint(), &Endpoint::Users);

        assert!(dashboard.settle(&request, Ok(json!({"users": [{"id": "1"}, {"id": "2"}]}))));
        assert!(!dashboard.is_loading());
        assert_eq!(dashboard.results().len(), 2);
        assert_eq!(dashboard.error(), "");
    }

    #[test]
    fn fetch_all_unknown_shape_yields_empty_results() {
        let mut dashboard = Dashboard::new();
        let request = dashboard.begin_fetch_all();
        dashboard.settle(&request, Ok(json!({"rows": [{"id": "1"}]})));
        assert_eq!(dashboard.phase(), &Phase::Loaded { results: vec![] });
    }

    #[test]
    fn fetch_all_failure_sets_error_and_empties_results() {
        let mut dashboard = Dashboard::new();
        let request = dashboard.begin_fetch_all();
        dashboard.settle(&request, Ok(json!([{"id": "1"}])));

        let request = dashboard.begin_fetch_all();
        assert_eq!(dashboard.results().len(), 1, "rows stay visible while loading");
        dashboard.settle(&request, Err(boom()));

        assert_eq!(dashboard.error(), "request failed (500): boom");
        assert!(dashboard.results().is_empty());
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn begin_clears_previous_error() {
        let mut dashboard = Dashboard::new();
        let request = dashboard.begin_fetch_all();
        dashboard.settle(&request, Err(boom()));
        assert!(!dashboard.error().is_empty());

        let _request = dashboard.begin_fetch_all();
        assert_eq!(dashboard.error(), "");
        assert!(dashboard.is_loading());
    }

    #[test]
    fn blank_search_is_a_no_op() {
        for query in ["", "   ", "\t\n"] {
            let mut dashboard = Dashboard::new();
            dashboard.set_query(query);
            let before = dashboard.clone();
            assert!(dashboard.begin_search().is_none());
            assert_eq!(dashboard, before);
        }
    }

    #[test]
    fn search_trims_query_for_endpoint() {
        let mut dashboard = Dashboard::new();
        dashboard.set_query("  7 ");
        let request = dashboard.begin_search();
        assert_eq!(
            request.map(|r| r.endpoint().clone()),
            Some(Endpoint::User("7".to_string()))
        );
        assert_eq!(dashboard.query(), "  7 ");
    }

    #[test]
    fn search_found_yields_single_record() {
        let mut dashboard = Dashboard::new();
        dashboard.set_query("1");
        let Some(request) = dashboard.begin_search() else {
            panic!("search should start");
        };
        dashboard.settle(
            &request,
            Ok(json!({"user": {"id": 1, "first_name": "A", "last_name": "B"}})),
        );

        assert_eq!(dashboard.error(), "");
        assert_eq!(
            serde_json::to_value(dashboard.results()).ok(),
            Some(json!([{"id": 1, "first_name": "A", "last_name": "B"}]))
        );
    }

    #[test]
    fn search_empty_body_is_no_result() {
        let mut dashboard = Dashboard::new();
        dashboard.set_query("1");
        let Some(request) = dashboard.begin_search() else {
            panic!("search should start");
        };
        dashboard.settle(&request, Ok(json!({})));

        assert!(dashboard.results().is_empty());
        assert_eq!(dashboard.error(), "no result");
    }

    #[test]
    fn search_failure_uses_error_message() {
        let mut dashboard = Dashboard::new();
        dashboard.set_query("404");
        let Some(request) = dashboard.begin_search() else {
            panic!("search should start");
        };
        dashboard.settle(
            &request,
            Err(AppError::Request {
                status: 404,
                message: r#"{"error": "not found"}"#.to_string(),
            }),
        );

        assert!(dashboard.results().is_empty());
        assert_eq!(
            dashboard.error(),
            r#"request failed (404): {"error": "not found"}"#
        );
    }

    #[test]
    fn clear_resets_everything_but_loading() {
        let mut dashboard = Dashboard::new();
        dashboard.set_query("2");
        let request = dashboard.begin_fetch_all();
        dashboard.settle(&request, Ok(json!([{"id": "2"}])));
        dashboard.clear();
        assert_eq!(dashboard.query(), "");
        assert_eq!(dashboard.phase(), &Phase::Idle);

        let request = dashboard.begin_fetch_all();
        dashboard.settle(&request, Err(boom()));
        dashboard.clear();
        assert_eq!(dashboard.error(), "");

        let _pending = dashboard.begin_fetch_all();
        dashboard.clear();
        assert!(dashboard.is_loading());
        assert!(dashboard.results().is_empty());
    }

    #[test]
    fn stale_response_is_discarded() {
        let mut dashboard = Dashboard::new();
        let slow = dashboard.begin_fetch_all();
        dashboard.set_query("1");
        let Some(fast) = dashboard.begin_search() else {
            panic!("search should start");
        };

        assert!(dashboard.settle(&fast, Ok(json!({"user": {"id": "1"}}))));
        assert!(!dashboard.settle(&slow, Ok(json!([{"id": "1"}, {"id": "2"}]))));

        assert_eq!(dashboard.results().len(), 1);
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn loading_lasts_until_latest_request_settles() {
        let mut dashboard = Dashboard::new();
        let first = dashboard.begin_fetch_all();
        let second = dashboard.begin_fetch_all();
        assert!(second.ticket() > first.ticket());

        assert!(!dashboard.settle(&first, Ok(json!([]))));
        assert!(dashboard.is_loading());

        assert!(dashboard.settle(&second, Ok(json!([]))));
        assert!(!dashboard.is_loading());
    }

    #[test]
    fn repeated_fetch_all_is_idempotent() {
        let body = json!({"data": [{"id": "1", "department": "Engineering"}]});
        let mut dashboard = Dashboard::new();

        let request = dashboard.begin_fetch_all();
        dashboard.settle(&request, Ok(body.clone()));
        let first = dashboard.results().to_vec();

        let request = dashboard.begin_fetch_all();
        dashboard.settle(&request, Ok(body));
        assert_eq!(dashboard.results(), first.as_slice());
    }
}
