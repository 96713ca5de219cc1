//! Runs dashboard actions end to end: start the action on the shared state,
//! await the request without holding the lock, then settle the response.

use super::{
    api::ApiClient,
    render::{render, View},
    state::{Dashboard, PendingRequest},
};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

#[derive(Clone, Debug)]
pub struct Controller {
    client: ApiClient,
    state: Arc<Mutex<Dashboard>>,
}

impl Controller {
    #[must_use]
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            state: Arc::new(Mutex::new(Dashboard::new())),
        }
    }

    /// Initial load, run once when the dashboard is shown.
    pub async fn mount(&self) {
        self.fetch_all().await;
    }

    #[instrument(skip(self))]
    pub async fn fetch_all(&self) {
        let request = self.state.lock().await.begin_fetch_all();
        self.run(request).await;
    }

    /// Searches by the current query. Returns `false` when the query is blank
    /// and nothing was requested.
    #[instrument(skip(self))]
    pub async fn search_by_id(&self) -> bool {
        let request = self.state.lock().await.begin_search();
        let Some(request) = request else {
            debug!("search skipped: empty query");
            return false;
        };
        self.run(request).await;
        true
    }

    /// Sets the query and searches by it.
    pub async fn search(&self, query: &str) -> bool {
        self.set_query(query).await;
        self.search_by_id().await
    }

    pub async fn set_query(&self, query: &str) {
        self.state.lock().await.set_query(query);
    }

    pub async fn clear(&self) {
        self.state.lock().await.clear();
    }

    /// Copy of the current state.
    pub async fn snapshot(&self) -> Dashboard {
        self.state.lock().await.clone()
    }

    pub async fn view(&self) -> View {
        render(&*self.state.lock().await)
    }

    async fn run(&self, request: PendingRequest) {
        let outcome = self.client.get(request.endpoint()).await;
        if let Err(err) = &outcome {
            warn!("request for {:?} failed: {}", request.endpoint(), err);
        }

        if !self.state.lock().await.settle(&request, outcome) {
            debug!("response for ticket {} was superseded", request.ticket());
        }
    }
}
