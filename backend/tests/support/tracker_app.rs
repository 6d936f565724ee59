//! Harness driving the full HTTP stack over the in-memory store.
//!
//! Each request builds a fresh app around the same shared store, so writes
//! made by one call are visible to the next.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::Value;
use tracker::Trace;
use tracker::domain::TRACE_ID_HEADER;
use tracker::inbound::http::configure;
use tracker::inbound::http::state::HttpState;
use tracker::test_support::InMemoryStore;

/// Captured response.
pub(crate) struct Reply {
    pub(crate) status: StatusCode,
    pub(crate) location: Option<String>,
    pub(crate) trace_id: Option<String>,
    pub(crate) body: Value,
}

impl Reply {
    /// The `message` field of an error body.
    pub(crate) fn message(&self) -> &str {
        self.body["message"].as_str().unwrap_or_default()
    }

    /// The `code` field of an error body.
    pub(crate) fn code(&self) -> &str {
        self.body["code"].as_str().unwrap_or_default()
    }
}

pub(crate) struct Tracker {
    store: Arc<InMemoryStore>,
}

impl Tracker {
    /// A harness over the rows the initial migration seeds.
    pub(crate) fn seeded() -> Self {
        Self {
            store: Arc::new(InMemoryStore::seeded()),
        }
    }

    pub(crate) fn store(&self) -> &InMemoryStore {
        &self.store
    }

    pub(crate) async fn get(&self, path: &str) -> Reply {
        self.send(test::TestRequest::get().uri(path)).await
    }

    pub(crate) async fn post(&self, path: &str, body: Value) -> Reply {
        self.send(test::TestRequest::post().uri(path).set_json(body))
            .await
    }

    pub(crate) async fn put(&self, path: &str, body: Value) -> Reply {
        self.send(test::TestRequest::put().uri(path).set_json(body))
            .await
    }

    pub(crate) async fn delete(&self, path: &str) -> Reply {
        self.send(test::TestRequest::delete().uri(path)).await
    }

    async fn send(&self, request: test::TestRequest) -> Reply {
        let state = HttpState::from_repositories(self.store.clone(), self.store.clone());
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .wrap(Trace)
                .configure(configure),
        )
        .await;
        let res = test::call_service(&app, request.to_request()).await;

        let status = res.status();
        let header_text = |name: &str| {
            res.headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_owned)
        };
        let location = header_text(header::LOCATION.as_str());
        let trace_id = header_text(TRACE_ID_HEADER);
        let bytes = test::read_body(res).await;
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        Reply {
            status,
            location,
            trace_id,
            body,
        }
    }
}
