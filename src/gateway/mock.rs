//! # Mock Transport
//!
//! A scripted [`Transport`] for testing the gateway and the coordinator without a
//! server.
//!
//! Expectations are consumed in order: each request must match the method and
//! path (query string included) of the next queued expectation.
//!
//! ```rust,ignore
//! let mock = MockTransport::new();
//! mock.expect_get("/products?page=1&pageSize=10")
//!     .return_json(200, json!({ "products": [], "total": 0, "pages": 0 }));
//!
//! let gateway = FetchGateway::new(mock.clone());
//! let outcome = gateway.fetch_list(&ListParams::page(1)).await;
//! mock.verify();
//! ```
//!
//! A held expectation does not answer until the test releases it, which lets a
//! test complete requests in any order:
//!
//! ```rust,ignore
//! let mut first = mock.expect_get("/products/search?q=lip").hold_json(200, json!({ "results": [] }));
//! // ... start the request ...
//! first.in_flight().await;
//! // ... start and finish a newer request ...
//! first.release();
//! ```

use super::transport::{Method, Transport, TransportError, TransportResponse};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::oneshot;

type Reply = Result<TransportResponse, TransportError>;

enum Response {
    Ready(Reply),
    Held {
        reply: Reply,
        arrived: oneshot::Sender<()>,
        release: oneshot::Receiver<()>,
    },
}

struct Expectation {
    method: Method,
    path: String,
    response: Response,
}

/// A [`Transport`] that answers from a queue of expectations.
///
/// Clones share the same queue.
#[derive(Clone, Default)]
pub struct MockTransport {
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
    received: Arc<Mutex<Vec<(Method, String)>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Expects a `GET` of `path`.
    pub fn expect_get(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Get, path)
    }

    /// Expects a `POST` to `path`.
    pub fn expect_post(&self, path: impl Into<String>) -> ExpectationBuilder {
        self.expect(Method::Post, path)
    }

    fn expect(&self, method: Method, path: impl Into<String>) -> ExpectationBuilder {
        ExpectationBuilder {
            method,
            path: path.into(),
            expectations: self.expectations.clone(),
        }
    }

    /// Every request received so far, in arrival order.
    pub fn received(&self) -> Vec<(Method, String)> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Verifies that all expectations were met.
    pub fn verify(&self) {
        let remaining = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn request(
        &self,
        method: Method,
        path: &str,
        _body: Option<Value>,
    ) -> Result<TransportResponse, TransportError> {
        self.received
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((method, path.to_string()));

        let next = self
            .expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front();

        let Some(expectation) = next else {
            panic!("Unexpected request: {} {path}", method.as_str());
        };
        assert_eq!(
            (expectation.method, expectation.path.as_str()),
            (method, path),
            "Request does not match the next expectation"
        );

        match expectation.response {
            Response::Ready(reply) => reply,
            Response::Held {
                reply,
                arrived,
                release,
            } => {
                let _ = arrived.send(());
                let _ = release.await;
                reply
            }
        }
    }
}

/// Builder for one expected request.
pub struct ExpectationBuilder {
    method: Method,
    path: String,
    expectations: Arc<Mutex<VecDeque<Expectation>>>,
}

impl ExpectationBuilder {
    /// Answers with `status` and a JSON body.
    pub fn return_json(self, status: u16, body: Value) {
        self.push(Response::Ready(Ok(TransportResponse::new(status, body))));
    }

    /// Fails without a response.
    pub fn return_err(self, error: TransportError) {
        self.push(Response::Ready(Err(error)));
    }

    /// Answers with `status` and a JSON body once the returned [`Gate`] is released.
    pub fn hold_json(self, status: u16, body: Value) -> Gate {
        let (arrived_tx, arrived_rx) = oneshot::channel();
        let (release_tx, release_rx) = oneshot::channel();
        self.push(Response::Held {
            reply: Ok(TransportResponse::new(status, body)),
            arrived: arrived_tx,
            release: release_rx,
        });
        Gate {
            arrived: Some(arrived_rx),
            release: release_tx,
        }
    }

    fn push(self, response: Response) {
        self.expectations
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push_back(Expectation {
                method: self.method,
                path: self.path,
                response,
            });
    }
}

/// Control over a held response.
pub struct Gate {
    arrived: Option<oneshot::Receiver<()>>,
    release: oneshot::Sender<()>,
}

impl Gate {
    /// Waits until the held request has reached the transport.
    pub async fn in_flight(&mut self) {
        if let Some(arrived) = self.arrived.take() {
            let _ = arrived.await;
        }
    }

    /// Lets the held response complete.
    pub fn release(self) {
        let _ = self.release.send(());
    }
}
