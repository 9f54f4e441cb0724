//! Scripted transport for unit tests

use std::cell::RefCell;
use std::collections::VecDeque;

use futures::channel::oneshot;

use super::app::Dashboard;
use super::network::{ApiRequest, NetworkError, RawResponse, Result, Transport};
use crate::config::DashboardConfig;
use crate::map::{MapSurfaces, SurfaceProbes};

pub(crate) enum Reply {
    Ready(Result<RawResponse>),
    /// Completes when the test sends the response
    Deferred(oneshot::Receiver<RawResponse>),
}

impl Reply {
    pub(crate) fn ok(body: &str) -> Self {
        Reply::Ready(Ok(RawResponse::new(200, body)))
    }

    pub(crate) fn json(value: serde_json::Value) -> Self {
        Reply::Ready(Ok(RawResponse::new(200, value.to_string())))
    }

    pub(crate) fn status(status: u16, body: &str) -> Self {
        Reply::Ready(Ok(RawResponse::new(status, body)))
    }

    pub(crate) fn unreachable() -> Self {
        Reply::Ready(Err(NetworkError::Transport("connection refused".into())))
    }

    pub(crate) fn deferred() -> (Self, oneshot::Sender<RawResponse>) {
        let (tx, rx) = oneshot::channel();
        (Reply::Deferred(rx), tx)
    }
}

/// Replays scripted replies in order and records every request
#[derive(Default)]
pub(crate) struct FakeTransport {
    replies: RefCell<VecDeque<Reply>>,
    requests: RefCell<Vec<ApiRequest>>,
}

impl FakeTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn reply(&self, reply: Reply) {
        self.replies.borrow_mut().push_back(reply);
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }
}

impl Transport for FakeTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse> {
        self.requests.borrow_mut().push(request);
        let reply = self.replies.borrow_mut().pop_front();
        match reply {
            Some(Reply::Ready(result)) => result,
            Some(Reply::Deferred(rx)) => rx
                .await
                .map_err(|_| NetworkError::Transport("reply dropped".into())),
            None => Err(NetworkError::Transport("no scripted reply".into())),
        }
    }
}

/// Dashboard over a fake transport with both providers available
pub(crate) fn dashboard() -> (Dashboard<FakeTransport>, SurfaceProbes) {
    dashboard_with(DashboardConfig {
        google_maps_api_key: Some("test-key".into()),
        ..DashboardConfig::default()
    })
}

/// Google Maps stays inert for lack of an API key
pub(crate) fn dashboard_without_google() -> (Dashboard<FakeTransport>, SurfaceProbes) {
    dashboard_with(DashboardConfig::default())
}

pub(crate) fn dashboard_with(config: DashboardConfig) -> (Dashboard<FakeTransport>, SurfaceProbes) {
    let (surfaces, probes) = MapSurfaces::headless();
    (Dashboard::new(config, FakeTransport::new(), surfaces), probes)
}
