// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Test utilities for mocking Kubernetes API responses.

use crate::types::MachineConfigPoolStatus;
use http::{Request, Response};
use kube::client::Body;
use kube::Client;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tower::Service;

pub const POOLS_PATH: &str = "/apis/machineconfiguration.openshift.io/v1/machineconfigpools";

type Key = (String, String);

/// A mock HTTP service that returns predefined responses based on request method and path.
///
/// Every (method, path) holds a queue of responses. Each request consumes the
/// head of the queue, except the last entry which keeps being served.
#[derive(Clone)]
pub struct MockService {
    responses: Arc<Mutex<HashMap<Key, VecDeque<(u16, String)>>>>,
    requests: Arc<Mutex<HashMap<Key, usize>>>,
}

impl MockService {
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            requests: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Add a response for GET requests matching the exact path
    pub fn on_get(self, path: &str, status: u16, body: &str) -> Self {
        self.on("GET", path, vec![(status, body.to_string())])
    }

    /// Serve the given GET responses in order, repeating the last one
    pub fn on_get_sequence(self, path: &str, responses: Vec<(u16, String)>) -> Self {
        self.on("GET", path, responses)
    }

    /// Add a response for POST requests matching the exact path
    pub fn on_post(self, path: &str, status: u16, body: &str) -> Self {
        self.on("POST", path, vec![(status, body.to_string())])
    }

    /// Add a response for DELETE requests matching the exact path
    pub fn on_delete(self, path: &str, status: u16, body: &str) -> Self {
        self.on("DELETE", path, vec![(status, body.to_string())])
    }

    /// Number of requests received for the method and exact path
    pub fn request_count(&self, method: &str, path: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .get(&(method.to_string(), path.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of requests received in total
    pub fn total_requests(&self) -> usize {
        self.requests.lock().unwrap().values().sum()
    }

    /// Build a kube Client from this mock service
    pub fn into_client(self) -> Client {
        Client::new(self, "default")
    }

    fn on(self, method: &str, path: &str, responses: Vec<(u16, String)>) -> Self {
        self.responses
            .lock()
            .unwrap()
            .insert((method.to_string(), path.to_string()), responses.into());
        self
    }

    fn next_response(&self, method: &str, path: &str) -> Option<(u16, String)> {
        let key = (method.to_string(), path.to_string());
        *self.requests.lock().unwrap().entry(key.clone()).or_default() += 1;

        let mut responses = self.responses.lock().unwrap();
        let queue = responses.get_mut(&key)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

impl Default for MockService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service<Request<Body>> for MockService {
    type Response = Response<Body>;
    type Error = tower::BoxError;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let (status, body) = self
            .next_response(&method, &path)
            .unwrap_or_else(|| (404, not_found_json("machineconfigpools", &path)));

        Box::pin(async move {
            Ok(Response::builder()
                .status(status)
                .header("content-type", "application/json")
                .body(Body::from(body.into_bytes()))
                .unwrap())
        })
    }
}

/// Path of a single MachineConfigPool
pub fn pool_path(name: &str) -> String {
    format!("{}/{}", POOLS_PATH, name)
}

/// Create a mock MachineConfigPool JSON response
pub fn pool_json(name: &str, status: Option<MachineConfigPoolStatus>) -> String {
    let mut pool = serde_json::json!({
        "apiVersion": "machineconfiguration.openshift.io/v1",
        "kind": "MachineConfigPool",
        "metadata": {
            "name": name,
            "uid": "test-uid"
        },
        "spec": {}
    });
    if let Some(status) = status {
        pool["status"] = serde_json::to_value(status).unwrap();
    }
    pool.to_string()
}

/// Status with the given machine counts and no conditions
pub fn counts(machines: i32, updated: i32, ready: i32, degraded: i32) -> MachineConfigPoolStatus {
    MachineConfigPoolStatus {
        machine_count: machines,
        updated_machine_count: updated,
        ready_machine_count: ready,
        degraded_machine_count: degraded,
        ..Default::default()
    }
}

/// Status carrying the given (type, status) conditions
pub fn with_conditions(conditions: &[(&str, &str)]) -> MachineConfigPoolStatus {
    MachineConfigPoolStatus {
        conditions: Some(
            conditions
                .iter()
                .map(|(t, s)| crate::types::MachineConfigPoolCondition {
                    condition_type: t.to_string(),
                    status: s.to_string(),
                    last_transition_time: None,
                    reason: None,
                    message: None,
                })
                .collect(),
        ),
        ..Default::default()
    }
}

/// Create a 404 not found response
pub fn not_found_json(resource: &str, name: &str) -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": format!("{} \"{}\" not found", resource, name),
        "reason": "NotFound",
        "code": 404
    })
    .to_string()
}

/// Create a 500 internal error response
pub fn server_error_json() -> String {
    serde_json::json!({
        "kind": "Status",
        "apiVersion": "v1",
        "status": "Failure",
        "message": "etcdserver: request timed out",
        "reason": "InternalError",
        "code": 500
    })
    .to_string()
}
