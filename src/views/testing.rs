// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! In-memory [`FitnessApi`] for view tests

use async_trait::async_trait;
use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::client::{ApiError, FitnessApi};
use crate::models::Resource;

/// Canned responses; each `list` pops the next queued answer for its resource,
/// repeating the last one once the queue is down to a single entry.
#[derive(Default)]
pub struct StubApi {
    lists: Mutex<HashMap<Resource, VecDeque<Result<Value, ApiError>>>>,
    update_result: Mutex<Option<Result<Value, ApiError>>>,
    pub updates: Mutex<Vec<(Resource, String, Value)>>,
    pub list_calls: Mutex<Vec<Resource>>,
}

impl StubApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_list(self, resource: Resource, outcome: Result<Value, ApiError>) -> Self {
        self.lists
            .lock()
            .unwrap()
            .entry(resource)
            .or_default()
            .push_back(outcome);
        self
    }

    pub fn with_update(self, outcome: Result<Value, ApiError>) -> Self {
        *self.update_result.lock().unwrap() = Some(outcome);
        self
    }

    pub fn list_count(&self, resource: Resource) -> usize {
        self.list_calls
            .lock()
            .unwrap()
            .iter()
            .filter(|r| **r == resource)
            .count()
    }
}

#[async_trait]
impl FitnessApi for StubApi {
    async fn list(&self, resource: Resource) -> Result<Value, ApiError> {
        self.list_calls.lock().unwrap().push(resource);
        let mut lists = self.lists.lock().unwrap();
        let queue = lists.entry(resource).or_default();
        if queue.len() > 1 {
            queue.pop_front().unwrap()
        } else {
            queue
                .front()
                .cloned()
                .unwrap_or(Err(ApiError::Transport("no stubbed response".to_string())))
        }
    }

    async fn update(&self, resource: Resource, id: &str, fields: Value) -> Result<Value, ApiError> {
        self.updates
            .lock()
            .unwrap()
            .push((resource, id.to_string(), fields.clone()));
        self.update_result
            .lock()
            .unwrap()
            .clone()
            .unwrap_or(Ok(fields))
    }
}
