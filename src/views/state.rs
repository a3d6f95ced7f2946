// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Fetch-and-render lifecycle shared by every list view

use serde_json::Value;
use std::marker::PhantomData;

use crate::client::{ApiError, FitnessApi};
use crate::logging::AppLogger;
use crate::models::{decode_records, normalize_collection, Record};

/// What a list view currently shows
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Fetch in flight; nothing rendered but a progress indicator
    Loading,
    /// Fetch failed; terminal for this mount
    Error(String),
    /// Records in server order, possibly empty
    Ready(Vec<T>),
}

impl<T> ViewState<T> {
    pub fn label(&self) -> &'static str {
        match self {
            ViewState::Loading => "loading",
            ViewState::Error(_) => "error",
            ViewState::Ready(_) => "ready",
        }
    }

    pub fn records(&self) -> &[T] {
        match self {
            ViewState::Ready(records) => records,
            _ => &[],
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    /// Same state with every record mapped through `f`
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::Error(message) => ViewState::Error(message.clone()),
            ViewState::Ready(records) => ViewState::Ready(records.iter().map(f).collect()),
        }
    }
}

/// Handle for one issued fetch; only the most recent ticket of a mounted view applies
#[derive(Debug)]
pub struct FetchTicket<T> {
    generation: u64,
    _record: PhantomData<fn() -> T>,
}

/// One mounted list view of a backend collection
#[derive(Debug)]
pub struct ListView<T: Record> {
    state: ViewState<T>,
    generation: u64,
    mounted: bool,
}

impl<T: Record> ListView<T> {
    /// Mount a view; it starts out loading with an empty working set
    pub fn mount() -> Self {
        AppLogger::log_view_transition(T::RESOURCE.path_segment(), "loading", 0);
        Self {
            state: ViewState::Loading,
            generation: 0,
            mounted: true,
        }
    }

    pub fn state(&self) -> &ViewState<T> {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Start a fetch; any earlier outstanding ticket becomes stale
    ///
    /// The current state stays on screen until the fetch resolves.
    pub fn begin_fetch(&mut self) -> FetchTicket<T> {
        self.generation += 1;
        FetchTicket {
            generation: self.generation,
            _record: PhantomData,
        }
    }

    /// Apply a fetch outcome; returns whether it changed the view
    ///
    /// Outcomes arriving after unmount, or for a superseded ticket, are dropped.
    pub fn resolve(&mut self, ticket: FetchTicket<T>, outcome: Result<Value, ApiError>) -> bool {
        if !self.mounted || ticket.generation != self.generation {
            tracing::debug!(
                "Dropping stale {} fetch result (mounted: {})",
                T::RESOURCE,
                self.mounted
            );
            return false;
        }

        self.state = match outcome {
            Ok(body) => ViewState::Ready(decode_records(normalize_collection(body))),
            Err(e) => {
                tracing::error!("Error fetching {}: {}", T::RESOURCE, e);
                ViewState::Error(e.to_string())
            }
        };
        AppLogger::log_view_transition(
            T::RESOURCE.path_segment(),
            self.state.label(),
            self.state.records().len(),
        );
        true
    }

    /// Fetch the collection and apply the result
    pub async fn load(&mut self, api: &dyn FitnessApi) -> bool {
        let ticket = self.begin_fetch();
        let outcome = api.list(T::RESOURCE).await;
        self.resolve(ticket, outcome)
    }

    /// Discard the working set; later fetch results are ignored
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.state = ViewState::Loading;
    }
}
