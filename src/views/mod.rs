// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Views
//!
//! Each resource page is a [`ListView`] of its records plus an askama template that
//! renders the view's state: a spinner while loading, an inline alert on failure, the
//! records in server order when ready, and an explicit notice when there are none.
//!
//! The users page additionally hosts the [`user_edit::EditForm`] modal.

use askama::Template;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

pub mod activities;
pub mod home;
pub mod leaderboard;
pub mod state;
pub mod teams;
pub mod user_edit;
pub mod users;
pub mod workouts;

#[cfg(test)]
pub(crate) mod testing;

pub use state::{FetchTicket, ListView, ViewState};

use crate::models::Record;

/// A page that renders one list view
pub trait ListPage: Template + Sized {
    type Record: Record;

    fn from_view(view: &ListView<Self::Record>) -> Self;
}

/// Calendar date for a backend timestamp, or the raw text when it does not parse
pub fn display_date(raw: &str) -> String {
    const FORMAT: &str = "%b %-d, %Y";

    if let Ok(at) = DateTime::parse_from_rfc3339(raw) {
        return at.format(FORMAT).to_string();
    }
    if let Ok(at) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return at.format(FORMAT).to_string();
    }
    if let Ok(day) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return day.format(FORMAT).to_string();
    }
    raw.to_string()
}
