// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Activities page: a table of logged sessions in server order

use askama::Template;

use super::{display_date, ListPage, ListView, ViewState};
use crate::models::Activity;

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    pub user_name: String,
    pub user_email: String,
    pub team: String,
    pub activity_type: String,
    pub duration_minutes: i64,
    pub distance: String,
    pub calories_burned: i64,
    pub points: i64,
    pub date: String,
    /// Row tooltip; empty when the activity has no notes
    pub notes: String,
}

impl From<&Activity> for ActivityRow {
    fn from(activity: &Activity) -> Self {
        Self {
            user_name: activity.user_name.clone(),
            user_email: activity.user_email.clone(),
            team: activity.team.clone(),
            activity_type: activity.activity_type.clone(),
            duration_minutes: activity.duration_minutes,
            distance: format!("{:.1}", activity.distance_km),
            calories_burned: activity.calories_burned,
            points: activity.points,
            date: display_date(&activity.date),
            notes: activity
                .notes
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "activities.html")]
pub struct ActivitiesPage {
    pub view: ViewState<ActivityRow>,
}

impl ListPage for ActivitiesPage {
    type Record = Activity;

    fn from_view(view: &ListView<Activity>) -> Self {
        Self {
            view: view.state().map(|activity| ActivityRow::from(activity)),
        }
    }
}
