// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use askama::Template;

use super::{ListPage, ListView, ViewState};
use crate::models::Workout;

/// One workout suggestion card
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutCard {
    pub name: String,
    pub difficulty: String,
    pub badge_class: &'static str,
    pub category: String,
    pub description: String,
    pub duration_minutes: i64,
    pub exercises: Vec<String>,
    pub target_muscles: Vec<String>,
    pub recommended_for: Vec<String>,
}

impl From<&Workout> for WorkoutCard {
    fn from(workout: &Workout) -> Self {
        Self {
            name: workout.name.clone(),
            difficulty: workout.difficulty.clone(),
            badge_class: workout.difficulty_level().badge_class(),
            category: workout.category.clone(),
            description: workout.description.clone(),
            duration_minutes: workout.duration_minutes,
            exercises: workout.exercises.clone(),
            target_muscles: workout.target_muscles.clone(),
            recommended_for: workout.recommended_for.clone(),
        }
    }
}

#[derive(Template)]
#[template(path = "workouts.html")]
pub struct WorkoutsPage {
    pub view: ViewState<WorkoutCard>,
}

impl ListPage for WorkoutsPage {
    type Record = Workout;

    fn from_view(view: &ListView<Workout>) -> Self {
        Self {
            view: view.state().map(|workout| WorkoutCard::from(workout)),
        }
    }
}
