// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Landing page linking every resource view

use askama::Template;

use crate::models::Resource;

pub struct SectionCard {
    pub title: &'static str,
    pub blurb: &'static str,
    pub href: String,
}

impl SectionCard {
    fn for_resource(resource: Resource) -> Self {
        let (title, blurb) = match resource {
            Resource::Users => ("Users", "Browse members and edit their profiles."),
            Resource::Teams => ("Teams", "See every team, its leader and its roster."),
            Resource::Activities => ("Activities", "Review logged workouts across all teams."),
            Resource::Leaderboard => ("Leaderboard", "Check who is leading the competition."),
            Resource::Workouts => ("Workouts", "Find a suggested workout for your level."),
        };
        Self {
            title,
            blurb,
            href: format!("/{}", resource.path_segment()),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub sections: Vec<SectionCard>,
}

impl HomePage {
    pub fn new() -> Self {
        Self {
            sections: Resource::ALL
                .iter()
                .copied()
                .map(SectionCard::for_resource)
                .collect(),
        }
    }
}

impl Default for HomePage {
    fn default() -> Self {
        Self::new()
    }
}
