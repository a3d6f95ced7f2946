// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Teams page: one card per team with its ordered member list

use askama::Template;

use super::{display_date, ListPage, ListView, ViewState};
use crate::models::Team;

#[derive(Debug, Clone, PartialEq)]
pub struct MemberItem {
    pub name: String,
    /// The member is the team's leader
    pub is_leader: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamCard {
    pub name: String,
    pub description: String,
    pub leader: String,
    pub total_points: i64,
    pub members: Vec<MemberItem>,
    pub created: String,
}

impl From<&Team> for TeamCard {
    fn from(team: &Team) -> Self {
        Self {
            name: team.name.clone(),
            description: team.description.clone(),
            leader: team.leader.clone(),
            total_points: team.total_points,
            members: team
                .members
                .iter()
                .map(|member| MemberItem {
                    name: member.clone(),
                    is_leader: *member == team.leader,
                })
                .collect(),
            created: display_date(&team.created_at),
        }
    }
}

#[derive(Template)]
#[template(path = "teams.html")]
pub struct TeamsPage {
    pub view: ViewState<TeamCard>,
}

impl ListPage for TeamsPage {
    type Record = Team;

    fn from_view(view: &ListView<Team>) -> Self {
        Self {
            view: view.state().map(|team| TeamCard::from(team)),
        }
    }
}
