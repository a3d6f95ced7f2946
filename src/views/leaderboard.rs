// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Leaderboard page
//!
//! Rows keep the order the server sent. Medals and podium highlighting follow each
//! entry's `rank` field, never its position in the list.

use askama::Template;
use std::fmt;

use super::{ListPage, ListView, ViewState};
use crate::models::LeaderboardEntry;

/// How a rank is shown in the first column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankDisplay {
    Gold,
    Silver,
    Bronze,
    Plain(i64),
}

impl RankDisplay {
    pub fn for_rank(rank: i64) -> Self {
        match rank {
            1 => RankDisplay::Gold,
            2 => RankDisplay::Silver,
            3 => RankDisplay::Bronze,
            other => RankDisplay::Plain(other),
        }
    }

    pub fn is_medal(&self) -> bool {
        !matches!(self, RankDisplay::Plain(_))
    }

    pub fn badge_class(&self) -> &'static str {
        match self {
            RankDisplay::Gold => "bg-warning text-dark",
            RankDisplay::Silver => "bg-secondary",
            RankDisplay::Bronze => "bg-danger",
            RankDisplay::Plain(_) => "",
        }
    }

    pub fn row_class(&self) -> &'static str {
        match self {
            RankDisplay::Gold => "table-warning",
            RankDisplay::Silver => "table-secondary",
            RankDisplay::Bronze => "table-danger",
            RankDisplay::Plain(_) => "",
        }
    }
}

impl fmt::Display for RankDisplay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankDisplay::Gold => f.write_str("1st"),
            RankDisplay::Silver => f.write_str("2nd"),
            RankDisplay::Bronze => f.write_str("3rd"),
            RankDisplay::Plain(rank) => write!(f, "{}", rank),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub rank: RankDisplay,
    pub user_name: String,
    pub team: String,
    pub total_points: i64,
}

impl From<&LeaderboardEntry> for LeaderboardRow {
    fn from(entry: &LeaderboardEntry) -> Self {
        Self {
            rank: RankDisplay::for_rank(entry.rank),
            user_name: entry.user_name.clone(),
            team: entry.team.clone(),
            total_points: entry.total_points,
        }
    }
}

#[derive(Template)]
#[template(path = "leaderboard.html")]
pub struct LeaderboardPage {
    pub view: ViewState<LeaderboardRow>,
}

impl ListPage for LeaderboardPage {
    type Record = LeaderboardEntry;

    fn from_view(view: &ListView<LeaderboardEntry>) -> Self {
        Self {
            view: view.state().map(|entry| LeaderboardRow::from(entry)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_medals_follow_rank() {
        assert_eq!(RankDisplay::for_rank(1), RankDisplay::Gold);
        assert_eq!(RankDisplay::for_rank(2), RankDisplay::Silver);
        assert_eq!(RankDisplay::for_rank(3), RankDisplay::Bronze);
        assert_eq!(RankDisplay::for_rank(4), RankDisplay::Plain(4));
        assert_eq!(RankDisplay::for_rank(0), RankDisplay::Plain(0));
        assert_eq!(RankDisplay::for_rank(-1).to_string(), "-1");
    }

    #[test]
    fn test_rows_keep_server_order() {
        let entries: Vec<LeaderboardEntry> = [4, 2, 1, 3]
            .iter()
            .map(|rank| LeaderboardEntry {
                rank: *rank,
                ..LeaderboardEntry::default()
            })
            .collect();
        let labels: Vec<String> = entries
            .iter()
            .map(|e| LeaderboardRow::from(e).rank.to_string())
            .collect();
        assert_eq!(labels, vec!["4", "2nd", "1st", "3rd"]);
    }

    #[test]
    fn test_podium_rows_highlighted() {
        let page = LeaderboardPage {
            view: ViewState::Ready(
                [3, 7]
                    .iter()
                    .map(|rank| {
                        LeaderboardRow::from(&LeaderboardEntry {
                            rank: *rank,
                            ..LeaderboardEntry::default()
                        })
                    })
                    .collect(),
            ),
        };
        let html = page.render().unwrap();
        assert_eq!(html.matches("data-medal").count(), 1);
        assert!(html.contains("table-danger"));
        assert_eq!(html.matches("data-record=\"leaderboard\"").count(), 2);
    }
}
