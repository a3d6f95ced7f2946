// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # Users View
//!
//! The users card grid plus the edit modal. Loading fetches users and team options
//! concurrently; the two lists are independent, so a failed teams fetch only leaves the
//! team selector without choices.
//!
//! A successful save refetches the whole users list before the form closes.

use askama::Template;
use tracing::{info, warn};

use super::user_edit::{EditField, EditForm};
use super::{display_date, ListView, ViewState};
use crate::client::FitnessApi;
use crate::models::{Resource, Team, User, UserUpdate, ROLE_MEMBER, ROLE_TEAM_LEAD};

/// Result of a save request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Backend accepted the update; list refetched and form closed
    Saved,
    /// Backend refused or was unreachable; form still open
    Failed(String),
    /// No open form to save
    NotEditing,
}

#[derive(Debug)]
pub struct UsersView {
    pub users: ListView<User>,
    pub teams: ListView<Team>,
    pub form: EditForm,
}

impl UsersView {
    pub fn mount() -> Self {
        Self {
            users: ListView::mount(),
            teams: ListView::mount(),
            form: EditForm::Closed,
        }
    }

    /// Fetch users and team options side by side
    pub async fn load(&mut self, api: &dyn FitnessApi) {
        let users_ticket = self.users.begin_fetch();
        let teams_ticket = self.teams.begin_fetch();

        let (users, teams) = tokio::join!(api.list(Resource::Users), api.list(Resource::Teams));

        self.users.resolve(users_ticket, users);
        if let Err(e) = &teams {
            warn!("Team options unavailable for the edit form: {}", e);
        }
        self.teams.resolve(teams_ticket, teams);
    }

    pub fn find_user(&self, id: &str) -> Option<&User> {
        self.users.state().records().iter().find(|user| user.id == id)
    }

    /// Team names for the selector, in server order; empty unless teams loaded
    pub fn team_names(&self) -> Vec<String> {
        self.teams
            .state()
            .records()
            .iter()
            .map(|team| team.name.clone())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Open the form for a listed user; false when no such user is shown
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(user) = self.find_user(id).cloned() else {
            return false;
        };
        self.form.open(&user);
        true
    }

    pub fn edit_field(&mut self, field: EditField, value: impl Into<String>) -> bool {
        self.form.set_field(field, value)
    }

    /// Send the full draft; on success refetch the list, then close
    pub async fn save(&mut self, api: &dyn FitnessApi) -> SaveOutcome {
        let Some((user_id, draft)) = self.form.begin_save() else {
            return SaveOutcome::NotEditing;
        };

        match api.update(Resource::Users, &user_id, draft.to_json()).await {
            Ok(_) => {
                info!("Saved user {}; refreshing users", user_id);
                self.users.load(api).await;
                self.form.finish_save();
                SaveOutcome::Saved
            }
            Err(e) => {
                let message = e.to_string();
                self.form.fail_save(message.clone());
                SaveOutcome::Failed(message)
            }
        }
    }

    /// Show a submitted draft again when it could not be applied to a listed user
    pub fn restore_edit(&mut self, id: &str, draft: UserUpdate, error: impl Into<String>) {
        self.form.restore(id, draft, error);
    }

    pub fn cancel(&mut self) {
        self.form.cancel();
    }

    /// Drop both lists and any open draft; pending fetch results are ignored
    pub fn unmount(&mut self) {
        self.users.unmount();
        self.teams.unmount();
        self.form = EditForm::Closed;
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserCard {
    pub id: String,
    pub name: String,
    /// First character of the name, for the avatar circle
    pub initial: String,
    pub email: String,
    pub team: String,
    pub is_team_lead: bool,
    pub role_label: &'static str,
    pub joined: String,
}

impl From<&User> for UserCard {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            initial: user
                .name
                .chars()
                .next()
                .map(|c| c.to_uppercase().to_string())
                .unwrap_or_else(|| "?".to_string()),
            email: user.email.clone(),
            team: user.team.clone(),
            is_team_lead: user.is_team_lead(),
            role_label: role_label(&user.role),
            joined: display_date(&user.created_at),
        }
    }
}

fn role_label(role: &str) -> &'static str {
    if role == ROLE_TEAM_LEAD {
        "Team Leader"
    } else {
        "Member"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl SelectOption {
    fn new(value: &str, label: &str, current: &str) -> Self {
        Self {
            value: value.to_string(),
            label: label.to_string(),
            selected: value == current,
        }
    }
}

/// Edit modal contents for an open form
#[derive(Debug, Clone, PartialEq)]
pub struct EditModal {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub avatar: String,
    pub team_options: Vec<SelectOption>,
    pub role_options: Vec<SelectOption>,
    pub error: Option<String>,
    pub saving: bool,
}

impl EditModal {
    fn from_form(form: &EditForm, team_names: &[String]) -> Option<Self> {
        let session = form.session()?;
        let draft = &session.draft;

        let mut team_options = vec![SelectOption::new("", "Select a team", &draft.team)];
        team_options.extend(
            team_names
                .iter()
                .map(|name| SelectOption::new(name, name, &draft.team)),
        );
        // Keep a team the selector does not list so saving does not clear it
        if !draft.team.is_empty() && !team_names.contains(&draft.team) {
            team_options.push(SelectOption::new(&draft.team, &draft.team, &draft.team));
        }

        Some(Self {
            user_id: session.user_id.clone(),
            name: draft.name.clone(),
            email: draft.email.clone(),
            avatar: draft.avatar.clone(),
            team_options,
            role_options: role_options(&draft.role),
            error: session.error.clone(),
            saving: form.is_saving(),
        })
    }
}

fn role_options(current: &str) -> Vec<SelectOption> {
    let mut options = vec![SelectOption::new("", "Select Role...", current)];
    options.extend(
        [ROLE_MEMBER, ROLE_TEAM_LEAD]
            .into_iter()
            .map(|role| SelectOption::new(role, role_label(role), current)),
    );
    // Same for a role the selector does not offer
    if !current.is_empty() && current != ROLE_MEMBER && current != ROLE_TEAM_LEAD {
        options.push(SelectOption::new(current, current, current));
    }
    options
}

#[derive(Template)]
#[template(path = "users.html")]
pub struct UsersPage {
    pub view: ViewState<UserCard>,
    pub modal: Option<EditModal>,
    /// Page-level message shown above the grid
    pub notice: Option<String>,
}

impl UsersPage {
    pub fn from_view(view: &UsersView) -> Self {
        Self {
            view: view.users.state().map(|user| UserCard::from(user)),
            modal: EditModal::from_form(&view.form, &view.team_names()),
            notice: None,
        }
    }

    pub fn with_notice(mut self, notice: impl Into<String>) -> Self {
        self.notice = Some(notice.into());
        self
    }
}
