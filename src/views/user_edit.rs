// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! # User Edit Form
//!
//! Local form state for editing one user. The form is closed until an edit is
//! requested, holds a draft while open, and is saving while the update is in flight:
//!
//! ```text
//! Closed --open--> Open --set_field--> Open (dirty)
//!                   |                    |
//!                   +----begin_save------+--> Saving --finish_save--> Closed
//!                                               |
//!                                               +--fail_save--> Open (error shown)
//! ```
//!
//! `cancel` returns to `Closed` from any state and never touches the backend.
//! `restore` reopens with a submitted draft and an error when the user record could
//! not be loaded.

use std::fmt;
use std::str::FromStr;

use crate::logging::AppLogger;
use crate::models::{User, UserUpdate};

/// Editable user field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditField {
    Name,
    Email,
    Team,
    Role,
    Avatar,
}

impl EditField {
    pub const ALL: [EditField; 5] = [
        EditField::Name,
        EditField::Email,
        EditField::Team,
        EditField::Role,
        EditField::Avatar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EditField::Name => "name",
            EditField::Email => "email",
            EditField::Team => "team",
            EditField::Role => "role",
            EditField::Avatar => "avatar",
        }
    }

    fn slot<'a>(&self, draft: &'a mut UserUpdate) -> &'a mut String {
        match self {
            EditField::Name => &mut draft.name,
            EditField::Email => &mut draft.email,
            EditField::Team => &mut draft.team,
            EditField::Role => &mut draft.role,
            EditField::Avatar => &mut draft.avatar,
        }
    }
}

impl fmt::Display for EditField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EditField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EditField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown user field: {}", s))
    }
}

/// One open edit of one user
#[derive(Debug, Clone, PartialEq)]
pub struct EditSession {
    pub user_id: String,
    snapshot: UserUpdate,
    pub draft: UserUpdate,
    /// Failure text from the last save attempt
    pub error: Option<String>,
}

impl EditSession {
    fn new(user: &User) -> Self {
        let snapshot = UserUpdate::from_user(user);
        Self {
            user_id: user.id.clone(),
            draft: snapshot.clone(),
            snapshot,
            error: None,
        }
    }

    /// Draft differs from the record the form was opened with
    pub fn is_dirty(&self) -> bool {
        self.draft != self.snapshot
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditForm {
    #[default]
    Closed,
    Open(EditSession),
    Saving(EditSession),
}

impl EditForm {
    /// Seed a fresh draft from the user as currently displayed
    ///
    /// Ignored while a save is in flight; replaces any other open draft.
    pub fn open(&mut self, user: &User) {
        if self.is_saving() {
            tracing::warn!("Ignoring edit request for {} while a save is pending", user.id);
            return;
        }
        AppLogger::log_edit_event(&user.id, "open", true, None);
        *self = EditForm::Open(EditSession::new(user));
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, EditForm::Closed)
    }

    pub fn is_saving(&self) -> bool {
        matches!(self, EditForm::Saving(_))
    }

    pub fn session(&self) -> Option<&EditSession> {
        match self {
            EditForm::Closed => None,
            EditForm::Open(session) | EditForm::Saving(session) => Some(session),
        }
    }

    /// Change one draft field; returns false when the form is not accepting edits
    pub fn set_field(&mut self, field: EditField, value: impl Into<String>) -> bool {
        match self {
            EditForm::Open(session) => {
                *field.slot(&mut session.draft) = value.into();
                true
            }
            _ => false,
        }
    }

    /// Move to saving and hand out the id and full draft to send
    pub fn begin_save(&mut self) -> Option<(String, UserUpdate)> {
        match std::mem::take(self) {
            EditForm::Open(mut session) => {
                session.error = None;
                let request = (session.user_id.clone(), session.draft.clone());
                *self = EditForm::Saving(session);
                Some(request)
            }
            other => {
                *self = other;
                None
            }
        }
    }

    /// Back to open with the draft intact and the failure shown
    pub fn fail_save(&mut self, message: impl Into<String>) {
        match std::mem::take(self) {
            EditForm::Saving(mut session) => {
                let message = message.into();
                AppLogger::log_edit_event(&session.user_id, "save", false, Some(&message));
                session.error = Some(message);
                *self = EditForm::Open(session);
            }
            other => *self = other,
        }
    }

    /// Close after a confirmed save, discarding the draft
    pub fn finish_save(&mut self) {
        match std::mem::take(self) {
            EditForm::Saving(session) => {
                AppLogger::log_edit_event(&session.user_id, "save", true, None);
            }
            other => *self = other,
        }
    }

    /// Reopen with a draft that could not be sent, showing why
    ///
    /// Used when the record the draft belongs to cannot be loaded; the draft becomes
    /// its own snapshot since the stored values are unknown.
    pub fn restore(&mut self, user_id: &str, draft: UserUpdate, error: impl Into<String>) {
        if self.is_saving() {
            return;
        }
        let error = error.into();
        AppLogger::log_edit_event(user_id, "save", false, Some(&error));
        *self = EditForm::Open(EditSession {
            user_id: user_id.to_string(),
            snapshot: draft.clone(),
            draft,
            error: Some(error),
        });
    }

    /// Discard the draft unconditionally
    pub fn cancel(&mut self) {
        if let Some(session) = self.session() {
            AppLogger::log_edit_event(&session.user_id, "cancel", true, None);
        }
        *self = EditForm::Closed;
    }
}
