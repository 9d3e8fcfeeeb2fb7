//! Page state for the users console and the transitions driven by user actions and backend events.
//!
//! Action methods never perform I/O. Each returns the backend command the UI should queue, if any,
//! and the state only changes to reflect server data once the matching [`UiEvent`] arrives.

use client_core::parse_user_id;
use shared::domain::{User, UserId};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Email,
    Phone,
    Address,
    Password,
}

impl DraftField {
    pub const ALL: [DraftField; 5] = [
        DraftField::Name,
        DraftField::Email,
        DraftField::Phone,
        DraftField::Address,
        DraftField::Password,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Phone => "Phone",
            Self::Address => "Address",
            Self::Password => "Password",
        }
    }

    pub fn is_secret(self) -> bool {
        self == Self::Password
    }
}

/// Editable copy of a user record backing the edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDraft {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub password: String,
    remember_token: Option<String>,
}

impl UserDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone().unwrap_or_default(),
            address: user.address.clone().unwrap_or_default(),
            password: user.password.clone(),
            remember_token: user.remember_token.clone(),
        }
    }

    pub fn field_mut(&mut self, field: DraftField) -> &mut String {
        match field {
            DraftField::Name => &mut self.name,
            DraftField::Email => &mut self.email,
            DraftField::Phone => &mut self.phone,
            DraftField::Address => &mut self.address,
            DraftField::Password => &mut self.password,
        }
    }

    /// Full record sent with the update; empty optional fields go out as null.
    pub fn to_user(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
            phone: non_empty(&self.phone),
            address: non_empty(&self.address),
            password: self.password.clone(),
            remember_token: self.remember_token.clone(),
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct UsersPageState {
    pub users: Vec<User>,
    pub selected_user: Option<User>,
    pub show_view_modal: bool,
    pub edit_draft: Option<UserDraft>,
    pub show_edit_modal: bool,
    pub search_input: String,
    pub pending_delete: Option<UserId>,
    pub status: String,
}

impl UsersPageState {
    pub fn load(&self) -> BackendCommand {
        BackendCommand::ListUsers
    }

    pub fn submit_search(&self) -> Option<BackendCommand> {
        if self.search_input.is_empty() {
            return None;
        }
        match parse_user_id(&self.search_input) {
            Ok(user_id) => Some(BackendCommand::FindUser { user_id }),
            Err(err) => {
                tracing::warn!(error = %err, "user lookup skipped");
                None
            }
        }
    }

    pub fn view_user(&self, user_id: UserId) -> BackendCommand {
        BackendCommand::FindUser { user_id }
    }

    pub fn close_view(&mut self) {
        self.show_view_modal = false;
    }

    pub fn begin_edit(&mut self, user: &User) {
        self.edit_draft = Some(UserDraft::from_user(user));
        self.show_edit_modal = true;
    }

    pub fn set_draft_field(&mut self, field: DraftField, value: impl Into<String>) {
        if let Some(draft) = self.edit_draft.as_mut() {
            *draft.field_mut(field) = value.into();
        }
    }

    /// The dialog stays open until the backend confirms the update.
    pub fn save_edit(&self) -> Option<BackendCommand> {
        self.edit_draft
            .as_ref()
            .map(|draft| BackendCommand::UpdateUser {
                user: draft.to_user(),
            })
    }

    pub fn cancel_edit(&mut self) {
        self.edit_draft = None;
        self.show_edit_modal = false;
    }

    pub fn request_delete(&mut self, user_id: UserId) {
        self.pending_delete = Some(user_id);
    }

    pub fn confirm_delete(&mut self) -> Option<BackendCommand> {
        self.pending_delete
            .take()
            .map(|user_id| BackendCommand::DeleteUser { user_id })
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn apply(&mut self, event: UiEvent) {
        match event {
            UiEvent::Info(message) => {
                self.status = message;
            }
            UiEvent::UsersLoaded(users) => {
                self.users = users;
            }
            UiEvent::UserFound(user) => {
                self.selected_user = Some(user);
                self.show_view_modal = true;
            }
            UiEvent::UserUpdated(user) => {
                tracing::debug!(user_id = user.id.0, "closing edit dialog after update");
                self.edit_draft = None;
                self.show_edit_modal = false;
            }
            UiEvent::UserDeleted(user_id) => {
                tracing::debug!(user_id = user_id.0, "delete acknowledged; awaiting refresh");
            }
            // Failures are logged by the backend worker and leave the page untouched.
            UiEvent::RequestFailed { operation, message } => {
                tracing::debug!(operation = operation.label(), %message, "ignoring failed request");
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/reducer_tests.rs"]
mod tests;
