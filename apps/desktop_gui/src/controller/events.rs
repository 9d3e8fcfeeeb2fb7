//! Backend-to-UI events.

use shared::domain::{User, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    ListUsers,
    FindUser,
    UpdateUser,
    DeleteUser,
}

impl RequestKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::ListUsers => "list_users",
            Self::FindUser => "find_user",
            Self::UpdateUser => "update_user",
            Self::DeleteUser => "delete_user",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    Info(String),
    UsersLoaded(Vec<User>),
    UserFound(User),
    UserUpdated(User),
    UserDeleted(UserId),
    RequestFailed {
        operation: RequestKind,
        message: String,
    },
}
