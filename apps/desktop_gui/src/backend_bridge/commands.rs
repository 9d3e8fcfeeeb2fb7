//! Backend commands queued from UI to backend worker.

use shared::domain::{User, UserId};

use crate::controller::events::RequestKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    ListUsers,
    FindUser { user_id: UserId },
    UpdateUser { user: User },
    DeleteUser { user_id: UserId },
}

impl BackendCommand {
    pub fn kind(&self) -> RequestKind {
        match self {
            Self::ListUsers => RequestKind::ListUsers,
            Self::FindUser { .. } => RequestKind::FindUser,
            Self::UpdateUser { .. } => RequestKind::UpdateUser,
            Self::DeleteUser { .. } => RequestKind::DeleteUser,
        }
    }
}
