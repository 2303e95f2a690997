//! Two-phase confirmation for destructive admin actions.
//!
//! A caller first asks the store for a [`PendingConfirmation`], shows its title
//! and message, then hands it back to [`AdminStore::resolve`] with the admin's
//! answer. The pending value is consumed, so each request fires at most once.

use tracing::{debug, warn};
use uuid::Uuid;

use crate::models::{Submission, UserStatus};
use crate::store::AdminStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleUserStatus { user_id: u32 },
    SetUserStatus { user_id: u32, status: UserStatus },
    DeleteMostRecentSubmission { user_id: u32 },
    ResetAllScores,
}

#[derive(Debug)]
pub struct PendingConfirmation {
    id: Uuid,
    action: Action,
    title: String,
    message: String,
}

impl PendingConfirmation {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn action(&self) -> Action {
        self.action
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    StatusChanged { user_id: u32, status: UserStatus },
    StatusUnchanged { user_id: u32, status: UserStatus },
    UserNotFound { user_id: u32 },
    SubmissionDeleted(Submission),
    NothingToDelete { user_id: u32 },
    ScoresReset { users: usize },
}

impl Outcome {
    pub fn message(&self) -> String {
        match self {
            Outcome::StatusChanged { user_id, status } => match status {
                UserStatus::Banned => format!("User {user_id} banned successfully."),
                UserStatus::Active => format!("User {user_id} unbanned successfully."),
            },
            Outcome::StatusUnchanged { user_id, status } => match status {
                UserStatus::Banned => format!("User {user_id} is already banned."),
                UserStatus::Active => format!("User {user_id} is already active."),
            },
            Outcome::UserNotFound { user_id } => format!("No user found with id {user_id}."),
            Outcome::SubmissionDeleted(submission) => {
                format!("Record {} deleted from logs.", submission.id)
            }
            Outcome::NothingToDelete { user_id } => {
                format!("No recent records found for user {user_id}.")
            }
            Outcome::ScoresReset { users } => {
                format!("All progress reset for new cycle ({users} users).")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Cancelled,
    Applied(Outcome),
}

impl Resolution {
    pub fn message(&self) -> String {
        match self {
            Resolution::Cancelled => "Cancelled.".to_string(),
            Resolution::Applied(outcome) => outcome.message(),
        }
    }
}

impl AdminStore {
    pub fn request_confirmation(&self, action: Action) -> PendingConfirmation {
        let (title, message) = match action {
            Action::ToggleUserStatus { user_id } => {
                let target = self.user(user_id).map(|u| u.status.toggled());
                self.status_prompt(user_id, target)
            }
            Action::SetUserStatus { user_id, status } => self.status_prompt(user_id, Some(status)),
            Action::DeleteMostRecentSubmission { .. } => (
                "Delete Submission".to_string(),
                "Delete the most recent submission from this user?".to_string(),
            ),
            Action::ResetAllScores => (
                "Reset Weekly Scores".to_string(),
                "Are you sure you want to reset all user scores to zero? This action cannot be undone."
                    .to_string(),
            ),
        };

        PendingConfirmation {
            id: Uuid::new_v4(),
            action,
            title,
            message,
        }
    }

    fn status_prompt(&self, user_id: u32, target: Option<UserStatus>) -> (String, String) {
        let name = self.user(user_id).map(|u| u.name.as_str());
        match (target, name) {
            (Some(UserStatus::Banned), Some(name)) => (
                "Ban User Account".to_string(),
                format!("This will restrict access for {name}. Are you sure?"),
            ),
            (Some(UserStatus::Active), Some(name)) => (
                "Unban User Account".to_string(),
                format!("This will restore access for {name}. Are you sure?"),
            ),
            _ => (
                "Change User Status".to_string(),
                format!("Change the status of user {user_id}?"),
            ),
        }
    }

    pub fn resolve(&mut self, pending: PendingConfirmation, accepted: bool) -> Resolution {
        if !accepted {
            debug!(id = %pending.id, action = ?pending.action, "confirmation declined");
            return Resolution::Cancelled;
        }

        let outcome = match pending.action {
            Action::ToggleUserStatus { user_id } => match self.toggle_user_status(user_id) {
                Ok(status) => Outcome::StatusChanged { user_id, status },
                Err(err) => {
                    warn!(user_id, %err, "status change skipped");
                    Outcome::UserNotFound { user_id }
                }
            },
            Action::SetUserStatus { user_id, status } => {
                match self.set_user_status(user_id, status) {
                    Ok(true) => Outcome::StatusChanged { user_id, status },
                    Ok(false) => Outcome::StatusUnchanged { user_id, status },
                    Err(err) => {
                        warn!(user_id, %err, "status change skipped");
                        Outcome::UserNotFound { user_id }
                    }
                }
            }
            Action::DeleteMostRecentSubmission { user_id } => {
                match self.delete_most_recent_submission(user_id) {
                    Ok(removed) => Outcome::SubmissionDeleted(removed),
                    Err(err) => {
                        warn!(user_id, %err, "nothing to delete");
                        Outcome::NothingToDelete { user_id }
                    }
                }
            }
            Action::ResetAllScores => Outcome::ScoresReset {
                users: self.reset_all_scores(),
            },
        };

        Resolution::Applied(outcome)
    }
}
