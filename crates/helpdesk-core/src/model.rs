use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::{CommentId, CoreError, TicketId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TicketStatus {
    Open,
    InProgress,
    Closed,
    Reopened,
}

impl TicketStatus {
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Closed, Self::Reopened];

    /// Wire label as stored by the remote ticket store.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
            Self::Reopened => "Reopened",
        }
    }

    pub fn parse_label(value: &str) -> Result<Self, CoreError> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::validation(format!("unknown ticket status `{trimmed}`")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn parse_label(value: &str) -> Result<Self, CoreError> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|priority| priority.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::validation(format!("unknown priority `{trimmed}`")))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Bug,
    Feature,
    Service,
    #[default]
    Other,
}

impl Category {
    pub const ALL: [Self; 4] = [Self::Bug, Self::Feature, Self::Service, Self::Other];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bug => "Bug",
            Self::Feature => "Feature",
            Self::Service => "Service",
            Self::Other => "Other",
        }
    }

    pub fn parse_label(value: &str) -> Result<Self, CoreError> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|category| category.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CoreError::validation(format!("unknown category `{trimmed}`")))
    }
}

/// Opaque locator for an attachment stored by the remote store.
///
/// Set once at ticket creation and never rewritten by later edits; the
/// presentation layer resolves it against the store's base location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef(String);

impl AttachmentRef {
    pub fn new(locator: impl Into<String>) -> Self {
        Self(locator.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub description: String,
    pub status: TicketStatus,
    pub priority: Priority,
    pub category: Category,
    pub owner: UserId,
    pub owner_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentRef>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: CommentId,
    pub ticket_id: TicketId,
    pub author: String,
    pub is_admin: bool,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    /// Server-computed capability: whether the current caller may delete
    /// this comment. Honored as-is, never re-derived locally.
    pub can_delete: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub ticket_id: TicketId,
    pub action: String,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

/// Binary attachment content carried with a ticket creation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachmentUpload {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Fields for a ticket creation request, validated before submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    pub attachment: Option<AttachmentUpload>,
}

impl NewTicket {
    /// Checks local preconditions and applies defaults, producing the
    /// submission-ready field set. Never touches the network.
    pub fn validated(&self) -> Result<ValidatedTicketFields, CoreError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(CoreError::validation("ticket title cannot be empty"));
        }
        let description = self.description.trim();
        if description.is_empty() {
            return Err(CoreError::validation("ticket description cannot be empty"));
        }

        Ok(ValidatedTicketFields {
            title: title.to_owned(),
            description: description.to_owned(),
            priority: self.priority.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedTicketFields {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: Category,
}
