//! Wire payloads exchanged with the remote ticket store.
//!
//! Identifiers arrive as integers and timestamps as RFC 3339 strings;
//! decoding maps them into the opaque domain types. Decode failures are
//! remote-store faults, not validation errors.

use serde::Deserialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use helpdesk_core::{
    ActivityLogEntry, AttachmentRef, Category, Comment, CommentId, CoreError, Priority, Ticket,
    TicketId, TicketStatus, UserId,
};

use crate::store::SessionUser;

#[derive(Debug, Clone, Deserialize)]
pub struct TicketPayload {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub status: String,
    pub priority: String,
    pub category: String,
    pub user_id: i64,
    pub username: String,
    #[serde(default)]
    pub attachment_url: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CommentPayload {
    pub id: i64,
    pub ticket_id: i64,
    pub content: String,
    pub username: String,
    pub is_admin: bool,
    pub timestamp: String,
    pub can_delete: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ActivityLogPayload {
    pub ticket_id: i64,
    pub action: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginPayload {
    pub user_id: i64,
    pub username: String,
    pub is_admin: bool,
}

fn parse_timestamp(field: &str, raw: &str) -> Result<OffsetDateTime, CoreError> {
    OffsetDateTime::parse(raw, &Rfc3339).map_err(|error| {
        CoreError::remote(format!("store returned malformed {field} timestamp `{raw}`: {error}"))
    })
}

impl TicketPayload {
    pub fn into_ticket(self) -> Result<Ticket, CoreError> {
        Ok(Ticket {
            id: TicketId::new(self.id.to_string()),
            title: self.title,
            description: self.description,
            status: TicketStatus::parse_label(&self.status)
                .map_err(|error| CoreError::remote(format!("ticket {}: {error}", self.id)))?,
            priority: Priority::parse_label(&self.priority)
                .map_err(|error| CoreError::remote(format!("ticket {}: {error}", self.id)))?,
            category: Category::parse_label(&self.category)
                .map_err(|error| CoreError::remote(format!("ticket {}: {error}", self.id)))?,
            owner: UserId::new(self.user_id.to_string()),
            owner_name: self.username,
            attachment: self.attachment_url.map(AttachmentRef::new),
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
        })
    }
}

impl CommentPayload {
    pub fn into_comment(self) -> Result<Comment, CoreError> {
        Ok(Comment {
            id: CommentId::new(self.id.to_string()),
            ticket_id: TicketId::new(self.ticket_id.to_string()),
            author: self.username,
            is_admin: self.is_admin,
            body: self.content,
            timestamp: parse_timestamp("comment", &self.timestamp)?,
            can_delete: self.can_delete,
        })
    }
}

impl ActivityLogPayload {
    pub fn into_entry(self) -> Result<ActivityLogEntry, CoreError> {
        Ok(ActivityLogEntry {
            ticket_id: TicketId::new(self.ticket_id.to_string()),
            action: self.action,
            timestamp: parse_timestamp("activity log", &self.timestamp)?,
        })
    }
}

impl LoginPayload {
    pub fn into_session_user(self) -> SessionUser {
        SessionUser {
            id: UserId::new(self.user_id.to_string()),
            display_name: self.username,
            is_admin: self.is_admin,
        }
    }
}

pub fn decode_tickets(payloads: Vec<TicketPayload>) -> Result<Vec<Ticket>, CoreError> {
    payloads
        .into_iter()
        .map(TicketPayload::into_ticket)
        .collect()
}

pub fn decode_comments(payloads: Vec<CommentPayload>) -> Result<Vec<Comment>, CoreError> {
    payloads
        .into_iter()
        .map(CommentPayload::into_comment)
        .collect()
}

pub fn decode_activity_log(
    payloads: Vec<ActivityLogPayload>,
) -> Result<Vec<ActivityLogEntry>, CoreError> {
    payloads
        .into_iter()
        .map(ActivityLogPayload::into_entry)
        .collect()
}
