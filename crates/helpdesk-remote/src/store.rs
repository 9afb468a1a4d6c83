use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use helpdesk_core::{
    ActivityLogEntry, AttachmentUpload, Category, Comment, CommentId, CoreError, Priority, Scope,
    Ticket, TicketId, TicketStatus, UserId, ValidatedTicketFields,
};

/// The authenticated caller, as reported by the store at login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: UserId,
    pub display_name: String,
    pub is_admin: bool,
}

/// The remote ticket store: authoritative persistence for tickets,
/// comments, and activity logs.
///
/// Every operation may fail with `CoreError::AuthDenied` when the session
/// cookie is invalid or expired; any other store failure surfaces as
/// `CoreError::Remote`. Collection ordering is the store's and is
/// preserved by callers.
#[async_trait]
pub trait TicketStore: Send + Sync {
    /// Lists tickets visible under `scope`, optionally constrained by the
    /// structural filter axes. `Scope::All` requires admin privilege,
    /// enforced by the store.
    async fn list_tickets(
        &self,
        scope: Scope,
        priority: Option<Priority>,
        category: Option<Category>,
    ) -> Result<Vec<Ticket>, CoreError>;

    /// Free-text search combined with the structural axes.
    async fn search_tickets(
        &self,
        query: &str,
        priority: Option<Priority>,
        category: Option<Category>,
        scope: Scope,
    ) -> Result<Vec<Ticket>, CoreError>;

    /// Multi-part submission: text fields plus an optional binary
    /// attachment. Returns the created ticket with server-assigned fields.
    async fn create_ticket(
        &self,
        fields: ValidatedTicketFields,
        attachment: Option<AttachmentUpload>,
    ) -> Result<Ticket, CoreError>;

    /// Persists a status edit, carrying only the changed field.
    async fn update_ticket_status(
        &self,
        id: &TicketId,
        status: TicketStatus,
    ) -> Result<(), CoreError>;

    async fn delete_ticket(&self, id: &TicketId) -> Result<(), CoreError>;

    /// Ordered comment log for one ticket, most-recent-first.
    async fn list_comments(&self, ticket_id: &TicketId) -> Result<Vec<Comment>, CoreError>;

    /// Returns the stored comment so the caller can prepend it locally
    /// without a refetch.
    async fn post_comment(&self, ticket_id: &TicketId, body: &str) -> Result<Comment, CoreError>;

    async fn delete_comment(&self, comment_id: &CommentId) -> Result<(), CoreError>;

    /// Read-only activity log for one ticket, most-recent-first.
    async fn list_activity_log(
        &self,
        ticket_id: &TicketId,
    ) -> Result<Vec<ActivityLogEntry>, CoreError>;

    /// Establishes the session; the store sets the session cookie.
    async fn login(&self, username: &str, password: &str) -> Result<SessionUser, CoreError>;

    /// Requests session termination. Callers treat the local session as
    /// ended regardless of the outcome.
    async fn logout(&self) -> Result<(), CoreError>;
}
