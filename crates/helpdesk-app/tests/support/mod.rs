#![allow(dead_code)] // each test binary uses a different slice of the fake

//! Scripted in-memory ticket store for workspace tests.
//!
//! Records every operation it serves and can be primed to fail the next
//! call with a chosen error, so tests can assert both what was sent to the
//! store and how the workspace reacts when the store misbehaves.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use time::OffsetDateTime;

use helpdesk_core::{
    ActivityLogEntry, AttachmentRef, AttachmentUpload, Category, Comment, CommentId, CoreError,
    Priority, Scope, Ticket, TicketId, TicketStatus, UserId, ValidatedTicketFields,
};
use helpdesk_remote::{SessionUser, TicketStore};

pub fn session_user(id: &str, name: &str, is_admin: bool) -> SessionUser {
    SessionUser {
        id: UserId::from(id),
        display_name: name.to_owned(),
        is_admin,
    }
}

pub fn ticket(id: &str, owner: &str, title: &str, description: &str) -> Ticket {
    Ticket {
        id: TicketId::from(id),
        title: title.to_owned(),
        description: description.to_owned(),
        status: TicketStatus::Open,
        priority: Priority::Medium,
        category: Category::Other,
        owner: UserId::from(owner),
        owner_name: owner.to_owned(),
        attachment: None,
        created_at: OffsetDateTime::UNIX_EPOCH,
        updated_at: OffsetDateTime::UNIX_EPOCH,
    }
}

#[derive(Default)]
pub struct FakeState {
    pub caller: Option<SessionUser>,
    pub tickets: Vec<Ticket>,
    pub comments: HashMap<TicketId, Vec<Comment>>,
    pub logs: HashMap<TicketId, Vec<ActivityLogEntry>>,
    pub calls: Vec<String>,
    pub fail_next: Option<CoreError>,
    next_id: i64,
}

#[derive(Clone)]
pub struct FakeStore {
    state: Arc<Mutex<FakeState>>,
}

impl FakeStore {
    pub fn new(caller: SessionUser) -> Self {
        Self {
            state: Arc::new(Mutex::new(FakeState {
                caller: Some(caller),
                next_id: 100,
                ..FakeState::default()
            })),
        }
    }

    pub fn state(&self) -> MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake store state lock")
    }

    pub fn push_ticket(&self, ticket: Ticket) {
        self.state().tickets.push(ticket);
    }

    pub fn fail_next(&self, error: CoreError) {
        self.state().fail_next = Some(error);
    }

    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    fn begin(&self, op: &str) -> Result<MutexGuard<'_, FakeState>, CoreError> {
        let mut state = self.state();
        state.calls.push(op.to_owned());
        if let Some(error) = state.fail_next.take() {
            return Err(error);
        }
        Ok(state)
    }
}

fn matches_axes(
    ticket: &Ticket,
    priority: Option<Priority>,
    category: Option<Category>,
) -> bool {
    priority.map_or(true, |wanted| ticket.priority == wanted)
        && category.map_or(true, |wanted| ticket.category == wanted)
}

fn matches_scope(ticket: &Ticket, scope: Scope, caller: Option<&SessionUser>) -> bool {
    match scope {
        Scope::All => true,
        Scope::Mine => caller.is_some_and(|user| ticket.owner == user.id),
    }
}

#[async_trait]
impl TicketStore for FakeStore {
    async fn list_tickets(
        &self,
        scope: Scope,
        priority: Option<Priority>,
        category: Option<Category>,
    ) -> Result<Vec<Ticket>, CoreError> {
        let state = self.begin("list_tickets")?;
        let caller = state.caller.clone();
        Ok(state
            .tickets
            .iter()
            .filter(|ticket| matches_scope(ticket, scope, caller.as_ref()))
            .filter(|ticket| matches_axes(ticket, priority, category))
            .cloned()
            .collect())
    }

    async fn search_tickets(
        &self,
        query: &str,
        priority: Option<Priority>,
        category: Option<Category>,
        scope: Scope,
    ) -> Result<Vec<Ticket>, CoreError> {
        let state = self.begin("search_tickets")?;
        let caller = state.caller.clone();
        let needle = query.to_lowercase();
        Ok(state
            .tickets
            .iter()
            .filter(|ticket| matches_scope(ticket, scope, caller.as_ref()))
            .filter(|ticket| matches_axes(ticket, priority, category))
            .filter(|ticket| {
                ticket.title.to_lowercase().contains(&needle)
                    || ticket.description.to_lowercase().contains(&needle)
                    || ticket.owner_name.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect())
    }

    async fn create_ticket(
        &self,
        fields: ValidatedTicketFields,
        attachment: Option<AttachmentUpload>,
    ) -> Result<Ticket, CoreError> {
        let mut state = self.begin("create_ticket")?;
        state.next_id += 1;
        let id = state.next_id;
        let caller = state.caller.clone().ok_or(CoreError::AuthDenied)?;
        let ticket = Ticket {
            id: TicketId::new(id.to_string()),
            title: fields.title,
            description: fields.description,
            status: TicketStatus::Open,
            priority: fields.priority,
            category: fields.category,
            owner: caller.id,
            owner_name: caller.display_name,
            attachment: attachment
                .map(|upload| AttachmentRef::new(format!("/uploads/{}", upload.file_name))),
            created_at: OffsetDateTime::UNIX_EPOCH,
            updated_at: OffsetDateTime::UNIX_EPOCH,
        };
        state.tickets.push(ticket.clone());
        Ok(ticket)
    }

    async fn update_ticket_status(
        &self,
        id: &TicketId,
        status: TicketStatus,
    ) -> Result<(), CoreError> {
        let mut state = self.begin("update_ticket_status")?;
        let ticket = state
            .tickets
            .iter_mut()
            .find(|ticket| &ticket.id == id)
            .ok_or_else(|| CoreError::remote(format!("ticket `{id}` not found")))?;
        ticket.status = status;
        let entry = ActivityLogEntry {
            ticket_id: id.clone(),
            action: format!("Status changed to {}", status.label()),
            timestamp: OffsetDateTime::UNIX_EPOCH,
        };
        state.logs.entry(id.clone()).or_default().insert(0, entry);
        Ok(())
    }

    async fn delete_ticket(&self, id: &TicketId) -> Result<(), CoreError> {
        let mut state = self.begin("delete_ticket")?;
        state.tickets.retain(|ticket| &ticket.id != id);
        Ok(())
    }

    async fn list_comments(&self, ticket_id: &TicketId) -> Result<Vec<Comment>, CoreError> {
        let state = self.begin("list_comments")?;
        Ok(state.comments.get(ticket_id).cloned().unwrap_or_default())
    }

    async fn post_comment(&self, ticket_id: &TicketId, body: &str) -> Result<Comment, CoreError> {
        let mut state = self.begin("post_comment")?;
        state.next_id += 1;
        let id = state.next_id;
        let caller = state.caller.clone().ok_or(CoreError::AuthDenied)?;
        let comment = Comment {
            id: CommentId::new(id.to_string()),
            ticket_id: ticket_id.clone(),
            author: caller.display_name,
            is_admin: caller.is_admin,
            body: body.to_owned(),
            timestamp: OffsetDateTime::UNIX_EPOCH,
            can_delete: true,
        };
        state
            .comments
            .entry(ticket_id.clone())
            .or_default()
            .insert(0, comment.clone());
        Ok(comment)
    }

    async fn delete_comment(&self, comment_id: &CommentId) -> Result<(), CoreError> {
        let mut state = self.begin("delete_comment")?;
        let mut found = false;
        for thread in state.comments.values_mut() {
            let before = thread.len();
            thread.retain(|comment| &comment.id != comment_id);
            found |= thread.len() != before;
        }
        if found {
            Ok(())
        } else {
            Err(CoreError::remote(format!("comment `{comment_id}` not found")))
        }
    }

    async fn list_activity_log(
        &self,
        ticket_id: &TicketId,
    ) -> Result<Vec<ActivityLogEntry>, CoreError> {
        let state = self.begin("list_activity_log")?;
        Ok(state.logs.get(ticket_id).cloned().unwrap_or_default())
    }

    async fn login(&self, _username: &str, _password: &str) -> Result<SessionUser, CoreError> {
        let state = self.begin("login")?;
        state.caller.clone().ok_or(CoreError::AuthDenied)
    }

    async fn logout(&self) -> Result<(), CoreError> {
        let _state = self.begin("logout")?;
        Ok(())
    }
}
