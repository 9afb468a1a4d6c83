use std::collections::HashMap;

use helpdesk_core::{Comment, CommentId, TicketId};

/// Per-ticket comment caches.
///
/// Each thread is an independent slice keyed by ticket identity; nothing
/// here touches the ticket snapshot. Ordering within a thread is the
/// store's (most-recent-first), kept intact by prepending new comments.
#[derive(Debug, Default)]
pub struct CommentThreads {
    threads: HashMap<TicketId, Vec<Comment>>,
}

impl CommentThreads {
    pub fn thread(&self, ticket_id: &TicketId) -> Option<&[Comment]> {
        self.threads.get(ticket_id).map(Vec::as_slice)
    }

    pub fn replace(&mut self, ticket_id: TicketId, comments: Vec<Comment>) {
        self.threads.insert(ticket_id, comments);
    }

    /// Prepends a freshly stored comment; optimistic local ordering matches
    /// the server because the server returns the comment it just stored.
    pub fn prepend(&mut self, comment: Comment) {
        self.threads
            .entry(comment.ticket_id.clone())
            .or_default()
            .insert(0, comment);
    }

    pub fn remove(&mut self, ticket_id: &TicketId, comment_id: &CommentId) {
        if let Some(thread) = self.threads.get_mut(ticket_id) {
            thread.retain(|comment| &comment.id != comment_id);
        }
    }

    pub fn find(&self, ticket_id: &TicketId, comment_id: &CommentId) -> Option<&Comment> {
        self.threads
            .get(ticket_id)?
            .iter()
            .find(|comment| &comment.id == comment_id)
    }

    pub fn clear(&mut self) {
        self.threads.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.threads.is_empty()
    }
}
