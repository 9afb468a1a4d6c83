use tracing::{debug, warn};

use helpdesk_core::{
    compose_view, lifecycle, ActivityLogEntry, Category, CategoryFilter, Comment, CommentId,
    CoreError, FetchPlan, FilterState, NewTicket, Priority, PriorityFilter, Scope, SearchStrategy,
    Ticket, TicketId, TicketStatus,
};
use helpdesk_remote::{SessionUser, TicketStore};

use crate::comments::CommentThreads;
use crate::session::{Confirmation, SessionStatus};

/// The stateful client engine: one authenticated caller, one refreshable
/// ticket snapshot, filter-driven view composition, and per-ticket comment
/// threads.
///
/// Created at login and torn down on logout or an authentication-denied
/// signal. All caches are transient; the remote store is the sole durable
/// owner, and every mutation is confirmed by a full collection refetch
/// rather than a local patch. Single-owner and lock-free: concurrent
/// refreshes resolve last-writer-wins at full-snapshot granularity.
pub struct TicketWorkspace<S> {
    store: S,
    user: SessionUser,
    status: SessionStatus,
    filter: FilterState,
    snapshot: Vec<Ticket>,
    // trimmed query the snapshot was fetched under; empty when the
    // snapshot is the full structural set
    snapshot_query: String,
    threads: CommentThreads,
    draft: NewTicket,
}

impl<S: TicketStore> TicketWorkspace<S> {
    pub fn new(store: S, user: SessionUser) -> Self {
        Self {
            store,
            user,
            status: SessionStatus::Active,
            filter: FilterState::scoped(Scope::Mine),
            snapshot: Vec::new(),
            snapshot_query: String::new(),
            threads: CommentThreads::default(),
            draft: NewTicket::default(),
        }
    }

    pub fn user(&self) -> &SessionUser {
        &self.user
    }

    pub fn session_status(&self) -> SessionStatus {
        self.status
    }

    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn snapshot(&self) -> &[Ticket] {
        &self.snapshot
    }

    /// The creation form state; retained across failed submissions.
    pub fn draft(&self) -> &NewTicket {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut NewTicket {
        &mut self.draft
    }

    /// The ordered visible subset for the current filter state, recomposed
    /// over the cached snapshot.
    pub fn visible_tickets(&self) -> Vec<&Ticket> {
        compose_view(&self.snapshot, &self.filter, &self.user.id)
    }

    /// Every remote outcome passes through here. An authentication-denied
    /// signal invalidates all local state and demands re-authentication;
    /// any other failure is recoverable and leaves state intact.
    fn admit<T>(&mut self, result: Result<T, CoreError>) -> Result<T, CoreError> {
        if let Err(error) = &result {
            if error.is_auth_denied() {
                warn!("session denied by remote store; discarding local state");
                self.invalidate();
            }
        }
        result
    }

    fn invalidate(&mut self) {
        self.status = SessionStatus::RequiresLogin;
        self.snapshot.clear();
        self.snapshot_query.clear();
        self.threads.clear();
        self.filter = FilterState::scoped(Scope::Mine);
        self.draft = NewTicket::default();
    }

    fn priority_axis(&self) -> Option<Priority> {
        match self.filter.priority {
            PriorityFilter::All => None,
            PriorityFilter::Only(priority) => Some(priority),
        }
    }

    fn category_axis(&self) -> Option<Category> {
        match self.filter.category {
            CategoryFilter::All => None,
            CategoryFilter::Only(category) => Some(category),
        }
    }

    /// Replaces the snapshot from the remote store. A non-empty text axis
    /// goes to the store's search endpoint and leaves the snapshot narrowed
    /// to that query; otherwise a plain scoped listing. The snapshot is
    /// only overwritten on success.
    pub async fn refresh(&mut self) -> Result<(), CoreError> {
        let query = self.filter.query.trim().to_owned();
        let result = match SearchStrategy::for_filter(&self.filter) {
            SearchStrategy::LocalFilter => {
                self.store
                    .list_tickets(self.filter.scope, self.priority_axis(), self.category_axis())
                    .await
            }
            SearchStrategy::RemoteQuery => {
                self.store
                    .search_tickets(
                        &query,
                        self.priority_axis(),
                        self.category_axis(),
                        self.filter.scope,
                    )
                    .await
            }
        };

        let tickets = self.admit(result)?;
        debug!(count = tickets.len(), "ticket snapshot refreshed");
        self.snapshot = tickets;
        self.snapshot_query = query;
        Ok(())
    }

    /// Text-axis change. Recomposition stays local while the cached
    /// snapshot was fetched without a text constraint; a snapshot produced
    /// by a remote search only serves its own query, so changing or
    /// clearing the query over one refetches first.
    pub async fn set_query(&mut self, query: impl Into<String>) -> Result<(), CoreError> {
        let plan = self.filter.set_query(query);
        self.apply_plan(plan).await
    }

    pub async fn set_priority(&mut self, priority: PriorityFilter) -> Result<(), CoreError> {
        let plan = self.filter.set_priority(priority);
        self.apply_plan(plan).await
    }

    pub async fn set_category(&mut self, category: CategoryFilter) -> Result<(), CoreError> {
        let plan = self.filter.set_category(category);
        self.apply_plan(plan).await
    }

    pub async fn set_scope(&mut self, scope: Scope) -> Result<(), CoreError> {
        let plan = self.filter.set_scope(scope);
        self.apply_plan(plan).await
    }

    pub async fn reset_filters(&mut self) -> Result<(), CoreError> {
        let plan = self.filter.reset();
        self.apply_plan(plan).await
    }

    async fn apply_plan(&mut self, plan: FetchPlan) -> Result<(), CoreError> {
        if plan == FetchPlan::RefetchRemote || !self.snapshot_serves_query() {
            return self.refresh().await;
        }
        Ok(())
    }

    // A text-narrowed snapshot is a valid recomposition base only for the
    // exact query it was fetched under.
    fn snapshot_serves_query(&self) -> bool {
        self.snapshot_query.is_empty() || self.snapshot_query == self.filter.query.trim()
    }

    /// Submits the current draft. Validation failures surface immediately
    /// without a remote call and the draft is retained; on success the
    /// draft is cleared and the snapshot fully refreshed.
    pub async fn create_ticket(&mut self) -> Result<Ticket, CoreError> {
        let fields = self.draft.validated()?;
        let attachment = self.draft.attachment.clone();

        let result = self.store.create_ticket(fields, attachment).await;
        let ticket = self.admit(result)?;
        self.draft = NewTicket::default();
        self.refresh().await?;
        Ok(ticket)
    }

    /// Persists a status edit and refetches the whole collection so
    /// server-computed fields stay authoritative. On failure nothing is
    /// applied locally.
    pub async fn update_status(
        &mut self,
        ticket_id: &TicketId,
        new_status: TicketStatus,
    ) -> Result<(), CoreError> {
        let current = self
            .snapshot
            .iter()
            .find(|ticket| &ticket.id == ticket_id)
            .ok_or_else(|| {
                CoreError::validation(format!("ticket `{ticket_id}` is not in the current view"))
            })?;
        lifecycle::validate_transition(current.status, new_status)?;

        let result = self.store.update_ticket_status(ticket_id, new_status).await;
        self.admit(result)?;
        self.refresh().await
    }

    /// Deletes a ticket after affirmative confirmation; declining is a
    /// no-op, not an error.
    pub async fn delete_ticket(
        &mut self,
        ticket_id: &TicketId,
        confirmation: Confirmation,
    ) -> Result<(), CoreError> {
        if !confirmation.is_confirmed() {
            return Ok(());
        }

        let result = self.store.delete_ticket(ticket_id).await;
        self.admit(result)?;
        self.refresh().await
    }

    /// Fetches and caches the comment thread for one ticket,
    /// most-recent-first as returned by the store.
    pub async fn load_comments(&mut self, ticket_id: &TicketId) -> Result<&[Comment], CoreError> {
        let result = self.store.list_comments(ticket_id).await;
        let comments = self.admit(result)?;
        self.threads.replace(ticket_id.clone(), comments);
        Ok(self
            .threads
            .thread(ticket_id)
            .unwrap_or_default())
    }

    pub fn comments(&self, ticket_id: &TicketId) -> Option<&[Comment]> {
        self.threads.thread(ticket_id)
    }

    /// Posts a comment; the stored comment returned by the server is
    /// prepended to the cached thread. On failure the thread is untouched
    /// and the caller keeps the input.
    pub async fn post_comment(
        &mut self,
        ticket_id: &TicketId,
        body: &str,
    ) -> Result<Comment, CoreError> {
        let trimmed = body.trim();
        if trimmed.is_empty() {
            return Err(CoreError::validation("comment body cannot be empty"));
        }

        let result = self.store.post_comment(ticket_id, trimmed).await;
        let comment = self.admit(result)?;
        self.threads.prepend(comment.clone());
        Ok(comment)
    }

    /// Deletes a comment. Preconditions checked locally, before any remote
    /// call: the comment must be cached, its server-computed delete
    /// capability must be set, and the caller must have confirmed.
    pub async fn delete_comment(
        &mut self,
        ticket_id: &TicketId,
        comment_id: &CommentId,
        confirmation: Confirmation,
    ) -> Result<(), CoreError> {
        let Some(comment) = self.threads.find(ticket_id, comment_id) else {
            return Err(CoreError::validation(format!(
                "comment `{comment_id}` is not in the cached thread for ticket `{ticket_id}`"
            )));
        };
        if !comment.can_delete {
            return Err(CoreError::validation(
                "the current caller may not delete this comment",
            ));
        }
        if !confirmation.is_confirmed() {
            return Ok(());
        }

        let result = self.store.delete_comment(comment_id).await;
        self.admit(result)?;
        self.threads.remove(ticket_id, comment_id);
        Ok(())
    }

    /// Read-only activity log for one ticket; never created or mutated
    /// locally, so there is nothing to cache.
    pub async fn activity_log(
        &mut self,
        ticket_id: &TicketId,
    ) -> Result<Vec<ActivityLogEntry>, CoreError> {
        let result = self.store.list_activity_log(ticket_id).await;
        self.admit(result)
    }

    /// Requests session termination and unconditionally transitions to the
    /// unauthenticated state, even when the remote call fails. Failing
    /// closed here would strand the caller in a session they cannot exit.
    pub async fn logout(&mut self) {
        if let Err(error) = self.store.logout().await {
            warn!(error = %error, "remote logout failed; ending local session anyway");
        }
        self.invalidate();
    }
}
