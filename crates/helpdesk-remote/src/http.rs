use std::fmt;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;

use helpdesk_core::{
    ActivityLogEntry, AttachmentUpload, Category, Comment, CommentId, CoreError, Priority, Scope,
    Ticket, TicketId, TicketStatus, ValidatedTicketFields,
};

use crate::config::StoreConfig;
use crate::store::{SessionUser, TicketStore};
use crate::wire::{
    decode_activity_log, decode_comments, decode_tickets, ActivityLogPayload, CommentPayload,
    LoginPayload, TicketPayload,
};

/// Production `TicketStore` backed by the HTTP API of the remote store.
///
/// The session is an authentication cookie scoped to the store host, held
/// in the client's cookie jar across calls. Admin routing is decided at
/// construction, after the store has reported the caller's role at login.
#[derive(Clone)]
pub struct HttpTicketStore {
    base_url: String,
    client: reqwest::Client,
    admin_routes: bool,
}

impl fmt::Debug for HttpTicketStore {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("HttpTicketStore")
            .field("base_url", &self.base_url)
            .field("admin_routes", &self.admin_routes)
            .finish_non_exhaustive()
    }
}

impl HttpTicketStore {
    pub fn new(config: &StoreConfig) -> Result<Self, CoreError> {
        let client = reqwest::Client::builder()
            .user_agent("helpdesk/remote")
            .cookie_store(true)
            .timeout(config.http_timeout)
            .build()
            .map_err(|error| {
                CoreError::remote(format!("failed to initialize ticket store client: {error}"))
            })?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            client,
            admin_routes: false,
        })
    }

    /// Switches mutating ticket routes to their admin variants. Shares the
    /// cookie jar with the original, so the session survives the switch.
    pub fn with_admin_routes(mut self) -> Self {
        self.admin_routes = true;
        self
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    async fn execute(&self, request: reqwest::RequestBuilder) -> Result<String, CoreError> {
        let response = request
            .send()
            .await
            .map_err(|error| CoreError::remote(format!("failed to call ticket store: {error}")))?;

        let status = response.status();
        let body = response.text().await.map_err(|error| {
            CoreError::remote(format!("failed to read ticket store response: {error}"))
        })?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CoreError::AuthDenied);
        }
        if !status.is_success() {
            return Err(CoreError::remote(format!(
                "ticket store returned HTTP {status}: {}",
                truncate_for_error(&body)
            )));
        }

        Ok(body)
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, CoreError> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|error| {
            CoreError::remote(format!("failed to decode ticket store payload: {error}"))
        })
    }

    fn structural_params(
        priority: Option<Priority>,
        category: Option<Category>,
    ) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(priority) = priority {
            params.push(("priority", priority.label().to_owned()));
        }
        if let Some(category) = category {
            params.push(("category", category.label().to_owned()));
        }
        params
    }

    const fn scope_key(scope: Scope) -> &'static str {
        match scope {
            Scope::Mine => "mine",
            Scope::All => "all",
        }
    }
}

#[async_trait]
impl TicketStore for HttpTicketStore {
    async fn list_tickets(
        &self,
        scope: Scope,
        priority: Option<Priority>,
        category: Option<Category>,
    ) -> Result<Vec<Ticket>, CoreError> {
        let path = match scope {
            Scope::Mine => "/tickets",
            Scope::All => "/admin/tickets",
        };
        let params = Self::structural_params(priority, category);
        debug!(path, params = ?params, "listing tickets");

        let payloads: Vec<TicketPayload> = self
            .execute_json(self.client.get(self.url(path)).query(&params))
            .await?;
        decode_tickets(payloads)
    }

    async fn search_tickets(
        &self,
        query: &str,
        priority: Option<Priority>,
        category: Option<Category>,
        scope: Scope,
    ) -> Result<Vec<Ticket>, CoreError> {
        let mut params = vec![
            ("query", query.to_owned()),
            ("scope", Self::scope_key(scope).to_owned()),
        ];
        params.extend(Self::structural_params(priority, category));

        let payloads: Vec<TicketPayload> = self
            .execute_json(self.client.get(self.url("/tickets/search")).query(&params))
            .await?;
        decode_tickets(payloads)
    }

    async fn create_ticket(
        &self,
        fields: ValidatedTicketFields,
        attachment: Option<AttachmentUpload>,
    ) -> Result<Ticket, CoreError> {
        let mut form = reqwest::multipart::Form::new()
            .text("title", fields.title)
            .text("description", fields.description)
            .text("priority", fields.priority.label())
            .text("category", fields.category.label());

        if let Some(upload) = attachment {
            let part = reqwest::multipart::Part::bytes(upload.bytes)
                .file_name(upload.file_name)
                .mime_str(&upload.content_type)
                .map_err(|error| {
                    CoreError::validation(format!("invalid attachment content type: {error}"))
                })?;
            form = form.part("attachment", part);
        }

        let payload: TicketPayload = self
            .execute_json(self.client.post(self.url("/tickets")).multipart(form))
            .await?;
        payload.into_ticket()
    }

    async fn update_ticket_status(
        &self,
        id: &TicketId,
        status: TicketStatus,
    ) -> Result<(), CoreError> {
        let path = if self.admin_routes {
            format!("/admin/tickets/{id}")
        } else {
            format!("/tickets/{id}")
        };

        self.execute(
            self.client
                .put(self.url(&path))
                .json(&json!({ "status": status.label() })),
        )
        .await?;
        Ok(())
    }

    async fn delete_ticket(&self, id: &TicketId) -> Result<(), CoreError> {
        self.execute(self.client.delete(self.url(&format!("/tickets/{id}"))))
            .await?;
        Ok(())
    }

    async fn list_comments(&self, ticket_id: &TicketId) -> Result<Vec<Comment>, CoreError> {
        let payloads: Vec<CommentPayload> = self
            .execute_json(
                self.client
                    .get(self.url(&format!("/tickets/{ticket_id}/comments"))),
            )
            .await?;
        decode_comments(payloads)
    }

    async fn post_comment(&self, ticket_id: &TicketId, body: &str) -> Result<Comment, CoreError> {
        let payload: CommentPayload = self
            .execute_json(
                self.client
                    .post(self.url(&format!("/tickets/{ticket_id}/comments")))
                    .json(&json!({ "content": body })),
            )
            .await?;
        payload.into_comment()
    }

    async fn delete_comment(&self, comment_id: &CommentId) -> Result<(), CoreError> {
        self.execute(
            self.client
                .delete(self.url(&format!("/comments/{comment_id}"))),
        )
        .await?;
        Ok(())
    }

    async fn list_activity_log(
        &self,
        ticket_id: &TicketId,
    ) -> Result<Vec<ActivityLogEntry>, CoreError> {
        let payloads: Vec<ActivityLogPayload> = self
            .execute_json(
                self.client
                    .get(self.url(&format!("/admin/tickets/{ticket_id}/logs"))),
            )
            .await?;
        decode_activity_log(payloads)
    }

    async fn login(&self, username: &str, password: &str) -> Result<SessionUser, CoreError> {
        let payload: LoginPayload = self
            .execute_json(
                self.client
                    .post(self.url("/login"))
                    .json(&json!({ "username": username, "password": password })),
            )
            .await?;
        Ok(payload.into_session_user())
    }

    async fn logout(&self) -> Result<(), CoreError> {
        self.execute(self.client.post(self.url("/logout"))).await?;
        Ok(())
    }
}

fn truncate_for_error(body: &str) -> String {
    const MAX_LEN: usize = 200;
    if body.chars().count() <= MAX_LEN {
        body.to_owned()
    } else {
        format!("{}...", body.chars().take(MAX_LEN).collect::<String>())
    }
}
