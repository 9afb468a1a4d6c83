pub mod error;
pub mod filter;
pub mod lifecycle;
pub mod model;
pub mod view;

use serde::{Deserialize, Serialize};

macro_rules! string_id {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_owned())
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                formatter.write_str(&self.0)
            }
        }
    };
}

string_id!(TicketId);
string_id!(CommentId);
string_id!(UserId);

pub use error::CoreError;
pub use filter::{CategoryFilter, FetchPlan, FilterState, PriorityFilter, Scope};
pub use lifecycle::transition_allowed;
pub use model::{
    ActivityLogEntry, AttachmentRef, AttachmentUpload, Category, Comment, NewTicket, Priority,
    Ticket, TicketStatus, ValidatedTicketFields,
};
pub use view::{compose_view, SearchStrategy};
