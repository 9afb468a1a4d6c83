pub mod comments;
pub mod session;
pub mod workspace;

pub use comments::CommentThreads;
pub use session::{Confirmation, SessionStatus};
pub use workspace::TicketWorkspace;
