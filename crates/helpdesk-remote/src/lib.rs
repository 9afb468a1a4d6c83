pub mod config;
pub mod http;
pub mod store;
pub mod wire;

pub use config::StoreConfig;
pub use http::HttpTicketStore;
pub use store::{SessionUser, TicketStore};
