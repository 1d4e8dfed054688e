//! Web form over the recommendation pipeline

pub mod handler;
pub mod server;
pub mod template;

pub use handler::{AppState, HttpError};
pub use server::{router, HttpServer};
pub use template::PageRenderer;
