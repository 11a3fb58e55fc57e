pub mod contacts;
pub mod extract;
pub mod metadata;
pub mod routes;
pub mod server;

pub use server::{AppState, SharedStore, create_app_state, serve_listener, start_server};
