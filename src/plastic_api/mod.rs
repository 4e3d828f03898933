pub mod handlers;
pub mod server_api;

pub use server_api::{AppState, configure, run};
