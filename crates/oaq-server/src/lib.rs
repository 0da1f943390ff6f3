//! HTTP front door for the operation matcher: thin handlers over the pure
//! core functions and the chooser, sharing one immutable document.

pub mod config;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use routes::create_router;
pub use state::AppState;
