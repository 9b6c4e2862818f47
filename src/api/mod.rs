//! HTTP API for session-tracker.
//!
//! JSON endpoints over the [`SessionRegistry`](crate::session::SessionRegistry).
//! Request bodies may also be sent as `application/x-www-form-urlencoded`.
//!
//! ## Endpoints
//!
//! - `GET /` - Welcome message
//! - `GET /health` - Health check
//! - `POST /login` - Open a session
//! - `POST /logout` - Close a session
//! - `PUT|POST /update` - Update a session's identity fields
//! - `GET|POST /status` - Session record with duration and idle time
//! - `GET /listCurrentSessions` - All live sessions
//!
//! ## Example
//!
//! ```no_run
//! use session_tracker::api::{ServerConfig, serve};
//!
//! #[tokio::main]
//! async fn main() -> session_tracker::Result<()> {
//!     let config = ServerConfig::new("127.0.0.1", 3500);
//!     serve(config).await
//! }
//! ```

pub mod body;
pub mod client;
pub mod cookie;
pub mod handlers;
pub mod router;
pub mod types;

// Re-export commonly used types
pub use body::RequestBody;
pub use client::{ClientAddr, UNKNOWN_CLIENT_IP};
pub use cookie::CookieConfig;
pub use handlers::AppState;
pub use router::{create_router, create_router_with_state, serve, serve_with_state, ServerConfig};
pub use types::{
    ErrorResponse, ListSessionsResponse, LoginRequest, LoginResponse, MessageResponse,
    SessionIdRequest, SessionStatusResponse, UpdateRequest, UpdateResponse,
};
