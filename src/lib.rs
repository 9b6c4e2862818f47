//! # session-tracker
//!
//! In-memory session tracking HTTP service.
//!
//! Clients log in with identifying fields, receive a session id, and can
//! query, refresh, or terminate that session. Sessions live in process
//! memory only; nothing survives a restart.
//!
//! ## Features
//!
//! - **Session Registry**: create, read, update, delete and list session records
//! - **Host network info**: each record carries the serving host's address and MAC
//! - **JSON API**: axum router with permissive CORS and request tracing
//!
//! ## Quick Start
//!
//! ```no_run
//! use session_tracker::{LoginFields, SessionRegistry};
//!
//! fn main() -> session_tracker::Result<()> {
//!     session_tracker::logging::try_init().ok();
//!
//!     let registry = SessionRegistry::new();
//!     let record = registry.create(
//!         LoginFields::new("a@b.com", "ana", "00:11:22:33:44:55", "Ana Ruiz"),
//!         "127.0.0.1",
//!     )?;
//!
//!     let status = registry.read(&record.session_id, "127.0.0.1")?;
//!     println!("session {} idle for {} ms", record.session_id, status.idle_time);
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod network;
pub mod session;

// Re-export commonly used types
pub use error::{Result, SessionTrackerError};
pub use network::{HostNetworkInfo, ServerInfo, StaticNetworkInfo, SystemNetworkInfo};
pub use session::{
    ClientInfo, Clock, LoginFields, ManualClock, SessionId, SessionRecord, SessionRegistry,
    SessionSnapshot, SystemClock, UpdateFields,
};
