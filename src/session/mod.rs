//! Session management module.
//!
//! This module provides the session registry together with the record
//! types it stores, session identifiers, and the clock it reads.

mod clock;
mod id;
mod record;
mod registry;

pub use clock::{Clock, ManualClock, SystemClock};
pub use id::SessionId;
pub use record::{
    ClientInfo, LoginFields, SessionRecord, SessionSnapshot, UpdateFields, ValidLogin,
};
pub use registry::SessionRegistry;
