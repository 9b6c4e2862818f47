//! API request and response types.

use serde::{Deserialize, Serialize};

use crate::error::SessionTrackerError;
use crate::session::{LoginFields, SessionId, SessionRecord, SessionSnapshot, UpdateFields};

/// Request to log in.
pub type LoginRequest = LoginFields;

/// Request naming a session, used by logout and status.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdRequest {
    #[serde(default)]
    pub session_id: Option<String>,
}

impl SessionIdRequest {
    /// The trimmed session id, if one was sent.
    pub fn session_id(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Request to update a session.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(flatten)]
    pub fields: UpdateFields,
}

impl UpdateRequest {
    pub fn session_id(&self) -> Option<&str> {
        self.session_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }
}

/// Welcome message served at `/`.
#[derive(Debug, Clone, Serialize)]
pub struct WelcomeResponse {
    pub message: String,
    pub name: String,
    pub version: String,
}

impl Default for WelcomeResponse {
    fn default() -> Self {
        Self {
            message: "Welcome to the session tracking API".to_string(),
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Response for a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub message: String,
    pub session_id: SessionId,
    pub session_data: SessionRecord,
}

impl LoginResponse {
    pub fn new(record: SessionRecord) -> Self {
        Self {
            message: "Logged in successfully".to_string(),
            session_id: record.session_id,
            session_data: record,
        }
    }
}

/// Plain confirmation message.
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response for a successful update.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateResponse {
    pub message: String,
    pub session: SessionRecord,
}

impl UpdateResponse {
    pub fn new(session: SessionRecord) -> Self {
        Self {
            message: "Session updated".to_string(),
            session,
        }
    }
}

/// Response for a session status query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatusResponse {
    pub message: String,
    pub session: SessionRecord,
    /// Milliseconds since the session was created.
    pub duration: i64,
    /// Milliseconds since the session was last updated.
    pub idle_time: i64,
}

impl SessionStatusResponse {
    pub fn from_snapshot(snapshot: SessionSnapshot) -> Self {
        Self {
            message: "Session active".to_string(),
            session: snapshot.record,
            duration: snapshot.duration,
            idle_time: snapshot.idle_time,
        }
    }
}

/// List sessions response.
#[derive(Debug, Clone, Serialize)]
pub struct ListSessionsResponse {
    pub message: String,
    /// Total number of sessions.
    pub count: usize,
    pub sessions: Vec<SessionSnapshot>,
}

impl ListSessionsResponse {
    pub fn new(sessions: Vec<SessionSnapshot>) -> Self {
        let message = if sessions.is_empty() {
            "No active sessions"
        } else {
            "Active sessions found"
        };
        Self {
            message: message.to_string(),
            count: sessions.len(),
            sessions,
        }
    }
}

/// Generic API error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub message: String,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn from_error(err: &SessionTrackerError) -> Self {
        match err {
            SessionTrackerError::Validation(detail) => Self::new(detail.clone()),
            SessionTrackerError::SessionNotFound(_) => Self::session_not_found(),
            _ => Self::internal_error(),
        }
    }

    pub fn session_not_found() -> Self {
        Self::new("No active session found")
    }

    pub fn missing_session_id() -> Self {
        Self::new("A sessionId is required")
    }

    pub fn internal_error() -> Self {
        Self::new("Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::ServerInfo;
    use chrono::Utc;

    fn record() -> SessionRecord {
        let fields = LoginFields::new("a@b.com", "ana", "00:11:22:33:44:55", "Ana Ruiz")
            .validate()
            .unwrap();
        SessionRecord::new(
            SessionId::new(),
            fields,
            "10.0.0.1",
            ServerInfo::default(),
            Utc::now(),
        )
    }

    #[test]
    fn test_session_id_request_trims() {
        let req: SessionIdRequest = serde_json::from_str(r#"{"sessionId": "  abc "}"#).unwrap();
        assert_eq!(req.session_id(), Some("abc"));

        let req: SessionIdRequest = serde_json::from_str(r#"{"sessionId": "   "}"#).unwrap();
        assert_eq!(req.session_id(), None);

        let req: SessionIdRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(req.session_id(), None);
    }

    #[test]
    fn test_update_request_flattens_fields() {
        let json = r#"{"sessionId": "abc", "nickname": "X", "fullName": "Xavier"}"#;
        let req: UpdateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.session_id(), Some("abc"));
        assert_eq!(req.fields.nickname.as_deref(), Some("X"));
        assert_eq!(req.fields.full_name.as_deref(), Some("Xavier"));
        assert!(req.fields.email.is_none());
    }

    #[test]
    fn test_login_response_shape() {
        let record = record();
        let id = record.session_id.to_string();
        let json = serde_json::to_value(LoginResponse::new(record)).unwrap();
        assert_eq!(json["sessionId"], id);
        assert_eq!(json["sessionData"]["email"], "a@b.com");
    }

    #[test]
    fn test_status_response_shape() {
        let snapshot = record().snapshot(Utc::now());
        let json = serde_json::to_value(SessionStatusResponse::from_snapshot(snapshot)).unwrap();
        assert!(json["session"]["sessionId"].is_string());
        assert!(json["duration"].is_i64());
        assert!(json["idleTime"].is_i64());
    }

    #[test]
    fn test_list_response_messages() {
        let empty = ListSessionsResponse::new(Vec::new());
        assert_eq!(empty.count, 0);
        assert_eq!(empty.message, "No active sessions");

        let one = ListSessionsResponse::new(vec![record().snapshot(Utc::now())]);
        assert_eq!(one.count, 1);
    }

    #[test]
    fn test_error_response_from_error() {
        let err = SessionTrackerError::Validation("missing required fields: email".into());
        assert_eq!(
            ErrorResponse::from_error(&err).message,
            "missing required fields: email"
        );

        let err = SessionTrackerError::LockPoisoned;
        assert_eq!(
            ErrorResponse::from_error(&err).message,
            "Internal server error"
        );
    }
}
