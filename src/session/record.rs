//! Session records and the inputs that create or modify them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SessionId;
use crate::error::SessionTrackerError;
use crate::network::ServerInfo;
use crate::Result;

/// Network descriptors of the caller.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientInfo {
    /// Address the caller was last seen from.
    pub ip: String,
    /// MAC address supplied at login.
    pub mac: String,
}

/// State kept for one logged-in identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub email: String,
    pub nickname: String,
    pub full_name: String,
    pub client_info: ClientInfo,
    pub server_info: ServerInfo,
    pub created_at: DateTime<Utc>,
    pub last_accessed: DateTime<Utc>,
}

impl SessionRecord {
    /// Build a record for a fresh login.
    pub fn new(
        id: SessionId,
        fields: ValidLogin,
        client_ip: impl Into<String>,
        server_info: ServerInfo,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            session_id: id,
            email: fields.email,
            nickname: fields.nickname,
            full_name: fields.full_name,
            client_info: ClientInfo {
                ip: client_ip.into(),
                mac: fields.mac_address,
            },
            server_info,
            created_at: now,
            last_accessed: now,
        }
    }

    /// Milliseconds since the session was created.
    pub fn duration_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.created_at).num_milliseconds().max(0)
    }

    /// Milliseconds since the session was last touched.
    pub fn idle_ms(&self, now: DateTime<Utc>) -> i64 {
        (now - self.last_accessed).num_milliseconds().max(0)
    }

    /// Mark the session as accessed at `now`.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_accessed = now;
    }

    /// Point-in-time view with derived timings.
    pub fn snapshot(&self, now: DateTime<Utc>) -> SessionSnapshot {
        SessionSnapshot {
            duration: self.duration_ms(now),
            idle_time: self.idle_ms(now),
            record: self.clone(),
        }
    }
}

/// A record together with timings computed when it was read.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(flatten)]
    pub record: SessionRecord,
    /// Milliseconds since `createdAt`.
    pub duration: i64,
    /// Milliseconds since `lastAccessed`.
    pub idle_time: i64,
}

/// Identity fields presented at login.
///
/// Every field is optional here so that a request with gaps can still be
/// decoded and reported precisely; [`LoginFields::validate`] enforces
/// presence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginFields {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub mac_address: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

/// Login fields that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidLogin {
    pub email: String,
    pub nickname: String,
    pub mac_address: String,
    pub full_name: String,
}

impl LoginFields {
    pub fn new(
        email: impl Into<String>,
        nickname: impl Into<String>,
        mac_address: impl Into<String>,
        full_name: impl Into<String>,
    ) -> Self {
        Self {
            email: Some(email.into()),
            nickname: Some(nickname.into()),
            mac_address: Some(mac_address.into()),
            full_name: Some(full_name.into()),
        }
    }

    /// Check that every field is present and non-blank.
    pub fn validate(self) -> Result<ValidLogin> {
        let mut missing = Vec::new();
        let email = required(self.email, "email", &mut missing);
        let nickname = required(self.nickname, "nickname", &mut missing);
        let mac_address = required(self.mac_address, "macAddress", &mut missing);
        let full_name = required(self.full_name, "fullName", &mut missing);

        if !missing.is_empty() {
            return Err(SessionTrackerError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        Ok(ValidLogin {
            email,
            nickname,
            mac_address,
            full_name,
        })
    }
}

fn required(value: Option<String>, name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

/// Mutable identity fields accepted by an update.
///
/// Absent or blank values leave the stored field untouched.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateFields {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
}

impl UpdateFields {
    pub fn nickname(mut self, nickname: impl Into<String>) -> Self {
        self.nickname = Some(nickname.into());
        self
    }

    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn full_name(mut self, full_name: impl Into<String>) -> Self {
        self.full_name = Some(full_name.into());
        self
    }

    /// Apply the provided fields to `record`.
    pub fn apply_to(self, record: &mut SessionRecord) {
        if let Some(email) = non_blank(self.email) {
            record.email = email;
        }
        if let Some(nickname) = non_blank(self.nickname) {
            record.nickname = nickname;
        }
        if let Some(full_name) = non_blank(self.full_name) {
            record.full_name = full_name;
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
