use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{
    domain::{EventId, RegistrationId, RegistrationStatus, Role, UserId},
    error::{ApiError, COMMUNICATION_ERROR},
};

/// Envelope every JSON endpoint answers with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Uniform result for calls that never produced a readable envelope.
    pub fn transport_failure() -> Self {
        Self::failure(COMMUNICATION_ERROR)
    }

    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or(COMMUNICATION_ERROR)
    }

    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.success {
            return Err(ApiError::Application(
                self.message.unwrap_or_else(|| COMMUNICATION_ERROR.to_string()),
            ));
        }
        self.data.ok_or(ApiError::Transport)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Payload of `/auth/login` and `/auth/register`; `/auth/me` reuses it with an
/// empty token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    #[serde(default)]
    pub token: String,
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub email: String,
    pub role: Role,
}

impl From<AuthPayload> for UserProfile {
    fn from(value: AuthPayload) -> Self {
        Self {
            user_id: value.user_id,
            email: value.email,
            role: value.role,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub date_time: NaiveDateTime,
    pub capacity: i32,
    pub category: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    /// `YYYY-MM-DDTHH:MM:SS`, as the server parses it.
    pub date_time: String,
    /// `None` is sent as `null` and rejected by the server.
    pub capacity: Option<i32>,
    pub category: String,
}

/// Partial edit of an event. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl EventUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterForEvent {
    pub event_id: EventId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub id: RegistrationId,
    pub event_id: EventId,
    pub ticket_code: String,
    pub status: RegistrationStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AnalyticsOverview {
    pub total_registrations: i64,
    pub total_confirmed: i64,
    pub total_cancelled: i64,
    pub unique_events: i64,
    pub unique_users: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStats {
    pub event_id: EventId,
    #[serde(default)]
    pub total: Option<i64>,
    #[serde(default)]
    pub confirmed: Option<i64>,
    #[serde(default)]
    pub cancelled: Option<i64>,
}
