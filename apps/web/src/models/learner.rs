use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProgressStatus::NotStarted => "not_started",
            ProgressStatus::InProgress => "in_progress",
            ProgressStatus::Completed => "completed",
        }
    }
}

/// One row per (user, course, module, lesson).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Progress {
    pub user_id: Uuid,
    pub course_id: i64,
    pub module_id: i64,
    pub lesson_id: i64,
    pub status: ProgressStatus,
    #[serde(default)]
    pub score: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Enrollment {
    pub id: i64,
    pub user_id: Uuid,
    pub course_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    #[serde(default)]
    pub full_name: Option<String>,
    pub role: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    pub fn is_admin(&self) -> bool {
        self.role == ADMIN_ROLE
    }
}

/// Analytics event. Insert-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub id: i64,
    pub user_id: Uuid,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub module_id: Option<i64>,
    #[serde(default)]
    pub lesson_id: Option<i64>,
    pub event_type: String,
    #[serde(default)]
    pub payload: Option<Value>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SandboxState {
    pub id: i64,
    pub user_id: Uuid,
    pub course_id: i64,
    pub module_id: i64,
    pub lesson_id: i64,
    pub state: Value,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorksheetNote {
    pub id: i64,
    pub user_id: Uuid,
    pub lesson_id: i64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The authenticated user as reported by the auth endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuthUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_admin_role() {
        let mut profile: Profile = serde_json::from_value(json!({
            "id": Uuid::nil(),
            "role": "student",
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z"
        }))
        .unwrap();
        assert!(!profile.is_admin());
        assert!(profile.full_name.is_none());

        profile.role = "admin".to_string();
        assert!(profile.is_admin());
    }

    #[test]
    fn test_progress_status_wire_names() {
        assert_eq!(
            serde_json::to_value(ProgressStatus::InProgress).unwrap(),
            json!("in_progress")
        );
        let status: ProgressStatus = serde_json::from_value(json!("not_started")).unwrap();
        assert_eq!(status, ProgressStatus::NotStarted);
        assert_eq!(ProgressStatus::Completed.as_str(), "completed");
    }
}
