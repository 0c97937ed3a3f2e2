//! Write paths. Each function performs exactly one insert or upsert, returns
//! the row the store wrote, and hands any failure back to the caller as-is.
//! None of them refresh the read hooks; callers re-trigger reads themselves.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use super::hooks::decode_rows;
use crate::models::chat::{ChatMessage, ChatRole, ChatThread};
use crate::models::learner::{Enrollment, Event, Progress, ProgressStatus, SandboxState, WorksheetNote};
use crate::store::{RemoteStore, StoreError, Table};

const PROGRESS_KEY: &[&str] = &["user_id", "course_id", "module_id", "lesson_id"];
const ENROLLMENT_KEY: &[&str] = &["user_id", "course_id"];
const LEARNER_LESSON_KEY: &[&str] = &["user_id", "lesson_id"];
const THREAD_KEY: &[&str] = &["id"];

pub const DEFAULT_ENROLLMENT_STATUS: &str = "enrolled";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    pub user_id: Uuid,
    pub course_id: i64,
    pub module_id: i64,
    pub lesson_id: i64,
    pub status: ProgressStatus,
    /// Left off the wire when absent, so an upsert keeps the stored score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewEvent {
    pub user_id: Uuid,
    pub event_type: String,
    #[serde(default)]
    pub course_id: Option<i64>,
    #[serde(default)]
    pub module_id: Option<i64>,
    #[serde(default)]
    pub lesson_id: Option<i64>,
    #[serde(default)]
    pub payload: Option<Value>,
}

fn default_enrollment_status() -> String {
    DEFAULT_ENROLLMENT_STATUS.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrollmentRequest {
    pub user_id: Uuid,
    pub course_id: i64,
    #[serde(default = "default_enrollment_status")]
    pub status: String,
}

fn default_version() -> i32 {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SandboxSave {
    pub user_id: Uuid,
    pub course_id: i64,
    pub module_id: i64,
    pub lesson_id: i64,
    pub state: Value,
    #[serde(default = "default_version")]
    pub version: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorksheetSave {
    pub user_id: Uuid,
    pub lesson_id: i64,
    pub notes: String,
}

/// A thread id may be supplied by the caller so that replays land on the same row.
/// Absent optionals stay off the wire, so a replay never blanks stored columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChatThread {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,
    pub user_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lesson_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewChatMessage {
    pub thread_id: Uuid,
    pub user_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

fn written<T: DeserializeOwned>(table: Table, rows: Vec<Value>) -> Result<T, StoreError> {
    decode_rows(rows)?
        .into_iter()
        .next()
        .ok_or(StoreError::NoRow(table.as_str()))
}

pub async fn update_progress(
    store: &dyn RemoteStore,
    update: &ProgressUpdate,
) -> Result<Progress, StoreError> {
    let rows = store
        .upsert(Table::Progress, serde_json::to_value(update)?, PROGRESS_KEY)
        .await?;
    info!(
        "Progress for user {} lesson {} set to {}",
        update.user_id,
        update.lesson_id,
        update.status.as_str()
    );
    written(Table::Progress, rows)
}

pub async fn record_event(store: &dyn RemoteStore, event: &NewEvent) -> Result<Event, StoreError> {
    let rows = store
        .insert(Table::Events, serde_json::to_value(event)?)
        .await?;
    info!("Recorded '{}' event for user {}", event.event_type, event.user_id);
    written(Table::Events, rows)
}

pub async fn enroll_in_course(
    store: &dyn RemoteStore,
    request: &EnrollmentRequest,
) -> Result<Enrollment, StoreError> {
    let rows = store
        .upsert(Table::Enrollments, serde_json::to_value(request)?, ENROLLMENT_KEY)
        .await?;
    info!("User {} enrollment in course {}: {}", request.user_id, request.course_id, request.status);
    written(Table::Enrollments, rows)
}

pub async fn save_sandbox_state(
    store: &dyn RemoteStore,
    save: &SandboxSave,
) -> Result<SandboxState, StoreError> {
    let rows = store
        .upsert(Table::SandboxStates, serde_json::to_value(save)?, LEARNER_LESSON_KEY)
        .await?;
    written(Table::SandboxStates, rows)
}

pub async fn save_worksheet_note(
    store: &dyn RemoteStore,
    save: &WorksheetSave,
) -> Result<WorksheetNote, StoreError> {
    let rows = store
        .upsert(Table::WorksheetNotes, serde_json::to_value(save)?, LEARNER_LESSON_KEY)
        .await?;
    written(Table::WorksheetNotes, rows)
}

pub async fn create_chat_thread(
    store: &dyn RemoteStore,
    thread: &NewChatThread,
) -> Result<ChatThread, StoreError> {
    let id = thread.id.unwrap_or_else(Uuid::new_v4);
    let row = serde_json::to_value(NewChatThread {
        id: Some(id),
        ..thread.clone()
    })?;
    let rows = store.upsert(Table::ChatThreads, row, THREAD_KEY).await?;
    info!("Chat thread {id} ready for user {}", thread.user_id);
    written(Table::ChatThreads, rows)
}

pub async fn append_chat_message(
    store: &dyn RemoteStore,
    message: &NewChatMessage,
) -> Result<ChatMessage, StoreError> {
    let rows = store
        .insert(Table::ChatMessages, serde_json::to_value(message)?)
        .await?;
    written(Table::ChatMessages, rows)
}
