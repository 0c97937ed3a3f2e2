use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;
use uuid::Uuid;

use crate::data::hooks::{fetch_profile, fetch_quiz, NO_KEY};
use crate::data::mutations::{
    append_chat_message, create_chat_thread, enroll_in_course, record_event, save_sandbox_state,
    save_worksheet_note, update_progress, EnrollmentRequest, NewChatMessage, NewChatThread,
    NewEvent, ProgressUpdate, SandboxSave, WorksheetSave,
};
use crate::data::resource::Snapshot;
use crate::errors::AppError;
use crate::models::chat::{ChatMessage, ChatRole, ChatThread};
use crate::models::course::{Course, CourseWithModules, QuizWithQuestions};
use crate::models::learner::{
    AuthUser, Enrollment, Event, Profile, Progress, SandboxState, WorksheetNote,
};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct RefreshQuery {
    #[serde(default)]
    pub refresh: bool,
}

/// GET /api/v1/courses
pub async fn handle_list_courses(
    State(state): State<AppState>,
    Query(params): Query<RefreshQuery>,
) -> Json<Snapshot<Vec<Course>>> {
    Json(state.hooks.courses.read(NO_KEY, params.refresh).await)
}

/// GET /api/v1/courses/:slug
pub async fn handle_course_details(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<RefreshQuery>,
) -> Json<Snapshot<Option<CourseWithModules>>> {
    Json(state.hooks.course_details.read(&slug, params.refresh).await)
}

/// GET /api/v1/users/:id/progress
pub async fn handle_user_progress(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<RefreshQuery>,
) -> Json<Snapshot<Vec<Progress>>> {
    Json(
        state
            .hooks
            .progress
            .read(&user_id.to_string(), params.refresh)
            .await,
    )
}

/// GET /api/v1/users/:id/enrollments
pub async fn handle_user_enrollments(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<RefreshQuery>,
) -> Json<Snapshot<Vec<Enrollment>>> {
    Json(
        state
            .hooks
            .enrollments
            .read(&user_id.to_string(), params.refresh)
            .await,
    )
}

/// GET /api/v1/users/:id/profile
pub async fn handle_user_profile(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Query(params): Query<RefreshQuery>,
) -> Json<Snapshot<Option<Profile>>> {
    Json(
        state
            .hooks
            .profile
            .read(&user_id.to_string(), params.refresh)
            .await,
    )
}

/// GET /api/v1/lessons/:id/quiz
pub async fn handle_lesson_quiz(
    State(state): State<AppState>,
    Path(lesson_id): Path<i64>,
    Query(params): Query<RefreshQuery>,
) -> Json<Snapshot<Option<QuizWithQuestions>>> {
    Json(
        state
            .hooks
            .quiz
            .read(&lesson_id.to_string(), params.refresh)
            .await,
    )
}

#[derive(Debug, Deserialize)]
pub struct QuizAnswers {
    pub answers: Vec<usize>,
}

#[derive(Debug, Serialize)]
pub struct QuizGrade {
    pub quiz_id: i64,
    pub correct: usize,
    pub total: usize,
}

/// POST /api/v1/lessons/:id/quiz/grade
/// Reads the quiz fresh for this request and scores the submitted choices in
/// question order.
pub async fn handle_grade_quiz(
    State(state): State<AppState>,
    Path(lesson_id): Path<i64>,
    Json(body): Json<QuizAnswers>,
) -> Result<Json<QuizGrade>, AppError> {
    let quiz = fetch_quiz(Arc::clone(&state.store), lesson_id.to_string())
        .await?
        .ok_or_else(|| AppError::NotFound(format!("No quiz for lesson {lesson_id}")))?;
    Ok(Json(QuizGrade {
        quiz_id: quiz.quiz.id,
        correct: quiz.score(&body.answers),
        total: quiz.quiz_questions.len(),
    }))
}

/// PUT /api/v1/progress
pub async fn handle_update_progress(
    State(state): State<AppState>,
    Json(req): Json<ProgressUpdate>,
) -> Result<Json<Progress>, AppError> {
    Ok(Json(update_progress(state.store.as_ref(), &req).await?))
}

/// POST /api/v1/events
pub async fn handle_record_event(
    State(state): State<AppState>,
    Json(req): Json<NewEvent>,
) -> Result<(StatusCode, Json<Event>), AppError> {
    if req.event_type.trim().is_empty() {
        return Err(AppError::Validation("event_type must not be empty".to_string()));
    }
    let event = record_event(state.store.as_ref(), &req).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// POST /api/v1/enrollments
pub async fn handle_enroll(
    State(state): State<AppState>,
    Json(req): Json<EnrollmentRequest>,
) -> Result<Json<Enrollment>, AppError> {
    Ok(Json(enroll_in_course(state.store.as_ref(), &req).await?))
}

/// PUT /api/v1/sandbox-states
pub async fn handle_save_sandbox(
    State(state): State<AppState>,
    Json(req): Json<SandboxSave>,
) -> Result<Json<SandboxState>, AppError> {
    Ok(Json(save_sandbox_state(state.store.as_ref(), &req).await?))
}

/// PUT /api/v1/worksheet-notes
pub async fn handle_save_worksheet(
    State(state): State<AppState>,
    Json(req): Json<WorksheetSave>,
) -> Result<Json<WorksheetNote>, AppError> {
    Ok(Json(save_worksheet_note(state.store.as_ref(), &req).await?))
}

/// POST /api/v1/chat/threads
pub async fn handle_create_thread(
    State(state): State<AppState>,
    Json(req): Json<NewChatThread>,
) -> Result<(StatusCode, Json<ChatThread>), AppError> {
    let thread = create_chat_thread(state.store.as_ref(), &req).await?;
    Ok((StatusCode::CREATED, Json(thread)))
}

#[derive(Debug, Deserialize)]
pub struct ChatMessageBody {
    pub user_id: Uuid,
    pub role: ChatRole,
    pub content: String,
    #[serde(default)]
    pub metadata: Option<Value>,
}

/// POST /api/v1/chat/threads/:id/messages
pub async fn handle_append_message(
    State(state): State<AppState>,
    Path(thread_id): Path<Uuid>,
    Json(body): Json<ChatMessageBody>,
) -> Result<(StatusCode, Json<ChatMessage>), AppError> {
    if body.content.trim().is_empty() {
        return Err(AppError::Validation("content must not be empty".to_string()));
    }
    let message = NewChatMessage {
        thread_id,
        user_id: body.user_id,
        role: body.role,
        content: body.content,
        metadata: body.metadata,
    };
    let message = append_chat_message(state.store.as_ref(), &message).await?;
    Ok((StatusCode::CREATED, Json(message)))
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: AuthUser,
    pub profile: Option<Profile>,
    pub is_admin: bool,
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// GET /api/v1/me
/// Resolves the bearer token to the signed-in user and their profile role.
pub async fn handle_me(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<MeResponse>, AppError> {
    let token = bearer_token(&headers).ok_or(AppError::Unauthorized)?;
    let Some(user) = state.store.current_user(token).await? else {
        warn!("Rejected access token");
        return Err(AppError::Unauthorized);
    };
    let profile = fetch_profile(Arc::clone(&state.store), user.id.to_string()).await?;
    let is_admin = profile.as_ref().is_some_and(Profile::is_admin);
    Ok(Json(MeResponse {
        user,
        profile,
        is_admin,
    }))
}
