pub mod api;
pub mod health;
pub mod ui;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(ui::handle_index))
        .route("/actions", post(ui::handle_action))
        .route("/health", get(health::health_handler))
        // Reads, served from the data hooks
        .route("/api/v1/courses", get(api::handle_list_courses))
        .route("/api/v1/courses/:slug", get(api::handle_course_details))
        .route("/api/v1/users/:id/progress", get(api::handle_user_progress))
        .route(
            "/api/v1/users/:id/enrollments",
            get(api::handle_user_enrollments),
        )
        .route("/api/v1/users/:id/profile", get(api::handle_user_profile))
        .route("/api/v1/lessons/:id/quiz", get(api::handle_lesson_quiz))
        .route("/api/v1/lessons/:id/quiz/grade", post(api::handle_grade_quiz))
        // Writes
        .route("/api/v1/progress", put(api::handle_update_progress))
        .route("/api/v1/events", post(api::handle_record_event))
        .route("/api/v1/enrollments", post(api::handle_enroll))
        .route("/api/v1/sandbox-states", put(api::handle_save_sandbox))
        .route("/api/v1/worksheet-notes", put(api::handle_save_worksheet))
        .route("/api/v1/chat/threads", post(api::handle_create_thread))
        .route(
            "/api/v1/chat/threads/:id/messages",
            post(api::handle_append_message),
        )
        .route("/api/v1/me", get(api::handle_me))
        .with_state(state)
}
