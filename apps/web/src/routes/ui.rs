use axum::{extract::State, response::Redirect, Form};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::render::{self, PageTemplate};
use crate::state::AppState;
use crate::view::Action;

/// GET /
/// Draws the session's current page. The auth guard is applied here through
/// `rendered_page`.
pub async fn handle_index(State(state): State<AppState>) -> Result<PageTemplate, AppError> {
    let ui = state.ui.read().await;
    Ok(render::page(&ui)?)
}

/// POST /actions
/// Applies one user interaction, then sends the browser back to `/`.
pub async fn handle_action(
    State(state): State<AppState>,
    Form(action): Form<Action>,
) -> Redirect {
    debug!("Applying action '{}'", action.name());
    let mut ui = state.ui.write().await;
    let was_authenticated = ui.authenticated;
    let next = std::mem::take(&mut *ui).apply(action);
    if next.authenticated != was_authenticated {
        info!(
            "Session {}",
            if next.authenticated { "signed in" } else { "signed out" }
        );
    }
    *ui = next;
    Redirect::to("/")
}
