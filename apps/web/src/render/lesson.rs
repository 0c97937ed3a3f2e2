use askama::Template;

use super::html::{transcript, Bubble};
use crate::view::ViewState;

/// Generic lesson page with the tutor widget. Sending only clears the draft.
#[derive(Template)]
#[template(path = "lesson.html")]
pub struct LessonTemplate<'a> {
    transcript: Vec<Bubble>,
    draft: &'a str,
}

impl<'a> LessonTemplate<'a> {
    pub fn new(state: &'a ViewState) -> Self {
        Self {
            transcript: transcript(),
            draft: &state.chat_draft,
        }
    }
}
