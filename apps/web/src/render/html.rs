//! Small view models shared by several templates.

use crate::catalog::courses::TUTOR_TRANSCRIPT;
use crate::models::chat::ChatRole;

/// Circumference of the r=40 progress ring.
const RING_CIRCUMFERENCE: f64 = 251.2;

pub fn ring_offset(percent: u8) -> f64 {
    let percent = f64::from(percent.min(100));
    RING_CIRCUMFERENCE - RING_CIRCUMFERENCE * percent / 100.0
}

/// Inputs for the `progress_ring` macro.
pub struct Ring {
    pub percent: u8,
    pub circumference: f64,
    pub offset: String,
    pub class: &'static str,
}

impl Ring {
    pub fn new(percent: u8, class: &'static str) -> Self {
        Self {
            percent,
            circumference: RING_CIRCUMFERENCE,
            offset: format!("{:.1}", ring_offset(percent)),
            class,
        }
    }
}

pub struct Bubble {
    pub class: &'static str,
    pub text: &'static str,
}

impl Bubble {
    pub fn new(role: ChatRole, text: &'static str) -> Self {
        let class = match role {
            ChatRole::User => "bubble user",
            ChatRole::Assistant => "bubble tutor",
        };
        Self { class, text }
    }
}

/// One module in an accordion. `lessons` is empty while collapsed.
pub struct ModuleRow {
    pub id: &'static str,
    pub label: String,
    pub class: &'static str,
    pub expanded: bool,
    pub lessons: Vec<LessonRow>,
}

pub struct LessonRow {
    pub id: &'static str,
    pub label: String,
    pub class: &'static str,
}

/// The canned tutor conversation as chat bubbles.
pub fn transcript() -> Vec<Bubble> {
    TUTOR_TRANSCRIPT
        .iter()
        .map(|(role, text)| Bubble::new(*role, *text))
        .collect()
}
