//! Presentation views: askama templates filled from `ViewState`.
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod html;
pub mod lesson;
pub mod workspace;

use askama::Template;

use crate::catalog::accounts::DEMO_ACCOUNTS;
use crate::view::{Page, ViewState};

pub const APP_NAME: &str = "VibeBuilder";

/// The full document around one page body. Implements axum's
/// `IntoResponse` through askama_axum.
#[derive(Template)]
#[template(path = "layout.html")]
pub struct PageTemplate {
    app_name: &'static str,
    title: &'static str,
    slug: &'static str,
    body: String,
    login_modal_open: bool,
    login_error: Option<String>,
    demo_emails: Vec<&'static str>,
    dots: Vec<NavDot>,
}

struct NavDot {
    slug: &'static str,
    label: &'static str,
    class: &'static str,
}

/// Builds whatever `rendered_page` selects. The auth guard lives there, so
/// an unauthenticated session never reaches a protected view.
pub fn page(state: &ViewState) -> Result<PageTemplate, askama::Error> {
    let page = state.rendered_page();
    let body = match page {
        Page::Signup => auth::SignupTemplate::new().render()?,
        Page::Dashboard => dashboard::DashboardTemplate::new(state).render()?,
        Page::Courses => courses::CoursesTemplate::new(state).render()?,
        Page::CourseDetail => courses::CourseDetailTemplate::new(state).render()?,
        Page::Lesson => lesson::LessonTemplate::new(state).render()?,
        Page::VibeCodingWorkspace => workspace::WorkspaceTemplate::new(state).render()?,
        Page::VibeCodingCourse | Page::NoCodePlatformsCourse | Page::AiAgentsCourse => {
            match courses::LandingTemplate::new(state, page) {
                Some(landing) => landing.render()?,
                None => courses::CoursesTemplate::new(state).render()?,
            }
        }
    };

    Ok(PageTemplate {
        app_name: APP_NAME,
        title: page_title(page),
        slug: page.slug(),
        body,
        login_modal_open: state.login_modal_open,
        login_error: state.login_error.clone(),
        demo_emails: DEMO_ACCOUNTS.iter().map(|a| a.email).collect(),
        dots: if state.authenticated { nav_dots(page) } else { Vec::new() },
    })
}

fn page_title(page: Page) -> &'static str {
    match page {
        Page::Dashboard => "Dashboard",
        Page::Lesson => "Lesson",
        Page::Signup => "Join",
        Page::Courses => "Courses",
        Page::CourseDetail => "Course",
        Page::VibeCodingCourse => "Vibe Coding",
        Page::NoCodePlatformsCourse => "No-Code Platforms",
        Page::AiAgentsCourse => "AI Agents",
        Page::VibeCodingWorkspace => "Vibe Coding Fundamentals",
    }
}

fn nav_dots(active: Page) -> Vec<NavDot> {
    [
        (Page::Dashboard, "Dashboard"),
        (Page::Courses, "Courses"),
        (Page::Lesson, "Lesson"),
    ]
    .into_iter()
    .map(|(page, label)| NavDot {
        slug: page.slug(),
        label,
        class: if page == active { "dot active" } else { "dot" },
    })
    .collect()
}
