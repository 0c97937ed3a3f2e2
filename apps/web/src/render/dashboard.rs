use askama::Template;

use super::APP_NAME;
use crate::catalog::ProgressEntry;
use crate::view::ViewState;

/// Greeting, top navigation and the learner's progress bars.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    app_name: &'static str,
    authenticated: bool,
    menu_open: bool,
    user_name: Option<&'a str>,
    progress: Vec<ProgressEntry>,
    finished: usize,
}

impl<'a> DashboardTemplate<'a> {
    pub fn new(state: &'a ViewState) -> Self {
        let progress = state.progress();
        let finished = progress.iter().filter(|p| p.percent >= 100).count();
        Self {
            app_name: APP_NAME,
            authenticated: state.authenticated,
            menu_open: state.menu_open,
            user_name: state.current_user.as_ref().map(|u| u.name.as_str()),
            progress,
            finished,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(state: &ViewState) -> String {
        DashboardTemplate::new(state).render().unwrap()
    }

    #[test]
    fn test_new_learner_dashboard_shows_zero_progress() {
        let html = render(&ViewState::default().sign_up(Default::default()));
        assert!(html.contains("Hello, New User"));
        assert_eq!(html.matches("<span class=\"percent\">0%</span>").count(), 3);
        assert!(html.contains("Ready to start"));
    }

    #[test]
    fn test_returning_dashboard_shows_presets() {
        let html = render(&ViewState::default().login());
        for percent in ["80%", "50%", "20%"] {
            assert!(html.contains(&format!("<span class=\"percent\">{percent}</span>")));
        }
        assert!(html.contains("0 of 3 courses completed"));
        assert!(html.contains("In Progress"));
    }

    #[test]
    fn test_user_name_is_escaped() {
        let mut state = ViewState::default().login();
        if let Some(user) = state.current_user.as_mut() {
            user.name = "<b>Ada & co".to_string();
        }
        let html = render(&state);
        assert!(html.contains("Hello, &lt;b&gt;Ada &amp; co"));
        assert!(!html.contains("<b>Ada"));
    }
}
