use serde::Deserialize;

use super::page::Page;
use crate::catalog::{
    authenticate, initial_progress, lookup_lesson, returning_progress, DemoAccount, LessonContent,
    ProgressEntry,
};

pub const DEFAULT_LESSON_ID: &str = "1.1";

/// The signed-in learner as the views see it.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSnapshot {
    pub name: String,
    pub email: String,
    pub progress: Vec<ProgressEntry>,
    pub completed_lessons: Vec<&'static str>,
}

impl UserSnapshot {
    fn new_learner() -> Self {
        Self {
            name: "New User".to_string(),
            email: "user@example.com".to_string(),
            progress: initial_progress(),
            completed_lessons: Vec::new(),
        }
    }

    fn returning_learner() -> Self {
        Self {
            name: "Welcome Back".to_string(),
            email: "returning@example.com".to_string(),
            progress: returning_progress(),
            completed_lessons: Vec::new(),
        }
    }

    fn from_account(account: &DemoAccount) -> Self {
        Self {
            name: account.name.to_string(),
            email: account.email.to_string(),
            progress: account.progress.to_vec(),
            completed_lessons: account.completed_lessons.to_vec(),
        }
    }
}

/// Signup form fields. Accepted and discarded; nothing is validated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// A user interaction, as posted by the rendered pages.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Action {
    Navigate {
        page: Page,
    },
    SignUp {
        #[serde(default)]
        full_name: String,
        #[serde(default)]
        email: String,
        #[serde(default)]
        password: String,
    },
    Login,
    LoginWithCredentials {
        #[serde(default)]
        email: String,
        #[serde(default)]
        password: String,
    },
    Logout,
    ToggleModule {
        module_id: String,
    },
    SelectLesson {
        lesson_id: String,
    },
    Search {
        #[serde(default)]
        query: String,
    },
    ToggleMenu,
    OpenLoginModal,
    CloseLoginModal,
    SetChatDraft {
        #[serde(default)]
        message: String,
    },
    SendChat,
}

impl Action {
    /// Wire name of the action. Carries no field values.
    pub fn name(&self) -> &'static str {
        match self {
            Action::Navigate { .. } => "navigate",
            Action::SignUp { .. } => "sign_up",
            Action::Login => "login",
            Action::LoginWithCredentials { .. } => "login_with_credentials",
            Action::Logout => "logout",
            Action::ToggleModule { .. } => "toggle_module",
            Action::SelectLesson { .. } => "select_lesson",
            Action::Search { .. } => "search",
            Action::ToggleMenu => "toggle_menu",
            Action::OpenLoginModal => "open_login_modal",
            Action::CloseLoginModal => "close_login_modal",
            Action::SetChatDraft { .. } => "set_chat_draft",
            Action::SendChat => "send_chat",
        }
    }
}

/// All UI state for one session. Starts on the signup page, unauthenticated.
/// Transitions consume the state and return the next one.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub current_page: Page,
    pub authenticated: bool,
    pub current_user: Option<UserSnapshot>,
    pub expanded_module_id: String,
    pub selected_lesson_id: String,
    pub search_query: String,
    pub menu_open: bool,
    pub login_modal_open: bool,
    pub login_error: Option<String>,
    pub chat_draft: String,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            current_page: Page::Signup,
            authenticated: false,
            current_user: None,
            expanded_module_id: String::new(),
            selected_lesson_id: DEFAULT_LESSON_ID.to_string(),
            search_query: String::new(),
            menu_open: false,
            login_modal_open: false,
            login_error: None,
            chat_draft: String::new(),
        }
    }
}

impl ViewState {
    pub fn apply(self, action: Action) -> Self {
        match action {
            Action::Navigate { page } => self.navigate(page),
            Action::SignUp {
                full_name,
                email,
                password,
            } => self.sign_up(SignupForm {
                full_name,
                email,
                password,
            }),
            Action::Login => self.login(),
            Action::LoginWithCredentials { email, password } => {
                self.login_with_credentials(&email, &password)
            }
            Action::Logout => self.logout(),
            Action::ToggleModule { module_id } => self.toggle_module(&module_id),
            Action::SelectLesson { lesson_id } => self.select_lesson(&lesson_id),
            Action::Search { query } => self.set_search(&query),
            Action::ToggleMenu => self.toggle_menu(),
            Action::OpenLoginModal => self.open_login_modal(),
            Action::CloseLoginModal => self.close_login_modal(),
            Action::SetChatDraft { message } => self.set_chat_draft(&message),
            Action::SendChat => self.send_chat(),
        }
    }

    /// Stores the page as-is. Access is decided by `rendered_page`.
    pub fn navigate(self, page: Page) -> Self {
        Self {
            current_page: page,
            menu_open: false,
            ..self
        }
    }

    /// The page to draw. Without authentication this is always the signup
    /// page, whatever `current_page` holds.
    pub fn rendered_page(&self) -> Page {
        if !self.authenticated && self.current_page.is_protected() {
            Page::Signup
        } else {
            self.current_page
        }
    }

    pub fn sign_up(self, _form: SignupForm) -> Self {
        self.authenticate_as(UserSnapshot::new_learner())
    }

    pub fn login(self) -> Self {
        self.authenticate_as(UserSnapshot::returning_learner())
    }

    /// Checks the demo accounts. A miss keeps the modal open with an explicit
    /// message; nothing else about the session changes.
    pub fn login_with_credentials(self, email: &str, password: &str) -> Self {
        match authenticate(email, password) {
            Ok(account) => Self {
                login_modal_open: false,
                ..self.authenticate_as(UserSnapshot::from_account(account))
            },
            Err(e) => Self {
                login_modal_open: true,
                login_error: Some(e.to_string()),
                ..self
            },
        }
    }

    fn authenticate_as(self, user: UserSnapshot) -> Self {
        Self {
            authenticated: true,
            current_user: Some(user),
            login_error: None,
            ..self
        }
        .navigate(Page::Dashboard)
    }

    pub fn logout(self) -> Self {
        Self {
            authenticated: false,
            current_user: None,
            ..self
        }
        .navigate(Page::Signup)
    }

    /// Accordion: at most one module open; toggling the open one closes it.
    pub fn toggle_module(self, module_id: &str) -> Self {
        let expanded_module_id = if self.expanded_module_id == module_id {
            String::new()
        } else {
            module_id.to_string()
        };
        Self {
            expanded_module_id,
            ..self
        }
    }

    /// Not validated; `current_lesson` falls back for unknown ids.
    pub fn select_lesson(self, lesson_id: &str) -> Self {
        Self {
            selected_lesson_id: lesson_id.to_string(),
            ..self
        }
    }

    pub fn set_search(self, query: &str) -> Self {
        Self {
            search_query: query.to_string(),
            ..self
        }
    }

    pub fn toggle_menu(self) -> Self {
        Self {
            menu_open: !self.menu_open,
            ..self
        }
    }

    pub fn open_login_modal(self) -> Self {
        Self {
            login_modal_open: true,
            ..self
        }
    }

    pub fn close_login_modal(self) -> Self {
        Self {
            login_modal_open: false,
            login_error: None,
            ..self
        }
    }

    pub fn set_chat_draft(self, message: &str) -> Self {
        Self {
            chat_draft: message.to_string(),
            ..self
        }
    }

    /// The tutor is a placeholder: sending only clears the draft.
    pub fn send_chat(self) -> Self {
        Self {
            chat_draft: String::new(),
            ..self
        }
    }

    pub fn current_lesson(&self) -> &'static LessonContent {
        lookup_lesson(&self.selected_lesson_id)
    }

    /// The signed-in user's progress, or the all-zero seed.
    pub fn progress(&self) -> Vec<ProgressEntry> {
        self.current_user
            .as_ref()
            .map(|u| u.progress.clone())
            .unwrap_or_else(initial_progress)
    }

    /// Percent of the first entry whose title contains `fragment`; 0 when none.
    pub fn progress_for(&self, fragment: &str) -> u8 {
        self.current_user
            .as_ref()
            .and_then(|u| u.progress.iter().find(|p| p.title.contains(fragment)))
            .map(|p| p.percent)
            .unwrap_or(0)
    }

    pub fn is_lesson_completed(&self, lesson_id: &str) -> bool {
        self.current_user
            .as_ref()
            .is_some_and(|u| u.completed_lessons.iter().any(|id| *id == lesson_id))
    }
}
