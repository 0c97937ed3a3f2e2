use askama::Template;

use super::APP_NAME;

#[derive(Template)]
#[template(path = "signup.html")]
pub struct SignupTemplate {
    app_name: &'static str,
}

impl SignupTemplate {
    pub fn new() -> Self {
        Self { app_name: APP_NAME }
    }
}
