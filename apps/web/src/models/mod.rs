pub mod chat;
pub mod course;
pub mod learner;
