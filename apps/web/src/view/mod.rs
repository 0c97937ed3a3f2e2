pub mod page;
pub mod state;

pub use page::Page;
pub use state::{Action, ViewState};
