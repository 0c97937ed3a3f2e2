pub mod hooks;
pub mod mutations;
pub mod resource;
