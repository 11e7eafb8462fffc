pub mod classify;
pub mod list;
pub mod policy;
pub mod resolve;
pub mod show;
pub mod submit;
