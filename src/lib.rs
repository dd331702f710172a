pub mod commands;
pub mod format;
pub mod github;
pub mod http;
pub mod render;
pub mod search;
pub mod session;
