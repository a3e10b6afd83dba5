//! CLI command implementations

pub mod add;
pub mod cat;
pub mod completions;
pub mod init;
pub mod ls;
pub mod view;
