//! Quire: plain-text notes
//!
//! A Unix-style toolkit for keeping notes as YAML files grouped into books,
//! friendly to git and to the shell.

pub mod cli;
pub mod core;
pub mod yaml;
