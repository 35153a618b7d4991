//! Dotfiles bootstrap engine.
//!
//! Links files from a dotfiles repository into the home directory, creates
//! the directories tools expect and installs packages, one named routine per
//! tool. Every effect goes through an [`action::Action`] so `--dry-run`
//! prints exactly the plan a real run would follow.
//!
//! - **[`environment`]**: repository and home paths, directory stack, and
//!   the operations routines are written in
//! - **[`action`]** and **[`resources`]**: the effectful steps and their
//!   describe/apply lifecycle
//! - **[`routines`]**: the registered per-tool routines
//! - **[`commands`]**: top-level orchestration for the `bootstrap` binary
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod action;
pub mod cli;
pub mod commands;
pub mod environment;
pub mod error;
pub mod exec;
pub mod logging;
pub mod platform;
pub mod resources;
pub mod routines;
