//! # flowgen-git
//!
//! Git operations for flowgen. [`GitOps`] is implemented twice: [`GitCli`]
//! runs the `git` executable through an injectable [`CommandRunner`], and
//! [`Repository`] drives libgit2 in-process.

mod cli;
mod error;
mod repository;
mod runner;
mod traits;

pub use cli::GitCli;
pub use error::{Error, Result};
pub use repository::{Repository, discover_workdir};
pub use runner::{CommandRunner, CommandSpec, SystemRunner};
pub use traits::GitOps;
