//! Subcommand argument types and entry points

mod common;
mod init;
mod users;
mod validate;

pub use init::{InitArgs, init_config};
pub use users::{UsersArgs, process_users};
pub use validate::{ValidateArgs, validate_config};
