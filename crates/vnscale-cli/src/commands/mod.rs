//! Command handlers: bridge CLI args -> core Provisioner -> output.

pub mod config_cmd;
pub mod create;
pub mod delete;
pub mod list;
pub mod util;
