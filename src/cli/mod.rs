//! CLI layer - Command-line interface

pub mod commands;
pub mod output;
pub mod prompt;

pub use commands::{Cli, Commands, GroupCommands, ViewArgs};
pub use output::{format_group_list, format_note_detail, format_note_list};
pub use prompt::confirm;
