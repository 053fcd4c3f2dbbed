pub mod commands;
pub mod error;
pub mod output;

pub use commands::{ConfigCommand, FetchCommand, RewriteCommand, SanitizeCommand};
pub use error::{CliError, CliResult};
pub use output::{OutputFormat, print_json, truncate_string};
