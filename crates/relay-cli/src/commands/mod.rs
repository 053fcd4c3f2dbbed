pub mod config;
pub mod fetch;
pub mod rewrite;
pub mod sanitize;

pub use config::ConfigCommand;
pub use fetch::FetchCommand;
pub use rewrite::RewriteCommand;
pub use sanitize::SanitizeCommand;
