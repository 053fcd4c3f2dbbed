use clap::Parser;
use gemini_relay::sanitize::sanitize_url;

use crate::error::CliResult;
use crate::output::{OutputFormat, print_json};

#[derive(Parser)]
pub struct SanitizeCommand {
    #[clap(help = "URL to redact")]
    pub url: String,
}

impl SanitizeCommand {
    pub fn execute(&self, format: OutputFormat) -> CliResult<()> {
        let sanitized = sanitize_url(&self.url);

        match format {
            OutputFormat::Json => print_json(&serde_json::json!({ "sanitized": sanitized })),
            OutputFormat::Table => {
                println!("{sanitized}");
                Ok(())
            }
        }
    }
}
