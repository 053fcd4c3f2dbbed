use std::path::Path;

use clap::Parser;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use gemini_relay::config::Config;
use gemini_relay::interceptor::InterceptorConfig;
use gemini_relay::sanitize::sanitize_url;

use crate::error::CliResult;
use crate::output::{OutputFormat, print_json};

#[derive(Parser)]
pub struct ConfigCommand {
    #[clap(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Parser)]
pub enum ConfigSubcommand {
    #[clap(about = "Show the effective configuration and interceptor state")]
    Show,
}

impl ConfigCommand {
    pub fn execute(
        &self,
        config: &Config,
        config_path: Option<&Path>,
        interceptor: &InterceptorConfig,
        format: OutputFormat,
    ) -> CliResult<()> {
        match &self.command {
            ConfigSubcommand::Show => Self::show(config, config_path, interceptor, format),
        }
    }

    fn show(
        config: &Config,
        config_path: Option<&Path>,
        interceptor: &InterceptorConfig,
        format: OutputFormat,
    ) -> CliResult<()> {
        match format {
            OutputFormat::Json => print_json(&Self::to_json(config, interceptor))?,
            OutputFormat::Table => {
                match config_path {
                    Some(path) => println!("Configuration from: {}", path.display()),
                    None => println!("Configuration: (default search path)"),
                }
                println!("==============================\n");

                println!("[Proxy]");
                let mut proxy_table = Table::new();
                proxy_table
                    .load_preset(UTF8_FULL_CONDENSED)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(["Setting", "Value"]);
                proxy_table.add_row(["enabled", &config.proxy.enabled.to_string()]);
                proxy_table.add_row([
                    "url",
                    &config
                        .proxy
                        .url
                        .as_deref()
                        .map(sanitize_url)
                        .unwrap_or_else(|| "(not set)".to_string()),
                ]);
                proxy_table.add_row(["active", &interceptor.is_enabled().to_string()]);
                proxy_table.add_row([
                    "effective base",
                    &interceptor
                        .active_proxy()
                        .map(sanitize_url)
                        .unwrap_or_else(|| "(pass-through)".to_string()),
                ]);
                println!("{proxy_table}\n");

                println!("[Transport]");
                let mut transport_table = Table::new();
                transport_table
                    .load_preset(UTF8_FULL_CONDENSED)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(["Setting", "Value"]);
                transport_table.add_row([
                    "timeout_secs",
                    &config.transport.timeout_secs.to_string(),
                ]);
                transport_table.add_row([
                    "connect_timeout_secs",
                    &config.transport.connect_timeout_secs.to_string(),
                ]);
                println!("{transport_table}");
            }
        }

        Ok(())
    }

    fn to_json(config: &Config, interceptor: &InterceptorConfig) -> serde_json::Value {
        serde_json::json!({
            "proxy": {
                "enabled": config.proxy.enabled,
                "url": config.proxy.url.as_deref().map(sanitize_url),
                "active": interceptor.is_enabled(),
                "effective_base": interceptor.active_proxy().map(sanitize_url),
            },
            "transport": config.transport,
        })
    }
}
