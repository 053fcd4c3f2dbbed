use clap::Parser;
use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use gemini_relay::interceptor::{InterceptorStore, TARGET_HOST, is_target_url, rewrite_url};
use gemini_relay::sanitize::sanitize_url;
use serde::Serialize;
use url::Url;

use crate::error::CliResult;
use crate::output::{OutputFormat, print_json};

#[derive(Parser)]
pub struct RewriteCommand {
    #[clap(help = "Request URL to route")]
    pub url: String,

    #[clap(long, help = "Show URLs without redacting credentials and API keys")]
    pub raw: bool,
}

/// Where a request would be dispatched under the current settings
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct RewriteReport {
    pub original: String,
    pub dispatched: String,
    pub proxied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl RewriteCommand {
    pub fn execute(&self, store: &InterceptorStore, format: OutputFormat) -> CliResult<()> {
        let report = self.report(store);

        match format {
            OutputFormat::Json => print_json(&report)?,
            OutputFormat::Table => {
                let mut table = Table::new();
                table
                    .load_preset(UTF8_FULL_CONDENSED)
                    .set_content_arrangement(ContentArrangement::Dynamic)
                    .set_header(["Field", "Value"]);

                table.add_row(["Original", report.original.as_str()]);
                table.add_row(["Dispatched", report.dispatched.as_str()]);
                table.add_row(["Proxied", if report.proxied { "yes" } else { "no" }]);
                if let Some(reason) = &report.reason {
                    table.add_row(["Reason", reason.as_str()]);
                }

                println!("{table}");
            }
        }

        Ok(())
    }

    /// Resolve the URL the interceptor would dispatch for `self.url`
    pub fn report(&self, store: &InterceptorStore) -> RewriteReport {
        let snapshot = store.snapshot();

        let (dispatched, reason) = match snapshot.active_proxy() {
            None => (self.url.clone(), Some("proxy is disabled".to_string())),
            Some(_) if !is_target_url(&self.url) => (
                self.url.clone(),
                Some(format!("host is not {TARGET_HOST}")),
            ),
            Some(base) => match Url::parse(&rewrite_url(&self.url, base)) {
                Ok(url) => (url.to_string(), None),
                Err(e) => (
                    self.url.clone(),
                    Some(format!("rewritten URL is invalid ({e}), original URL is used")),
                ),
            },
        };

        RewriteReport {
            original: self.display(&self.url),
            dispatched: self.display(&dispatched),
            proxied: reason.is_none(),
            reason,
        }
    }

    fn display(&self, url: &str) -> String {
        if self.raw {
            url.to_string()
        } else {
            sanitize_url(url)
        }
    }
}
