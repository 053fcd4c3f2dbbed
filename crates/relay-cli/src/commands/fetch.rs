use clap::Parser;
use gemini_relay::interceptor::{RequestOptions, Transport, fetch};
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use tokio_util::sync::CancellationToken;

use crate::error::{CliError, CliResult};
use crate::output::{OutputFormat, print_json, truncate_string};

const BODY_PREVIEW_CHARS: usize = 2000;

#[derive(Parser)]
pub struct FetchCommand {
    #[clap(help = "Request URL")]
    pub url: String,

    #[clap(long, short = 'X', default_value = "GET", help = "HTTP method")]
    pub method: String,

    #[clap(long = "header", short = 'H', help = "Request header as 'Name: value' (repeatable)")]
    pub headers: Vec<String>,

    #[clap(long, short = 'd', help = "Request body")]
    pub data: Option<String>,
}

impl FetchCommand {
    pub async fn execute(&self, transport: &dyn Transport, format: OutputFormat) -> CliResult<()> {
        let token = CancellationToken::new();
        let options = self.options()?.signal(token.clone());

        let ctrl_c = {
            let token = token.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    token.cancel();
                }
            })
        };

        let result = fetch(transport, self.url.as_str(), options).await;
        ctrl_c.abort();

        let response = match result {
            Ok(response) => response,
            Err(e) => {
                if format == OutputFormat::Json {
                    print_json(&serde_json::json!({
                        "error": e.name(),
                        "message": e.message(),
                    }))?;
                }
                return Err(e.into());
            }
        };

        let status = response.status();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|e| CliError(format!("Failed to read response body: {}", e.without_url())))?;

        match format {
            OutputFormat::Json => print_json(&serde_json::json!({
                "status": status.as_u16(),
                "content_type": content_type,
                "body": body,
            }))?,
            OutputFormat::Table => {
                println!("Status: {status}");
                if let Some(content_type) = content_type {
                    println!("Content-Type: {content_type}");
                }
                println!();
                println!("{}", truncate_string(&body, BODY_PREVIEW_CHARS));
            }
        }

        Ok(())
    }

    /// Build request options from the command-line flags
    pub fn options(&self) -> CliResult<RequestOptions> {
        let method = Method::from_bytes(self.method.to_ascii_uppercase().as_bytes())
            .map_err(|_| CliError(format!("Invalid HTTP method: {}", self.method)))?;

        let mut headers = HeaderMap::new();
        for raw in &self.headers {
            let (name, value) = parse_header(raw)?;
            headers.append(name, value);
        }

        let mut options = RequestOptions::new().method(method).headers(headers);
        if let Some(data) = &self.data {
            options = options.body(data.clone());
        }
        Ok(options)
    }
}

fn parse_header(raw: &str) -> CliResult<(HeaderName, HeaderValue)> {
    let (name, value) = raw
        .split_once(':')
        .ok_or_else(|| CliError(format!("Invalid header (expected 'Name: value'): {raw}")))?;

    let name = HeaderName::from_bytes(name.trim().as_bytes())
        .map_err(|e| CliError(format!("Invalid header name '{}': {e}", name.trim())))?;
    let value = HeaderValue::from_str(value.trim())
        .map_err(|e| CliError(format!("Invalid value for header '{name}': {e}")))?;

    Ok((name, value))
}
