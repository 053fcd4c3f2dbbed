use std::fmt;

use gemini_relay::interceptor::ClassifiedError;

#[derive(Debug)]
pub struct CliError(pub String);

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CliError {}

impl From<gemini_relay::RelayError> for CliError {
    fn from(e: gemini_relay::RelayError) -> Self {
        CliError(e.to_string())
    }
}

impl From<ClassifiedError> for CliError {
    fn from(e: ClassifiedError) -> Self {
        CliError(format!("{}: {}", e.name(), e.message()))
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError(format!("JSON error: {e}"))
    }
}

pub type CliResult<T> = Result<T, CliError>;
