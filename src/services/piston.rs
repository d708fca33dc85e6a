/// Client for the Piston code-execution API.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde_json::Value;

pub const DEFAULT_API_URL: &str = "https://emkc.org/api/internal/piston/execute";

/// Value of the response `status` field on a successful run.
const SUCCESS_STATUS: &str = "ok";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionRequest {
    /// Canonical Piston identifier (already resolved from the user's alias)
    pub language: String,
    pub source: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendFailure {
    /// Empty or non-JSON body, or no `status` field
    InvalidResponse,
    /// Non-ok status or missing output
    ExecutionProblem,
}

impl BackendFailure {
    pub fn reason(&self) -> &'static str {
        match self {
            BackendFailure::InvalidResponse => "invalid response",
            BackendFailure::ExecutionProblem => "execution problem",
        }
    }
}

impl fmt::Display for BackendFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.reason())
    }
}

/// Outcome of one `run` invocation, consumed once by the formatter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecutionResult {
    Success { lines: Vec<String> },
    UnsupportedLanguage { alias: String },
    MalformedInput,
    BackendError { reason: BackendFailure },
}

#[derive(Debug, thiserror::Error)]
pub enum PistonError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to Piston failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Anything that can execute a request. `PistonClient` in production,
/// canned responses in tests.
#[async_trait]
pub trait ExecutionBackend: Send + Sync {
    async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult;
}

#[derive(Debug)]
pub struct PistonClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl PistonClient {
    pub fn new(api_url: &str, api_key: &str, timeout: Duration) -> Result<Self, PistonError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(PistonError::Client)?;
        Ok(Self {
            http,
            api_url: api_url.to_string(),
            api_key: api_key.to_string(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// POST the request and return the raw response body.
    async fn post(&self, request: &ExecutionRequest) -> Result<String, PistonError> {
        let params = [
            ("language", request.language.as_str()),
            ("source", request.source.as_str()),
        ];
        let response = self.http
            .post(&self.api_url)
            .header(AUTHORIZATION, self.api_key.as_str())
            .form(&params)
            .send()
            .await?;
        Ok(response.text().await?)
    }
}

#[async_trait]
impl ExecutionBackend for PistonClient {
    async fn execute(&self, request: &ExecutionRequest) -> ExecutionResult {
        match self.post(request).await {
            Ok(body) => interpret_response(&body),
            Err(e) => {
                let ts = chrono::Local::now().format("%H:%M:%S");
                println!("  [{ts}]   ⚠ Piston error: {e}");
                ExecutionResult::BackendError { reason: BackendFailure::InvalidResponse }
            }
        }
    }
}

/// Interpret a Piston response body: `{"status": "ok", "payload": {"output": "..."}}`
pub fn interpret_response(body: &str) -> ExecutionResult {
    let invalid = ExecutionResult::BackendError { reason: BackendFailure::InvalidResponse };
    let problem = ExecutionResult::BackendError { reason: BackendFailure::ExecutionProblem };

    let Ok(json) = serde_json::from_str::<Value>(body) else {
        return invalid;
    };
    let Some(obj) = json.as_object().filter(|o| !o.is_empty()) else {
        return invalid;
    };
    let Some(status) = obj.get("status") else {
        return invalid;
    };
    if status.as_str() != Some(SUCCESS_STATUS) {
        return problem;
    }
    let Some(output) = obj.get("payload")
        .and_then(|p| p.get("output"))
        .and_then(Value::as_str)
    else {
        return problem;
    };

    ExecutionResult::Success {
        lines: output.split('\n').map(String::from).collect(),
    }
}
