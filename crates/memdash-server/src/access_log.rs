//! Per-request access logging.
//!
//! The outcome of every request is captured as a [`RequestOutcome`] carrying
//! the numeric status. [`Classification`] is derived from that status alone.
//! Logging happens after the response is produced and never changes it.

use std::fmt;

use axum::extract::Request;
use axum::http::{Method, StatusCode, Uri, Version};
use axum::middleware::Next;
use axum::response::Response;
use chrono::{DateTime, Local};
use memdash_logging::ACCESS_TARGET;
use serde::Serialize;

/// Outcome bucket for a completed request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Classification {
    /// Any 2xx status.
    Success,
    /// 404.
    NotFound,
    /// Everything else (redirects, 304, 405, 5xx, ...).
    Other,
}

impl Classification {
    /// Classify a status code.
    pub fn from_status(status: StatusCode) -> Self {
        if status.is_success() {
            Self::Success
        } else if status == StatusCode::NOT_FOUND {
            Self::NotFound
        } else {
            Self::Other
        }
    }

    /// Console marker.
    pub fn marker(self) -> &'static str {
        match self {
            Self::Success => "✅",
            Self::NotFound => "❌",
            Self::Other => "📡",
        }
    }

    /// Lowercase name used as a structured log field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::NotFound => "not_found",
            Self::Other => "other",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Structured result of one request.
#[derive(Clone, Debug)]
pub struct RequestOutcome {
    /// Request method.
    pub method: Method,
    /// URI as received, before alias rewriting.
    pub uri: Uri,
    /// HTTP version.
    pub version: Version,
    /// Final response status.
    pub status: StatusCode,
}

impl RequestOutcome {
    /// Classification of this outcome.
    pub fn classification(&self) -> Classification {
        Classification::from_status(self.status)
    }

    /// Request line and status, e.g. `"GET /memory HTTP/1.1" 200`.
    pub fn log_line(&self) -> String {
        format!(
            "\"{} {} {:?}\" {}",
            self.method,
            self.uri,
            self.version,
            self.status.as_u16()
        )
    }
}

/// Timestamped, classified log record for one request.
#[derive(Clone, Debug, Serialize)]
pub struct RequestRecord {
    /// When the request completed.
    pub timestamp: DateTime<Local>,
    /// Request line and status.
    pub raw_log_line: String,
    /// Outcome bucket.
    pub classification: Classification,
}

impl RequestRecord {
    /// Record an outcome at the current local time.
    pub fn from_outcome(outcome: &RequestOutcome) -> Self {
        Self::at(outcome, Local::now())
    }

    /// Record an outcome at a given time.
    pub fn at(outcome: &RequestOutcome, timestamp: DateTime<Local>) -> Self {
        Self {
            timestamp,
            raw_log_line: outcome.log_line(),
            classification: outcome.classification(),
        }
    }

    /// `[HH:MM:SS] <marker> <line>`.
    pub fn console_line(&self) -> String {
        format!(
            "[{}] {} {}",
            self.timestamp.format("%H:%M:%S"),
            self.classification.marker(),
            self.raw_log_line
        )
    }
}

/// Middleware: emit one access log event per request.
pub async fn log_requests(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();

    let response = next.run(req).await;

    let outcome = RequestOutcome {
        method,
        uri,
        version,
        status: response.status(),
    };
    let _ = emit(&outcome);
    response
}

/// Log `outcome` as its timestamped console line and return the record.
fn emit(outcome: &RequestOutcome) -> RequestRecord {
    let record = RequestRecord::from_outcome(outcome);
    let line = record.console_line();
    let path = outcome.uri.path();
    let status = outcome.status.as_u16();
    match record.classification {
        Classification::NotFound => tracing::warn!(
            target: ACCESS_TARGET,
            method = %outcome.method,
            path,
            status,
            classification = %record.classification,
            "{line}"
        ),
        Classification::Success | Classification::Other => tracing::info!(
            target: ACCESS_TARGET,
            method = %outcome.method,
            path,
            status,
            classification = %record.classification,
            "{line}"
        ),
    }
    record
}
