//! Flight provider port.
//!
//! A provider executes one round-trip search and either returns priced
//! offers or fails with a [`ProviderError`] whose [`FailureKind`] tells the
//! monitor how to describe the failure to operators.

use std::fmt;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;

use crate::domain::{Offer, SearchWindow};

/// Classification of a provider failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The provider throttled the request.
    RateLimited,
    /// Credentials were rejected.
    Unauthorized,
    /// Anything else: network failures, server errors, bad payloads.
    TransportError,
}

impl FailureKind {
    /// Classify a raw failure message.
    #[must_use]
    pub fn classify(message: &str) -> Self {
        let lower = message.to_ascii_lowercase();
        if lower.contains("429") || lower.contains("too many requests") || lower.contains("rate limit") {
            Self::RateLimited
        } else if lower.contains("401")
            || lower.contains("403")
            || lower.contains("unauthorized")
            || lower.contains("forbidden")
            || lower.contains("invalid_client")
            || lower.contains("credential")
        {
            Self::Unauthorized
        } else {
            Self::TransportError
        }
    }

    /// Classify an HTTP status code returned by a provider API.
    #[must_use]
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => Self::RateLimited,
            401 | 403 => Self::Unauthorized,
            _ => Self::TransportError,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RateLimited => "rate_limited",
            Self::Unauthorized => "unauthorized",
            Self::TransportError => "transport_error",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A failed provider search.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("[{provider}] {message}")]
pub struct ProviderError {
    pub provider: String,
    pub kind: FailureKind,
    pub message: String,
}

impl ProviderError {
    /// Create an error, classifying it from the message text.
    pub fn new(provider: impl Into<String>, message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            provider: provider.into(),
            kind: FailureKind::classify(&message),
            message,
        }
    }

    /// Create an error with an explicit classification.
    pub fn with_kind(
        provider: impl Into<String>,
        kind: FailureKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            provider: provider.into(),
            kind,
            message: message.into(),
        }
    }
}

/// Capability to search for round-trip fares.
///
/// Implementations own their request timeouts; callers never impose one.
#[async_trait]
pub trait FlightProvider: Send + Sync {
    /// Search for offers matching an already-normalized window.
    async fn search(&self, window: &SearchWindow) -> Result<Vec<Offer>, ProviderError>;

    /// Provider name for logs and status reporting.
    fn name(&self) -> &'static str;

    /// Whether the provider is configured well enough to answer searches,
    /// as far as it can tell without making a request.
    fn is_ready(&self) -> bool {
        true
    }
}
