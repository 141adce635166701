//! HTTP client module
//!
//! GET client used by the feed layer.
//!
//! # Features
//!
//! - **Optional Retries**: Configurable retry logic with backoff, disabled by default
//! - **Rate Limiting**: Token bucket rate limiter using governor
//! - **Typed Failures**: Non-2xx responses become `Error::HttpStatus`

mod client;
mod rate_limit;

pub use client::{HttpClient, HttpClientConfig, HttpClientConfigBuilder, RequestConfig};
pub use rate_limit::{RateLimiter, RateLimiterConfig};

#[cfg(test)]
mod tests;
