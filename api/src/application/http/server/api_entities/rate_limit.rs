use axum::{
    http::{HeaderName, HeaderValue, header::RETRY_AFTER},
    response::{IntoResponseParts, ResponseParts},
};
use chrono::Utc;
use nutrilens_core::domain::quota::QuotaStatus;

pub const RATE_LIMIT_LIMIT: HeaderName = HeaderName::from_static("ratelimit-limit");
pub const RATE_LIMIT_REMAINING: HeaderName = HeaderName::from_static("ratelimit-remaining");
pub const RATE_LIMIT_RESET: HeaderName = HeaderName::from_static("ratelimit-reset");

/// `RateLimit-*` headers describing the caller's quota window. Adds
/// `Retry-After` when the quota is exhausted.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitHeaders {
    status: QuotaStatus,
    retry_after: bool,
}

impl RateLimitHeaders {
    pub fn allowed(status: QuotaStatus) -> Self {
        Self {
            status,
            retry_after: false,
        }
    }

    pub fn exceeded(status: QuotaStatus) -> Self {
        Self {
            status,
            retry_after: true,
        }
    }
}

impl IntoResponseParts for RateLimitHeaders {
    type Error = std::convert::Infallible;

    fn into_response_parts(self, mut res: ResponseParts) -> Result<ResponseParts, Self::Error> {
        let reset = self.status.seconds_until_reset(Utc::now());
        let headers = res.headers_mut();

        headers.insert(RATE_LIMIT_LIMIT, HeaderValue::from(self.status.limit));
        headers.insert(RATE_LIMIT_REMAINING, HeaderValue::from(self.status.remaining));
        headers.insert(RATE_LIMIT_RESET, HeaderValue::from(reset));
        if self.retry_after {
            headers.insert(RETRY_AFTER, HeaderValue::from(reset));
        }

        Ok(res)
    }
}
