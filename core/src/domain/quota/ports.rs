use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    quota::entities::{CallerKey, QuotaDecision},
};

/// Per-caller attempt counter over a fixed window.
#[cfg_attr(test, mockall::automock)]
pub trait QuotaRepository: Send + Sync {
    /// Atomically checks the caller's window and, when there is room,
    /// counts one attempt against it.
    fn record_attempt(
        &self,
        caller: CallerKey,
    ) -> impl Future<Output = Result<QuotaDecision, CoreError>> + Send;
}
