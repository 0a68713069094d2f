use std::{
    collections::HashMap,
    sync::{Mutex, PoisonError},
};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, instrument};

use crate::domain::{
    common::{QuotaConfig, entities::app_errors::CoreError},
    quota::{
        entities::{CallerKey, QuotaDecision, QuotaStatus},
        ports::QuotaRepository,
    },
};

/// Number of tracked callers above which expired windows are swept.
const PRUNE_THRESHOLD: usize = 1024;

/// Upper bound on the configured window (100 years).
const MAX_WINDOW_SECS: u64 = 100 * 365 * 24 * 60 * 60;

#[derive(Debug, Clone, Copy)]
struct QuotaWindow {
    started_at: DateTime<Utc>,
    count: u32,
}

/// Process-local fixed-window counter. Counts are lost on restart.
#[derive(Debug)]
pub struct InMemoryQuotaRepository {
    max_requests: u32,
    window: Duration,
    windows: Mutex<HashMap<CallerKey, QuotaWindow>>,
}

impl InMemoryQuotaRepository {
    pub fn new(config: &QuotaConfig) -> Self {
        let window_secs = config.window_secs.min(MAX_WINDOW_SECS) as i64;

        Self {
            max_requests: config.max_requests,
            window: Duration::seconds(window_secs),
            windows: Mutex::new(HashMap::new()),
        }
    }

    pub fn record_attempt_at(&self, caller: &CallerKey, now: DateTime<Utc>) -> QuotaDecision {
        let mut windows = self.windows.lock().unwrap_or_else(PoisonError::into_inner);

        if windows.len() > PRUNE_THRESHOLD {
            let window = self.window;
            let before = windows.len();
            windows.retain(|_, w| now < w.started_at + window);
            debug!(pruned = before - windows.len(), "Pruned expired quota windows");
        }

        let entry = windows.entry(caller.clone()).or_insert(QuotaWindow {
            started_at: now,
            count: 0,
        });

        if now >= entry.started_at + self.window {
            *entry = QuotaWindow {
                started_at: now,
                count: 0,
            };
        }

        let allowed = entry.count < self.max_requests;
        if allowed {
            entry.count += 1;
        }

        let status = QuotaStatus {
            limit: self.max_requests,
            remaining: self.max_requests.saturating_sub(entry.count),
            reset_at: entry.started_at + self.window,
            window_secs: self.window.num_seconds().max(0) as u64,
        };

        if allowed {
            QuotaDecision::Allowed(status)
        } else {
            QuotaDecision::Exceeded(status)
        }
    }

    pub fn tracked_callers(&self) -> usize {
        self.windows
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl QuotaRepository for InMemoryQuotaRepository {
    #[instrument(skip(self), fields(caller = %caller))]
    async fn record_attempt(&self, caller: CallerKey) -> Result<QuotaDecision, CoreError> {
        Ok(self.record_attempt_at(&caller, Utc::now()))
    }
}
