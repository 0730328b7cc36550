//! Lookup work produced by a master change
//!
//! The binder's change handling is synchronous: it evaluates conditions,
//! marks slaves as loading and hands back [`LookupTask`]s. Whoever drives
//! the event loop runs them, awaited in place or spawned and forgotten.

use super::apply::apply_field_value;
use crate::form::{FieldRef, Naming};
use crate::transport::{LookupError, LookupRequest, LookupTransport};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// How a lookup ended
#[derive(Debug)]
pub enum LookupOutcome {
    /// Response applied; number of slaves that got a value
    Applied(usize),
    /// A newer change of the same master superseded this one
    Stale,
    /// Request failed; no value was applied
    Failed(LookupError),
}

/// Guard dropping responses that arrive after a newer request was issued
#[derive(Debug, Clone)]
pub(crate) struct SequenceGuard {
    pub latest: Arc<AtomicU64>,
    pub issued: u64,
}

impl SequenceGuard {
    fn is_stale(&self) -> bool {
        self.latest.load(Ordering::SeqCst) != self.issued
    }
}

/// One pending lookup request and the slaves it feeds
pub struct LookupTask {
    pub(crate) request: LookupRequest,
    pub(crate) slaves: Vec<Arc<dyn FieldRef>>,
    pub(crate) transport: Arc<dyn LookupTransport>,
    pub(crate) naming: Naming,
    pub(crate) timeout: Option<Duration>,
    pub(crate) guard: Option<SequenceGuard>,
}

impl LookupTask {
    pub fn request(&self) -> &LookupRequest {
        &self.request
    }

    /// DOM ids of the slaves waiting on this lookup
    pub fn slave_ids(&self) -> Vec<String> {
        self.slaves.iter().map(|s| s.dom_id()).collect()
    }

    /// Response key for a slave: its `name`, else its DOM id without prefix
    fn slave_key(&self, slave: &dyn FieldRef) -> String {
        slave
            .name()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.naming.strip_prefix(&slave.dom_id()).to_string())
    }

    /// Send the request and apply the response.
    ///
    /// Loading markers of every slave are cleared whatever the outcome.
    pub async fn run(self) -> LookupOutcome {
        let result = match self.timeout {
            Some(limit) => tokio::time::timeout(limit, self.transport.lookup(&self.request))
                .await
                .unwrap_or_else(|_| Err(LookupError::Timeout(limit.as_millis() as u64))),
            None => self.transport.lookup(&self.request).await,
        };

        let outcome = match result {
            Ok(_) if self.guard.as_ref().is_some_and(SequenceGuard::is_stale) => {
                tracing::debug!("Discarding stale lookup response from {}", self.request.url);
                LookupOutcome::Stale
            }
            Ok(values) => {
                let mut applied = 0;
                for slave in &self.slaves {
                    if let Some(value) = values.get(&self.slave_key(slave.as_ref())) {
                        apply_field_value(slave.as_ref(), value);
                        applied += 1;
                    }
                }
                LookupOutcome::Applied(applied)
            }
            Err(e) => {
                tracing::warn!("Lookup {} failed: {e}", self.request.url);
                LookupOutcome::Failed(e)
            }
        };

        for slave in &self.slaves {
            slave.set_loading(false);
        }
        outcome
    }
}
