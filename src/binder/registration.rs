//! Per-master state built while binding

use super::event::ChangeEvent;
use crate::condition::Condition;
use crate::form::FieldRef;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// A slave waiting for lookups triggered by its master
#[derive(Clone)]
pub struct SlaveRegistration {
    pub field: Arc<dyn FieldRef>,
    pub condition: Condition,
    /// Refresh on the page-load event too
    pub page_load_update: bool,
    pub url: String,
}

impl SlaveRegistration {
    /// Whether this slave takes part in the lookup for `event`
    pub fn should_run(&self, event: &ChangeEvent) -> bool {
        !event.is_page_load() || self.page_load_update
    }
}

/// Synchronous reaction of a master's change handler
#[derive(Clone)]
pub(crate) enum Listener {
    Require {
        slave: Arc<dyn FieldRef>,
        condition: Condition,
    },
    Show {
        slave: Arc<dyn FieldRef>,
        condition: Condition,
    },
    Clone {
        slave: Arc<dyn FieldRef>,
        condition: Condition,
        page_load_update: bool,
    },
    /// Runs the lookup batch over the master's registrations
    AjaxUpdate,
}

/// Everything hanging off one master field
pub(crate) struct MasterBinding {
    pub field: Arc<dyn FieldRef>,
    pub listeners: Vec<Listener>,
    pub registrations: Vec<SlaveRegistration>,
    /// Bumped on every change reaching the lookup listener
    pub sequence: Arc<AtomicU64>,
}

impl MasterBinding {
    pub fn new(field: Arc<dyn FieldRef>) -> Self {
        Self {
            field,
            listeners: Vec::new(),
            registrations: Vec::new(),
            sequence: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Add a lookup slave; the lookup listener is installed on first use only
    pub fn register(&mut self, registration: SlaveRegistration) {
        if self.registrations.is_empty() {
            self.listeners.push(Listener::AjaxUpdate);
        }
        self.registrations.push(registration);
    }

    pub fn next_sequence(&self) -> u64 {
        self.sequence.fetch_add(1, Ordering::SeqCst) + 1
    }
}
